//! Philips Hue lights over the bridge's local REST API
//!
//! Groups are addressed by name; the bridge is asked for the id on every call
//! so renames in the Hue app are picked up without a restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jarvis::{config::LightsConfig, CapabilityError, CapabilityResult, LightControl, LightOp};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

/// Named colors as CIE xy coordinates, longest names first
pub const COLORS: &[(&str, [f32; 2])] = &[
    ("warm white", [0.4596, 0.4105]),
    ("orange", [0.5614, 0.4156]),
    ("yellow", [0.4432, 0.5154]),
    ("purple", [0.2725, 0.1096]),
    ("white", [0.3227, 0.3290]),
    ("green", [0.2151, 0.7106]),
    ("blue", [0.1670, 0.0400]),
    ("pink", [0.4149, 0.1776]),
    ("red", [0.6750, 0.3220]),
];

/// Brightness used for "dim" without a number
const DIM_LEVEL: u8 = 64;
const MAX_LEVEL: u8 = 254;

static PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,3})\s*(?:%|percent)").expect("valid percent regex"));

/// What a free-form light command asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightRequest {
    pub group: String,
    pub ops: Vec<LightOp>,
}

pub fn color_xy(name: &str) -> Option<[f32; 2]> {
    let name = name.trim().to_lowercase();
    COLORS.iter().find(|(c, _)| *c == name).map(|(_, xy)| *xy)
}

pub fn percent_to_level(percent: u32) -> u8 {
    let percent = percent.min(100);
    ((percent * u32::from(MAX_LEVEL) + 50) / 100).max(1) as u8
}

pub fn level_to_percent(level: u8) -> u32 {
    (u32::from(level) * 100 + u32::from(MAX_LEVEL) / 2) / u32::from(MAX_LEVEL)
}

/// Work out the target group and operations from a spoken request
pub fn parse_light_request(text: &str, groups: &[String], default_group: &str) -> LightRequest {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .collect();

    let group = groups
        .iter()
        .filter(|g| !g.is_empty() && lower.contains(&g.to_lowercase()))
        .max_by_key(|g| g.len())
        .cloned()
        .unwrap_or_else(|| default_group.to_string());

    if words.contains(&"off") {
        return LightRequest {
            group,
            ops: vec![LightOp::Off],
        };
    }

    let mut ops = Vec::new();
    if let Some(percent) = PERCENT
        .captures(&lower)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
    {
        ops.push(LightOp::Brightness(percent_to_level(percent)));
    } else if words.iter().any(|w| w.starts_with("dim") || *w == "darker") {
        ops.push(LightOp::Brightness(DIM_LEVEL));
    } else if words.iter().any(|w| w.starts_with("bright")) {
        ops.push(LightOp::Brightness(MAX_LEVEL));
    }

    if let Some((color, _)) = COLORS.iter().find(|(c, _)| lower.contains(c)) {
        ops.push(LightOp::Color(color.to_string()));
    }

    ops.insert(0, LightOp::On);
    LightRequest { group, ops }
}

/// Confirmation text for a set of operations on one group
pub fn describe(group: &str, ops: &[LightOp]) -> String {
    match ops {
        [LightOp::Off] => format!("Turned off {}.", group),
        [LightOp::On] | [] => format!("Turned on {}.", group),
        _ => {
            let parts: Vec<String> = ops
                .iter()
                .filter_map(|op| match op {
                    LightOp::Brightness(level) => {
                        Some(format!("{}% brightness", level_to_percent(*level)))
                    }
                    LightOp::Color(color) => Some(color.clone()),
                    LightOp::On | LightOp::Off => None,
                })
                .collect();
            format!("Set {} to {}.", group, parts.join(" and "))
        }
    }
}

fn state_body(op: &LightOp) -> CapabilityResult<Value> {
    Ok(match op {
        LightOp::On => json!({ "on": true }),
        LightOp::Off => json!({ "on": false }),
        LightOp::Brightness(level) => json!({ "on": true, "bri": level }),
        LightOp::Color(name) => {
            let xy = color_xy(name)
                .ok_or_else(|| CapabilityError::failed(format!("I don't know the color {}.", name)))?;
            json!({ "on": true, "xy": xy })
        }
    })
}

/// First error description in a bridge response, if any
pub fn bridge_error(body: &Value) -> Option<String> {
    body.as_array()?
        .iter()
        .find_map(|entry| entry["error"]["description"].as_str())
        .map(str::to_string)
}

/// `id → name` from a `/groups` or `/lights` listing
pub fn names_by_id(body: &Value) -> BTreeMap<String, String> {
    body.as_object()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|(id, entry)| Some((id.clone(), entry["name"].as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

pub struct HueLights {
    client: reqwest::Client,
    base_url: Option<String>,
    default_group: String,
}

impl HueLights {
    pub fn new(config: &LightsConfig, default_group: &str) -> Self {
        let base_url = match (&config.bridge_ip, &config.username) {
            (Some(ip), Some(user)) => Some(format!("http://{}/api/{}", ip, user)),
            _ => {
                tracing::warn!("Hue bridge not configured - light commands will fail");
                None
            }
        };

        Self {
            client: reqwest::Client::new(),
            base_url,
            default_group: default_group.to_string(),
        }
    }

    fn base_url(&self) -> CapabilityResult<&str> {
        self.base_url
            .as_deref()
            .ok_or_else(|| CapabilityError::NotConfigured("The Philips Hue bridge".into()))
    }

    async fn get(&self, path: &str) -> CapabilityResult<Value> {
        let url = format!("{}/{}", self.base_url()?, path);
        let body: Value = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CapabilityError::unreachable("the Hue bridge", e))?
            .json()
            .await
            .map_err(|e| CapabilityError::unreachable("the Hue bridge", e))?;

        match bridge_error(&body) {
            Some(error) => Err(CapabilityError::failed(format!("Hue bridge error: {}", error))),
            None => Ok(body),
        }
    }

    async fn groups(&self) -> CapabilityResult<BTreeMap<String, String>> {
        Ok(names_by_id(&self.get("groups").await?))
    }

    async fn group_id(&self, name: &str) -> CapabilityResult<String> {
        self.groups()
            .await?
            .into_iter()
            .find(|(_, group)| group.eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
            .ok_or_else(|| CapabilityError::failed(format!("I couldn't find a light group called {}.", name)))
    }

    async fn apply(&self, group_id: &str, op: &LightOp) -> CapabilityResult<()> {
        let url = format!("{}/groups/{}/action", self.base_url()?, group_id);
        let body: Value = self
            .client
            .put(&url)
            .json(&state_body(op)?)
            .send()
            .await
            .map_err(|e| CapabilityError::unreachable("the Hue bridge", e))?
            .json()
            .await
            .map_err(|e| CapabilityError::unreachable("the Hue bridge", e))?;

        match bridge_error(&body) {
            Some(error) => Err(CapabilityError::failed(format!("Hue bridge error: {}", error))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LightControl for HueLights {
    async fn control(&self, group: &str, op: LightOp) -> CapabilityResult<String> {
        let id = self.group_id(group).await?;
        self.apply(&id, &op).await?;
        tracing::debug!("Hue group {} ({}) ← {:?}", group, id, op);
        Ok(describe(group, std::slice::from_ref(&op)))
    }

    async fn command(&self, text: &str) -> CapabilityResult<String> {
        let groups = self.groups().await?;
        let names: Vec<String> = groups.values().cloned().collect();
        let request = parse_light_request(text, &names, &self.default_group);

        let id = groups
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(&request.group))
            .map(|(id, _)| id.clone())
            .ok_or_else(|| {
                CapabilityError::failed(format!(
                    "I couldn't find a light group called {}.",
                    request.group
                ))
            })?;

        for op in &request.ops {
            self.apply(&id, op).await?;
        }

        tracing::info!("Light request '{}' → {:?}", text, request);
        Ok(describe(&request.group, &request.ops))
    }

    async fn light_names(&self) -> CapabilityResult<Vec<String>> {
        let mut names: Vec<String> = names_by_id(&self.get("lights").await?)
            .into_values()
            .collect();
        names.sort();
        Ok(names)
    }
}
