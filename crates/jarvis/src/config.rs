//! Configuration management for Jarvis
//!
//! Loaded from ~/.jarvis/config.toml. Every section has defaults, so a
//! missing file or a partial file both work.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{modes::ModeDefinition, JarvisError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JarvisConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Replaces the built-in modes when non-empty
    #[serde(default)]
    pub modes: Vec<ModeDefinition>,

    #[serde(default)]
    pub lights: LightsConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    /// Application name → launch command
    #[serde(default)]
    pub apps: BTreeMap<String, String>,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_home_site")]
    pub home_site: String,

    #[serde(default = "default_music_url")]
    pub music_url: String,

    /// Light group targeted by the built-in modes
    #[serde(default = "default_light_group")]
    pub light_group: String,

    #[serde(default = "default_movie_page")]
    pub movie_page: String,

    #[serde(default = "default_scheme")]
    pub default_scheme: String,
}

fn default_home_site() -> String {
    "http://beautech.nl".to_string()
}

fn default_music_url() -> String {
    "https://music.youtube.com".to_string()
}

fn default_light_group() -> String {
    "Slaapkamer".to_string()
}

fn default_movie_page() -> String {
    "app/templates/movies.html".to_string()
}

fn default_scheme() -> String {
    "http://".to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            home_site: default_home_site(),
            music_url: default_music_url(),
            light_group: default_light_group(),
            movie_page: default_movie_page(),
            default_scheme: default_scheme(),
        }
    }
}

impl AssistantConfig {
    /// Home site without scheme or trailing slash, e.g. `beautech.nl`
    pub fn home_host(&self) -> String {
        let site = self.home_site.trim();
        let lower = site.to_lowercase();
        let without_scheme = ["https://", "http://"]
            .iter()
            .find_map(|scheme| lower.strip_prefix(scheme))
            .unwrap_or(&lower);
        without_scheme.trim_end_matches('/').to_string()
    }
}

/// Philips Hue bridge access
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LightsConfig {
    #[serde(default)]
    pub bridge_ip: Option<String>,

    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_model")]
    pub model: String,

    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
            endpoint: default_openai_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_city")]
    pub city: String,

    #[serde(default = "default_units")]
    pub units: String,
}

fn default_city() -> String {
    "Amsterdam".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            city: default_city(),
            units: default_units(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// MAC address of the PC woken by "wake my pc"
    #[serde(default)]
    pub wake_mac: Option<String>,

    #[serde(default = "default_wake_broadcast")]
    pub wake_broadcast: String,

    #[serde(default = "default_speed_test_url")]
    pub speed_test_url: String,

    #[serde(default = "default_ping_count")]
    pub ping_count: u8,
}

fn default_wake_broadcast() -> String {
    "255.255.255.255:9".to_string()
}

fn default_speed_test_url() -> String {
    "https://speed.cloudflare.com/__down?bytes=10000000".to_string()
}

fn default_ping_count() -> u8 {
    4
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            wake_mac: None,
            wake_broadcast: default_wake_broadcast(),
            speed_test_url: default_speed_test_url(),
            ping_count: default_ping_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Defaults to the platform data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("jarvis")
        })
    }
}

impl JarvisConfig {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".jarvis")
            .join("config.toml")
    }

    /// Load from the default path, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str::<JarvisConfig>(&content)?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            JarvisConfig::default()
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Secrets may come from the environment instead of the file
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai.api_key.get_or_insert(key);
        }
        if let Ok(ip) = std::env::var("HUE_BRIDGE_IP") {
            self.lights.bridge_ip.get_or_insert(ip);
        }
        if let Ok(user) = std::env::var("HUE_USERNAME") {
            self.lights.username.get_or_insert(user);
        }
        if let Ok(key) = std::env::var("WEATHER_API_KEY") {
            self.weather.api_key.get_or_insert(key);
        }
    }

    pub fn validate(&self) -> Result<()> {
        let scheme = &self.assistant.default_scheme;
        if !scheme.ends_with("://") {
            return Err(JarvisError::ConfigError(format!(
                "default_scheme ({}) must end with \"://\"",
                scheme
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for mode in &self.modes {
            if mode.name.trim().is_empty() {
                return Err(JarvisError::ConfigError("mode name must not be empty".into()));
            }
            if !seen.insert(mode.name.trim().to_lowercase()) {
                return Err(JarvisError::ConfigError(format!(
                    "mode '{}' is defined twice",
                    mode.name
                )));
            }
        }

        Ok(())
    }

    /// Configured modes, or the built-in set when none are configured
    pub fn resolved_modes(&self) -> Vec<ModeDefinition> {
        if self.modes.is_empty() {
            crate::modes::default_modes(&self.assistant)
        } else {
            self.modes.clone()
        }
    }
}
