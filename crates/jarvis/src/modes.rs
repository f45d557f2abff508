//! Composite "scene" modes
//!
//! A mode is a fixed sequence of capability calls ("start movie mode" dims the
//! bedroom lights and opens the movie page). Steps run in order and each one
//! fails on its own: a dead light bridge never stops the page from opening.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    capabilities::{Capabilities, CapabilityResult, LightOp},
    command::NormalizedCommand,
    config::AssistantConfig,
    response::Response,
};

/// One capability call inside a mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ModeStep {
    LightOn { group: String },
    Brightness { group: String, level: u8 },
    Color { group: String, color: String },
    OpenPage { url: String },
    LaunchApp { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDefinition {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<ModeStep>,
}

impl ModeDefinition {
    pub fn new(name: impl Into<String>, steps: Vec<ModeStep>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Phrase that starts this mode, e.g. "start movie mode"
    pub fn trigger_phrase(&self) -> String {
        format!("start {} mode", self.name.trim().to_lowercase())
    }
}

/// Movie, work and code modes, all aimed at the configured light group
pub fn default_modes(assistant: &AssistantConfig) -> Vec<ModeDefinition> {
    let group = || assistant.light_group.clone();

    vec![
        ModeDefinition::new(
            "movie",
            vec![
                ModeStep::LightOn { group: group() },
                ModeStep::Brightness {
                    group: group(),
                    level: 13,
                },
                ModeStep::Color {
                    group: group(),
                    color: "orange".into(),
                },
                ModeStep::OpenPage {
                    url: assistant.movie_page.clone(),
                },
            ],
        ),
        ModeDefinition::new(
            "work",
            vec![
                ModeStep::LightOn { group: group() },
                ModeStep::Brightness {
                    group: group(),
                    level: 127,
                },
                ModeStep::LaunchApp {
                    name: "Microsoft Teams".into(),
                },
            ],
        ),
        ModeDefinition::new(
            "code",
            vec![
                ModeStep::LightOn { group: group() },
                ModeStep::Color {
                    group: group(),
                    color: "blue".into(),
                },
                ModeStep::Brightness {
                    group: group(),
                    level: 180,
                },
                ModeStep::LaunchApp {
                    name: "PyCharm".into(),
                },
                ModeStep::OpenPage {
                    url: "https://docs.python.org/3/".into(),
                },
            ],
        ),
    ]
}

/// Runs mode step sequences against the capability providers
pub struct ModeHandler {
    modes: Vec<ModeDefinition>,
    capabilities: Capabilities,
}

impl ModeHandler {
    pub fn new(modes: Vec<ModeDefinition>, capabilities: Capabilities) -> Self {
        Self {
            modes,
            capabilities,
        }
    }

    pub fn modes(&self) -> &[ModeDefinition] {
        &self.modes
    }

    pub fn find(&self, command: &NormalizedCommand) -> Option<&ModeDefinition> {
        self.modes
            .iter()
            .find(|mode| command.contains(&mode.trigger_phrase()))
    }

    /// Start the mode named in the command.
    ///
    /// Always `{ "", speak: false }` for a known mode, whatever the steps did.
    pub async fn run(&self, command: &NormalizedCommand) -> Response {
        let Some(mode) = self.find(command) else {
            return Response::spoken(self.clarification());
        };

        info!("Starting {} mode ({} steps)", mode.name, mode.steps.len());

        for step in &mode.steps {
            if let Err(e) = self.run_step(step).await {
                warn!(mode = %mode.name, ?step, "Mode step failed: {}", e);
            }
        }

        Response::done()
    }

    async fn run_step(&self, step: &ModeStep) -> CapabilityResult<()> {
        match step {
            ModeStep::LightOn { group } => {
                self.capabilities.lights.control(group, LightOp::On).await?;
            }
            ModeStep::Brightness { group, level } => {
                self.capabilities
                    .lights
                    .control(group, LightOp::Brightness(*level))
                    .await?;
            }
            ModeStep::Color { group, color } => {
                self.capabilities
                    .lights
                    .control(group, LightOp::Color(color.clone()))
                    .await?;
            }
            ModeStep::OpenPage { url } => {
                self.capabilities.web.open(url).await?;
            }
            ModeStep::LaunchApp { name } => {
                self.capabilities.apps.launch(name).await?;
            }
        }
        Ok(())
    }

    /// Spoken when a mode command names no known mode
    pub fn clarification(&self) -> String {
        let names: Vec<String> = self
            .modes
            .iter()
            .map(|mode| format!("'{} mode'", mode.name.trim().to_lowercase()))
            .collect();

        let listed = match names.as_slice() {
            [] => return "I'm not sure which mode you want to start.".to_string(),
            [only] => only.clone(),
            [first, second] => format!("{} or {}", first, second),
            [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
        };

        format!(
            "I'm not sure which mode you want to start. Please specify {}.",
            listed
        )
    }
}
