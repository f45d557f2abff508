//! Command dispatcher
//!
//! normalize → match → extract → call capability → assemble response.
//! Nothing here retries or rolls back; every path ends in a [`Response`].

use tracing::{debug, warn};

use crate::{
    capabilities::{Capabilities, CapabilityError, CapabilityResult, NetworkCheck, TodoOp},
    command::NormalizedCommand,
    config::JarvisConfig,
    extract::normalize_url,
    intent::{rules::default_rules, Action, FailurePolicy, IntentMatcher, IntentRule},
    modes::{ModeDefinition, ModeHandler},
    response::Response,
    Result,
};

/// Spoken when the fallback responder itself fails
pub const FALLBACK_APOLOGY: &str = "Sorry, I couldn't come up with an answer right now.";

pub struct Dispatcher {
    matcher: IntentMatcher,
    modes: ModeHandler,
    capabilities: Capabilities,
    default_scheme: String,
}

impl Dispatcher {
    /// Dispatcher with the standard rule table and the configured modes
    pub fn new(config: &JarvisConfig, capabilities: Capabilities) -> Result<Self> {
        let modes = config.resolved_modes();
        let rules = default_rules(&config.assistant, &modes)?;
        Ok(Self::with_rules(
            rules,
            modes,
            capabilities,
            config.assistant.default_scheme.clone(),
        ))
    }

    pub fn with_rules(
        rules: Vec<IntentRule>,
        modes: Vec<ModeDefinition>,
        capabilities: Capabilities,
        default_scheme: impl Into<String>,
    ) -> Self {
        Self {
            matcher: IntentMatcher::new(rules),
            modes: ModeHandler::new(modes, capabilities.clone()),
            capabilities,
            default_scheme: default_scheme.into(),
        }
    }

    pub fn matcher(&self) -> &IntentMatcher {
        &self.matcher
    }

    pub fn modes(&self) -> &ModeHandler {
        &self.modes
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Interpret one command
    pub async fn interpret(&self, command: &str) -> Response {
        let command = NormalizedCommand::new(command);

        let Some(rule) = self.matcher.find(&command) else {
            debug!("No intent matched '{}', using fallback", command);
            return self.fallback(&command).await;
        };

        debug!(intent = rule.name, "Matched '{}'", command);

        let parameter = match &rule.parameter {
            Some(parameter) => match parameter.extract(command.original()) {
                Some(value) => Some(value),
                None => {
                    debug!(intent = rule.name, "Parameter missing, asking for clarification");
                    return Response::spoken(parameter.clarification.clone());
                }
            },
            None => None,
        };

        match self.invoke(rule, &command, parameter).await {
            Ok(response) => response,
            Err(e) => {
                warn!(intent = rule.name, "Capability failed: {}", e);
                match &rule.on_failure {
                    FailurePolicy::Surface => Response::new(e.to_string(), rule.speak),
                    FailurePolicy::Apologize(apology) => Response::new(apology.clone(), rule.speak),
                }
            }
        }
    }

    /// Run the rule's action. Modes produce their own response; every other
    /// action yields text that is spoken according to the rule.
    ///
    /// Rules whose action needs an argument but carry no [`ParameterRule`]
    /// fail with [`CapabilityError::MissingParameter`].
    ///
    /// [`ParameterRule`]: crate::intent::ParameterRule
    async fn invoke(
        &self,
        rule: &IntentRule,
        command: &NormalizedCommand,
        parameter: Option<String>,
    ) -> CapabilityResult<Response> {
        let caps = &self.capabilities;

        let text = match &rule.action {
            Action::StartMode => return Ok(self.modes.run(command).await),
            Action::Reply(text) => text.clone(),
            Action::Briefing => caps.briefing.briefing().await?,
            Action::Media(op) => caps.media.media(*op).await?,
            Action::Power(op) => caps.power.power(*op).await?,
            Action::Ping => {
                let host = required(rule, parameter)?;
                caps.network.diagnose(NetworkCheck::Ping(host)).await?
            }
            Action::SpeedTest => caps.network.diagnose(NetworkCheck::SpeedTest).await?,
            Action::AddTask => {
                let task = required(rule, parameter)?;
                caps.todo.todo(TodoOp::Add(task)).await?
            }
            Action::ListTasks => caps.todo.todo(TodoOp::List).await?,
            Action::ClearTasks => caps.todo.todo(TodoOp::Clear).await?,
            Action::Lights => caps.lights.command(command.original()).await?,
            Action::Weather => caps.weather.weather().await?,
            Action::OpenPage { url, reply } => {
                caps.web.open(url).await?;
                reply.clone()
            }
            Action::OpenWebsite => {
                let url = normalize_url(&required(rule, parameter)?, &self.default_scheme);
                caps.web.open(&url).await?;
                String::new()
            }
            Action::LaunchApp => caps.apps.launch(&required(rule, parameter)?).await?,
            Action::Metric(kind) => caps.metrics.metric(*kind).await?,
            Action::Fun(kind) => caps.fun.fun(*kind).await?,
        };

        Ok(Response::new(text, rule.speak))
    }

    async fn fallback(&self, command: &NormalizedCommand) -> Response {
        match self.capabilities.responder.answer(command.original()).await {
            Ok(answer) => Response::spoken(answer),
            Err(e) => {
                warn!("Fallback responder failed: {}", e);
                Response::spoken(FALLBACK_APOLOGY)
            }
        }
    }
}

fn required(rule: &IntentRule, parameter: Option<String>) -> CapabilityResult<String> {
    parameter.ok_or_else(|| CapabilityError::MissingParameter(rule.name.to_string()))
}
