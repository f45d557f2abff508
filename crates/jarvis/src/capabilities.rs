//! Capability interfaces the engine calls out to
//!
//! Every action with a side effect or an external data source lives behind one
//! of these traits. The engine only sees the returned display string (or the
//! failure), so providers can be swapped for fakes in tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Failure reported by a capability provider.
///
/// The `Display` text is user-facing: for rules that surface provider errors
/// it becomes the response text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    #[error("{0}")]
    Failed(String),

    #[error("{0} is not configured.")]
    NotConfigured(String),

    #[error("I couldn't reach {service}: {message}")]
    Unreachable { service: String, message: String },

    #[error("{0} is not supported on this system.")]
    Unsupported(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),
}

impl CapabilityError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn unreachable(service: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Unreachable {
            service: service.into(),
            message: message.to_string(),
        }
    }
}

pub type CapabilityResult<T> = std::result::Result<T, CapabilityError>;

/// Light operations addressed to a light group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightOp {
    On,
    Off,
    /// Hue-style brightness, 0-254
    Brightness(u8),
    Color(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Cpu,
    Ram,
    Temperature,
    Gpu,
    Time,
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::Cpu => write!(f, "cpu"),
            MetricKind::Ram => write!(f, "ram"),
            MetricKind::Temperature => write!(f, "temperature"),
            MetricKind::Gpu => write!(f, "gpu"),
            MetricKind::Time => write!(f, "time"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerOp {
    Shutdown,
    Reboot,
    /// Wake the configured desktop over the network
    WakeRemote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkCheck {
    Ping(String),
    SpeedTest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoOp {
    Add(String),
    List,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaOp {
    PlayPause,
    Next,
    Previous,
    VolumeUp,
    VolumeDown,
    Mute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunKind {
    Joke,
    Fact,
}

#[async_trait]
pub trait LightControl: Send + Sync {
    async fn control(&self, group: &str, op: LightOp) -> CapabilityResult<String>;

    /// Handle a free-form light request such as "dim the bedroom lights"
    async fn command(&self, text: &str) -> CapabilityResult<String>;

    async fn light_names(&self) -> CapabilityResult<Vec<String>>;
}

#[async_trait]
pub trait SystemMetrics: Send + Sync {
    async fn metric(&self, kind: MetricKind) -> CapabilityResult<String>;
}

#[async_trait]
pub trait SystemPower: Send + Sync {
    async fn power(&self, op: PowerOp) -> CapabilityResult<String>;
}

#[async_trait]
pub trait WebOpener: Send + Sync {
    async fn open(&self, url: &str) -> CapabilityResult<()>;
}

#[async_trait]
pub trait AppLauncher: Send + Sync {
    async fn launch(&self, name: &str) -> CapabilityResult<String>;
}

#[async_trait]
pub trait NetworkDiagnostics: Send + Sync {
    async fn diagnose(&self, check: NetworkCheck) -> CapabilityResult<String>;
}

#[async_trait]
pub trait TodoList: Send + Sync {
    async fn todo(&self, op: TodoOp) -> CapabilityResult<String>;

    /// Raw task list for UI consumers
    async fn tasks(&self) -> CapabilityResult<Vec<String>>;
}

#[async_trait]
pub trait MediaControl: Send + Sync {
    async fn media(&self, op: MediaOp) -> CapabilityResult<String>;
}

#[async_trait]
pub trait WeatherReport: Send + Sync {
    async fn weather(&self) -> CapabilityResult<String>;
}

#[async_trait]
pub trait Entertainment: Send + Sync {
    async fn fun(&self, kind: FunKind) -> CapabilityResult<String>;
}

#[async_trait]
pub trait Briefing: Send + Sync {
    async fn briefing(&self) -> CapabilityResult<String>;
}

/// Open-ended answer used when no rule matches
#[async_trait]
pub trait GenericResponder: Send + Sync {
    async fn answer(&self, text: &str) -> CapabilityResult<String>;
}

/// The full set of providers a dispatcher works with
#[derive(Clone)]
pub struct Capabilities {
    pub lights: Arc<dyn LightControl>,
    pub metrics: Arc<dyn SystemMetrics>,
    pub power: Arc<dyn SystemPower>,
    pub web: Arc<dyn WebOpener>,
    pub apps: Arc<dyn AppLauncher>,
    pub network: Arc<dyn NetworkDiagnostics>,
    pub todo: Arc<dyn TodoList>,
    pub media: Arc<dyn MediaControl>,
    pub weather: Arc<dyn WeatherReport>,
    pub fun: Arc<dyn Entertainment>,
    pub briefing: Arc<dyn Briefing>,
    pub responder: Arc<dyn GenericResponder>,
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}
