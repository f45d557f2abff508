//! # Jarvis - Command Interpretation Engine
//!
//! Turns free-form spoken or typed text into one of many assistant actions.
//! Text is normalized, matched against an ordered rule table, stripped of its
//! trigger phrase when the rule needs an argument, and handed to a capability
//! provider. Whatever happens, the caller gets back a [`Response`] with the
//! text to show and whether to speak it.
//!
//! ## Architecture
//!
//! ```text
//!   command text
//!        │
//!  ┌─────▼──────┐   ┌───────────────┐   ┌──────────────┐
//!  │ Dispatcher ├──►│ IntentMatcher ├──►│  Extractor   │
//!  └─────┬──────┘   └───────────────┘   └──────┬───────┘
//!        │                                      │
//!        │  no match            ┌───────────────▼──────────┐
//!        ▼                      │ Capabilities / ModeHandler│
//!  GenericResponder             └──────────────────────────┘
//! ```

pub mod capabilities;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod extract;
pub mod intent;
pub mod modes;
pub mod response;
pub mod store;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(test)]
mod dispatcher_tests;

pub use capabilities::{
    AppLauncher, Briefing, Capabilities, CapabilityError, CapabilityResult, Entertainment,
    FunKind, GenericResponder, LightControl, LightOp, MediaControl, MediaOp, MetricKind,
    NetworkCheck, NetworkDiagnostics, PowerOp, SystemMetrics, SystemPower, TodoList, TodoOp,
    WeatherReport, WebOpener,
};
pub use command::NormalizedCommand;
pub use config::JarvisConfig;
pub use dispatcher::Dispatcher;
pub use intent::{Action, FailurePolicy, IntentMatcher, IntentRule, ParameterRule, Trigger};
pub use modes::{ModeDefinition, ModeHandler, ModeStep};
pub use response::Response;
pub use store::{KeyValueStore, KeyValueStoreExt, MemoryStore, StoreError};

/// Main error types for Jarvis
#[derive(Debug, thiserror::Error)]
pub enum JarvisError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid trigger pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    ConfigWriteError(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, JarvisError>;
