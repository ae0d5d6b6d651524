//! Dispatch configuration.
//!
//! Configuration is fixed when a machine is built. It can be written in code
//! with the `with_*` methods, parsed from JSON, or read from the environment.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable selecting the [`UnownedEventPolicy`].
pub const ENV_UNOWNED_EVENTS: &str = "HSM_UNOWNED_EVENTS";

/// Environment variable setting [`DispatchConfig::trace_limit`].
pub const ENV_TRACE_LIMIT: &str = "HSM_TRACE_LIMIT";

/// Default number of trace entries kept per machine.
pub const DEFAULT_TRACE_LIMIT: usize = 256;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// What the top level does with an event no machine in the hierarchy owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnownedEventPolicy {
    /// Log a warning and discard the event
    #[default]
    Drop,

    /// Report the event to the injecting caller as an error
    Reject,
}

impl FromStr for UnownedEventPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "reject" => Ok(Self::Reject),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_UNOWNED_EVENTS,
                value: value.to_string(),
            }),
        }
    }
}

/// Per-machine dispatch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Handling of events that escalate out of the top-level machine
    pub unowned_events: UnownedEventPolicy,

    /// Maximum trace entries kept; 0 disables tracing
    pub trace_limit: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            unowned_events: UnownedEventPolicy::default(),
            trace_limit: DEFAULT_TRACE_LIMIT,
        }
    }
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unowned_events(mut self, policy: UnownedEventPolicy) -> Self {
        self.unowned_events = policy;
        self
    }

    pub fn with_trace_limit(mut self, limit: usize) -> Self {
        self.trace_limit = limit;
        self
    }

    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by `HSM_UNOWNED_EVENTS` and `HSM_TRACE_LIMIT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the
    /// `HSM_*` keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_UNOWNED_EVENTS) {
            config.unowned_events = value.parse()?;
        }

        if let Some(value) = lookup(ENV_TRACE_LIMIT) {
            config.trace_limit = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TRACE_LIMIT,
                value: value.clone(),
            })?;
        }

        tracing::debug!(
            unowned_events = ?config.unowned_events,
            trace_limit = config.trace_limit,
            "dispatch config loaded"
        );
        Ok(config)
    }
}
