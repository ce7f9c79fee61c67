//! Configuration management
//!
//! Defaults are compiled in. An optional TOML file and `FREIGHT_AGENT__*`
//! environment variables override them, e.g.
//! `FREIGHT_AGENT__SESSION__POLICY=replace`.

use crate::domain::call::{ActiveCallPolicy, CallScript};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub policy: ActiveCallPolicy,
    pub caller_name: String,
    pub caller_phone: String,
    /// Summary shown while a call is running
    pub in_progress_summary: String,
    /// Completed sessions kept in memory
    pub max_history: usize,
    /// Buffered events per subscriber
    pub event_capacity: usize,
    /// TOML script to play instead of the built-in quote request
    pub script_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            policy: ActiveCallPolicy::Reject,
            caller_name: "Demo Caller".to_string(),
            caller_phone: "+1 (555) 000-0000".to_string(),
            in_progress_summary: "Call in progress...".to_string(),
            max_history: 1000,
            event_capacity: 256,
            script_path: None,
        }
    }
}

impl Config {
    /// Load from an optional file plus environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let config: Config = builder
            .add_source(
                ::config::Environment::with_prefix("FREIGHT_AGENT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.session.event_capacity == 0 {
            return Err(DomainError::ValidationError(
                "session.event_capacity must be greater than zero".to_string(),
            ));
        }

        if self.session.caller_name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "session.caller_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Script selected by `session.script_path`, or the built-in one
    pub fn script(&self) -> Result<CallScript> {
        match &self.session.script_path {
            Some(path) => CallScript::from_file(path),
            None => Ok(CallScript::quote_request()),
        }
    }
}
