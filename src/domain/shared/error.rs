//! Domain errors

use crate::domain::shared::value_objects::SessionId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("A call session is already active: {0}")]
    AlreadyActive(SessionId),

    #[error("No active call session")]
    NoActiveSession,

    #[error("Session {actual} is not the active session (active: {expected})")]
    SessionMismatch {
        expected: SessionId,
        actual: SessionId,
    },

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No async runtime available: {0}")]
    RuntimeUnavailable(String),
}

impl DomainError {
    /// True for every failure caused by a missing or non-matching active session
    pub fn is_no_active_session(&self) -> bool {
        matches!(
            self,
            DomainError::NoActiveSession | DomainError::SessionMismatch { .. }
        )
    }
}

impl From<::config::ConfigError> for DomainError {
    fn from(err: ::config::ConfigError) -> Self {
        DomainError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(err.to_string())
    }
}
