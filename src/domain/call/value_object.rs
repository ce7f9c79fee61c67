//! Call session value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    /// Call is connected and the script is playing
    InProgress,
    /// Call was ended by the agent console
    Completed,
    /// Caller hung up before pickup; only present in directory records
    Missed,
}

impl SessionStatus {
    /// Check if state transition is valid
    pub fn can_transition_to(&self, new_status: SessionStatus) -> bool {
        use SessionStatus::*;

        matches!((self, new_status), (InProgress, Completed))
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in-progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Missed => "missed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallCategory {
    /// Rate quote for a new shipment
    Quote,
    /// Status inquiry for an existing shipment
    Tracking,
}

impl CallCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CallCategory::Quote => "Quote Request",
            CallCategory::Tracking => "Tracking Inquiry",
        }
    }
}

/// Who is talking in a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Agent,
    Customer,
}

impl Speaker {
    pub fn display_name(&self) -> &'static str {
        match self {
            Speaker::Agent => "AI Agent",
            Speaker::Customer => "Customer",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What the controller does when `start_call` finds a call already in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveCallPolicy {
    /// Refuse with `AlreadyActive`
    #[default]
    Reject,
    /// Complete the running call, then start the new one
    Replace,
}
