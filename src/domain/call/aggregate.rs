//! Call session aggregate root

use crate::domain::call::value_object::{CallCategory, SessionStatus};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::{QuoteAmount, SessionId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Call session aggregate root
///
/// One simulated phone interaction. Live sessions are only mutated by the
/// session controller; directory records are built complete with
/// [`CallSession::record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSession {
    id: SessionId,
    caller_name: String,
    caller_phone: String,
    started_at: DateTime<Utc>,
    status: SessionStatus,
    category: CallCategory,
    summary: String,
    quote_amount: Option<QuoteAmount>,
    tracking_number: Option<String>,
    muted: bool,
    /// Set when the session leaves `InProgress`
    duration_seconds: Option<i64>,
}

impl CallSession {
    /// Start a new in-progress session
    pub fn start(
        id: SessionId,
        caller_name: String,
        caller_phone: String,
        category: CallCategory,
        summary: String,
    ) -> Self {
        Self {
            id,
            caller_name,
            caller_phone,
            started_at: Utc::now(),
            status: SessionStatus::InProgress,
            category,
            summary,
            quote_amount: None,
            tracking_number: None,
            muted: false,
            duration_seconds: None,
        }
    }

    /// Build a historical record for display
    pub fn record(
        caller_name: &str,
        caller_phone: &str,
        started_at: DateTime<Utc>,
        duration_seconds: i64,
        status: SessionStatus,
        category: CallCategory,
        summary: &str,
    ) -> Self {
        Self {
            id: SessionId::new(),
            caller_name: caller_name.to_string(),
            caller_phone: caller_phone.to_string(),
            started_at,
            status,
            category,
            summary: summary.to_string(),
            quote_amount: None,
            tracking_number: None,
            muted: false,
            duration_seconds: Some(duration_seconds),
        }
    }

    pub fn with_quote_amount(mut self, amount: QuoteAmount) -> Self {
        self.quote_amount = Some(amount);
        self
    }

    pub fn with_tracking_number(mut self, tracking_number: &str) -> Self {
        self.tracking_number = Some(tracking_number.to_string());
        self
    }

    /// Complete the session and record how long it ran
    pub fn complete(&mut self, summary: String) -> Result<()> {
        self.transition_to(SessionStatus::Completed)?;
        let elapsed = Utc::now() - self.started_at;
        self.duration_seconds = Some(elapsed.num_seconds().max(0));
        self.summary = summary;
        Ok(())
    }

    /// Flip the mute flag, returning the new value
    pub fn toggle_mute(&mut self) -> Result<bool> {
        if !self.status.is_active() {
            return Err(DomainError::InvalidStateTransition(format!(
                "Cannot toggle mute on a {} session",
                self.status
            )));
        }

        self.muted = !self.muted;
        Ok(self.muted)
    }

    fn transition_to(&mut self, new_status: SessionStatus) -> Result<()> {
        if !self.status.can_transition_to(new_status) {
            return Err(DomainError::InvalidStateTransition(format!(
                "Cannot transition from {} to {}",
                self.status, new_status
            )));
        }

        self.status = new_status;
        Ok(())
    }

    // Getters
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn caller_name(&self) -> &str {
        &self.caller_name
    }

    pub fn caller_phone(&self) -> &str {
        &self.caller_phone
    }

    pub fn started_at(&self) -> &DateTime<Utc> {
        &self.started_at
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn category(&self) -> CallCategory {
        self.category
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn quote_amount(&self) -> Option<QuoteAmount> {
        self.quote_amount
    }

    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration_seconds.map(Duration::seconds)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
