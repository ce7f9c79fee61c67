//! Call session domain events

use crate::domain::call::entity::TranscriptEntry;
use crate::domain::shared::events::{DomainEvent, EventMetadata};
use crate::domain::shared::value_objects::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base struct for all session events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEventBase {
    pub metadata: EventMetadata,
    pub session_id: SessionId,
}

impl SessionEventBase {
    fn new(event_type: &str, session_id: SessionId) -> Self {
        Self {
            metadata: EventMetadata::new(event_type),
            session_id,
        }
    }
}

/// Session started event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStarted {
    pub base: SessionEventBase,
    pub caller_name: String,
    pub caller_phone: String,
}

/// A scripted line was appended to the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtteranceAppended {
    pub base: SessionEventBase,
    pub entry: TranscriptEntry,
}

/// Mute flag flipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuteToggled {
    pub base: SessionEventBase,
    pub muted: bool,
}

/// Session ended event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEnded {
    pub base: SessionEventBase,
    pub duration_seconds: i64,
    pub transcript_lines: usize,
}

/// Union of all session events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Started(SessionStarted),
    Utterance(UtteranceAppended),
    MuteToggled(MuteToggled),
    Ended(SessionEnded),
}

impl SessionEvent {
    pub fn started(session_id: SessionId, caller_name: String, caller_phone: String) -> Self {
        SessionEvent::Started(SessionStarted {
            base: SessionEventBase::new("session.started", session_id),
            caller_name,
            caller_phone,
        })
    }

    pub fn utterance(session_id: SessionId, entry: TranscriptEntry) -> Self {
        SessionEvent::Utterance(UtteranceAppended {
            base: SessionEventBase::new("session.utterance", session_id),
            entry,
        })
    }

    pub fn mute_toggled(session_id: SessionId, muted: bool) -> Self {
        SessionEvent::MuteToggled(MuteToggled {
            base: SessionEventBase::new("session.mute_toggled", session_id),
            muted,
        })
    }

    pub fn ended(session_id: SessionId, duration_seconds: i64, transcript_lines: usize) -> Self {
        SessionEvent::Ended(SessionEnded {
            base: SessionEventBase::new("session.ended", session_id),
            duration_seconds,
            transcript_lines,
        })
    }

    fn base(&self) -> &SessionEventBase {
        match self {
            SessionEvent::Started(e) => &e.base,
            SessionEvent::Utterance(e) => &e.base,
            SessionEvent::MuteToggled(e) => &e.base,
            SessionEvent::Ended(e) => &e.base,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.base().session_id
    }
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::Started(_) => "session.started",
            SessionEvent::Utterance(_) => "session.utterance",
            SessionEvent::MuteToggled(_) => "session.mute_toggled",
            SessionEvent::Ended(_) => "session.ended",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.base().metadata.occurred_at
    }
}
