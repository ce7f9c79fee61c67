//! Transcript entities

use crate::domain::call::value_object::Speaker;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One line of dialogue that has been played into a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    speaker: Speaker,
    text: String,
    /// Scheduled offset from session start
    offset: Duration,
    /// When the line was appended
    emitted_at: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn new(speaker: Speaker, text: String, offset: Duration, emitted_at: DateTime<Utc>) -> Self {
        Self {
            speaker,
            text,
            offset,
            emitted_at,
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offset(&self) -> Duration {
        self.offset
    }

    pub fn emitted_at(&self) -> &DateTime<Utc> {
        &self.emitted_at
    }
}

/// Append-only transcript of the active session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptLog {
    entries: Vec<TranscriptEntry>,
}

impl TranscriptLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line. Offsets must not go backwards.
    pub fn append(&mut self, entry: TranscriptEntry) -> Result<()> {
        if let Some(last) = self.entries.last() {
            if entry.offset < last.offset {
                return Err(DomainError::ValidationError(format!(
                    "transcript offset {:?} precedes last offset {:?}",
                    entry.offset, last.offset
                )));
            }
        }

        self.entries.push(entry);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
