//! Scripted dialogue played into a demo call
//!
//! A script is a table of `(offset, speaker, text)` lines. Scripts can be
//! loaded from TOML:
//!
//! ```toml
//! [[line]]
//! offset_ms = 1000
//! speaker = "agent"
//! text = "Hello!"
//! ```

use crate::domain::call::value_object::Speaker;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// One scheduled line of the script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    /// Delay from session start
    pub offset: Duration,
    pub speaker: Speaker,
    pub text: String,
}

impl ScriptLine {
    pub fn new(offset: Duration, speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            offset,
            speaker,
            text: text.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(rename = "line", default)]
    lines: Vec<ScriptFileLine>,
}

#[derive(Debug, Deserialize)]
struct ScriptFileLine {
    offset_ms: u64,
    speaker: Speaker,
    text: String,
}

/// Ordered dialogue table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallScript {
    lines: Vec<ScriptLine>,
}

impl CallScript {
    /// Build a script, rejecting offsets that go backwards
    pub fn new(lines: Vec<ScriptLine>) -> Result<Self> {
        for pair in lines.windows(2) {
            if pair[1].offset < pair[0].offset {
                return Err(DomainError::ValidationError(format!(
                    "script offsets must be non-decreasing ({:?} after {:?})",
                    pair[1].offset, pair[0].offset
                )));
            }
        }

        if let Some(line) = lines.iter().find(|l| l.text.trim().is_empty()) {
            return Err(DomainError::ValidationError(format!(
                "script line at {:?} has no text",
                line.offset
            )));
        }

        Ok(Self { lines })
    }

    /// The canned LTL quote request from Dallas to Miami
    pub fn quote_request() -> Self {
        use Speaker::{Agent, Customer};

        let lines = vec![
            ScriptLine::new(
                Duration::from_secs(1),
                Agent,
                "Hello! Thank you for calling FreightAgent AI. How can I assist you with your shipping needs today?",
            ),
            ScriptLine::new(
                Duration::from_secs(3),
                Customer,
                "Hi, I need a quote for shipping 8 pallets from Dallas to Miami.",
            ),
            ScriptLine::new(
                Duration::from_secs(5),
                Agent,
                "Certainly! I'd be happy to help you with that quote. Let me pull up our rates from the TMS. Can you tell me what type of goods you're shipping and if they require any special handling?",
            ),
            ScriptLine::new(
                Duration::from_secs(8),
                Customer,
                "They're electronics, so they need to be handled carefully. No temperature control needed though.",
            ),
            ScriptLine::new(
                Duration::from_secs(10),
                Agent,
                "Perfect. I'm checking our LTL rates for fragile electronics from Dallas to Miami. The total weight is approximately 3,200 lbs across 8 pallets, correct?",
            ),
            ScriptLine::new(Duration::from_secs(13), Customer, "Yes, that's right."),
            ScriptLine::new(
                Duration::from_secs(15),
                Agent,
                "Excellent. Based on our TMS integration, I can offer you a quote of $2,875 for LTL service with 5-7 business day transit time, including inside delivery and liftgate service for safe handling. Would you like me to book this shipment for you?",
            ),
        ];

        Self { lines }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ScriptFile = toml::from_str(source)?;
        let lines = file
            .lines
            .into_iter()
            .map(|l| ScriptLine::new(Duration::from_millis(l.offset_ms), l.speaker, l.text))
            .collect();

        Self::new(lines)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!("cannot read script {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&source)
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Offset of the last line
    pub fn total_duration(&self) -> Duration {
        self.lines.last().map(|l| l.offset).unwrap_or_default()
    }
}

impl Default for CallScript {
    fn default() -> Self {
        Self::quote_request()
    }
}
