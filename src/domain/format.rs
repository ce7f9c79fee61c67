//! Display formatting for call durations and timestamps

use chrono::{DateTime, Duration, Utc};

/// `m:ss`, e.g. `4:32`
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!("{}:{:02}", total / 60, total % 60)
}

/// Coarse age of a timestamp: `15m ago`, `2h ago`, `3d ago`
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes().max(0);

    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}
