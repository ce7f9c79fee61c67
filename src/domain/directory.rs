//! Recent-call directory
//!
//! Static, read-only call records shown next to the live console. Nothing in
//! the session controller reads or writes it.

use crate::domain::call::{CallCategory, CallSession, SessionStatus};
use crate::domain::shared::value_objects::{QuoteAmount, SessionId};
use chrono::{DateTime, Duration, Utc};

pub struct CallDirectory {
    records: Vec<CallSession>,
}

impl CallDirectory {
    pub fn new(records: Vec<CallSession>) -> Self {
        Self { records }
    }

    /// Sample calls anchored to `now`
    pub fn demo(now: DateTime<Utc>) -> Self {
        let records = vec![
            CallSession::record(
                "John Smith",
                "+1 (555) 123-4567",
                now - Duration::minutes(15),
                4 * 60 + 32,
                SessionStatus::Completed,
                CallCategory::Quote,
                "LTL shipment from Chicago to NYC, 5 pallets, dry goods",
            )
            .with_quote_amount(QuoteAmount::from_dollars(2450)),
            CallSession::record(
                "Sarah Johnson",
                "+1 (555) 987-6543",
                now - Duration::minutes(45),
                2 * 60 + 15,
                SessionStatus::Completed,
                CallCategory::Tracking,
                "Tracking inquiry for shipment #TRK-2024-8392",
            )
            .with_tracking_number("TRK-2024-8392"),
            CallSession::record(
                "Mike Williams",
                "+1 (555) 456-7890",
                now - Duration::minutes(120),
                6 * 60 + 48,
                SessionStatus::Completed,
                CallCategory::Quote,
                "Full truckload, refrigerated, LA to Seattle",
            )
            .with_quote_amount(QuoteAmount::from_dollars(4850)),
            CallSession::record(
                "Emily Davis",
                "+1 (555) 234-5678",
                now - Duration::minutes(180),
                3 * 60 + 21,
                SessionStatus::Completed,
                CallCategory::Tracking,
                "Status update for shipment #TRK-2024-8123",
            )
            .with_tracking_number("TRK-2024-8123"),
        ];

        Self::new(records)
    }

    pub fn all(&self) -> &[CallSession] {
        &self.records
    }

    pub fn get(&self, id: &SessionId) -> Option<&CallSession> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn by_category(&self, category: CallCategory) -> Vec<&CallSession> {
        self.records
            .iter()
            .filter(|r| r.category() == category)
            .collect()
    }

    /// Newest first
    pub fn recent(&self, count: usize) -> Vec<&CallSession> {
        let mut records: Vec<&CallSession> = self.records.iter().collect();
        records.sort_by(|a, b| b.started_at().cmp(a.started_at()));
        records.truncate(count);
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
