//! Domain layer - Core call console rules
//!
//! This layer contains:
//! - Aggregates: the call session and its lifecycle
//! - Entities: transcript lines
//! - Value Objects: ids, statuses, amounts
//! - Domain Events: things that happened to a session
//! - Static display data and formatting helpers

pub mod call;
pub mod directory;
pub mod format;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result};
