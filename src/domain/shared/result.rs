//! Domain result type

use super::error::DomainError;

/// Result type for call console operations
pub type Result<T> = std::result::Result<T, DomainError>;
