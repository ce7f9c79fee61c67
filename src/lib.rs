//! FreightAgent - simulated AI phone agent console for a freight dashboard
//!
//! Plays a scripted quote-request call into a live transcript, with the
//! call lifecycle owned by a single [`CallSessionController`].

pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::CallSessionController;
pub use domain::shared::error::DomainError;
pub use domain::shared::result::Result;
