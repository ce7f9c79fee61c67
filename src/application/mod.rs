//! Application layer - Use cases driven by the console
//!
//! This layer orchestrates domain objects to fulfill use cases:
//! - Owning the active-session slot
//! - Scheduling scripted transcript playback
//! - Publishing session events to subscribers

pub mod call_session;

pub use call_session::{CallSessionController, ConsoleState};
