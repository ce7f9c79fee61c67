//! Call bounded context - manages the lifecycle of simulated call sessions

pub mod aggregate;
pub mod entity;
pub mod event;
pub mod script;
pub mod value_object;

pub use aggregate::CallSession;
pub use entity::{TranscriptEntry, TranscriptLog};
pub use event::SessionEvent;
pub use script::{CallScript, ScriptLine};
pub use value_object::{ActiveCallPolicy, CallCategory, SessionStatus, Speaker};
