//! Call session controller
//!
//! Owns the single active-session slot and plays the call script into it.
//! Playback runs as a Tokio task that sleeps until each line's offset from
//! session start. Every line is checked against the active session id when it
//! fires, so lines belonging to an ended or replaced session are dropped.

use crate::config::{Config, SessionConfig};
use crate::domain::call::{
    ActiveCallPolicy, CallCategory, CallScript, CallSession, ScriptLine, SessionEvent,
    TranscriptEntry, TranscriptLog,
};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::SessionId;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// What the console is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    Idle,
    InProgress(SessionId),
}

struct ActiveSlot {
    session: CallSession,
    transcript: TranscriptLog,
}

struct SessionState {
    active: Option<ActiveSlot>,
    history: VecDeque<CallSession>,
    max_history: usize,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionState {
    /// Append a fired line if `session_id` still owns the slot
    fn deliver(&mut self, session_id: SessionId, line: &ScriptLine) -> Option<TranscriptEntry> {
        let slot = self
            .active
            .as_mut()
            .filter(|slot| *slot.session.id() == session_id)?;

        let entry = TranscriptEntry::new(line.speaker, line.text.clone(), line.offset, Utc::now());
        if let Err(e) = slot.transcript.append(entry.clone()) {
            warn!("Dropping transcript line for session {}: {}", session_id, e);
            return None;
        }

        self.publish(SessionEvent::utterance(session_id, entry.clone()));
        Some(entry)
    }

    /// Complete the active session and move it to history
    fn finish_active(&mut self) -> Result<CallSession> {
        let slot = self.active.as_mut().ok_or(DomainError::NoActiveSession)?;
        let lines = slot.transcript.len();
        slot.session
            .complete(format!("Completed after {} transcript lines", lines))?;

        let slot = self.active.take().ok_or(DomainError::NoActiveSession)?;
        let session = slot.session;
        let duration_seconds = session.duration().map(|d| d.num_seconds()).unwrap_or(0);

        self.history.push_back(session.clone());
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }

        self.publish(SessionEvent::ended(*session.id(), duration_seconds, lines));
        info!(
            "Call session {} completed ({} transcript lines)",
            session.id(),
            lines
        );

        Ok(session)
    }

    fn publish(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("No subscribers for session event");
        }
    }
}

/// Drives one simulated call at a time
pub struct CallSessionController {
    state: Arc<Mutex<SessionState>>,
    script: Arc<CallScript>,
    policy: ActiveCallPolicy,
    caller_name: String,
    caller_phone: String,
    in_progress_summary: String,
}

impl CallSessionController {
    pub fn new(config: &SessionConfig, script: CallScript) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));

        Self {
            state: Arc::new(Mutex::new(SessionState {
                active: None,
                history: VecDeque::new(),
                max_history: config.max_history,
                events,
            })),
            script: Arc::new(script),
            policy: config.policy,
            caller_name: config.caller_name.clone(),
            caller_phone: config.caller_phone.clone(),
            in_progress_summary: config.in_progress_summary.clone(),
        }
    }

    /// Build from full configuration, loading the configured script
    pub fn from_config(config: &Config) -> Result<Self> {
        let script = config.script()?;
        Ok(Self::new(&config.session, script))
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a demo call and schedule its script.
    ///
    /// Returns as soon as the session exists; lines are appended later by the
    /// playback task. Fails with `RuntimeUnavailable`, leaving the controller
    /// idle, when called outside a Tokio runtime.
    pub fn start_call(&self) -> Result<SessionId> {
        let runtime = Handle::try_current()
            .map_err(|e| DomainError::RuntimeUnavailable(e.to_string()))?;
        let session_id = SessionId::new();
        let started = Instant::now();

        {
            let mut state = self.lock();

            if let Some(active) = &state.active {
                let active_id = *active.session.id();
                match self.policy {
                    ActiveCallPolicy::Reject => {
                        debug!("Rejecting start: session {} is active", active_id);
                        return Err(DomainError::AlreadyActive(active_id));
                    }
                    ActiveCallPolicy::Replace => {
                        info!("Replacing active session {}", active_id);
                        state.finish_active()?;
                    }
                }
            }

            let session = CallSession::start(
                session_id,
                self.caller_name.clone(),
                self.caller_phone.clone(),
                CallCategory::Quote,
                self.in_progress_summary.clone(),
            );
            state.active = Some(ActiveSlot {
                session,
                transcript: TranscriptLog::new(),
            });
            state.publish(SessionEvent::started(
                session_id,
                self.caller_name.clone(),
                self.caller_phone.clone(),
            ));
        }

        info!(
            "Call session {} started ({} scripted lines)",
            session_id,
            self.script.len()
        );

        runtime.spawn(play_script(
            Arc::clone(&self.state),
            Arc::clone(&self.script),
            session_id,
            started,
        ));

        Ok(session_id)
    }

    /// End the active call. Lines that have not fired yet are never appended.
    pub fn end_call(&self, session_id: SessionId) -> Result<CallSession> {
        let mut state = self.lock();

        let active_id = state
            .active
            .as_ref()
            .map(|slot| *slot.session.id())
            .ok_or(DomainError::NoActiveSession)?;

        if active_id != session_id {
            return Err(DomainError::SessionMismatch {
                expected: active_id,
                actual: session_id,
            });
        }

        state.finish_active()
    }

    /// Flip the mute flag of the active call, returning the new value
    pub fn toggle_mute(&self) -> Result<bool> {
        let mut state = self.lock();

        let slot = state.active.as_mut().ok_or(DomainError::NoActiveSession)?;
        let muted = slot.session.toggle_mute()?;
        let session_id = *slot.session.id();

        state.publish(SessionEvent::mute_toggled(session_id, muted));
        debug!("Session {} muted: {}", session_id, muted);

        Ok(muted)
    }

    /// Lines appended so far, in emission order. Empty when idle.
    pub fn current_transcript(&self) -> Vec<TranscriptEntry> {
        self.lock()
            .active
            .as_ref()
            .map(|slot| slot.transcript.entries().to_vec())
            .unwrap_or_default()
    }

    pub fn active_session(&self) -> Option<CallSession> {
        self.lock().active.as_ref().map(|slot| slot.session.clone())
    }

    pub fn state(&self) -> ConsoleState {
        match &self.lock().active {
            Some(slot) => ConsoleState::InProgress(*slot.session.id()),
            None => ConsoleState::Idle,
        }
    }

    /// Completed sessions, oldest first
    pub fn history(&self) -> Vec<CallSession> {
        self.lock().history.iter().cloned().collect()
    }

    /// Push notifications for every session change
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.lock().events.subscribe()
    }

    pub fn script(&self) -> &CallScript {
        &self.script
    }

    pub fn policy(&self) -> ActiveCallPolicy {
        self.policy
    }
}

async fn play_script(
    state: Arc<Mutex<SessionState>>,
    script: Arc<CallScript>,
    session_id: SessionId,
    started: Instant,
) {
    for line in script.lines() {
        tokio::time::sleep_until(started + line.offset).await;

        let delivered = state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .deliver(session_id, line);

        match delivered {
            Some(entry) => debug!(
                "Session {} {}: {}",
                session_id,
                entry.speaker(),
                entry.text()
            ),
            None => {
                debug!("Session {} no longer active, stopping playback", session_id);
                return;
            }
        }
    }

    debug!("Session {} script finished", session_id);
}
