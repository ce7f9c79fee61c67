//! Call session controller integration tests
//!
//! All tests run on a paused Tokio clock, so sleeping advances virtual time
//! straight to the next scheduled line.

use freight_agent::config::SessionConfig;
use freight_agent::domain::call::{
    ActiveCallPolicy, CallScript, ScriptLine, SessionEvent, SessionStatus, Speaker,
};
use freight_agent::domain::shared::SessionId;
use freight_agent::{CallSessionController, DomainError};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn controller() -> CallSessionController {
    CallSessionController::new(&SessionConfig::default(), CallScript::quote_request())
}

fn controller_with_policy(policy: ActiveCallPolicy) -> CallSessionController {
    let config = SessionConfig {
        policy,
        ..SessionConfig::default()
    };
    CallSessionController::new(&config, CallScript::quote_request())
}

async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_scripted_call_scenario() {
    let controller = controller();

    let s1 = assert_ok!(controller.start_call());
    let session = controller.active_session().unwrap();
    assert_eq!(session.id(), &s1);
    assert_eq!(session.status(), SessionStatus::InProgress);
    assert_eq!(session.caller_name(), "Demo Caller");

    // Entry 1 fires at 1s
    advance_ms(1_010).await;
    let transcript = controller.current_transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].speaker(), Speaker::Agent);

    // Entry 2 fires at 3s
    advance_ms(2_000).await;
    let transcript = controller.current_transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].speaker(), Speaker::Customer);

    let ended = assert_ok!(controller.end_call(s1));
    assert_eq!(ended.status(), SessionStatus::Completed);
    assert!(controller.current_transcript().is_empty());

    advance_ms(30_000).await;
    assert!(controller.current_transcript().is_empty());
    assert!(controller.active_session().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_transcript_empty_until_first_offset() {
    let controller = controller();
    assert_ok!(controller.start_call());

    assert!(controller.current_transcript().is_empty());
    advance_ms(999).await;
    assert!(controller.current_transcript().is_empty());

    advance_ms(2).await;
    assert_eq!(controller.current_transcript().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_full_script_plays_in_order() {
    let controller = controller();
    assert_ok!(controller.start_call());

    advance_ms(16_000).await;
    let transcript = controller.current_transcript();
    let script = CallScript::quote_request();
    assert_eq!(transcript.len(), script.len());

    for pair in transcript.windows(2) {
        assert!(pair[0].offset() <= pair[1].offset());
    }

    for (entry, line) in transcript.iter().zip(script.lines()) {
        assert_eq!(entry.speaker(), line.speaker);
        assert_eq!(entry.text(), line.text);
        assert_eq!(entry.offset(), line.offset);
    }

    // Nothing more arrives once the script is exhausted
    advance_ms(60_000).await;
    assert_eq!(controller.current_transcript().len(), script.len());
}

#[tokio::test(start_paused = true)]
async fn test_equal_offsets_keep_table_order() {
    let script = CallScript::new(vec![
        ScriptLine::new(Duration::from_millis(500), Speaker::Agent, "first"),
        ScriptLine::new(Duration::from_millis(500), Speaker::Customer, "second"),
        ScriptLine::new(Duration::from_millis(500), Speaker::Agent, "third"),
    ])
    .unwrap();
    let controller = CallSessionController::new(&SessionConfig::default(), script);

    assert_ok!(controller.start_call());
    advance_ms(600).await;

    let texts: Vec<String> = controller
        .current_transcript()
        .iter()
        .map(|e| e.text().to_string())
        .collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[tokio::test(start_paused = true)]
async fn test_end_call_stops_pending_lines() {
    let controller = controller();
    let first = assert_ok!(controller.start_call());

    advance_ms(3_500).await;
    assert_eq!(controller.current_transcript().len(), 2);

    assert_ok!(controller.end_call(first));
    advance_ms(20_000).await;
    assert!(controller.current_transcript().is_empty());

    // A fresh session starts its own script from the top
    let second = assert_ok!(controller.start_call());
    assert_ne!(first, second);
    assert!(controller.current_transcript().is_empty());

    advance_ms(1_010).await;
    let transcript = controller.current_transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].offset(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_stale_playback_does_not_leak_into_next_session() {
    let controller = controller();

    // End the first call between its 1s and 3s lines, then start again at
    // 2.5s so the old 3s line would land in the new session if unguarded
    let first = assert_ok!(controller.start_call());
    advance_ms(1_500).await;
    assert_ok!(controller.end_call(first));
    advance_ms(1_000).await;

    assert_ok!(controller.start_call());
    advance_ms(600).await;
    assert!(controller.current_transcript().is_empty());

    advance_ms(500).await;
    let transcript = controller.current_transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].speaker(), Speaker::Agent);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_mute() {
    let controller = controller();

    let err = assert_err!(controller.toggle_mute());
    assert_eq!(err, DomainError::NoActiveSession);

    let id = assert_ok!(controller.start_call());
    assert_eq!(controller.toggle_mute(), Ok(true));
    assert_eq!(controller.toggle_mute(), Ok(false));
    assert_eq!(controller.toggle_mute(), Ok(true));
    assert_eq!(controller.toggle_mute(), Ok(false));
    assert_eq!(controller.toggle_mute(), Ok(true));
    assert!(controller.active_session().unwrap().is_muted());

    assert_ok!(controller.end_call(id));
    assert!(assert_err!(controller.toggle_mute()).is_no_active_session());
}

#[tokio::test(start_paused = true)]
async fn test_end_call_errors() {
    let controller = controller();

    let err = assert_err!(controller.end_call(SessionId::new()));
    assert_eq!(err, DomainError::NoActiveSession);

    let active = assert_ok!(controller.start_call());
    let other = SessionId::new();
    let err = assert_err!(controller.end_call(other));
    assert!(err.is_no_active_session());
    assert_eq!(
        err,
        DomainError::SessionMismatch {
            expected: active,
            actual: other,
        }
    );

    // The failed call left the active session untouched
    assert_eq!(controller.active_session().unwrap().id(), &active);
    assert_ok!(controller.end_call(active));

    let err = assert_err!(controller.end_call(active));
    assert_eq!(err, DomainError::NoActiveSession);
}

#[tokio::test(start_paused = true)]
async fn test_reject_policy_refuses_second_start() {
    let controller = controller_with_policy(ActiveCallPolicy::Reject);

    let first = assert_ok!(controller.start_call());
    let err = assert_err!(controller.start_call());
    assert_eq!(err, DomainError::AlreadyActive(first));

    // The running call keeps playing
    assert_eq!(controller.active_session().unwrap().id(), &first);
    advance_ms(3_010).await;
    assert_eq!(controller.current_transcript().len(), 2);
    assert!(controller.history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_replace_policy_supersedes_active_call() {
    let controller = controller_with_policy(ActiveCallPolicy::Replace);

    let first = assert_ok!(controller.start_call());
    let second = assert_ok!(controller.start_call());
    assert_ne!(first, second);

    let history = controller.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id(), &first);
    assert_eq!(history[0].status(), SessionStatus::Completed);

    // Both scripts were scheduled from the same instant; only the new one lands
    advance_ms(1_010).await;
    assert_eq!(controller.current_transcript().len(), 1);

    advance_ms(16_000).await;
    assert_eq!(controller.current_transcript().len(), 7);
    assert_eq!(controller.active_session().unwrap().id(), &second);
}

#[tokio::test(start_paused = true)]
async fn test_at_most_one_session_in_progress() {
    for policy in [ActiveCallPolicy::Reject, ActiveCallPolicy::Replace] {
        let controller = controller_with_policy(policy);
        let mut active: Option<SessionId> = None;
        let mut completed: Vec<SessionId> = Vec::new();

        for step in 0..12 {
            if step % 3 == 2 {
                let id = active.take().expect("a call is active before every end");
                assert_ok!(controller.end_call(id));
                completed.push(id);
            } else {
                let previous = active;
                let result = controller.start_call();

                match (policy, previous) {
                    (_, None) => active = Some(assert_ok!(result)),
                    (ActiveCallPolicy::Reject, Some(running)) => {
                        assert_eq!(assert_err!(result), DomainError::AlreadyActive(running));
                    }
                    (ActiveCallPolicy::Replace, Some(running)) => {
                        let id = assert_ok!(result);
                        assert_ne!(id, running);
                        completed.push(running);
                        active = Some(id);

                        let replaced = controller
                            .history()
                            .into_iter()
                            .find(|s| s.id() == &running)
                            .expect("replaced call is in history");
                        assert_eq!(replaced.status(), SessionStatus::Completed);
                    }
                }
            }

            assert_eq!(
                controller.active_session().map(|s| *s.id()),
                active,
                "{:?} step {}",
                policy,
                step
            );

            let history = controller.history();
            let history_ids: Vec<SessionId> = history.iter().map(|s| *s.id()).collect();
            assert_eq!(history_ids, completed);
            assert!(history.iter().all(|s| s.status() == SessionStatus::Completed));
            if let Some(id) = active {
                assert!(!history_ids.contains(&id));
            }

            advance_ms(700).await;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_start_call_uses_configured_caller() {
    let config = SessionConfig {
        caller_name: "Dock 7 Dispatcher".to_string(),
        caller_phone: "+1 (555) 777-0007".to_string(),
        in_progress_summary: "Quoting a reefer load".to_string(),
        ..SessionConfig::default()
    };
    let controller = CallSessionController::new(&config, CallScript::quote_request());

    let id = assert_ok!(controller.start_call());
    let session = controller.active_session().unwrap();
    assert_eq!(session.caller_name(), "Dock 7 Dispatcher");
    assert_eq!(session.caller_phone(), "+1 (555) 777-0007");
    assert_eq!(session.summary(), "Quoting a reefer load");

    let ended = assert_ok!(controller.end_call(id));
    assert_eq!(ended.summary(), "Completed after 0 transcript lines");
}

#[tokio::test(start_paused = true)]
async fn test_subscriber_sees_events_in_order() {
    let controller = controller();
    let mut events = controller.subscribe();

    let id = assert_ok!(controller.start_call());
    advance_ms(3_010).await;
    assert_ok!(controller.toggle_mute());
    assert_ok!(controller.end_call(id));

    let mut kinds = Vec::new();
    while let Ok(event) = events.try_recv() {
        assert_eq!(event.session_id(), &id);
        kinds.push(match event {
            SessionEvent::Started(_) => "started",
            SessionEvent::Utterance(_) => "utterance",
            SessionEvent::MuteToggled(e) => {
                assert!(e.muted);
                "mute"
            }
            SessionEvent::Ended(e) => {
                assert_eq!(e.transcript_lines, 2);
                "ended"
            }
        });
    }

    assert_eq!(kinds, vec!["started", "utterance", "utterance", "mute", "ended"]);
}

#[tokio::test(start_paused = true)]
async fn test_completed_session_summary() {
    let controller = controller();
    let id = assert_ok!(controller.start_call());
    advance_ms(5_010).await;

    let ended = assert_ok!(controller.end_call(id));
    assert_eq!(ended.summary(), "Completed after 3 transcript lines");
    assert!(ended.duration().is_some());
    assert_eq!(controller.history(), vec![ended]);
}
