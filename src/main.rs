use chrono::Utc;
use freight_agent::config::Config;
use freight_agent::domain::call::SessionEvent;
use freight_agent::domain::directory::CallDirectory;
use freight_agent::domain::format::{format_duration, format_relative};
use freight_agent::domain::shared::events::DomainEvent;
use freight_agent::CallSessionController;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting FreightAgent call console");
    info!("Configuration loaded: {:?}", config);

    let controller = CallSessionController::from_config(&config)?;
    info!("Active-call policy: {:?}", controller.policy());

    demo_call(&controller).await?;
    print_recent_calls(&controller);

    info!("FreightAgent call console finished");
    Ok(())
}

/// Play one scripted call to completion
async fn demo_call(controller: &CallSessionController) -> anyhow::Result<()> {
    info!("=== Demo Call ===");

    let mut events = controller.subscribe();
    let session_id = controller.start_call()?;

    let expected_lines = controller.script().len();
    let deadline = controller.script().total_duration() + Duration::from_secs(2);
    let mut received = 0;

    let playback = async {
        while received < expected_lines {
            match events.recv().await {
                Ok(SessionEvent::Utterance(event)) => {
                    received += 1;
                    println!("{}: {}", event.entry.speaker(), event.entry.text());
                }
                Ok(event) => {
                    info!("{} at {}", event.event_type(), event.occurred_at());
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Transcript display lagged by {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    if tokio::time::timeout(deadline, playback).await.is_err() {
        warn!("Script did not finish within {:?}", deadline);
    }

    let session = controller.end_call(session_id)?;
    info!(
        "Call with {} ended after {}: {}",
        session.caller_name(),
        session.duration().map(format_duration).unwrap_or_default(),
        session.summary()
    );

    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}

fn print_recent_calls(controller: &CallSessionController) {
    let now = Utc::now();
    let directory = CallDirectory::demo(now);

    println!("Recent calls:");
    for call in directory.recent(directory.len()) {
        let detail = match (call.quote_amount(), call.tracking_number()) {
            (Some(amount), _) => amount.to_string(),
            (None, Some(tracking)) => tracking.to_string(),
            (None, None) => String::new(),
        };

        println!(
            "  {:<14} {:<18} {:>8} {:>6}  {:<16} {}",
            call.caller_name(),
            call.caller_phone(),
            format_relative(*call.started_at(), now),
            call.duration().map(format_duration).unwrap_or_default(),
            call.category().label(),
            detail
        );
    }

    info!("{} demo calls completed this run", controller.history().len());
}
