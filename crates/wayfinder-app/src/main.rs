//! wayfinder binary: voice-commanded route navigation in a terminal.
//!
//! Wires the pipeline end to end: speech capture produces transcripts, the
//! navigator resolves them and fetches routes, and the map session renders
//! onto a headless tracing surface. Lines of the form `/route <a> <b>`
//! bypass resolution and request a route between two known nodes directly.

use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;
use wayfinder_app::load_config;
use wayfinder_app::navigator::{NavStatus, Navigator};
use wayfinder_map::{MapSession, TracingSurface};
use wayfinder_routing::RouteClient;
use wayfinder_types::KNOWN_LOCATIONS;
use wayfinder_voice::{
    CaptureEvent, ProcessCapture, SpeechCapture, StdinCapture, TranscriptMatcher,
};

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("WAYFINDER_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

/// Parses a manual route command: `/route <origin> <destination>`.
fn parse_route_command(line: &str) -> Option<(u32, u32)> {
    let rest = line.strip_prefix("/route")?;
    let mut parts = rest.split_whitespace();
    let origin = parts.next()?.parse().ok()?;
    let destination = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((origin, destination))
}

fn print_status(status: &NavStatus) {
    match status {
        NavStatus::Heard { transcript } => println!("You said: \"{}\"", transcript),
        NavStatus::NoMatch { .. } => println!("No known destination in that."),
        NavStatus::Routing { destination } => println!("Routing to {}...", destination.name),
        NavStatus::RouteApplied { segments, .. } => {
            println!("Route found with {} segment(s)", segments);
        }
        NavStatus::NoRoute => println!("No route available."),
        NavStatus::RouteFailed { message } => println!("Route lookup failed: {}", message),
        NavStatus::SpeechFailed { message } => println!("Speech capture failed: {}", message),
    }
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("wayfinder.toml"));

    // Load configuration
    let config = load_config(selected_config_path)
        .expect("failed to load configuration; the client cannot start without valid config");

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    // Route client, with a reachability probe so a dead service is visible
    // immediately rather than on the first command.
    let client = RouteClient::with_timeout(
        &config.routing.base_url,
        Duration::from_secs(config.routing.timeout_secs),
    );
    match client.health().await {
        Ok(()) => tracing::info!(url = %config.routing.base_url, "routing service reachable"),
        Err(e) => tracing::warn!(
            url = %config.routing.base_url,
            error = %e,
            "routing service unreachable, route requests will fail until it comes up"
        ),
    }

    // Map session over the headless surface, markers placed once.
    let session = MapSession::initialize(
        TracingSurface::new(),
        &config.map.view(),
        &KNOWN_LOCATIONS,
    );

    // Speech capture: external engine process if configured, stdin otherwise.
    let mut capture: Box<dyn SpeechCapture> = if config.speech.engine_command.is_empty() {
        tracing::info!("no speech engine configured, reading transcripts from stdin");
        println!("Speak by typing a line (or `/route <a> <b>` for a manual route).");
        Box::new(StdinCapture::new())
    } else {
        tracing::info!(engine = %config.speech.engine_command, "using external speech engine");
        Box::new(ProcessCapture::new(
            &config.speech.engine_command,
            config.speech.engine_args.clone(),
        ))
    };
    let mut capture_events = capture.subscribe();
    if let Err(e) = capture.start() {
        tracing::warn!(error = %e, "failed to arm speech capture");
    }

    let (mut navigator, mut completions) = Navigator::new(
        session,
        client,
        TranscriptMatcher::with_default_rules(),
        config.routing.origin_id,
    );
    let mut status_events = navigator.status_events();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = capture_events.recv() => match event {
                Ok(CaptureEvent::Transcript(transcript)) => {
                    if let Some((origin, destination)) = parse_route_command(&transcript) {
                        navigator.request_route(origin, destination);
                    } else {
                        navigator.handle_transcript(&transcript);
                    }
                    // Arm the next capture session.
                    capture.stop();
                    if let Err(e) = capture.start() {
                        tracing::warn!(error = %e, "failed to re-arm speech capture");
                    }
                }
                Ok(CaptureEvent::Error(fault)) => {
                    navigator.handle_capture_fault(fault);
                    capture.stop();
                    if let Err(e) = capture.start() {
                        tracing::warn!(error = %e, "failed to re-arm speech capture");
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "capture events lagged");
                }
                Err(RecvError::Closed) => {
                    tracing::info!("capture event stream closed");
                    break;
                }
            },
            Some(completion) = completions.recv() => {
                navigator.handle_completion(completion);
            }
            status = status_events.recv() => {
                if let Ok(status) = status {
                    print_status(&status);
                }
            }
            () = &mut shutdown => break,
        }
    }

    capture.stop();
    navigator.shutdown();
    tracing::info!("wayfinder shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
