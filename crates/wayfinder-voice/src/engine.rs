//! Engine bindings for the speech-capture boundary.
//!
//! [`ProcessCapture`] runs the external speech-to-text engine as a child
//! process. The engine owns the microphone; its contract with us is one
//! line on stdout per capture session: either the final transcript, or
//! `error:<code>` with one of the engine's error-code strings. Anything
//! else (silence, crash, timeout) is mapped to a [`CaptureFault`] here.
//!
//! [`StdinCapture`] is the terminal stand-in used by the prototype binary
//! when no engine command is configured: every line typed is treated as a
//! final transcript.

use crate::capture::{CaptureEvent, SpeechCapture, CAPTURE_EVENT_CAPACITY};
use crate::error::{CaptureFault, VoiceError};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::{broadcast, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How long a capture session may run before the engine is killed.
const CAPTURE_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix the engine uses to report an error code instead of a transcript.
const ERROR_LINE_PREFIX: &str = "error:";

struct EngineSession {
    cancel: Arc<Notify>,
    task: JoinHandle<()>,
}

/// Speech capture backed by an external engine process.
///
/// Each `start` spawns the configured command; the session ends when the
/// engine prints its one line, exits, times out, or is cancelled. `stop`
/// kills the engine and suppresses any output from that session.
pub struct ProcessCapture {
    program: PathBuf,
    args: Vec<String>,
    events_tx: broadcast::Sender<CaptureEvent>,
    session: Option<EngineSession>,
}

impl ProcessCapture {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        let (events_tx, _) = broadcast::channel(CAPTURE_EVENT_CAPACITY);
        Self {
            program: program.into(),
            args,
            events_tx,
            session: None,
        }
    }

    fn session_running(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| !session.task.is_finished())
    }
}

impl SpeechCapture for ProcessCapture {
    fn start(&mut self) -> Result<(), VoiceError> {
        if self.session_running() {
            return Err(VoiceError::CaptureBusy);
        }

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VoiceError::EngineSpawn(e.to_string()))?;

        let cancel = Arc::new(Notify::new());
        let cancelled = Arc::clone(&cancel);
        let events_tx = self.events_tx.clone();

        let task = tokio::spawn(async move {
            let Some(stdout) = child.stdout.take() else {
                let _ = events_tx.send(CaptureEvent::Error(CaptureFault::Engine(
                    "engine stdout unavailable".to_string(),
                )));
                return;
            };
            let mut lines = BufReader::new(stdout).lines();

            let read = tokio::select! {
                () = cancelled.notified() => {
                    debug!("capture cancelled before the engine finished");
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                    return;
                }
                read = tokio::time::timeout(CAPTURE_TIMEOUT, lines.next_line()) => read,
            };

            let event = match read {
                Err(_) => {
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                    CaptureEvent::Error(CaptureFault::Engine(format!(
                        "engine produced no transcript within {}s",
                        CAPTURE_TIMEOUT.as_secs()
                    )))
                }
                Ok(Ok(Some(line))) => {
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                    let line = line.trim();
                    if line.is_empty() {
                        CaptureEvent::Error(CaptureFault::NoSpeech)
                    } else if let Some(code) = line.strip_prefix(ERROR_LINE_PREFIX) {
                        CaptureEvent::Error(CaptureFault::from_code(code.trim()))
                    } else {
                        CaptureEvent::Transcript(line.to_string())
                    }
                }
                // EOF without a line: the engine exited on its own.
                Ok(Ok(None)) => match child.wait().await {
                    Ok(status) if status.success() => {
                        CaptureEvent::Error(CaptureFault::NoSpeech)
                    }
                    Ok(status) => CaptureEvent::Error(CaptureFault::Engine(format!(
                        "engine exited with {}",
                        status
                    ))),
                    Err(e) => CaptureEvent::Error(CaptureFault::Engine(format!(
                        "engine wait failed: {}",
                        e
                    ))),
                },
                Ok(Err(e)) => {
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                    CaptureEvent::Error(CaptureFault::Engine(format!(
                        "failed to read engine output: {}",
                        e
                    )))
                }
            };

            let _ = events_tx.send(event);
        });

        self.session = Some(EngineSession { cancel, task });
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancel.notify_one();
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<CaptureEvent> {
        self.events_tx.subscribe()
    }
}

/// Terminal capture: every line on stdin is a final transcript.
///
/// The reader starts with the value and runs for the life of the process,
/// so `start`/`stop` only exist to satisfy the capability interface; a
/// terminal has no microphone to arm or release.
pub struct StdinCapture {
    events_tx: broadcast::Sender<CaptureEvent>,
    reader: JoinHandle<()>,
}

impl StdinCapture {
    pub fn new() -> Self {
        let (events_tx, _) = broadcast::channel(CAPTURE_EVENT_CAPACITY);
        let tx = events_tx.clone();

        let reader = tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        let _ = tx.send(CaptureEvent::Transcript(line.to_string()));
                    }
                    Ok(None) => {
                        debug!("stdin closed, terminal capture ended");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to read stdin");
                        break;
                    }
                }
            }
        });

        Self { events_tx, reader }
    }
}

impl SpeechCapture for StdinCapture {
    fn start(&mut self) -> Result<(), VoiceError> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn subscribe(&self) -> broadcast::Receiver<CaptureEvent> {
        self.events_tx.subscribe()
    }
}

impl Drop for StdinCapture {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
