use crate::error::{CaptureFault, VoiceError};
use tokio::sync::broadcast;

/// Default capacity for a capture event broadcast channel.
pub(crate) const CAPTURE_EVENT_CAPACITY: usize = 16;

/// Event emitted by a capture session.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// The final transcript of one capture session.
    Transcript(String),
    /// The session ended with an engine-reported failure.
    Error(CaptureFault),
}

/// The speech-capture capability boundary.
///
/// An implementation binds whatever speech-to-text engine the platform
/// offers. One `start` arms one capture session, which produces at most one
/// event; `stop` cancels the session without emitting anything. The core
/// pipeline depends only on this trait, so engines can be swapped or mocked
/// freely.
pub trait SpeechCapture: Send {
    /// Arms a capture session.
    ///
    /// Returns `VoiceError::CaptureBusy` if a session is already running.
    fn start(&mut self) -> Result<(), VoiceError>;

    /// Cancels the running session, if any.
    ///
    /// Never fails, and guarantees no partial transcript is emitted for the
    /// cancelled session.
    fn stop(&mut self);

    /// Subscribes to this capture's event stream.
    fn subscribe(&self) -> broadcast::Receiver<CaptureEvent>;
}
