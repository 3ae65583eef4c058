//! Speech capture and destination resolution for the wayfinder client.
//!
//! The speech-to-text engine is an external collaborator; this crate owns
//! the boundary to it, not the engine itself. A capture session is armed,
//! produces at most one final transcript (or an engine error code), and the
//! transcript is resolved to a known destination by a static keyword rule
//! table.
//!
//! # Core pieces
//!
//! - [`SpeechCapture`]: the capability interface every engine binding
//!   implements (arm, cancel, subscribe to events)
//! - [`ProcessCapture`]: binding that runs an external engine process
//! - [`StdinCapture`]: terminal binding for the prototype binary
//! - [`TranscriptMatcher`]: free text in, known destination out
//!
//! Cancelling a capture session kills the engine without submitting a
//! partial transcript; the resolution pipeline only ever sees final text.

pub mod capture;
pub mod engine;
pub mod error;
pub mod matcher;

pub use capture::{CaptureEvent, SpeechCapture};
pub use engine::{ProcessCapture, StdinCapture};
pub use error::{CaptureFault, VoiceError};
pub use matcher::{DestinationRule, TranscriptMatcher};
