use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("a capture session is already running")]
    CaptureBusy,

    #[error("failed to start speech engine: {0}")]
    EngineSpawn(String),
}

/// An engine-reported capture failure.
///
/// Speech engines report failures as short code strings (`no-speech`,
/// `not-allowed`, ...). The known codes get their own variants so callers
/// can branch on them; anything else is carried verbatim in `Engine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureFault {
    /// The engine heard nothing it could transcribe.
    NoSpeech,
    /// Microphone access was denied.
    NotAllowed,
    /// The audio device could not be opened.
    AudioCapture,
    /// The engine lost its network backend.
    Network,
    /// Any other engine-reported code.
    Engine(String),
}

impl CaptureFault {
    /// Maps an engine error-code string to a fault.
    pub fn from_code(code: &str) -> Self {
        match code {
            "no-speech" => Self::NoSpeech,
            "not-allowed" => Self::NotAllowed,
            "audio-capture" => Self::AudioCapture,
            "network" => Self::Network,
            other => Self::Engine(other.to_string()),
        }
    }

    /// The canonical code string for this fault.
    pub fn code(&self) -> &str {
        match self {
            Self::NoSpeech => "no-speech",
            Self::NotAllowed => "not-allowed",
            Self::AudioCapture => "audio-capture",
            Self::Network => "network",
            Self::Engine(code) => code,
        }
    }
}

impl std::fmt::Display for CaptureFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSpeech => write!(f, "no speech was detected"),
            Self::NotAllowed => write!(f, "microphone access was denied"),
            Self::AudioCapture => write!(f, "the audio device could not be opened"),
            Self::Network => write!(f, "the speech engine lost its network backend"),
            Self::Engine(code) => write!(f, "speech engine error: {}", code),
        }
    }
}
