use thiserror::Error;

/// Failures at the audio-device boundary.
///
/// Synthesis and pattern logic have no failure modes; everything fallible
/// lives where the engine touches the host (device acquisition, stream
/// setup). Each kind is distinguishable so callers can fail fast instead of
/// producing silent, incorrect audio.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no default audio output device available")]
    NoOutputDevice,

    #[error("failed to query default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}
