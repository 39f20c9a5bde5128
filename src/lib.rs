pub mod model;
pub mod pipeline;
pub mod profile;
pub mod smooth;
pub mod utils;
pub mod vad;

pub use model::{SileroVAD, SpeechModel};
pub use pipeline::SegmentRunner;
pub use profile::{Level, Profile};
pub use smooth::smooth;
pub use vad::{
    detect, get_speech_timestamps, pad, probe, ProbabilityTrace, Segment, SpeechTimestamps,
    VadParameters,
};

/// Error types for the repeat-after-me generator
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid profile name: {0} (expected easy, medium or hard)")]
    InvalidProfileName(String),
    #[error("Invalid audio shape: {0}")]
    InvalidAudioShape(String),
    #[error("Invalid duration config: {0}")]
    InvalidDurationConfig(String),
    #[error("Model inference error: {0}")]
    ModelInference(String),
    #[error("Model loading error: {0}")]
    ModelLoad(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Audio processing error: {0}")]
    AudioProcessing(String),
    #[error("Resampling error: {0}")]
    Resample(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ONNX Runtime error: {0}")]
    Ort(#[from] ort::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the repeat-after-me generator
pub type Result<T> = std::result::Result<T, Error>;
