//! Speech-recognition engines.
//!
//! The batch pipeline only depends on the [`SpeechEngine`] trait; the
//! Whisper implementation lives in [`whisper`].

pub mod whisper;

pub use whisper::{WhisperEngine, WhisperModel};

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Model not found at {0}")]
    ModelNotFound(PathBuf),

    #[error("Failed to load model: {0}")]
    LoadFailed(String),

    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),
}

/// A speech-recognition capability.
///
/// Implementations are blocking; the caller decides how to schedule them.
/// The spoken-language hint is threaded through every call — engines hold
/// no mutable language state.
pub trait SpeechEngine: Send + Sync {
    /// Transcribe an audio file, returning trimmed transcript text.
    ///
    /// Returns an empty string when the capability produces no text.
    fn transcribe_file(&self, path: &Path, language: &str) -> Result<String, EngineError>;
}
