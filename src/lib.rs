//! Batchscribe library exports for testing and fuzzing.
//!
//! This module re-exports internal types for use by fuzz targets
//! and integration tests.

pub mod batch;
pub mod config;
pub mod convert;
pub mod engine;
pub mod enrich;
pub mod input;
pub mod locale;
pub mod render;

// Re-export commonly used types for convenience
pub use batch::{BatchOptions, BatchRunner, FileResult};
pub use config::Config;
pub use engine::{SpeechEngine, WhisperEngine};
pub use enrich::{Enricher, OllamaGenerator};
pub use input::{enqueue_recording, normalize_entries, UploadEntry};
pub use locale::UiLang;
