//! Transcript enrichment using a local text-generation capability.
//!
//! Derives a structured summary and a bullet list from transcripts. The
//! generator is strictly best-effort from the pipeline's point of view:
//! this module returns typed errors, and the batch orchestrator decides to
//! substitute empty text when a call fails.

pub mod ollama;

pub use ollama::OllamaGenerator;

use crate::locale::{LocaleText, UiLang};
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

/// Errors from text-generation backends.
#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint returned error: {0}")]
    ApiError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Which derived text to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichMode {
    Summary,
    Bullets,
}

/// Trait for text-generation backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the backend name (e.g., "ollama").
    fn name(&self) -> &'static str;

    /// Get the model name being used.
    fn model(&self) -> &str;

    /// Check if the backend is available/reachable.
    async fn is_available(&self) -> bool;

    /// Generate text for a fully rendered prompt.
    async fn generate(&self, prompt: &str) -> Result<String, EnrichError>;
}

/// High-level enricher that renders localized prompts and drives a backend.
pub struct Enricher {
    generator: Box<dyn TextGenerator>,
}

impl Enricher {
    /// Create a new enricher with the given generator backend.
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Check if the generator backend is available.
    pub async fn is_generator_available(&self) -> bool {
        self.generator.is_available().await
    }

    /// Derive summary or bullet text from a transcript.
    ///
    /// Callers must not invoke this with an empty transcript; the prompt
    /// templates embed the transcript verbatim.
    pub async fn enrich(
        &self,
        transcript: &str,
        mode: EnrichMode,
        lang: UiLang,
    ) -> Result<String, EnrichError> {
        let texts = LocaleText::get(lang);
        let prompt = match mode {
            EnrichMode::Summary => texts.summary_prompt(transcript),
            EnrichMode::Bullets => texts.bullets_prompt(transcript),
        };

        info!(
            "Generating {:?} ({} chars of transcript) with {} ({})",
            mode,
            transcript.len(),
            self.generator.name(),
            self.generator.model()
        );

        self.generator.generate(&prompt).await
    }
}
