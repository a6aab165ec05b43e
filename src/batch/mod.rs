//! Sequential batch orchestration.
//!
//! Drives conversion, transcription, and enrichment for each queued file,
//! strictly one at a time in input order. Every input produces exactly one
//! result: per-file failures are converted into localized result text and
//! the batch moves on. Temporary conversion artifacts are removed on every
//! branch before the next file starts.

use crate::convert::{ConvertError, Converter};
use crate::engine::SpeechEngine;
use crate::enrich::{EnrichMode, Enricher};
use crate::locale::{LocaleText, UiLang};
use crate::render;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::TempPath;
use tracing::{debug, error, info, warn};

/// Per-batch settings.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Derive a structured summary from each transcript
    pub summarize: bool,
    /// Derive a bullet list from each transcript
    pub bullets: bool,
    /// Interface language; also selects the spoken-language hint
    pub lang: UiLang,
}

/// One result per submitted file, in submission order.
///
/// Field names are the external result payload consumed by the
/// presentation layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileResult {
    pub file: String,
    pub text: String,
    pub summary: String,
    pub bullets: String,
    pub seconds: f64,
}

/// Batch orchestrator.
///
/// Holds the loaded speech engine (reused across jobs and batches), the
/// optional enricher, and the format converter.
pub struct BatchRunner<'a> {
    engine: &'a dyn SpeechEngine,
    enricher: Option<&'a Enricher>,
    converter: Converter,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        engine: &'a dyn SpeechEngine,
        enricher: Option<&'a Enricher>,
        converter: Converter,
    ) -> Self {
        Self {
            engine,
            enricher,
            converter,
        }
    }

    /// Batch entry point: process all files and render the result set.
    pub async fn transcribe(
        &self,
        files: &[PathBuf],
        opts: &BatchOptions,
    ) -> (String, Vec<FileResult>) {
        let results = self.run(files, opts).await;
        let html = render::render_html(&results, opts.summarize, opts.bullets, opts.lang);
        (html, results)
    }

    /// Process all files sequentially, one result per input, input order.
    pub async fn run(&self, files: &[PathBuf], opts: &BatchOptions) -> Vec<FileResult> {
        info!(
            "Starting batch of {} file(s) (summary: {}, bullets: {}, language: {})",
            files.len(),
            opts.summarize,
            opts.bullets,
            opts.lang.code()
        );

        let mut results = Vec::with_capacity(files.len());
        for path in files {
            results.push(self.process_file(path, opts).await);
        }
        results
    }

    /// Process a single file. Never fails: every error becomes result text.
    async fn process_file(&self, path: &Path, opts: &BatchOptions) -> FileResult {
        let texts = LocaleText::get(opts.lang);
        let file = display_name(path, texts);

        if path.as_os_str().is_empty() || !path.exists() {
            warn!("File not found: {}", path.display());
            return FileResult {
                file,
                text: texts.err_file_not_found.to_string(),
                ..FileResult::default()
            };
        }

        let mut temp_wav: Option<TempPath> = None;
        if Converter::needs_conversion(path) {
            match self.converter.convert_to_wav(path) {
                Ok(temp) => temp_wav = Some(temp),
                Err(e) => {
                    error!("Conversion failed for {}: {}", path.display(), e);
                    let text = match e {
                        ConvertError::ToolMissing(_) => texts.err_converter_missing.to_string(),
                        ConvertError::ConversionFailed { .. } => {
                            texts.err_conversion_failed.to_string()
                        }
                        ConvertError::Io(e) => texts.job_failed(&e.to_string()),
                    };
                    return FileResult {
                        file,
                        text,
                        ..FileResult::default()
                    };
                }
            }
        }

        let source = temp_wav.as_deref().unwrap_or(path);
        let start = Instant::now();

        let result = match self.engine.transcribe_file(source, opts.lang.asr_language()) {
            Ok(text) => {
                let summary = self
                    .maybe_enrich(&text, EnrichMode::Summary, opts.summarize, opts.lang)
                    .await;
                let bullets = self
                    .maybe_enrich(&text, EnrichMode::Bullets, opts.bullets, opts.lang)
                    .await;
                let seconds = start.elapsed().as_secs_f64();
                info!("Finished {} in {:.2}s", file, seconds);
                FileResult {
                    file,
                    text,
                    summary,
                    bullets,
                    seconds,
                }
            }
            Err(e) => {
                error!("Transcription failed for {}: {}", file, e);
                FileResult {
                    file,
                    text: texts.job_failed(&e.to_string()),
                    ..FileResult::default()
                }
            }
        };

        if let Some(temp) = temp_wav {
            // Removal failures are not worth failing a finished job over
            if let Err(e) = temp.close() {
                debug!("Failed to remove temporary conversion artifact: {}", e);
            }
        }

        result
    }

    /// Run one enrichment mode, substituting empty text when the
    /// capability fails or was not requested.
    async fn maybe_enrich(
        &self,
        transcript: &str,
        mode: EnrichMode,
        requested: bool,
        lang: UiLang,
    ) -> String {
        if !requested || transcript.is_empty() {
            return String::new();
        }
        let Some(enricher) = self.enricher else {
            return String::new();
        };
        match enricher.enrich(transcript, mode, lang).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Enrichment ({:?}) unavailable, leaving empty: {}", mode, e);
                String::new()
            }
        }
    }
}

/// Display name for a path: file name, or the localized fallback.
fn display_name(path: &Path, texts: &LocaleText) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| texts.default_audio_name.to_string())
}
