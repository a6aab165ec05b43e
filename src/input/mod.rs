//! Upload-entry normalization.
//!
//! The presentation layer hands over a mix of shapes: bare paths, structured
//! upload records, and an optional microphone capture. Everything is resolved
//! to plain paths here, once, so the rest of the pipeline only ever sees
//! `PathBuf`. Unresolvable entries are skipped, never nulled into the list.
//! This module does not touch the filesystem.

use crate::locale::{LocaleText, UiLang};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// A single entry from the upload surface.
///
/// Structured records expose the path under one of several accepted keys;
/// the first present non-empty key wins, in `path`, `name`, `file` order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadEntry {
    /// A bare filesystem path
    Path(PathBuf),
    /// A structured upload record
    Record {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<String>,
    },
}

impl UploadEntry {
    /// Resolve the entry to a path, or None when no accepted key carries one.
    pub fn resolve(&self) -> Option<PathBuf> {
        match self {
            Self::Path(p) => {
                if p.as_os_str().is_empty() {
                    None
                } else {
                    Some(p.clone())
                }
            }
            Self::Record { path, name, file } => [path, name, file]
                .into_iter()
                .find_map(|field| field.as_deref().filter(|s| !s.is_empty()))
                .map(PathBuf::from),
        }
    }
}

/// Flatten a heterogeneous entry list into an ordered path list.
///
/// Order is preserved; malformed entries are dropped.
pub fn normalize_entries(entries: &[UploadEntry]) -> Vec<PathBuf> {
    let mut normalized = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.resolve() {
            Some(path) => normalized.push(path),
            None => debug!("Skipping upload entry with no resolvable path: {:?}", entry),
        }
    }
    normalized
}

/// Append a microphone capture to the queued file list.
///
/// Returns the updated path list and a localized status line. When the
/// capture is absent or unresolvable, the list is returned unchanged.
pub fn enqueue_recording(
    recording: Option<&UploadEntry>,
    files: &[UploadEntry],
    lang: UiLang,
) -> (Vec<PathBuf>, String) {
    let texts = LocaleText::get(lang);
    let mut updated = normalize_entries(files);

    let Some(path) = recording.and_then(UploadEntry::resolve) else {
        return (updated, texts.record_missing.to_string());
    };

    let display_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| texts.default_audio_name.to_string());
    updated.push(path);

    (updated, texts.recording_added(&display_name))
}
