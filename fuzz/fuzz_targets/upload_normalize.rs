//! Fuzz target for upload-entry normalization.
//!
//! Ensures that arbitrary JSON entry lists resolve without panicking.

#![no_main]

use batchscribe::input::{normalize_entries, UploadEntry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(entries) = serde_json::from_str::<Vec<UploadEntry>>(s) {
            let _ = normalize_entries(&entries);
        }
    }
});
