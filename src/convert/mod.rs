//! Audio format conversion via an external converter subprocess.
//!
//! Inputs that are not already WAV are converted to a uniquely-named
//! temporary WAV (mono, 16 kHz by default) before transcription. The
//! temporary artifact is a [`tempfile::TempPath`]: dropping it deletes the
//! file, so no branch can leak it — including the error paths here, where a
//! partially written file is removed before the error propagates.

use crate::config::ConversionConfig;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempPath;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Converter '{0}' not found")]
    ToolMissing(String),

    #[error("Converter exited with {status}")]
    ConversionFailed { status: std::process::ExitStatus },

    #[error("I/O error during conversion: {0}")]
    Io(#[from] std::io::Error),
}

/// Wrapper around the external converter binary.
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Probe whether the converter binary can be executed.
    pub fn is_available(&self) -> bool {
        Command::new(&self.config.converter)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Whether a source file needs conversion before transcription.
    ///
    /// Decided by extension: only `.wav` satisfies the raw-audio contract.
    pub fn needs_conversion(path: &Path) -> bool {
        path.extension()
            .map(|ext| !ext.eq_ignore_ascii_case("wav"))
            .unwrap_or(true)
    }

    /// Convert a source file to a temporary WAV meeting the contract.
    ///
    /// On success the caller owns the returned [`TempPath`] and is
    /// responsible for keeping it alive until the file has been consumed.
    pub fn convert_to_wav(&self, input: &Path) -> Result<TempPath, ConvertError> {
        let temp_path = tempfile::Builder::new()
            .prefix("batchscribe_tmp_")
            .suffix(".wav")
            .tempfile()?
            .into_temp_path();

        debug!(
            "Converting {} -> {} ({} Hz, {} ch)",
            input.display(),
            temp_path.display(),
            self.config.sample_rate,
            self.config.channels
        );

        let output = Command::new(&self.config.converter)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-ac")
            .arg(self.config.channels.to_string())
            .arg("-ar")
            .arg(self.config.sample_rate.to_string())
            .arg(&*temp_path)
            .output();

        // A failed spawn or a non-zero exit drops temp_path, deleting any
        // partial output before the error reaches the caller.
        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ConvertError::ToolMissing(self.config.converter.clone()));
            }
            Err(e) => return Err(ConvertError::Io(e)),
        };

        if !output.status.success() {
            debug!(
                "Converter stderr ({} bytes): {}",
                output.stderr.len(),
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(ConvertError::ConversionFailed {
                status: output.status,
            });
        }

        info!("Converted {} to temporary WAV", input.display());
        Ok(temp_path)
    }
}
