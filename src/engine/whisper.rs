//! Whisper transcription engine using whisper-rs.

use super::{EngineError, SpeechEngine};
use crate::config::Config;
use std::path::Path;
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Available Whisper models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhisperModel {
    Tiny,
    Base,
    Small,
    Medium,
    LargeV3,
}

impl WhisperModel {
    /// Parse model name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tiny" => Some(Self::Tiny),
            "base" => Some(Self::Base),
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" | "large-v3" | "largev3" => Some(Self::LargeV3),
            _ => None,
        }
    }

    /// Get the model filename
    pub fn filename(&self) -> &'static str {
        match self {
            Self::Tiny => "ggml-tiny.bin",
            Self::Base => "ggml-base.bin",
            Self::Small => "ggml-small.bin",
            Self::Medium => "ggml-medium.bin",
            Self::LargeV3 => "ggml-large-v3.bin",
        }
    }
}

/// Whisper transcription engine.
///
/// The model is loaded once and the context reused across all jobs in all
/// batches; per-call state is created for each file.
pub struct WhisperEngine {
    ctx: WhisperContext,
}

impl std::fmt::Debug for WhisperEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperEngine").finish_non_exhaustive()
    }
}

impl WhisperEngine {
    /// Create a new Whisper engine, loading the model from disk
    pub fn new(model_path: &Path) -> Result<Self, EngineError> {
        info!("Loading Whisper model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(EngineError::ModelNotFound(model_path.to_path_buf()));
        }

        let params = WhisperContextParameters::default();

        let ctx =
            WhisperContext::new_with_params(model_path.to_str().unwrap_or_default(), params)
                .map_err(|e| EngineError::LoadFailed(format!("{:?}", e)))?;

        info!("Whisper model loaded successfully");

        Ok(Self { ctx })
    }

    /// Load engine from config
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let data_dir = Config::data_dir().map_err(|e| EngineError::LoadFailed(e.to_string()))?;

        let model =
            WhisperModel::from_str(&config.transcription.model).unwrap_or(WhisperModel::LargeV3);

        let model_path = data_dir.join("models").join(model.filename());

        Self::new(&model_path)
    }
}

impl SpeechEngine for WhisperEngine {
    fn transcribe_file(&self, path: &Path, language: &str) -> Result<String, EngineError> {
        let samples = read_wav_mono(path)?;
        if samples.is_empty() {
            debug!("No samples in {}, skipping inference", path.display());
            return Ok(String::new());
        }

        let start_time = std::time::Instant::now();

        debug!(
            "Transcribing {} ({} samples, language: {})",
            path.display(),
            samples.len(),
            language
        );

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| EngineError::TranscriptionFailed(format!("{:?}", e)))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(language));
        // Always transcribe in the spoken language, never translate
        params.set_translate(false);
        params.set_token_timestamps(true);

        // Disable printing to avoid cluttering output
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        state
            .full(params, &samples)
            .map_err(|e| EngineError::TranscriptionFailed(format!("{:?}", e)))?;

        let num_segments = state
            .full_n_segments()
            .map_err(|e| EngineError::TranscriptionFailed(format!("{:?}", e)))?;

        let mut text = String::new();
        for i in 0..num_segments {
            if let Ok(segment) = state.full_get_segment_text(i) {
                text.push_str(&segment);
            }
        }

        let text = text.trim().to_string();

        info!(
            "Transcription complete ({} chars, {}ms)",
            text.len(),
            start_time.elapsed().as_millis()
        );

        Ok(text)
    }
}

/// Target sample rate the engine accepts. The converter produces this rate;
/// native WAV inputs must already comply.
const EXPECTED_SAMPLE_RATE: u32 = 16_000;

/// Read a WAV file into mono f32 samples.
fn read_wav_mono(path: &Path) -> Result<Vec<f32>, EngineError> {
    let mut reader =
        hound::WavReader::open(path).map_err(|e| EngineError::InvalidAudio(e.to_string()))?;
    let spec = reader.spec();

    if spec.sample_rate != EXPECTED_SAMPLE_RATE {
        return Err(EngineError::InvalidAudio(format!(
            "expected {} Hz input, got {} Hz",
            EXPECTED_SAMPLE_RATE, spec.sample_rate
        )));
    }

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| EngineError::InvalidAudio(e.to_string()))?,
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32_768.0))
            .collect::<Result<_, _>>()
            .map_err(|e| EngineError::InvalidAudio(e.to_string()))?,
        (format, bits) => {
            return Err(EngineError::InvalidAudio(format!(
                "unsupported sample format: {:?}/{} bit",
                format, bits
            )));
        }
    };

    if spec.channels <= 1 {
        return Ok(samples);
    }

    // Average interleaved channels down to mono
    let channels = spec.channels as usize;
    Ok(samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, spec: hound::WavSpec, samples: &[i16]) {
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn int_spec(channels: u16, sample_rate: u32) -> hound::WavSpec {
        hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        }
    }

    #[test]
    fn test_model_from_str() {
        assert_eq!(WhisperModel::from_str("tiny"), Some(WhisperModel::Tiny));
        assert_eq!(
            WhisperModel::from_str("LARGE-V3"),
            Some(WhisperModel::LargeV3)
        );
        assert_eq!(WhisperModel::from_str("invalid"), None);
    }

    #[test]
    fn test_model_filename() {
        assert_eq!(WhisperModel::Tiny.filename(), "ggml-tiny.bin");
        assert_eq!(WhisperModel::LargeV3.filename(), "ggml-large-v3.bin");
    }

    #[test]
    fn test_engine_model_not_found() {
        let err = WhisperEngine::new(Path::new("/nonexistent/ggml-tiny.bin"))
            .expect_err("model must be missing");
        assert!(matches!(err, EngineError::ModelNotFound(_)));
    }

    #[test]
    fn test_read_wav_mono_passthrough() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_wav(&path, int_spec(1, 16_000), &[0, 16_384, -16_384]);

        let samples = read_wav_mono(&path).unwrap();
        assert_eq!(samples.len(), 3);
        assert!((samples[1] - 0.5).abs() < 1e-3);
        assert!((samples[2] + 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_read_wav_downmixes_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        // Two frames: (1.0, 0.0) and (-0.5, -0.5) in i16 scale
        write_wav(
            &path,
            int_spec(2, 16_000),
            &[32_767, 0, -16_384, -16_384],
        );

        let samples = read_wav_mono(&path).unwrap();
        assert_eq!(samples.len(), 2);
        assert!((samples[0] - 0.5).abs() < 1e-3);
        assert!((samples[1] + 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_read_wav_rejects_wrong_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cd.wav");
        write_wav(&path, int_spec(1, 44_100), &[0; 8]);

        let err = read_wav_mono(&path).expect_err("rate must be rejected");
        assert!(matches!(err, EngineError::InvalidAudio(_)));
        assert!(err.to_string().contains("44100"));
    }

    #[test]
    fn test_read_wav_missing_file() {
        let err = read_wav_mono(Path::new("/nonexistent.wav")).expect_err("open must fail");
        assert!(matches!(err, EngineError::InvalidAudio(_)));
    }
}
