use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config directory")]
    NoConfigDir,

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Speech-recognition settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    /// Whisper model (tiny, base, small, medium, large-v3)
    #[serde(default = "default_model")]
    pub model: String,

    /// Default interface language code (it, en)
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            language: default_language(),
        }
    }
}

fn default_model() -> String {
    "large-v3".to_string()
}

fn default_language() -> String {
    "it".to_string()
}

/// External audio converter settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConversionConfig {
    /// Converter binary invoked for non-WAV inputs
    #[serde(default = "default_converter")]
    pub converter: String,

    /// Target sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Target channel count
    #[serde(default = "default_channels")]
    pub channels: u8,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            converter: default_converter(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
        }
    }
}

fn default_converter() -> String {
    "ffmpeg".to_string()
}

fn default_sample_rate() -> u32 {
    16_000
}

fn default_channels() -> u8 {
    1
}

/// Ollama enrichment settings (summary and bullet-list generation).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnrichmentConfig {
    /// Ollama API endpoint
    #[serde(default = "default_ollama_url")]
    pub url: String,

    /// Model used for summary and bullet-list generation
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// Timeout for Ollama requests in seconds
    #[serde(default = "default_ollama_timeout")]
    pub timeout_secs: u32,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_ollama_model(),
            timeout_secs: default_ollama_timeout(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_ollama_model() -> String {
    "qwen3:30b-a3b-instruct-2507-q4_K_M".to_string()
}

fn default_ollama_timeout() -> u32 {
    180
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("com", "batchscribe", "batchscribe")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the data directory path (model storage)
    pub fn data_dir() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("com", "batchscribe", "batchscribe")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.conversion.sample_rate == 0 {
            return Err(ConfigError::ValidationError(
                "sample_rate must be positive".into(),
            ));
        }
        if self.conversion.channels == 0 {
            return Err(ConfigError::ValidationError(
                "channels must be positive".into(),
            ));
        }
        if self.enrichment.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;

        info!("Config saved to: {}", path.display());
        Ok(())
    }
}

/// Show current configuration
pub fn show() -> anyhow::Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;

    println!("Config file: {}\n", path.display());
    println!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}

/// Update configuration
pub fn update(
    model: Option<String>,
    language: Option<String>,
    ollama_model: Option<String>,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let mut changed = false;

    if let Some(m) = model {
        config.transcription.model = m;
        changed = true;
    }

    if let Some(lang) = language {
        config.transcription.language = lang;
        changed = true;
    }

    if let Some(m) = ollama_model {
        config.enrichment.model = m;
        changed = true;
    }

    if changed {
        config.validate()?;
        config.save()?;
        println!("Configuration updated");
    } else {
        println!("Nothing to update (see --help for options)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.transcription.model, "large-v3");
        assert_eq!(config.transcription.language, "it");
        assert_eq!(config.conversion.converter, "ffmpeg");
        assert_eq!(config.conversion.sample_rate, 16_000);
        assert_eq!(config.conversion.channels, 1);
        assert_eq!(config.enrichment.url, "http://127.0.0.1:11434");
        assert_eq!(config.enrichment.timeout_secs, 180);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.conversion.converter, "ffmpeg");
        assert_eq!(config.enrichment.timeout_secs, 180);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [transcription]
            language = "en"

            [enrichment]
            model = "llama3.2:3b"
            "#,
        )
        .unwrap();
        assert_eq!(config.transcription.language, "en");
        assert_eq!(config.transcription.model, "large-v3");
        assert_eq!(config.enrichment.model, "llama3.2:3b");
        assert_eq!(config.enrichment.url, "http://127.0.0.1:11434");
    }

    #[test]
    fn test_validate_rejects_zero_sample_rate() {
        let mut config = Config::default();
        config.conversion.sample_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.enrichment.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.transcription.model, config.transcription.model);
        assert_eq!(parsed.enrichment.url, config.enrichment.url);
    }
}
