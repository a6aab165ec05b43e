//! Ollama text-generation backend for local inference.

use super::{EnrichError, TextGenerator};
use crate::config::EnrichmentConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Ollama generate request.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Ollama generate response.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    /// Part of Ollama API response, required for deserialization
    #[allow(dead_code)]
    #[serde(default)]
    done: bool,
}

/// Ollama text-generation backend.
pub struct OllamaGenerator {
    client: Client,
    config: EnrichmentConfig,
}

impl OllamaGenerator {
    /// Create a new Ollama backend with the given configuration.
    ///
    /// The configured timeout is the single bounded wait around each call;
    /// exceeding it surfaces as a request error.
    pub fn new(config: EnrichmentConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .unwrap_or_default();

        Self { client, config }
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, EnrichError> {
        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let url = format!("{}/api/generate", self.config.url);
        debug!("Sending generate request to Ollama: {}", url);

        let start = std::time::Instant::now();
        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| EnrichError::InvalidResponse(e.to_string()))?;

        info!(
            "Ollama generation completed in {}ms (model: {}, {} chars)",
            start.elapsed().as_millis(),
            self.config.model,
            result.response.len()
        );

        Ok(result.response.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_new() {
        let generator = OllamaGenerator::new(EnrichmentConfig::default());
        assert_eq!(generator.name(), "ollama");
        assert_eq!(generator.model(), "qwen3:30b-a3b-instruct-2507-q4_K_M");
    }

    #[test]
    fn test_generator_custom_config() {
        let config = EnrichmentConfig {
            url: "http://127.0.0.1:11500".to_string(),
            model: "mistral:7b".to_string(),
            timeout_secs: 60,
        };
        let generator = OllamaGenerator::new(config);
        assert_eq!(generator.model(), "mistral:7b");
    }

    #[test]
    fn test_request_wire_shape() {
        let request = OllamaRequest {
            model: "m".to_string(),
            prompt: "p".to_string(),
            stream: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "m");
        assert_eq!(value["prompt"], "p");
        assert_eq!(value["stream"], false);
    }

    #[test]
    fn test_response_parses_response_field() {
        let parsed: OllamaResponse =
            serde_json::from_str(r#"{"response": "  generated  ", "done": true}"#).unwrap();
        assert_eq!(parsed.response, "  generated  ");
    }

    #[test]
    fn test_response_rejects_missing_field() {
        let parsed = serde_json::from_str::<OllamaResponse>(r#"{"done": true}"#);
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        // Port 9 (discard) on loopback has nothing listening in practice.
        let config = EnrichmentConfig {
            url: "http://127.0.0.1:9".to_string(),
            model: "m".to_string(),
            timeout_secs: 1,
        };
        let generator = OllamaGenerator::new(config);
        assert!(!generator.is_available().await);
    }
}
