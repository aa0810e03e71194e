//! Gemini API Client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::types::{empty_response_message, GenerateContentRequest, GenerateContentResponse};
use crate::ports::{PortError, PortResult, TextGenerator};

/// Gemini client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root, e.g. https://generativelanguage.googleapis.com
    pub api_base_url: String,
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    pub fn with_config(config: GeminiConfig) -> Result<Self, PortError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PortError::Communication(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, model: &str, prompt: &str) -> PortResult<String> {
        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::TOO_MANY_REQUESTS => return Err(PortError::RateLimitExceeded),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                return Err(PortError::Authentication(format!("HTTP {}: {}", status, body)));
            }
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(PortError::Communication(format!("HTTP {}: {}", status, body)));
            }
            _ => {}
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body
            .text()
            .ok_or_else(|| PortError::Protocol(empty_response_message(&body)))?;
        tracing::debug!("Gemini raw response: {}", text.trim());

        Ok(text)
    }
}
