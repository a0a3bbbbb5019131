use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::RecommenderConfig;
use crate::error::RecommendError;
use crate::request::GenerateContentRequest;

/// Trait for completion services that can answer a structured request
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send the request and return the raw body of a successful response.
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String, RecommendError>;
    fn provider_name(&self) -> &'static str;
    fn validate_config(&self) -> Result<()>;
}

/// Factory function to create the provider described by the configuration
pub fn create_provider(config: &RecommenderConfig) -> Result<Box<dyn CompletionProvider>> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().context("Failed to create HTTP client")?;

    let provider = GeminiProvider::new(config.clone(), client)?;
    Ok(Box::new(provider))
}

// Gemini Provider Implementation
pub struct GeminiProvider {
    config: RecommenderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: RecommenderConfig, client: reqwest::Client) -> Result<Self> {
        let provider = Self { config, client };
        provider.validate_config()?;
        Ok(provider)
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String, RecommendError> {
        let url = self.config.endpoint_url();
        tracing::debug!("POST {url}");

        // The key travels in the query string; keep it out of error messages.
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| RecommendError::Network(e.without_url()))?;

        let status = response.status();
        tracing::debug!("Gemini responded with status {status}");

        let body = response
            .text()
            .await
            .map_err(|e| RecommendError::Network(e.without_url()))?;

        if !status.is_success() {
            return Err(RecommendError::Protocol { status, body });
        }

        Ok(body)
    }

    fn provider_name(&self) -> &'static str {
        "Gemini"
    }

    fn validate_config(&self) -> Result<()> {
        if self.config.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("Gemini API key is required"));
        }
        if self.config.model.trim().is_empty() {
            return Err(anyhow::anyhow!("Gemini model is required"));
        }
        if self.config.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("Gemini base URL is required"));
        }
        Ok(())
    }
}
