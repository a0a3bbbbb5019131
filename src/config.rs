//! Configuration loaded from the process environment.

use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the Google Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const TIMEOUT_VAR: &str = "ANIME_REC_TIMEOUT_SECONDS";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable not found")]
    MissingEnvVar(String),
}

/// Settings shared by every lookup for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// `None` leaves the transport's default in place.
    pub timeout_seconds: Option<u64>,
}

impl RecommenderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`: Google Gemini API key
    ///
    /// Optional:
    /// - `GEMINI_MODEL`: model name (default: "gemini-2.0-flash")
    /// - `GEMINI_BASE_URL`: API base URL (default: "https://generativelanguage.googleapis.com")
    /// - `ANIME_REC_TIMEOUT_SECONDS`: request timeout in seconds (default: none)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RecommenderConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = non_blank(API_KEY_VAR)
            .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_VAR.to_string()))?;

        let model = non_blank(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = non_blank(BASE_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_seconds = non_blank(TIMEOUT_VAR).and_then(|raw| match raw.parse::<u64>() {
            Ok(seconds) if seconds > 0 => Some(seconds),
            _ => {
                tracing::warn!("ignoring invalid {TIMEOUT_VAR} value: {raw:?}");
                None
            }
        });

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout_seconds,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Full `generateContent` URL for the configured model, without the key.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}
