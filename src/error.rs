use thiserror::Error;

/// Failures of a single lookup. None of these end the interactive session.
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("A network error occurred: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error occurred: {status}")]
    Protocol {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Received an unexpected response format from the API: {0}")]
    Format(String),

    #[error("Failed to parse the suggestions returned by the API: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl RecommendError {
    /// Raw response body, when the server answered with a failure status.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            RecommendError::Protocol { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}
