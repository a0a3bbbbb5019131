use std::any::Any;
use std::panic::AssertUnwindSafe;

use anyhow::Result;
use futures_util::FutureExt;

use crate::config::RecommenderConfig;
use crate::error::RecommendError;
use crate::providers::{create_provider, CompletionProvider};
use crate::request::build_request;
use crate::response::{interpret, Suggestion};

pub struct Recommender {
    provider: Box<dyn CompletionProvider>,
}

impl Recommender {
    pub fn new(config: &RecommenderConfig) -> Result<Self> {
        let provider = create_provider(config)?;
        Ok(Self { provider })
    }

    pub fn with_provider(provider: Box<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Ask the provider for anime similar to `favorite_anime`.
    pub async fn suggest(&self, favorite_anime: &str) -> Result<Vec<Suggestion>, RecommendError> {
        let request = build_request(favorite_anime);
        let body = self.provider.generate(&request).await?;
        interpret(&body)
    }

    /// Like [`Recommender::suggest`], but a panic during the lookup is turned
    /// into [`RecommendError::Unexpected`] so the caller can keep going.
    pub async fn lookup(&self, favorite_anime: &str) -> Result<Vec<Suggestion>, RecommendError> {
        let result = AssertUnwindSafe(self.suggest(favorite_anime))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(RecommendError::Unexpected(panic_message(&*payload))));

        if let Err(e) = &result {
            tracing::warn!("lookup for {favorite_anime:?} failed: {e}");
        }
        result
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "lookup panicked".to_string()
    }
}
