pub mod config;
pub mod display;
pub mod error;
pub mod providers;
pub mod recommender;
pub mod repl;
pub mod request;
pub mod response;

pub use config::{ConfigError, RecommenderConfig};
pub use error::RecommendError;
pub use recommender::Recommender;
pub use response::Suggestion;
