use anyhow::{Context, Result};
use clap::Command;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use anime_recommender::{display, repl, ConfigError, Recommender, RecommenderConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    Command::new("anime_rec")
        .version("0.1.0")
        .author("Anime Recommender Contributors")
        .about("Find your next favorite anime with the power of AI")
        .get_matches();

    // .env first so it can set RUST_LOG
    dotenv::dotenv().ok();

    // Logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match RecommenderConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingEnvVar(var)) => {
            display::render_missing_key(&mut io::stdout(), &var)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let recommender = Recommender::new(&config).context("Failed to create recommender")?;
    tracing::debug!(
        "using {} model {} at {}",
        recommender.provider_name(),
        config.model,
        config.base_url
    );

    display::render_banner(&mut io::stdout())?;
    repl::run(&recommender, io::stdin().lock(), io::stdout()).await?;

    Ok(ExitCode::SUCCESS)
}
