use tokio::io::BufReader;

use crate::api::ApiClient;
use crate::console::Console;
use crate::error::AppResult;
use crate::notify::ConsoleNotifier;

pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod api;
pub mod console;
pub mod error;
pub mod model;
pub mod notify;
pub mod render;
pub mod review;
pub mod utils;

static APPLICATION_NAME: &str = "coursedesk";

/// Client for the backend configured in the config file.
pub async fn build_client() -> AppResult<ApiClient> {
    let use_local = cfg!(debug_assertions);
    let config = Config::get_or_init(use_local).await;

    tracing::debug!("backend at {}", config.api().base_url());
    Ok(ApiClient::new(config.api())?)
}

pub fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}

#[tracing::instrument]
pub async fn run() -> AppResult<()> {
    setup_trace();
    let client = build_client().await?;
    let notifier = ConsoleNotifier;

    let mut console = Console::new(&client, &notifier);
    console.run(BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}
