use anyhow::{Context, Result};
use catalog::{config::Config, handler::AppRouter, state::AppState};
use dotenv::dotenv;
use shared::utils::init_logger;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _log_guard = init_logger("catalog", config.is_dev, config.enable_file_log);

    info!("🚀 Starting CoffeeHub catalog ({} backend)...", config.backend);

    let state = Arc::new(
        AppState::new(&config)
            .await
            .context("Failed to create AppState")?,
    );

    AppRouter::serve(config.port, state.clone())
        .await
        .context("Failed to start server")?;

    info!("🛑 Shutting down, closing catalog store...");
    state.store.clone().close().await;

    info!("✅ Catalog service shutdown complete.");

    Ok(())
}
