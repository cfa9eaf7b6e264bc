use std::sync::Arc;

use anyhow::{bail, Context};
use dotenvy::dotenv;
use tracing::{error, info};

mod config;
mod enhance;
mod handlers;
mod llm;
mod options;
mod prompt;
mod state;
mod utils;

use config::CONFIG;
use llm::GeminiClient;
use state::AppState;
use utils::logging::init_logging;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _guards = init_logging(&CONFIG);

    if CONFIG.gemini_api_key.trim().is_empty() {
        bail!("GEMINI_API_KEY is required");
    }

    let model = GeminiClient::from_config(&CONFIG);
    let state = AppState::new(Arc::new(model), CONFIG.max_upload_bytes());
    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(&CONFIG.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", CONFIG.bind_addr))?;
    info!(
        "Starting OwnShot on {} (image model {}, analysis model {}, max upload {}MB)",
        CONFIG.bind_addr,
        CONFIG.gemini_image_model,
        CONFIG.gemini_analysis_model,
        CONFIG.max_upload_mb
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("OwnShot stopped");
    Ok(())
}
