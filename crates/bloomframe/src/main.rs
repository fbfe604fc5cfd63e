//! # Bloomframe - SkillBloom Frame Server
//!
//! Serves the SkillBloom frames: challenge browsing, solution submission,
//! credential and project carousels. Every interaction is a stateless
//! POST; navigation state travels in the client-echoed state token.
//!
//! ## Architecture
//! ```text
//! Client → POST /api/frame/* → validate → decode state → route → render
//!                                                             ↓
//!                                          frame HTML + /api/og card URL
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod error;
mod frame;
mod og;
mod routes;
mod state;

use crate::config::AppConfig;
use crate::state::AppState;

/// SkillBloom Frame Server
#[derive(Parser, Debug)]
#[command(name = "bloomframe")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/bloomframe.toml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Public base URL (overrides config)
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// Catalog JSON file (overrides config)
    #[arg(long, env = "CATALOG_PATH")]
    catalog: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env before CLI parsing so `env = ...` arguments see it
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    info!(
        "🌱 Starting SkillBloom Frame Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = AppConfig::load(&args.config, &args)?;
    info!("📋 Configuration loaded from {}", args.config);

    // Initialize application state
    let state = AppState::new(config.clone())?;
    info!(
        challenges = state.catalog.challenges().len(),
        credentials = state.catalog.credential_count(),
        projects = state.catalog.projects().len(),
        "📚 Catalog loaded"
    );

    // Build router
    let app = routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("🚀 Frames served on {} as {}", config.listen_addr, config.base_url);

    // Handle graceful shutdown
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("🛑 Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("👋 Frame server shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .init();
    }

    Ok(())
}
