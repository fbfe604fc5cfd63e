//! Application state and shared resources.

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::frame::{Catalog, SiteLinks};

/// Shared application state.
///
/// Everything here is read-only once the server starts; navigation state
/// lives entirely in client-held tokens.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Challenges, credentials and projects
    pub catalog: Arc<Catalog>,

    /// Absolute URLs for targets and links
    pub links: Arc<SiteLinks>,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Create application state, loading the configured catalog
    pub fn new(config: AppConfig) -> Result<Self> {
        let catalog = match config.catalog_path {
            Some(ref path) => Catalog::from_json_file(path)?,
            None => {
                tracing::info!("No catalog configured, using built-in demo catalog");
                Catalog::demo()
            }
        };
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create application state around an existing catalog
    pub fn with_catalog(config: AppConfig, catalog: Catalog) -> Self {
        let links = SiteLinks::new(&config.base_url, &config.credential_contract_address);
        Self {
            config,
            catalog: Arc::new(catalog),
            links: Arc::new(links),
            started_at: Instant::now(),
        }
    }
}
