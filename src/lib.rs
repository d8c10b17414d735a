pub mod config;
pub mod rest;
pub mod store;
pub mod views;

use std::sync::Arc;

use config::ServerConfig;
use store::SharedTaskStore;
use views::ViewRenderer;

/// Shared application state passed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    /// The in-memory task sequence — the only mutable state in the process.
    pub store: SharedTaskStore,
    /// Handlebars renderer for the HTML pages.
    pub views: Arc<ViewRenderer>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    /// Build the context a fresh process starts with: seeded store and the
    /// embedded templates registered.
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store::TaskStore::seeded()),
            views: Arc::new(ViewRenderer::new()?),
            started_at: std::time::Instant::now(),
        })
    }
}
