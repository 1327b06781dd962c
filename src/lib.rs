pub mod api_client;
pub mod cache;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod routes;
pub mod search;
pub mod services;
pub mod validation;
pub mod views;

use std::sync::Arc;
use tokio::task;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub client: api_client::ApiClient,
    pub catalog: Arc<cache::Catalog>,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, error::ClientError> {
        let client = api_client::ApiClient::from_config(&config.api)?;
        let state = Arc::new(Self {
            config,
            client,
            catalog: Arc::new(cache::Catalog::new()),
        });

        let state_for_bg = state.clone();
        task::spawn(async move {
            // Warmup каталога в фоне: до его окончания подсказки пустые
            if let Err(e) = state_for_bg.catalog.warmup(&state_for_bg.client).await {
                tracing::error!("Catalog warmup failed: {}", e);
            }
        });

        Ok(state)
    }

    /// State over an already loaded catalog, without the background warmup.
    pub fn with_catalog(config: config::Config, catalog: cache::Catalog) -> Result<Arc<Self>, error::ClientError> {
        let client = api_client::ApiClient::from_config(&config.api)?;
        Ok(Arc::new(Self {
            config,
            client,
            catalog: Arc::new(catalog),
        }))
    }
}
