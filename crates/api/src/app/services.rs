use std::sync::Arc;

use storekeep_auth::ActionTokens;
use storekeep_infra::{catalog_store::InMemoryCatalog, AppConfig, CatalogMaintenance, MaintenanceConfig};

/// Everything the handlers need, shared behind an `Arc`.
#[derive(Debug)]
pub struct AppServices {
    pub catalog: Arc<InMemoryCatalog>,
    pub maintenance: CatalogMaintenance<Arc<InMemoryCatalog>>,
    pub tokens: ActionTokens,
}

impl AppServices {
    pub fn new(catalog: Arc<InMemoryCatalog>, maintenance: MaintenanceConfig, tokens: ActionTokens) -> Self {
        Self {
            maintenance: CatalogMaintenance::new(catalog.clone(), maintenance),
            catalog,
            tokens,
        }
    }

    /// Wire an empty in-memory catalog using process configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(InMemoryCatalog::new()),
            config.maintenance.clone(),
            ActionTokens::new(config.token_ttl),
        )
    }
}
