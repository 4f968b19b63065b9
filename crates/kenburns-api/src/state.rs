//! Application state.

use std::sync::Arc;

use kenburns_effects::EffectCatalog;

use crate::config::ApiConfig;
use crate::orchestrator::JobOrchestrator;
use crate::registry::JobRegistry;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub registry: Arc<JobRegistry>,
    pub catalog: Arc<EffectCatalog>,
    pub orchestrator: Arc<JobOrchestrator>,
}

impl AppState {
    /// Create application state, loading the effect catalog once.
    pub fn new(config: ApiConfig) -> Self {
        let catalog = Arc::new(EffectCatalog::load(&config.effects_dir));
        Self::with_catalog(config, catalog)
    }

    /// Create application state around an existing catalog (used by tests).
    pub fn with_catalog(config: ApiConfig, catalog: Arc<EffectCatalog>) -> Self {
        crate::error::set_internal_redaction(config.is_production());
        let registry = Arc::new(JobRegistry::new());
        let orchestrator = Arc::new(JobOrchestrator::new(
            Arc::clone(&registry),
            Arc::clone(&catalog),
        ));
        Self {
            config,
            registry,
            catalog,
            orchestrator,
        }
    }
}
