use metrics_exporter_prometheus::PrometheusHandle;
use ocean_badges::config::ScoringConfig;
use ocean_badges::profile::{CatalogError, ItemCatalog, Trait};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Bundled item set unless `ITEM_CATALOG_PATH` points at a replacement.
pub(crate) fn load_catalog(scoring: &ScoringConfig) -> Result<ItemCatalog, CatalogError> {
    let catalog = match &scoring.item_catalog_path {
        Some(path) => ItemCatalog::from_path(path)?,
        None => ItemCatalog::standard()?,
    };
    let source = scoring
        .item_catalog_path
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "bundled".to_string());
    info!(items = catalog.len(), %source, "item catalog loaded");
    for trait_key in Trait::ordered() {
        if catalog.count_for(trait_key) == 0 {
            warn!(%trait_key, "item catalog has no items for trait; it will always score 0");
        }
    }
    Ok(catalog)
}
