use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use brewcart_core::api::{
    get_brewcart_data_dir, AppConfig, CheckoutProvider, MemoryEngine, PersistenceEngine,
    SeedProvider,
};

use crate::checkout::LedgerCheckout;
use crate::persist::FileEngine;
use crate::seed::{BundledSeed, JsonSeed};

pub fn build_seed(cfg: &AppConfig) -> Result<Box<dyn SeedProvider>> {
    match cfg.catalog.seed_path.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => Ok(Box::new(JsonSeed::from_path(Path::new(path))?)),
        _ => Ok(Box::new(BundledSeed::load()?)),
    }
}

/// The durable engine, or an in-memory one when it cannot be opened.
pub fn build_engine(cfg: &AppConfig) -> Arc<dyn PersistenceEngine> {
    if !cfg.persistence.enabled {
        return Arc::new(MemoryEngine::new());
    }

    let directory = match cfg.persistence.directory.as_deref() {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => match get_brewcart_data_dir() {
            Ok(dir) => dir.join("state"),
            Err(e) => {
                warn!(error = %e, "No data directory, state will not survive restarts");
                return Arc::new(MemoryEngine::new());
            }
        },
    };

    match FileEngine::open(&directory) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            warn!(
                directory = %directory.display(),
                error = %e,
                "Snapshot storage unavailable, state will not survive restarts"
            );
            Arc::new(MemoryEngine::new())
        }
    }
}

pub fn build_checkout(cfg: &AppConfig) -> Result<Box<dyn CheckoutProvider>> {
    let path = match cfg.checkout.ledger_path.as_deref() {
        Some(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => get_brewcart_data_dir()?.join("receipts.jsonl"),
    };
    Ok(Box::new(LedgerCheckout::new(path)))
}
