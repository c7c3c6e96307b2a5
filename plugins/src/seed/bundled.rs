use brewcart_core::api::{CatalogItem, Collection, SeedProvider};

use super::json::JsonSeed;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// The catalog shipped with the binary.
#[derive(Debug, Clone)]
pub struct BundledSeed {
    inner: JsonSeed,
}

impl BundledSeed {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self {
            inner: JsonSeed::parse(BUNDLED_CATALOG)?,
        })
    }
}

impl SeedProvider for BundledSeed {
    fn initial_catalog(&self, collection: Collection) -> Vec<CatalogItem> {
        self.inner.initial_catalog(collection)
    }
}
