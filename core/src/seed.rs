//! Seed catalog collaborator.

use crate::catalog::{CatalogItem, Collection};

/// Supplies the fixed catalog a store is seeded with. Called once per
/// collection at boot and expected to return the same data every time.
pub trait SeedProvider: Send + Sync {
    fn initial_catalog(&self, collection: Collection) -> Vec<CatalogItem>;
}

/// Seed held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSeed {
    pub beans: Vec<CatalogItem>,
    pub coffee: Vec<CatalogItem>,
}

impl StaticSeed {
    pub fn new(beans: Vec<CatalogItem>, coffee: Vec<CatalogItem>) -> Self {
        Self { beans, coffee }
    }
}

impl SeedProvider for StaticSeed {
    fn initial_catalog(&self, collection: Collection) -> Vec<CatalogItem> {
        match collection {
            Collection::Beans => self.beans.clone(),
            Collection::Coffee => self.coffee.clone(),
        }
    }
}
