//! Merging a persisted catalog sub-state into the freshly seeded one.
//!
//! Merge policy:
//! - `favorite` is the only field trusted from the snapshot, matched by `id`.
//! - Every other field, image handles included, comes from the fresh seed.
//! - Snapshot items whose id is not in the seed are dropped.
//! - Snapshot entries lacking an id or a boolean favorite flag are skipped.
//! - The favorites index is rebuilt from the merged flags. Surviving ids keep
//!   their persisted index order; any other favorite is appended in item order.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::types::CatalogState;
use crate::state::snapshot::list_field;

/// Catalog sub-state as read back from storage. Entries are kept as raw JSON
/// so one bad entry cannot invalidate the rest, and each field is read on
/// its own: a field of the wrong type falls back to empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersistedCatalog {
    pub items: Vec<Value>,
    pub favorites: Vec<Value>,
}

impl<'de> Deserialize<'de> for PersistedCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            items: list_field(&map, &["items", "beansList", "coffeeList"]),
            favorites: list_field(&map, &["favorites", "favoritesList"]),
        })
    }
}

#[derive(Debug, Deserialize)]
struct PersistedFlag {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, alias = "favourite")]
    favorite: Option<bool>,
}

/// What a catalog merge ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogMergeReport {
    /// Snapshot ids with no counterpart in the fresh seed.
    pub unknown_ids: Vec<String>,
    /// Entries without a usable id or flag.
    pub skipped: usize,
}

impl CatalogMergeReport {
    pub fn is_clean(&self) -> bool {
        self.unknown_ids.is_empty() && self.skipped == 0
    }
}

pub fn rehydrate_catalog(
    fresh: &CatalogState,
    persisted: &PersistedCatalog,
) -> (CatalogState, CatalogMergeReport) {
    let mut report = CatalogMergeReport::default();
    let known: HashSet<&str> = fresh.items.iter().map(|i| i.id.as_str()).collect();

    let mut flags: HashMap<String, bool> = HashMap::new();
    for entry in &persisted.items {
        let parsed = serde_json::from_value::<PersistedFlag>(entry.clone()).ok();
        match parsed {
            Some(PersistedFlag {
                id: Some(id),
                favorite: Some(favorite),
            }) if !id.is_empty() => {
                if known.contains(id.as_str()) {
                    flags.insert(id, favorite);
                } else {
                    report.unknown_ids.push(id);
                }
            }
            _ => report.skipped += 1,
        }
    }

    let items: Vec<_> = fresh
        .items
        .iter()
        .map(|item| match flags.get(&item.id) {
            Some(&favorite) if favorite != item.favorite => {
                let mut merged = item.as_ref().clone();
                merged.favorite = favorite;
                Arc::new(merged)
            }
            _ => Arc::clone(item),
        })
        .collect();

    let is_flagged = |id: &str| items.iter().any(|i| i.id == id && i.favorite);
    let mut favorites: Vec<String> = Vec::new();
    for entry in &persisted.favorites {
        if let Some(id) = entry.as_str() {
            if is_flagged(id) && !favorites.iter().any(|f| f == id) {
                favorites.push(id.to_string());
            }
        }
    }
    for item in items.iter().filter(|i| i.favorite) {
        if !favorites.iter().any(|f| *f == item.id) {
            favorites.push(item.id.clone());
        }
    }

    (CatalogState { items, favorites }, report)
}
