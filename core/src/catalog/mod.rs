//! Catalog state: the beans and coffee collections and their favorites.

pub mod query;
pub mod reconcile;
pub mod reducer;
pub mod types;

pub use query::{categories, filter_by_category, search, ALL_CATEGORIES};
pub use reconcile::{rehydrate_catalog, CatalogMergeReport, PersistedCatalog};
pub use reducer::toggle_favorite;
pub use types::{
    price_for_size, CatalogItem, CatalogState, Collection, ImageRef, ItemKind, PriceTier,
};
