//! Catalog transitions.

use std::sync::Arc;

use super::types::CatalogState;

/// Flips the favorite flag of `id` and keeps the favorites index in step.
///
/// Returns `None` when `id` is not in the collection; an unknown id is a
/// tolerated no-op rather than an error.
pub fn toggle_favorite(state: &CatalogState, id: &str) -> Option<CatalogState> {
    let pos = state.position(id)?;

    let mut items = state.items.clone();
    let item = Arc::make_mut(&mut items[pos]);
    item.favorite = !item.favorite;
    let now_favorite = item.favorite;

    let mut favorites = state.favorites.clone();
    if now_favorite {
        if !favorites.iter().any(|f| f == id) {
            favorites.push(id.to_string());
        }
    } else {
        favorites.retain(|f| f != id);
    }

    Some(CatalogState { items, favorites })
}
