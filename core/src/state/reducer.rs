//! Root reducer: routes an action to the branch it concerns.
//!
//! Reducers are pure. A no-op hands back the same `Arc`, which is how the
//! store tells a real transition from an ignored one.

use std::sync::Arc;

use super::snapshot::PersistedState;
use super::types::RootState;
use crate::action::Action;
use crate::cart::{self, CartMergeReport};
use crate::catalog::{self, CatalogMergeReport, Collection};

/// Outcome of merging a startup snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RehydrateReport {
    pub beans: Option<CatalogMergeReport>,
    pub coffee: Option<CatalogMergeReport>,
    pub cart: Option<CartMergeReport>,
}

pub fn reduce(state: &Arc<RootState>, action: &Action) -> Arc<RootState> {
    match action {
        Action::ToggleFavorite { collection, id } => {
            let Some(next) = catalog::toggle_favorite(state.catalog(*collection), id) else {
                return Arc::clone(state);
            };
            let mut root = RootState::clone(state);
            match collection {
                Collection::Beans => root.beans = Arc::new(next),
                Collection::Coffee => root.coffee = Arc::new(next),
            }
            Arc::new(root)
        }
        Action::AddToCart(entry) => with_cart(state, Some(cart::add_line(&state.cart, entry))),
        Action::RemoveFromCart { id, size } => {
            with_cart(state, cart::remove_line(&state.cart, id, size))
        }
        Action::UpdateCartQuantity { id, size, quantity } => {
            with_cart(state, cart::update_quantity(&state.cart, id, size, *quantity))
        }
        Action::ClearCart => with_cart(state, cart::clear(&state.cart)),
        Action::SettleCart(charged) => with_cart(state, cart::settle(&state.cart, charged)),
        Action::Rehydrate(snapshot) => rehydrate(state, snapshot).0,
    }
}

fn with_cart(state: &Arc<RootState>, next: Option<cart::CartState>) -> Arc<RootState> {
    match next {
        Some(next) => Arc::new(RootState {
            cart: Arc::new(next),
            ..RootState::clone(state)
        }),
        None => Arc::clone(state),
    }
}

/// Merges `snapshot` into `state`.
///
/// Catalogs are merged first so cart lines resolve against the merged
/// catalogs. Sub-states absent from the snapshot are left untouched.
pub fn rehydrate(state: &Arc<RootState>, snapshot: &PersistedState) -> (Arc<RootState>, RehydrateReport) {
    let mut report = RehydrateReport::default();
    if snapshot.is_empty() {
        return (Arc::clone(state), report);
    }

    let mut root = RootState::clone(state);
    if let Some(persisted) = &snapshot.catalog_beans {
        let (next, merge) = catalog::rehydrate_catalog(&root.beans, persisted);
        root.beans = Arc::new(next);
        report.beans = Some(merge);
    }
    if let Some(persisted) = &snapshot.catalog_coffee {
        let (next, merge) = catalog::rehydrate_catalog(&root.coffee, persisted);
        root.coffee = Arc::new(next);
        report.coffee = Some(merge);
    }
    if let Some(persisted) = &snapshot.cart {
        let (next, merge) = cart::rehydrate_cart(persisted, |kind, id| root.item(kind, id));
        root.cart = Arc::new(next);
        report.cart = Some(merge);
    }

    (Arc::new(root), report)
}
