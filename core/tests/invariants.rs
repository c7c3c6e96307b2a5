mod common;

use std::sync::Arc;

use brewcart_core::api::{Action, Collection, RootState, StorePhase};
use common::{boot, seed, shared_engine};

/// Small deterministic generator so failures replay.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next() as usize) % options.len()]
    }
}

fn random_action(rng: &mut Lcg, state: &RootState) -> Action {
    let collection = if rng.next() % 2 == 0 {
        Collection::Beans
    } else {
        Collection::Coffee
    };
    let ids: &[&str] = match collection {
        Collection::Beans => &["B1", "B2", "B404"],
        Collection::Coffee => &["C1", "C2", "C3", "C404"],
    };
    let sizes: &[&str] = match collection {
        Collection::Beans => &["250gm", "500gm", "1Kg"],
        Collection::Coffee => &["S", "M", "L"],
    };
    let id = rng.pick(ids);
    let size = rng.pick(sizes);

    match rng.next() % 10 {
        0..=2 => Action::toggle_favorite(collection, id),
        3..=5 => match state.catalog(collection).get(id) {
            Some(item) => Action::AddToCart(brewcart_core::api::CartLine::from_item(
                item,
                size,
                (rng.next() % 4) as u32,
            )),
            None => Action::remove_from_cart(id, size),
        },
        6 => Action::remove_from_cart(id, size),
        7 | 8 => Action::update_cart_quantity(id, size, (rng.next() % 5) as u32),
        _ => Action::ClearCart,
    }
}

fn assert_invariants(state: &RootState) {
    assert!(state.beans.is_consistent(), "beans favorites out of sync");
    assert!(state.coffee.is_consistent(), "coffee favorites out of sync");
    assert!(
        (state.cart.total_price - state.cart.recomputed_total()).abs() < 1e-6,
        "cart total {} != {}",
        state.cart.total_price,
        state.cart.recomputed_total()
    );
    let mut keys: Vec<_> = state
        .cart
        .lines
        .iter()
        .map(|l| (l.id.as_str(), l.size.as_str()))
        .collect();
    let len = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), len, "duplicate cart line keys");
}

#[tokio::test]
async fn invariants_hold_over_random_sequences() {
    for run in 0..8u64 {
        let store = boot(&seed(), shared_engine()).await;
        assert_eq!(store.phase().await, StorePhase::Ready);
        let mut rng = Lcg(run + 1);

        for _ in 0..200 {
            let state = store.state().await;
            let action = random_action(&mut rng, &state);
            let next = store.dispatch(action).await;
            assert_invariants(&next);
        }
    }
}

#[tokio::test]
async fn toggle_twice_is_identity() {
    let store = boot(&seed(), shared_engine()).await;
    let before = store.state().await;

    for (collection, id) in [
        (Collection::Beans, "B1"),
        (Collection::Coffee, "C2"),
        (Collection::Coffee, "C404"),
    ] {
        store
            .dispatch(Action::toggle_favorite(collection, id))
            .await;
        let after = store
            .dispatch(Action::toggle_favorite(collection, id))
            .await;
        assert_eq!(after.catalog(collection), before.catalog(collection));
    }
}

#[tokio::test]
async fn dispatches_from_many_tasks_are_serialized() {
    let store = boot(&seed(), shared_engine()).await;
    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.add_item(Collection::Coffee, "C1", "S", 1).await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let state: Arc<RootState> = store.state().await;
    assert_eq!(state.cart.lines[0].quantity, 16);
    assert_eq!(store.revision().await, 16);
}
