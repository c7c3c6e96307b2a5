//! Cart state: line items keyed by `(id, size)` and the derived total.

pub mod reconcile;
pub mod reducer;
pub mod types;

pub use reconcile::{rehydrate_cart, CartMergeReport, PersistedCart, TOTAL_EPSILON};
pub use reducer::{add_line, clear, remove_line, settle, update_quantity};
pub use types::{compute_total, CartLine, CartState};
