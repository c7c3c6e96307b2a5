//! Rebuilding the cart from a persisted sub-state.
//!
//! Merge policy:
//! - Lines are taken from the snapshot, minus their image handle, which is
//!   re-resolved from the current catalog item of the declared type.
//! - A line whose item can no longer be found is dropped, as is any entry
//!   that does not parse as a line.
//! - Entries repeating an `(id, size)` key are folded into the first one.
//! - `totalPrice` is restored as persisted (0 when missing). It is not
//!   recomputed, so it can drift from the surviving lines; the report
//!   carries both values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::types::{CartLine, CartState};
use crate::catalog::{CatalogItem, ItemKind};
use crate::state::snapshot::{list_field, number_field};

/// Totals closer than this are considered equal.
pub const TOTAL_EPSILON: f64 = 1e-6;

/// Cart sub-state as read back from storage. Each field is read on its own:
/// a field of the wrong type falls back to empty (or no total).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCart {
    pub lines: Vec<Value>,
    pub total_price: Option<f64>,
}

impl<'de> Deserialize<'de> for PersistedCart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            lines: list_field(&map, &["lines", "cartList"]),
            total_price: number_field(&map, &["totalPrice", "cartPrice"]),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartMergeReport {
    /// `(id, size)` of lines whose catalog item is gone.
    pub unresolved: Vec<(String, String)>,
    /// Entries that did not parse as a line.
    pub malformed: usize,
    /// Persisted total minus the total of the surviving lines.
    pub drift: f64,
}

impl CartMergeReport {
    pub fn has_drift(&self) -> bool {
        self.drift.abs() > TOTAL_EPSILON
    }
}

/// `resolve` looks up the current catalog item for a kind and id.
pub fn rehydrate_cart<'a, F>(persisted: &PersistedCart, resolve: F) -> (CartState, CartMergeReport)
where
    F: Fn(ItemKind, &str) -> Option<&'a CatalogItem>,
{
    let mut report = CartMergeReport::default();
    let mut lines: Vec<CartLine> = Vec::with_capacity(persisted.lines.len());

    for entry in &persisted.lines {
        let mut line = match serde_json::from_value::<CartLine>(entry.clone()) {
            Ok(line) if !line.id.is_empty() => line,
            _ => {
                report.malformed += 1;
                continue;
            }
        };

        let Some(item) = resolve(line.kind, &line.id) else {
            report.unresolved.push((line.id, line.size));
            continue;
        };
        line.image_square = item.image_square.clone();

        match lines.iter_mut().find(|l| l.matches(&line.id, &line.size)) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => lines.push(line),
        }
    }

    let total_price = persisted.total_price.unwrap_or(0.0);
    let state = CartState { lines, total_price };
    report.drift = total_price - state.recomputed_total();
    (state, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogState, ImageRef, PriceTier};
    use serde_json::json;

    fn item(id: &str, kind: ItemKind) -> CatalogItem {
        CatalogItem {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            roasted: String::new(),
            image_square: ImageRef::new(format!("{id}.png")),
            image_portrait: ImageRef::new(format!("{id}_portrait.png")),
            ingredients: String::new(),
            special_ingredient: String::new(),
            prices: vec![PriceTier::new("M", "4.00", "$")],
            average_rating: 0.0,
            ratings_count: String::new(),
            favorite: false,
            kind,
            index: 0,
        }
    }

    fn catalogs() -> (CatalogState, CatalogState) {
        (
            CatalogState::from_seed(vec![item("B1", ItemKind::Bean)]),
            CatalogState::from_seed(vec![item("C1", ItemKind::Coffee), item("C2", ItemKind::Coffee)]),
        )
    }

    fn persisted_line(id: &str, kind: &str, quantity: u32) -> Value {
        json!({
            "id": id,
            "size": "M",
            "quantity": quantity,
            "type": kind,
            "name": id,
            "roasted": "Medium Roasted",
            "specialIngredient": "",
            "prices": [{ "size": "M", "price": "4.00", "currency": "$" }]
        })
    }

    fn run(persisted: &PersistedCart) -> (CartState, CartMergeReport) {
        let (beans, coffee) = catalogs();
        let (state, report) = rehydrate_cart(persisted, |kind, id| match kind {
            ItemKind::Bean => beans.get(id),
            ItemKind::Coffee => coffee.get(id),
        });
        (state, report)
    }

    #[test]
    fn test_images_are_re_resolved() {
        let persisted = PersistedCart {
            lines: vec![persisted_line("C1", "Coffee", 2), persisted_line("B1", "Bean", 1)],
            total_price: Some(12.0),
        };
        let (state, report) = run(&persisted);
        assert_eq!(state.lines.len(), 2);
        assert_eq!(state.lines[0].image_square.asset(), Some("C1.png"));
        assert_eq!(state.lines[1].image_square.asset(), Some("B1.png"));
        assert!(!report.has_drift());
    }

    #[test]
    fn test_unresolvable_line_dropped_total_kept() {
        let persisted = PersistedCart {
            lines: vec![persisted_line("C1", "Coffee", 1), persisted_line("C7", "Coffee", 2)],
            total_price: Some(12.0),
        };
        let (state, report) = run(&persisted);
        assert_eq!(state.lines.len(), 1);
        assert_eq!(state.total_price, 12.0);
        assert_eq!(report.unresolved, vec![("C7".to_string(), "M".to_string())]);
        assert!(report.has_drift());
        assert!((report.drift - 8.0).abs() < TOTAL_EPSILON);
    }

    #[test]
    fn test_kind_mismatch_does_not_resolve() {
        // B1 exists, but only as a bean.
        let persisted = PersistedCart {
            lines: vec![persisted_line("B1", "Coffee", 1)],
            total_price: Some(4.0),
        };
        let (state, report) = run(&persisted);
        assert!(state.lines.is_empty());
        assert_eq!(report.unresolved.len(), 1);
    }

    #[test]
    fn test_malformed_lines_and_missing_total() {
        let persisted: PersistedCart = serde_json::from_value(json!({
            "lines": [
                { "id": "C1", "size": "M" },
                { "id": "C1", "size": "M", "quantity": 1, "type": "Tea" },
                42,
                persisted_line("C2", "Coffee", 1)
            ]
        }))
        .unwrap();
        let (state, report) = run(&persisted);
        assert_eq!(report.malformed, 3);
        assert_eq!(state.lines.len(), 1);
        assert_eq!(state.total_price, 0.0);
    }

    #[test]
    fn test_duplicate_keys_fold() {
        let persisted = PersistedCart {
            lines: vec![persisted_line("C1", "Coffee", 1), persisted_line("C1", "Coffee", 2)],
            total_price: Some(12.0),
        };
        let (state, _) = run(&persisted);
        assert_eq!(state.lines.len(), 1);
        assert_eq!(state.lines[0].quantity, 3);
    }

    #[test]
    fn test_legacy_field_names() {
        let persisted: PersistedCart = serde_json::from_value(json!({
            "cartList": [persisted_line("C2", "Coffee", 1)],
            "cartPrice": 4.0
        }))
        .unwrap();
        let (state, _) = run(&persisted);
        assert_eq!(state.lines.len(), 1);
        assert_eq!(state.total_price, 4.0);
    }

    #[test]
    fn test_wrong_typed_total_keeps_lines() {
        let persisted: PersistedCart = serde_json::from_value(json!({
            "lines": [persisted_line("C1", "Coffee", 2)],
            "totalPrice": "8.00"
        }))
        .unwrap();
        assert_eq!(persisted.total_price, None);

        let (state, report) = run(&persisted);
        assert_eq!(state.lines.len(), 1);
        assert_eq!(state.total_price, 0.0);
        assert!(report.has_drift());
    }
}
