use serde::{Deserialize, Serialize};

use crate::catalog::{price_for_size, CatalogItem, ImageRef, ItemKind, PriceTier};

/// One `(id, size)` entry of the cart with a display snapshot of its item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub size: String,
    pub quantity: u32,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roasted: String,
    #[serde(skip)]
    pub image_square: ImageRef,
    #[serde(default)]
    pub special_ingredient: String,
    #[serde(default)]
    pub prices: Vec<PriceTier>,
}

impl CartLine {
    /// Snapshot `item` into a line for `size`.
    pub fn from_item(item: &CatalogItem, size: &str, quantity: u32) -> Self {
        Self {
            id: item.id.clone(),
            size: size.to_string(),
            quantity,
            kind: item.kind,
            name: item.name.clone(),
            roasted: item.roasted.clone(),
            image_square: item.image_square.clone(),
            special_ingredient: item.special_ingredient.clone(),
            prices: item.prices.clone(),
        }
    }

    pub fn matches(&self, id: &str, size: &str) -> bool {
        self.id == id && self.size == size
    }

    pub fn unit_price(&self) -> f64 {
        price_for_size(&self.prices, &self.size)
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity)
    }
}

/// Sum of `quantity × unit price` over `lines`.
pub fn compute_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::line_total).sum()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub lines: Vec<CartLine>,
    pub total_price: f64,
}

impl CartState {
    pub fn with_lines(lines: Vec<CartLine>) -> Self {
        let total_price = compute_total(&lines);
        Self { lines, total_price }
    }

    pub fn line(&self, id: &str, size: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(id, size))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across lines, for badge counts.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Total derived from the current lines, independent of `total_price`.
    pub fn recomputed_total(&self) -> f64 {
        compute_total(&self.lines)
    }
}
