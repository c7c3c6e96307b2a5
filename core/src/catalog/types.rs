//! Catalog model types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Display handle for a bundled image asset.
///
/// Handles are resolved against the seed provider at runtime and are never
/// written to a snapshot; every deserialized value starts out unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ImageRef(Option<Arc<str>>);

impl ImageRef {
    pub fn new(asset: impl Into<Arc<str>>) -> Self {
        Self(Some(asset.into()))
    }

    pub fn unresolved() -> Self {
        Self(None)
    }

    pub fn is_resolved(&self) -> bool {
        self.0.is_some()
    }

    pub fn asset(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Kind tag carried by catalog items and cart lines (`"Bean"` / `"Coffee"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Bean,
    Coffee,
}

impl ItemKind {
    /// Collection that owns items of this kind.
    pub fn collection(self) -> Collection {
        match self {
            ItemKind::Bean => Collection::Beans,
            ItemKind::Coffee => Collection::Coffee,
        }
    }
}

/// The two independently reduced catalog collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Beans,
    Coffee,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Beans, Collection::Coffee];

    pub fn kind(self) -> ItemKind {
        match self {
            Collection::Beans => ItemKind::Bean,
            Collection::Coffee => ItemKind::Coffee,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Beans => "beans",
            Collection::Coffee => "coffee",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beans" | "bean" => Ok(Collection::Beans),
            "coffee" | "coffees" => Ok(Collection::Coffee),
            other => Err(format!("unknown collection: {other}")),
        }
    }
}

/// One size/price option of an item. `price` is kept as the decimal string
/// the catalog ships with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    pub size: String,
    pub price: String,
    #[serde(default)]
    pub currency: String,
}

impl PriceTier {
    pub fn new(size: &str, price: &str, currency: &str) -> Self {
        Self {
            size: size.to_string(),
            price: price.to_string(),
            currency: currency.to_string(),
        }
    }

    /// Numeric price; unparsable strings count as zero.
    pub fn amount(&self) -> f64 {
        self.price.trim().parse::<f64>().unwrap_or(0.0)
    }
}

/// Price for `size` within `tiers`, or 0 when no tier matches.
pub fn price_for_size(tiers: &[PriceTier], size: &str) -> f64 {
    tiers
        .iter()
        .find(|t| t.size == size)
        .map(PriceTier::amount)
        .unwrap_or(0.0)
}

/// A sellable product. Only `favorite` changes after seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub roasted: String,
    #[serde(skip)]
    pub image_square: ImageRef,
    #[serde(skip)]
    pub image_portrait: ImageRef,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub special_ingredient: String,
    #[serde(default)]
    pub prices: Vec<PriceTier>,
    #[serde(default)]
    pub average_rating: f32,
    #[serde(default)]
    pub ratings_count: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub index: usize,
}

impl CatalogItem {
    pub fn price_for(&self, size: &str) -> f64 {
        price_for_size(&self.prices, size)
    }
}

/// Items of one collection plus the derived favorites index.
///
/// `favorites` holds the ids of every item whose `favorite` flag is set, in
/// the order they were marked. Items are `Arc`-shared so a transition that
/// touches one item leaves the others pointing at the same allocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    pub items: Vec<Arc<CatalogItem>>,
    pub favorites: Vec<String>,
}

impl CatalogState {
    /// Builds the state for a freshly seeded item list.
    pub fn from_seed(items: Vec<CatalogItem>) -> Self {
        let favorites = items
            .iter()
            .filter(|i| i.favorite)
            .map(|i| i.id.clone())
            .collect();
        Self {
            items: items.into_iter().map(Arc::new).collect(),
            favorites,
        }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id).map(Arc::as_ref)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    /// Favorite items in the order they were marked.
    pub fn favorite_items(&self) -> Vec<&CatalogItem> {
        self.favorites.iter().filter_map(|id| self.get(id)).collect()
    }

    /// True when the favorites index holds each flagged item exactly once.
    pub fn is_consistent(&self) -> bool {
        let indexed: HashSet<&str> = self.favorites.iter().map(String::as_str).collect();
        let flagged: HashSet<&str> = self
            .items
            .iter()
            .filter(|i| i.favorite)
            .map(|i| i.id.as_str())
            .collect();
        indexed.len() == self.favorites.len() && indexed == flagged
    }
}
