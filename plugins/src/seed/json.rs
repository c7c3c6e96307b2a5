//! JSON catalog seeds.
//!
//! The file holds `{ "beans": [...], "coffee": [...] }` with records in the
//! catalog's own field naming (`imagelink_square`, `favourite`, ...). Image
//! paths become resolved [`ImageRef`]s; `index` defaults to the position in
//! its list.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use brewcart_core::api::{CatalogItem, Collection, ImageRef, ItemKind, PriceTier, SeedProvider};

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub roasted: String,
    #[serde(default)]
    pub imagelink_square: Option<String>,
    #[serde(default)]
    pub imagelink_portrait: Option<String>,
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
    #[serde(default, alias = "favorite")]
    pub favourite: bool,
    #[serde(rename = "type")]
    pub kind: Option<ItemKind>,
    #[serde(default)]
    pub index: Option<usize>,
}

impl SeedRecord {
    fn into_item(self, kind: ItemKind, position: usize) -> CatalogItem {
        CatalogItem {
            id: self.id,
            name: self.name,
            description: self.description,
            roasted: self.roasted,
            image_square: image_ref(self.imagelink_square),
            image_portrait: image_ref(self.imagelink_portrait),
            ingredients: self.ingredients,
            special_ingredient: self.special_ingredient,
            prices: self.prices,
            average_rating: self.average_rating,
            ratings_count: self.ratings_count,
            favorite: self.favourite,
            kind: self.kind.unwrap_or(kind),
            index: self.index.unwrap_or(position),
        }
    }
}

fn image_ref(path: Option<String>) -> ImageRef {
    match path {
        Some(p) if !p.trim().is_empty() => ImageRef::new(p),
        _ => ImageRef::unresolved(),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub beans: Vec<SeedRecord>,
    #[serde(default)]
    pub coffee: Vec<SeedRecord>,
}

/// Seed parsed once from JSON; every call hands out fresh copies.
#[derive(Debug, Clone)]
pub struct JsonSeed {
    beans: Vec<CatalogItem>,
    coffee: Vec<CatalogItem>,
}

impl JsonSeed {
    pub fn parse(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("invalid catalog seed")?;
        if !value.is_object() {
            bail!("invalid catalog seed: expected an object with `beans` and `coffee` lists");
        }
        let file: SeedFile = serde_json::from_value(value).context("invalid catalog seed")?;
        Ok(Self::from_file(file))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read catalog seed {}", path.display()))?;
        Self::parse(&json)
    }

    pub fn from_file(file: SeedFile) -> Self {
        Self {
            beans: convert(file.beans, ItemKind::Bean),
            coffee: convert(file.coffee, ItemKind::Coffee),
        }
    }
}

fn convert(records: Vec<SeedRecord>, kind: ItemKind) -> Vec<CatalogItem> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, r)| r.into_item(kind, position))
        .collect()
}

impl SeedProvider for JsonSeed {
    fn initial_catalog(&self, collection: Collection) -> Vec<CatalogItem> {
        match collection {
            Collection::Beans => self.beans.clone(),
            Collection::Coffee => self.coffee.clone(),
        }
    }
}
