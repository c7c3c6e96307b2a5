#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;

use brewcart_core::api::{
    CatalogItem, ImageRef, ItemKind, MemoryEngine, PersistenceEngine, PriceTier, StaticSeed,
    Store, StoreOptions,
};

pub fn item(id: &str, kind: ItemKind, name: &str, price: &str) -> CatalogItem {
    let sizes: &[&str] = match kind {
        ItemKind::Bean => &["250gm", "500gm", "1Kg"],
        ItemKind::Coffee => &["S", "M", "L"],
    };
    CatalogItem {
        id: id.into(),
        name: name.into(),
        description: format!("{name} description"),
        roasted: "Medium Roasted".into(),
        image_square: ImageRef::new(format!("{id}_square.png")),
        image_portrait: ImageRef::new(format!("{id}_portrait.png")),
        ingredients: "Milk".into(),
        special_ingredient: "With Steamed Milk".into(),
        prices: sizes
            .iter()
            .map(|size| PriceTier::new(size, price, "$"))
            .collect(),
        average_rating: 4.5,
        ratings_count: "6,879".into(),
        favorite: false,
        kind,
        index: 0,
    }
}

pub fn seed() -> StaticSeed {
    StaticSeed::new(
        vec![
            item("B1", ItemKind::Bean, "Robusta Beans", "5.50"),
            item("B2", ItemKind::Bean, "Arabica Beans", "6.00"),
        ],
        vec![
            item("C1", ItemKind::Coffee, "Americano", "4.00"),
            item("C2", ItemKind::Coffee, "Cappuccino", "3.15"),
            item("C3", ItemKind::Coffee, "Latte", "4.20"),
        ],
    )
}

pub async fn boot(seed: &StaticSeed, engine: Arc<dyn PersistenceEngine>) -> Store {
    Store::boot(seed, engine, StoreOptions::default()).ready().await
}

pub fn shared_engine() -> Arc<MemoryEngine> {
    Arc::new(MemoryEngine::new())
}

/// Engine whose every call fails.
pub struct BrokenEngine;

#[async_trait]
impl PersistenceEngine for BrokenEngine {
    fn name(&self) -> &str {
        "broken"
    }

    async fn load(&self, _key: &str) -> anyhow::Result<Option<String>> {
        anyhow::bail!("storage unavailable")
    }

    async fn save(&self, _key: &str, _value: String) -> anyhow::Result<()> {
        anyhow::bail!("storage unavailable")
    }

    async fn remove(&self, _key: &str) -> anyhow::Result<()> {
        anyhow::bail!("storage unavailable")
    }
}
