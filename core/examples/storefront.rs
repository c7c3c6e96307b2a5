//! 状态管理系统使用示例
//!
//! 演示启动、门控、分发动作以及重启后的快照恢复

use anyhow::Result;
use std::sync::Arc;

use brewcart_core::api::{
    Action, CatalogItem, Collection, ImageRef, ItemKind, MemoryEngine, PriceTier, StateEvent,
    StaticSeed, Store, StoreOptions,
};

fn item(id: &str, name: &str, kind: ItemKind, price: &str) -> CatalogItem {
    CatalogItem {
        id: id.into(),
        name: name.into(),
        description: String::new(),
        roasted: "Medium Roasted".into(),
        image_square: ImageRef::new(format!("{id}.png")),
        image_portrait: ImageRef::unresolved(),
        ingredients: String::new(),
        special_ingredient: String::new(),
        prices: vec![PriceTier::new("M", price, "$")],
        average_rating: 4.5,
        ratings_count: String::new(),
        favorite: false,
        kind,
        index: 0,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt::init();

    let seed = StaticSeed::new(
        vec![item("B1", "Robusta Beans", ItemKind::Bean, "5.50")],
        vec![
            item("C1", "Americano", ItemKind::Coffee, "4.00"),
            item("C2", "Latte", ItemKind::Coffee, "4.20"),
        ],
    );
    // 两次启动共享同一个引擎，模拟进程重启
    let engine = Arc::new(MemoryEngine::new());

    // 1. 第一次启动：门控打开后才能分发
    let store = Store::boot(&seed, engine.clone(), StoreOptions::default())
        .ready()
        .await;

    // 2. 启动事件监听器（后台任务）
    let mut event_rx = store.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            if let StateEvent::Changed {
                revision,
                action,
                state,
                ..
            } = event
            {
                println!(
                    "→ revision {} after {} (cart total {:.2})",
                    revision,
                    action.as_str(),
                    state.cart.total_price
                );
            }
        }
    });

    // 3. 分发用户动作
    store
        .dispatch(Action::toggle_favorite(Collection::Coffee, "C2"))
        .await;
    store.add_item(Collection::Coffee, "C1", "M", 1).await;
    store.add_item(Collection::Coffee, "C1", "M", 2).await;
    store
        .dispatch(Action::update_cart_quantity("C1", "M", 1))
        .await;
    store.flush().await;
    drop(store);

    // 4. 第二次启动：快照被合并进新的种子数据
    let store = Store::boot(&seed, engine, StoreOptions::default())
        .ready()
        .await;
    let state = store.state().await;
    println!("\n✓ Restored favorites: {:?}", state.coffee.favorites);
    for line in &state.cart.lines {
        println!(
            "✓ Restored line {} {} x{} (image {:?})",
            line.id,
            line.size,
            line.quantity,
            line.image_square.asset()
        );
    }
    println!("✓ Restored total: {:.2}", state.cart.total_price);

    Ok(())
}
