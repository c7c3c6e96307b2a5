//! In-process stand-in for a durable engine.
//!
//! Same signatures as a real engine; everything is lost when the process
//! exits. Used when the configured engine cannot be opened, when
//! persistence is disabled, and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::r#trait::PersistenceEngine;

#[derive(Debug, Default)]
pub struct MemoryEngine {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine pre-populated with one entry, handy for rehydration tests.
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }
}

#[async_trait]
impl PersistenceEngine for MemoryEngine {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.get(key).await)
    }

    async fn save(&self, key: &str, value: String) -> anyhow::Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
