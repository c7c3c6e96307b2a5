use async_trait::async_trait;

/// Key/value storage the snapshot is written to.
///
/// Saves are fire-and-forget from the store's point of view; a failed save
/// is logged by the caller and never reaches the UI.
#[async_trait]
pub trait PersistenceEngine: Send + Sync {
    fn name(&self) -> &str;
    async fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn save(&self, key: &str, value: String) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}
