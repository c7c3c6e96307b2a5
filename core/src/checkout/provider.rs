use async_trait::async_trait;

use super::types::{CheckoutRequest, Receipt};

/// Charges a checkout request. Implementations live in `brewcart-plugins`.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn charge(&self, request: &CheckoutRequest) -> anyhow::Result<Receipt>;
}
