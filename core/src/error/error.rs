use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("snapshot encoding error: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("malformed snapshot: {0}")]
    SnapshotShape(String),
}

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("invalid billing details: {0}")]
    InvalidBilling(String),
    #[error("payment declined by {provider}: {source}")]
    Declined {
        provider: String,
        source: anyhow::Error,
    },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("checkout failed: {0}")]
    Checkout(#[from] CheckoutError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
