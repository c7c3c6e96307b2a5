//! Offline checkout: every charge succeeds and is appended to a JSON-lines
//! ledger. Stands in for a hosted payment gateway.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;
use uuid::Uuid;

use brewcart_core::api::{CheckoutProvider, CheckoutRequest, Receipt};

#[derive(Debug, Clone)]
pub struct LedgerCheckout {
    path: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LedgerEntry<'a> {
    #[serde(flatten)]
    receipt: &'a Receipt,
    name: &'a str,
    mobile: &'a str,
    lines: usize,
    total_price: f64,
}

impl LedgerCheckout {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, line: String) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl CheckoutProvider for LedgerCheckout {
    fn name(&self) -> &str {
        "ledger"
    }

    async fn charge(&self, request: &CheckoutRequest) -> Result<Receipt> {
        let receipt = Receipt {
            transaction_ref: format!("bc_{}", Uuid::new_v4().simple()),
            amount_minor: request.amount_minor,
            currency: request.currency.clone(),
            email: request.billing.email.clone(),
            paid_at: Utc::now(),
        };
        let entry = LedgerEntry {
            receipt: &receipt,
            name: &request.billing.name,
            mobile: &request.billing.mobile,
            lines: request.lines.len(),
            total_price: request.total_price,
        };
        let line = serde_json::to_string(&entry)?;
        self.append(line)
            .await
            .with_context(|| format!("cannot append to ledger {}", self.path.display()))?;

        info!(
            transaction_ref = %receipt.transaction_ref,
            ledger = %self.path.display(),
            "Receipt recorded"
        );
        Ok(receipt)
    }
}
