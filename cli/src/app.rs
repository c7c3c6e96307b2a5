//! CLI 应用装配层：构建种子、持久化引擎并等待门控打开后交出可用的 Store。
use tokio::sync::broadcast;

use brewcart_core::api::{AppConfig, CliError, StateEvent, Store, StoreOptions};
use brewcart_plugins::factory;

use crate::commands::cli::OutputFormat;

pub struct AppContext {
    cfg: AppConfig,
    store: Store,
    format: OutputFormat,
}

impl AppContext {
    /// Boots the store and blocks until the startup snapshot is merged.
    #[tracing::instrument(name = "cli.boot", skip(cfg))]
    pub async fn boot(
        mut cfg: AppConfig,
        format: OutputFormat,
        no_persist: bool,
    ) -> Result<Self, CliError> {
        if no_persist {
            cfg.persistence.enabled = false;
        }

        let seed = factory::build_seed(&cfg)?;
        let engine = factory::build_engine(&cfg);
        let pending = Store::boot(seed.as_ref(), engine, StoreOptions::from_config(&cfg));

        spawn_event_logger(pending.subscribe());
        let store = pending.ready().await;

        Ok(Self { cfg, store, format })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Waits for pending snapshot writes before the process exits.
    pub async fn shutdown(self) {
        self.store.flush().await;
    }
}

fn spawn_event_logger(mut event_rx: broadcast::Receiver<StateEvent>) {
    tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            match event {
                StateEvent::Rehydrated {
                    revision, restored, ..
                } => {
                    tracing::debug!("Rehydrated at revision {} ({:?})", revision, restored);
                }
                StateEvent::Changed {
                    revision, action, ..
                } => {
                    tracing::debug!("State -> revision {} ({})", revision, action.as_str());
                }
                StateEvent::CheckoutCompleted {
                    transaction_ref,
                    amount_minor,
                    currency,
                    ..
                } => {
                    tracing::info!(
                        "Checkout {} completed ({} {} minor units)",
                        transaction_ref,
                        amount_minor,
                        currency
                    );
                }
            }
        }
    });
}
