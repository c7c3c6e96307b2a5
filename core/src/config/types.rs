use serde::{Deserialize, Serialize};

use crate::state::SubState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub persistence: PersistenceConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "brewcart_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    false
}

fn default_logging_file() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default = "default_persistence_enabled")]
    pub enabled: bool,

    /// Key the snapshot is stored under; the file engine writes `<key>.json`.
    #[serde(default = "default_root_key")]
    pub root_key: String,

    /// Snapshot directory. Unset means `~/.brewcart/state`.
    #[serde(default)]
    pub directory: Option<String>,

    #[serde(default = "default_whitelist")]
    pub whitelist: Vec<SubState>,
}

fn default_persistence_enabled() -> bool {
    true
}

fn default_root_key() -> String {
    "root".to_string()
}

fn default_whitelist() -> Vec<SubState> {
    SubState::ALL.to_vec()
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: default_persistence_enabled(),
            root_key: default_root_key(),
            directory: None,
            whitelist: default_whitelist(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON seed file replacing the bundled catalog.
    #[serde(default)]
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Units of `currency` per catalog price unit.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: f64,

    /// Receipt ledger (JSON lines). Unset means `~/.brewcart/receipts.jsonl`.
    #[serde(default)]
    pub ledger_path: Option<String>,
}

fn default_currency() -> String {
    "KES".to_string()
}

fn default_exchange_rate() -> f64 {
    130.0
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            exchange_rate: default_exchange_rate(),
            ledger_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_event_capacity() -> usize {
    256
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            event_capacity: default_event_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert!(cfg.persistence.enabled);
        assert_eq!(cfg.persistence.root_key, "root");
        assert_eq!(cfg.persistence.whitelist, SubState::ALL.to_vec());
        assert_eq!(cfg.checkout.currency, "KES");
        assert_eq!(cfg.checkout.exchange_rate, 130.0);
        assert_eq!(cfg.store.event_capacity, 256);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [persistence]
            whitelist = ["cart"]
            directory = "/tmp/brewcart"

            [checkout]
            currency = "USD"
            exchange_rate = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.persistence.whitelist, vec![SubState::Cart]);
        assert_eq!(cfg.persistence.root_key, "root");
        assert_eq!(cfg.persistence.directory.as_deref(), Some("/tmp/brewcart"));
        assert_eq!(cfg.checkout.currency, "USD");
        assert!(cfg.checkout.ledger_path.is_none());
    }

    #[test]
    fn test_unknown_sub_state_is_rejected() {
        let res = toml::from_str::<AppConfig>("[persistence]\nwhitelist = [\"wishlist\"]\n");
        assert!(res.is_err());
    }
}
