use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default brewcart data directory: ~/.brewcart
pub fn get_brewcart_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".brewcart"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.brewcart/config.toml (highest)
    let data_dir = match std::env::var("BREWCART_DATA_DIR") {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v),
        _ => get_brewcart_data_dir()?,
    };
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    Ok(resolve(cfg, &data_dir, |name| std::env::var(name).ok()))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
    Ok(cfg)
}

/// Fills unset directories from `data_dir` and applies environment overrides.
fn resolve(
    mut cfg: AppConfig,
    data_dir: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    if is_unset(&cfg.logging.directory) {
        cfg.logging.directory = Some(data_dir.join("logs").to_string_lossy().to_string());
    }
    if is_unset(&cfg.persistence.directory) {
        cfg.persistence.directory = Some(data_dir.join("state").to_string_lossy().to_string());
    }
    if is_unset(&cfg.checkout.ledger_path) {
        cfg.checkout.ledger_path = Some(
            data_dir
                .join("receipts.jsonl")
                .to_string_lossy()
                .to_string(),
        );
    }

    // Environment variable overrides (Priority 0: highest)
    if let Some(v) = env("BREWCART_PERSISTENCE") {
        match v.trim().to_ascii_lowercase().as_str() {
            "0" | "false" | "off" | "no" => cfg.persistence.enabled = false,
            "1" | "true" | "on" | "yes" => cfg.persistence.enabled = true,
            _ => {}
        }
    }

    cfg
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_ref().map(|s| s.trim().is_empty()).unwrap_or(true)
}
