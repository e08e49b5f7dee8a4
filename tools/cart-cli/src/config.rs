//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use servicecart_checkout::CheckoutConfig;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cart.toml";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Store configuration.
    #[serde(default)]
    pub store: StoreSection,

    /// Checkout configuration.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path))
    }

    /// Load the explicit path, else the default file if present, else
    /// defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }
}

/// Store section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    /// Directory holding the persisted cart record.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Currency code (two-decimal currencies only).
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Whether to watch for cross-process changes.
    #[serde(default = "default_true")]
    pub watch: bool,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".servicecart")
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            currency: default_currency(),
            watch: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.store.currency, "USD");
        assert!(config.store.watch);
        assert!(config.checkout.is_sandbox());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            [store]
            dir = "/tmp/cart-demo"

            [checkout]
            client_id = "test"
            description = "Astro Services"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.dir, PathBuf::from("/tmp/cart-demo"));
        assert_eq!(config.checkout.description, "Astro Services");
    }
}
