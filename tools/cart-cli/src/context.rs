//! Shared command context.

use std::sync::Arc;

use anyhow::{bail, Result};

use servicecart_core::Currency;
use servicecart_store::{CartStore, StoreConfig};

use crate::config::CliConfig;
use crate::output::Output;

/// Everything a command needs: config, output, and the opened store.
pub struct Context {
    pub config: CliConfig,
    pub output: Output,
    pub store: Arc<CartStore>,
}

impl Context {
    /// Load config and open the store.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let config = CliConfig::load_or_default(config_path)?;

        let Some(currency) = Currency::from_code(&config.store.currency) else {
            bail!("unsupported currency code: {}", config.store.currency);
        };

        let store = CartStore::open(
            StoreConfig::new(&config.store.dir)
                .with_currency(currency)
                .with_watch(config.store.watch),
        )?;
        output.debug(&format!("cart record: {}", store.path().display()));

        Ok(Self {
            config,
            output,
            store: Arc::new(store),
        })
    }
}
