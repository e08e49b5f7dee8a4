//! Checkout configuration.

use serde::{Deserialize, Serialize};

use servicecart_core::Currency;

/// The sandbox client id.
pub const SANDBOX_CLIENT_ID: &str = "test";

/// Checkout surface configuration.
///
/// Changing any of this restarts the checkout session from scratch on
/// the next [`sync`](crate::CheckoutController::sync).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Provider client id; `"test"` selects the sandbox.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// The single configured currency.
    #[serde(default)]
    pub currency: Currency,

    /// Order description sent to the provider.
    #[serde(default = "default_description")]
    pub description: String,

    /// Funding methods to disable on the button surface.
    #[serde(default)]
    pub disabled_funding: Vec<String>,

    /// Button height override in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_height: Option<u32>,
}

fn default_client_id() -> String {
    SANDBOX_CLIENT_ID.to_string()
}

fn default_description() -> String {
    "Service order".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            currency: Currency::default(),
            description: default_description(),
            disabled_funding: Vec::new(),
            button_height: None,
        }
    }
}

impl CheckoutConfig {
    /// Whether the sandbox client id is configured.
    pub fn is_sandbox(&self) -> bool {
        self.client_id == SANDBOX_CLIENT_ID
    }

    /// Stable fingerprint used to detect configuration changes.
    pub(crate) fn fingerprint(&self) -> String {
        format!(
            "{}|{}|{}|{:?}",
            self.client_id,
            self.currency.code(),
            self.disabled_funding.join(","),
            self.button_height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_sandbox() {
        let config = CheckoutConfig::default();
        assert!(config.is_sandbox());
        assert_eq!(config.currency, Currency::USD);
    }

    #[test]
    fn test_fingerprint_tracks_config_changes() {
        let a = CheckoutConfig::default();
        let mut b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());

        b.button_height = Some(44);
        assert_ne!(a.fingerprint(), b.fingerprint());

        let mut c = a.clone();
        c.disabled_funding.push("credit".to_string());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
