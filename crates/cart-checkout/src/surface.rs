//! Button surface rendered by the provider SDK.
//!
//! The host is fully cleared before each render so repeated mounts
//! never stack duplicate button instances; instances are released with
//! an explicit close, and on drop as a backstop.

use crate::config::CheckoutConfig;

/// Style the provider renders the button with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonStyle {
    pub layout: String,
    pub label: String,
    pub height: Option<u32>,
    pub disabled_funding: Vec<String>,
}

impl ButtonStyle {
    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self {
            layout: "vertical".to_string(),
            label: "paypal".to_string(),
            height: config.button_height,
            disabled_funding: config.disabled_funding.clone(),
        }
    }
}

/// One rendered button instance, a live handle into the provider's UI.
#[derive(Debug)]
pub struct ButtonInstance {
    style: ButtonStyle,
    closed: bool,
}

impl ButtonInstance {
    pub fn new(style: ButtonStyle) -> Self {
        Self {
            style,
            closed: false,
        }
    }

    /// Release the provider handle.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }
}

impl Drop for ButtonInstance {
    fn drop(&mut self) {
        self.close();
    }
}

/// The host element button instances render into.
#[derive(Debug, Default)]
pub struct ButtonHost {
    instances: Vec<ButtonInstance>,
}

impl ButtonHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close and detach every instance.
    pub fn clear(&mut self) {
        for instance in &mut self.instances {
            instance.close();
        }
        self.instances.clear();
    }

    /// Attach a freshly rendered instance.
    pub fn attach(&mut self, instance: ButtonInstance) {
        self.instances.push(instance);
    }

    /// Number of attached instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Whether the host is empty (no payment controls rendered).
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
