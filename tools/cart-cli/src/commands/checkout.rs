//! `cart checkout` - drive the payment flow.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use dialoguer::Confirm;

use servicecart_checkout::{CheckoutController, CheckoutStatus, SandboxSource};

use crate::context::Context;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Approve without prompting
    #[arg(long)]
    pub yes: bool,
}

pub async fn run(ctx: &Context, args: CheckoutArgs) -> Result<()> {
    let subtotal = ctx.store.subtotal();
    if !subtotal.is_positive() {
        // No payment controls for an empty cart.
        ctx.output.info("Your cart is empty.");
        ctx.output
            .list_item("browse services with `cart catalog`");
        return Ok(());
    }

    let config = ctx.config.checkout.clone();
    if !config.is_sandbox() {
        bail!(
            "client id '{}' is not wired to a provider in this build; use the sandbox id",
            config.client_id
        );
    }

    let mut controller = CheckoutController::new(
        Arc::clone(&ctx.store),
        Arc::new(SandboxSource::new()),
        config,
    );

    controller.mount().await;
    if controller.session().status != CheckoutStatus::Ready {
        let message = controller
            .session()
            .message
            .clone()
            .unwrap_or_else(|| "checkout unavailable".to_string());
        ctx.output.error(&message);
        return Ok(());
    }

    ctx.output.kv("amount", &subtotal.display());
    let approved = args.yes
        || Confirm::new()
            .with_prompt(format!("Approve payment of {}?", subtotal.display()))
            .default(true)
            .interact()?;

    let ticket = match controller.activate().await {
        Ok(ticket) => ticket,
        Err(e) => {
            ctx.output.error(&e.to_string());
            return Ok(());
        }
    };

    if approved {
        match controller.approve(&ticket).await {
            Ok(()) => {
                if let Some(message) = &controller.session().message {
                    ctx.output.success(message);
                }
            }
            Err(e) => ctx.output.error(&e.to_string()),
        }
    } else {
        controller.cancel(&ticket);
        ctx.output
            .warn("Payment cancelled; your cart is unchanged.");
    }

    Ok(())
}
