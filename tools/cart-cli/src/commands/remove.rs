//! `cart remove` - remove a line item.

use anyhow::Result;
use clap::Args;

use servicecart_core::ItemId;

use crate::context::Context;

#[derive(Args)]
pub struct RemoveArgs {
    /// Item id
    pub id: String,
}

pub fn run(ctx: &Context, args: RemoveArgs) -> Result<()> {
    // Removal is idempotent: a missing id still writes and notifies.
    ctx.store.remove(&ItemId::new(&args.id))?;
    ctx.output.success(&format!("Removed: {}", args.id));
    ctx.output
        .kv("subtotal", &ctx.store.subtotal().display());
    Ok(())
}
