//! `cart set-qty` - set an item's quantity.

use anyhow::Result;
use clap::Args;

use servicecart_core::ItemId;

use crate::context::Context;

#[derive(Args)]
pub struct SetQtyArgs {
    /// Item id
    pub id: String,

    /// New quantity (clamped to a minimum of 1)
    pub qty: i64,
}

pub fn run(ctx: &Context, args: SetQtyArgs) -> Result<()> {
    let id = ItemId::new(&args.id);
    if ctx.store.read().get(&id).is_none() {
        ctx.output
            .warn(&format!("'{}' is not in the cart", args.id));
        return Ok(());
    }

    ctx.store.set_qty(&id, args.qty)?;
    let qty = ctx.store.read().get(&id).map(|i| i.qty).unwrap_or(0);
    ctx.output
        .success(&format!("{} × {}", args.id, qty));
    ctx.output
        .kv("subtotal", &ctx.store.subtotal().display());
    Ok(())
}
