//! `cart clear` - empty the cart.

use anyhow::Result;

use crate::context::Context;

pub fn run(ctx: &Context) -> Result<()> {
    ctx.store.clear()?;
    ctx.output.success("Cart cleared");
    Ok(())
}
