//! `cart list` and `cart badge` - the read-only consumer surfaces.

use anyhow::Result;
use console::style;

use crate::context::Context;

/// The cart page view: lines, line totals, subtotal.
pub fn list(ctx: &Context) -> Result<()> {
    let cart = ctx.store.read();

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output
            .list_item("browse services with `cart catalog`");
        return Ok(());
    }

    ctx.output.header("Cart");
    for item in cart.iter() {
        let line_total = item
            .line_total()
            .map(|m| m.display())
            .unwrap_or_else(|_| "?".to_string());
        println!(
            "  {:<28} {} each  × {:<3} {}",
            style(&item.name).bold(),
            item.price.display(),
            item.qty,
            style(line_total).bold()
        );
    }
    println!();
    ctx.output.kv("subtotal", &ctx.store.subtotal().display());
    ctx.output.kv("total", &ctx.store.subtotal().display());
    Ok(())
}

/// The badge: item count only.
pub fn badge(ctx: &Context) -> Result<()> {
    let count = ctx.store.count();
    let noun = if count == 1 { "item" } else { "items" };
    println!("{} {}", count, noun);
    Ok(())
}
