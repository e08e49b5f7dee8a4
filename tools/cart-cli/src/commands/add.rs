//! `cart add` - add a line item.

use anyhow::{bail, Result};
use clap::Args;

use servicecart_core::{CartItem, Money};

use crate::catalog;
use crate::context::Context;

#[derive(Args)]
pub struct AddArgs {
    /// Item id, or a `<service>:<tier>` catalog key
    pub id: String,

    /// Item name (omit to look the id up in the catalog)
    #[arg(long)]
    pub name: Option<String>,

    /// Unit price as a decimal amount
    #[arg(long)]
    pub price: Option<f64>,

    /// Quantity
    #[arg(long, default_value_t = 1)]
    pub qty: i64,

    /// Stock keeping unit
    #[arg(long)]
    pub sku: Option<String>,
}

pub fn run(ctx: &Context, args: AddArgs) -> Result<()> {
    let currency = ctx.store.currency();

    let item = match (&args.name, args.price) {
        (Some(name), Some(price)) => {
            let mut item = CartItem::new(
                args.id.clone(),
                name.clone(),
                Money::from_decimal(price, currency),
            )
            .with_qty(args.qty);
            if let Some(sku) = &args.sku {
                item = item.with_sku(sku.clone());
            }
            item
        }
        (None, None) => match catalog::find(&args.id, currency) {
            Some(item) => item.with_qty(args.qty),
            None => bail!(
                "'{}' is not in the catalog; pass --name and --price to add it directly",
                args.id
            ),
        },
        _ => bail!("--name and --price must be given together"),
    };

    let name = item.name.clone();
    ctx.store.add(item)?;
    ctx.output.success(&format!("Added: {}", name));
    ctx.output
        .kv("subtotal", &ctx.store.subtotal().display());
    Ok(())
}
