//! `cart catalog` - list the service catalog.

use anyhow::Result;
use console::style;

use servicecart_core::Money;

use crate::catalog::CATALOG;
use crate::context::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let currency = ctx.store.currency();

    for service in CATALOG {
        ctx.output
            .header(&format!("{} — {}", service.category, service.name));
        for tier in service.tiers {
            let price = Money::new(tier.price_cents, currency);
            println!(
                "  {:<18} {:<10} {}  {}",
                style(format!("{}:{}", service.service_id, tier.id)).dim(),
                tier.name,
                price.display(),
                style(tier.desc).dim()
            );
        }
    }
    println!();
    ctx.output
        .info("add a tier with `cart add <service>:<tier>`");
    Ok(())
}
