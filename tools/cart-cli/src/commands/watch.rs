//! `cart watch` - re-derive the badge on every change signal.

use std::sync::Arc;

use anyhow::Result;
use console::style;

use servicecart_store::ChangeOrigin;

use crate::context::Context;

pub async fn run(ctx: &Context) -> Result<()> {
    let count = ctx.store.count();
    ctx.output
        .info(&format!("watching cart ({} items), Ctrl-C to stop", count));

    let store = Arc::clone(&ctx.store);
    let _sub = ctx.store.subscribe(move |change| {
        // Re-read; the signal itself carries no cart data.
        let origin = match change.origin {
            ChangeOrigin::Local => "local",
            ChangeOrigin::External => "external",
        };
        println!(
            "{} {} items ({} change)",
            style("•").dim(),
            store.count(),
            origin
        );
    });

    tokio::signal::ctrl_c().await?;
    Ok(())
}
