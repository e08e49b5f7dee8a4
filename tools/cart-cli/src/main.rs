//! Cart CLI - the consumer surfaces of the ServiceCart core.
//!
//! Commands:
//! - `cart add` - add a line item (directly or from the catalog)
//! - `cart list` - the cart page view
//! - `cart set-qty` / `cart remove` / `cart clear` - cart mutations
//! - `cart badge` - item count only
//! - `cart catalog` - the built-in service catalog
//! - `cart checkout` - drive the payment flow
//! - `cart watch` - print the badge on every change signal

mod catalog;
mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddArgs, CheckoutArgs, RemoveArgs, SetQtyArgs};

/// Cart CLI - cart & checkout for the services storefront
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an item to the cart
    Add(AddArgs),

    /// Show the cart page view
    List,

    /// Set an item's quantity
    SetQty(SetQtyArgs),

    /// Remove an item
    Remove(RemoveArgs),

    /// Empty the cart
    Clear,

    /// Show the item count
    Badge,

    /// List the service catalog
    Catalog,

    /// Pay for the cart contents
    Checkout(CheckoutArgs),

    /// Print the badge on every cart change until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = output::Output::new(cli.verbose);
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    match cli.command {
        Commands::Add(args) => commands::add::run(&ctx, args),
        Commands::List => commands::view::list(&ctx),
        Commands::SetQty(args) => commands::set_qty::run(&ctx, args),
        Commands::Remove(args) => commands::remove::run(&ctx, args),
        Commands::Clear => commands::clear::run(&ctx),
        Commands::Badge => commands::view::badge(&ctx),
        Commands::Catalog => commands::catalog_cmd::run(&ctx),
        Commands::Checkout(args) => commands::checkout::run(&ctx, args).await,
        Commands::Watch => commands::watch::run(&ctx).await,
    }
}
