//! Shop CLI - Browse the storefront from the terminal.
//!
//! Commands:
//! - `shop catalog` - List, filter and sort products
//! - `shop product` - Show a product and pick a colour, size and quantity
//! - `shop cart` - Manage cart lines and coupons
//! - `shop wishlist` - Manage saved products
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, CatalogArgs, ConfigArgs, ProductArgs, WishlistArgs};

/// Shop CLI - Browse products and manage your cart and wishlist
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog(CatalogArgs),

    /// Show product details
    Product(ProductArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Manage the wishlist
    Wishlist(WishlistArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Log to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;
    tracing::debug!(config = ?ctx.config_path, "context loaded");

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Product(args) => commands::product::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
