//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod product;
pub mod wishlist;

use clap::{Args, Subcommand};
use shop_commerce::search::SortKey;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products, filtered and sorted.
    List(ListArgs),
    /// Show the category, colour and size options with counts.
    Facets(FilterArgs),
    /// List the available sort orders.
    Sorts,
}

/// Facet filters shared by listing commands.
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Category to include (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Colour name or hex code to include (repeatable).
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Size to include (repeatable).
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    /// Lowest base price.
    #[arg(long)]
    pub min: Option<i64>,

    /// Highest base price. A range with min above max matches nothing.
    #[arg(long)]
    pub max: Option<i64>,

    /// Only new arrivals.
    #[arg(long = "new")]
    pub new_only: bool,

    /// Only best sellers.
    #[arg(long)]
    pub best_sellers: bool,

    /// Only trending products.
    #[arg(long)]
    pub trending: bool,
}

/// Arguments for `catalog list`.
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Sort order.
    #[arg(short, long, default_value_t = SortKey::Featured)]
    pub sort: SortKey,

    /// Page number, starting at 1.
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Products per page (default: catalog.page_size).
    #[arg(long)]
    pub per_page: Option<usize>,
}

/// Variant, size and quantity for one product.
#[derive(Args)]
pub struct SelectionArgs {
    /// Product ID.
    pub id: u32,

    /// Colour name or hex code (default: first colour).
    #[arg(long)]
    pub color: Option<String>,

    /// Size label (default: first size).
    #[arg(long)]
    pub size: Option<String>,

    /// Quantity.
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Add the selection to the cart.
    #[arg(long)]
    pub add: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines and totals.
    Show,
    /// Add a product to the cart.
    Add(SelectionArgs),
    /// Remove a line.
    Remove {
        /// Line number, as shown by `cart show`.
        line: usize,
    },
    /// Change the quantity of a line.
    Update {
        /// Line number, as shown by `cart show`.
        line: usize,
        /// New quantity.
        quantity: i64,
    },
    /// Remove every line.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Apply or remove a coupon.
    Coupon {
        #[command(subcommand)]
        command: CouponCommand,
    },
}

#[derive(Subcommand)]
pub enum CouponCommand {
    /// List accepted coupons.
    List,
    /// Apply a coupon code.
    Apply {
        /// Coupon code.
        code: String,
    },
    /// Remove the applied coupon.
    Remove,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// List saved products.
    List,
    /// Save a product.
    Add {
        /// Product ID.
        id: u32,
    },
    /// Remove a saved product.
    Remove {
        /// Product ID.
        id: u32,
    },
    /// Save the product if absent, remove it otherwise.
    Toggle {
        /// Product ID.
        id: u32,
    },
    /// Remove every saved product.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
