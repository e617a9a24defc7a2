//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shop_commerce::cart::{Coupon, CouponBook, PricingPolicy};
use shop_commerce::store::{cart_key, wishlist_key};

/// Configuration file names, searched from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Where cart and wishlist snapshots live.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Shipping and currency.
    #[serde(default)]
    pub pricing: PricingPolicy,

    /// Catalog source and listing settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Accepted coupon codes.
    #[serde(default)]
    pub coupons: Vec<Coupon>,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Coupons as a validated book.
    pub fn coupon_book(&self) -> Result<CouponBook> {
        CouponBook::new(self.coupons.clone()).context("Invalid coupon configuration")
    }

    /// Problems that make the config unusable, then ones that merely look odd.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.storage.dir.trim().is_empty() {
            errors.push("storage.dir must not be empty".to_string());
        }
        if self.storage.cart_key.is_empty() || self.storage.wishlist_key.is_empty() {
            errors.push("storage keys must not be empty".to_string());
        } else if self.storage.cart_key == self.storage.wishlist_key {
            errors.push("storage.cart_key and storage.wishlist_key must differ".to_string());
        }
        if self.pricing.shipping_fee < 0 || self.pricing.free_shipping_threshold < 0 {
            errors.push("pricing amounts must not be negative".to_string());
        }
        if self.catalog.page_size == 0 {
            errors.push("catalog.page_size must be at least 1".to_string());
        }
        if let Err(e) = CouponBook::new(self.coupons.clone()) {
            errors.push(e.to_string());
        }

        if self.pricing.shipping_fee == 0 {
            warnings.push("pricing.shipping_fee is 0, every order ships free".to_string());
        }
        if self.coupons.is_empty() {
            warnings.push("No coupons configured".to_string());
        }

        (errors, warnings)
    }
}

/// Snapshot storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for snapshot files, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    #[serde(default = "default_wishlist_key")]
    pub wishlist_key: String,
}

fn default_storage_dir() -> String {
    ".shop".to_string()
}

fn default_cart_key() -> String {
    cart_key()
}

fn default_wishlist_key() -> String {
    wishlist_key()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            cart_key: default_cart_key(),
            wishlist_key: default_wishlist_key(),
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON product file. The built-in demo catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Products per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    12
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            page_size: default_page_size(),
        }
    }
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[storage]
dir = ".shop"
cart_key = "{cart}"
wishlist_key = "{wishlist}"

[pricing]
currency = "INR"
free_shipping_threshold = 999
shipping_fee = 99

[catalog]
# path = "products.json"
page_size = 12

[[coupons]]
code = "WELCOME10"
description = "10% off your first order"
kind = "percentage"
value = 10

[[coupons]]
code = "FLAT500"
kind = "fixed"
value = 500
minimum_subtotal = 2999

[[coupons]]
code = "FREESHIP"
kind = "free_shipping"
"#,
        cart = cart_key(),
        wishlist = wishlist_key(),
    )
}
