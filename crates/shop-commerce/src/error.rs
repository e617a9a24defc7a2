//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Variant index out of range for a product.
    #[error("Product {product_id} has no variant {index}")]
    VariantNotFound { product_id: ProductId, index: usize },

    /// Size index or name not present on a variant.
    #[error("Product {product_id} has no size {size} in variant {variant}")]
    SizeNotFound {
        product_id: ProductId,
        variant: usize,
        size: String,
    },

    /// Cart position out of range.
    #[error("No cart item at position {0}")]
    ItemNotInCart(usize),

    /// Not enough stock for the requested quantity.
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Coupon code not known.
    #[error("Invalid coupon code: {0}")]
    InvalidCoupon(String),

    /// Coupon known but its conditions are not met.
    #[error("Coupon {code} requires a subtotal of at least {minimum}")]
    CouponNotEligible { code: String, minimum: String },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Catalog data failed validation.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] shop_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for storefront operations.
pub type Result<T> = std::result::Result<T, CommerceError>;
