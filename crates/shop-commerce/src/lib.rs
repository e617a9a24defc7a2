//! Storefront domain types and logic.
//!
//! This crate provides the deterministic core of a clothing storefront:
//!
//! - **Catalog**: Products with colour variants and sized, stocked SKUs
//! - **Search**: Facet filters, sorting, pagination and facet counts
//! - **Selector**: Variant, size and quantity selection for one product
//! - **Cart**: Line items, derived totals, shipping and coupons
//! - **Wishlist**: Saved products
//! - **Store**: Persistence, change listeners and user notices
//!
//! # Example
//!
//! ```rust
//! use shop_commerce::prelude::*;
//!
//! let catalog = Catalog::demo().unwrap();
//!
//! // Shirts under ₹3,000, cheapest first
//! let state = FilterState::new()
//!     .with_category("shirts")
//!     .with_price(0, 3000)
//!     .with_sort(SortKey::PriceAsc);
//! let listing = apply(catalog.products(), &state);
//! assert_eq!(listing[0].name, "Premium Cotton Oxford Shirt");
//!
//! // Pick a size and put it in the cart
//! let mut selection = VariantSelection::new(listing[0]);
//! assert!(selection.select_size("M"));
//! let mut cart = Cart::new();
//! cart.add(selection.to_cart_item().unwrap()).unwrap();
//!
//! assert_eq!(cart.totals().subtotal.display(), "\u{20b9}2,499");
//! assert_eq!(cart.totals().shipping.amount, 0);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod notify;
pub mod routes;
pub mod search;
pub mod selector;
pub mod store;
pub mod wishlist;

pub use error::{CommerceError, Result};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Badge, Catalog, CategoryOption, ColorOption, Product, ProductFlag, Size, SizeOption,
        Variant,
    };

    // Search
    pub use crate::search::{
        apply, ActiveFilter, FacetCounts, FilterState, Page, Pagination, PriceRange, SortKey,
    };

    // Selection, cart and wishlist
    pub use crate::cart::{Cart, CartItem, CartTotals, Coupon, CouponBook, CouponKind, PricingPolicy};
    pub use crate::selector::VariantSelection;
    pub use crate::wishlist::Wishlist;

    // Stores and notices
    pub use crate::notify::{Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
    pub use crate::routes::Route;
    pub use crate::store::{CartStore, SubscriptionId, WishlistStore, cart_key, wishlist_key};
}
