//! Shopping cart module.
//!
//! Contains the cart aggregate, derived pricing, and coupons.

mod cart;
mod discount;
mod pricing;

pub use cart::{Cart, CartItem};
pub use discount::{Coupon, CouponBook, CouponKind};
pub use pricing::{CartTotals, PricingPolicy};
