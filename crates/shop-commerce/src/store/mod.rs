//! Stores tie the cart and wishlist aggregates to persistence, change
//! listeners and user notices.
//!
//! Storage failures are logged and never returned: a store that cannot
//! read its snapshot starts empty, and one that cannot write keeps working
//! in memory.

mod cart;
mod persist;
mod subscribers;
mod wishlist;

pub use cart::CartStore;
pub use subscribers::{SubscriptionId, Subscribers};
pub use wishlist::WishlistStore;

use shop_cache::cache_key;

/// Namespace shared by every storefront snapshot.
pub const KEY_PREFIX: &str = "storefront";

/// Default storage key for the cart snapshot.
pub fn cart_key() -> String {
    cache_key!(KEY_PREFIX, "cart")
}

/// Default storage key for the wishlist snapshot.
pub fn wishlist_key() -> String {
    cache_key!(KEY_PREFIX, "wishlist")
}
