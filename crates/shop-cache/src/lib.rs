//! Typed key-value persistence for the storefront.
//!
//! Plays the role browser local storage plays for a web storefront: cart
//! and wishlist snapshots are written as JSON under application keys and
//! read back on start-up.
//!
//! # Example
//!
//! ```rust
//! use shop_cache::{cache_key, Cache, MemoryBackend};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Wishlist {
//!     ids: Vec<u32>,
//! }
//!
//! let cache = Cache::new(MemoryBackend::new());
//! let key = cache_key!("storefront", "wishlist");
//!
//! cache.set(&key, &Wishlist { ids: vec![1, 4] }).unwrap();
//! let loaded: Option<Wishlist> = cache.get(&key).unwrap();
//! assert_eq!(loaded, Some(Wishlist { ids: vec![1, 4] }));
//!
//! cache.delete(&key).unwrap();
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}
