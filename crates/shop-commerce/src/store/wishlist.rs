//! Persisted wishlist with notices and subscribers.

use super::{persist, SubscriptionId, Subscribers};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::notify::{Notice, Notifier};
use crate::wishlist::Wishlist;
use shop_cache::{Cache, KvBackend};
use std::sync::Arc;

/// Owns the wishlist; same pipeline as the cart store.
pub struct WishlistStore<B: KvBackend> {
    wishlist: Wishlist,
    cache: Cache<B>,
    key: String,
    notifier: Arc<dyn Notifier>,
    subscribers: Subscribers<Wishlist>,
}

impl<B: KvBackend> WishlistStore<B> {
    /// Open the store and rehydrate the wishlist stored under `key`.
    pub fn open(cache: Cache<B>, key: impl Into<String>, notifier: Arc<dyn Notifier>) -> Self {
        let key = key.into();
        let mut wishlist: Wishlist = persist::load(&cache, &key);
        wishlist.dedup();
        tracing::debug!(key = %key, entries = wishlist.len(), "wishlist ready");
        Self {
            wishlist,
            cache,
            key,
            notifier,
            subscribers: Subscribers::new(),
        }
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.wishlist.contains(id)
    }

    pub fn subscribe(&mut self, listener: impl Fn(&Wishlist) + Send + Sync + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn commit(&mut self, notice: Notice) {
        persist::save(&self.cache, &self.key, &self.wishlist);
        self.subscribers.emit(&self.wishlist);
        self.notifier.notify(&notice);
    }

    /// Save a product. Returns false, with an informational notice, if it
    /// was already saved.
    pub fn add(&mut self, product: &Product) -> bool {
        if !self.wishlist.add(product) {
            self.notifier.notify(&Notice::info(
                "Already in wishlist",
                format!("{} is already in your wishlist.", product.name),
            ));
            return false;
        }
        self.commit(Notice::success(
            "Added to wishlist",
            format!("{} has been added to your wishlist.", product.name),
        ));
        true
    }

    /// Remove a product. Absent ids are a silent no-op.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let removed = self.wishlist.remove(id)?;
        self.commit(Notice::info(
            "Removed from wishlist",
            format!("{} has been removed from your wishlist.", removed.name),
        ));
        Some(removed)
    }

    /// Heart-button semantics. Returns true if the product is now saved.
    pub fn toggle(&mut self, product: &Product) -> bool {
        let saved = self.wishlist.toggle(product);
        let notice = if saved {
            Notice::success(
                "Added to wishlist",
                format!("{} has been added to your wishlist.", product.name),
            )
        } else {
            Notice::info(
                "Removed from wishlist",
                format!("{} has been removed from your wishlist.", product.name),
            )
        };
        self.commit(notice);
        saved
    }

    pub fn clear(&mut self) {
        self.wishlist.clear();
        self.commit(Notice::info(
            "Wishlist cleared",
            "All items have been removed from your wishlist.",
        ));
    }

    /// Re-read the stored snapshot.
    pub fn reload(&mut self) {
        self.wishlist = persist::load(&self.cache, &self.key);
        self.wishlist.dedup();
        self.subscribers.emit(&self.wishlist);
    }

    /// Drop the wishlist and its stored snapshot without notices.
    pub fn reset(&mut self) {
        self.wishlist.clear();
        persist::remove(&self.cache, &self.key);
        self.subscribers.emit(&self.wishlist);
    }
}

impl<B: KvBackend> std::fmt::Debug for WishlistStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("key", &self.key)
            .field("entries", &self.wishlist.len())
            .finish()
    }
}
