//! Persisted cart with notices and subscribers.

use super::{persist, SubscriptionId, Subscribers};
use crate::cart::{Cart, CartItem, Coupon, CouponBook, PricingPolicy};
use crate::error::{CommerceError, Result};
use crate::money::Money;
use crate::notify::{Notice, Notifier};
use shop_cache::{Cache, KvBackend};
use std::sync::Arc;

/// Owns the cart and applies every change as
/// mutate, recompute, persist, notify subscribers, emit notice.
pub struct CartStore<B: KvBackend> {
    cart: Cart,
    cache: Cache<B>,
    key: String,
    notifier: Arc<dyn Notifier>,
    subscribers: Subscribers<Cart>,
}

impl<B: KvBackend> CartStore<B> {
    /// Open the store and rehydrate the cart stored under `key`.
    pub fn open(
        cache: Cache<B>,
        key: impl Into<String>,
        pricing: PricingPolicy,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let key = key.into();
        let cart = Self::rehydrate(&cache, &key, pricing);
        Self {
            cart,
            cache,
            key,
            notifier,
            subscribers: Subscribers::new(),
        }
    }

    fn rehydrate(cache: &Cache<B>, key: &str, pricing: PricingPolicy) -> Cart {
        let mut cart: Cart = persist::load(cache, key);
        let dropped = cart.retain_valid();
        if dropped > 0 {
            tracing::warn!(key, dropped, "dropped cart lines that no longer resolve");
        }
        match cart.set_pricing(pricing) {
            Ok(()) => {
                tracing::debug!(key, lines = cart.items().len(), "cart ready");
                cart
            }
            Err(error) => {
                tracing::warn!(key, %error, "stored cart cannot be priced, starting empty");
                Cart::with_pricing(pricing)
            }
        }
    }

    /// Re-read the stored snapshot, replacing the in-memory cart.
    pub fn reload(&mut self) {
        self.cart = Self::rehydrate(&self.cache, &self.key, *self.cart.pricing());
        self.subscribers.emit(&self.cart);
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn subscribe(&mut self, listener: impl Fn(&Cart) + Send + Sync + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn commit(&mut self, notice: Notice) {
        persist::save(&self.cache, &self.key, &self.cart);
        self.subscribers.emit(&self.cart);
        self.notifier.notify(&notice);
    }

    fn reject(&self, error: CommerceError) -> CommerceError {
        if let CommerceError::InsufficientStock { available, .. } = &error {
            self.notifier.notify(&Notice::destructive(
                "Not enough stock",
                format!("Sorry, we only have {} items in stock.", available),
            ));
        }
        tracing::debug!(%error, "cart change rejected");
        error
    }

    /// Add a line, merging with an existing line for the same size.
    pub fn add(&mut self, item: CartItem) -> Result<()> {
        let name = item.product.name.clone();
        self.cart.add(item).map_err(|e| self.reject(e))?;
        self.commit(Notice::success(
            "Added to cart",
            format!("{} has been added to your cart.", name),
        ));
        Ok(())
    }

    /// Remove the line at `index`.
    pub fn remove(&mut self, index: usize) -> Result<CartItem> {
        let removed = self.cart.remove(index).map_err(|e| self.reject(e))?;
        self.commit(Notice::info(
            "Removed from cart",
            format!("{} has been removed from your cart.", removed.product.name),
        ));
        Ok(removed)
    }

    /// Set the quantity of the line at `index`.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> Result<()> {
        self.cart
            .update_quantity(index, quantity)
            .map_err(|e| self.reject(e))?;
        persist::save(&self.cache, &self.key, &self.cart);
        self.subscribers.emit(&self.cart);
        Ok(())
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit(Notice::info(
            "Cart cleared",
            "All items have been removed from your cart.",
        ));
    }

    /// Apply a coupon from `book` by code.
    pub fn apply_coupon(&mut self, code: &str, book: &CouponBook) -> Result<&Coupon> {
        let result = book
            .require(code)
            .and_then(|coupon| self.cart.apply_coupon(coupon.clone()));
        if let Err(error) = result {
            self.notifier
                .notify(&Notice::destructive("Coupon not applied", error.to_string()));
            return Err(error);
        }

        let currency = self.cart.pricing().currency;
        let summary = self
            .cart
            .coupon()
            .map(|c| format!("{}: {}", c.code, c.summary(currency)))
            .unwrap_or_default();
        self.commit(Notice::success("Coupon applied", summary));
        self.cart
            .coupon()
            .ok_or_else(|| CommerceError::InvalidCoupon(code.to_string()))
    }

    /// Remove the applied coupon, if any.
    pub fn remove_coupon(&mut self) -> Result<Option<Coupon>> {
        let removed = self.cart.remove_coupon()?;
        if let Some(coupon) = &removed {
            let notice = Notice::info("Coupon removed", format!("{} is no longer applied.", coupon.code));
            self.commit(notice);
        }
        Ok(removed)
    }

    /// Amount left to spend before shipping is free.
    pub fn remaining_for_free_shipping(&self) -> Money {
        self.cart
            .pricing()
            .remaining_for_free_shipping(&self.cart.totals().subtotal)
    }

    /// Drop the cart and its stored snapshot without notices.
    pub fn reset(&mut self) {
        self.cart.clear();
        persist::remove(&self.cache, &self.key);
        self.subscribers.emit(&self.cart);
    }
}

impl<B: KvBackend> std::fmt::Debug for CartStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cart", &self.cart)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}
