//! Wishlist aggregate.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Saved products, at most one entry per product id, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Wishlist {
    items: Vec<Product>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a snapshot of `product`. Returns false if it was already saved.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.items.push(product.clone());
        true
    }

    /// Remove a product by id, returning the removed snapshot.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.items.iter().position(|p| p.id == id)?;
        Some(self.items.remove(index))
    }

    /// Add if absent, remove if present. Returns true if now saved.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.remove(product.id).is_some() {
            false
        } else {
            self.items.push(product.clone());
            true
        }
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop duplicate ids, keeping the first entry. Used after reading
    /// snapshots written by another process.
    pub(crate) fn dedup(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.items.retain(|p| seen.insert(p.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: u32) -> Product {
        Product::new(id, format!("P{}", id), Money::inr(100), "Misc")
    }

    #[test]
    fn test_set_semantics() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.add(&product(1)));
        assert!(!wishlist.add(&product(1)));
        assert!(wishlist.add(&product(2)));
        assert_eq!(wishlist.len(), 2);
        assert!(wishlist.contains(ProductId::new(2)));
    }

    #[test]
    fn test_remove_and_toggle() {
        let mut wishlist = Wishlist::new();
        wishlist.add(&product(1));
        assert!(wishlist.remove(ProductId::new(9)).is_none());
        assert_eq!(wishlist.remove(ProductId::new(1)).map(|p| p.name), Some("P1".to_string()));

        assert!(wishlist.toggle(&product(3)));
        assert!(!wishlist.toggle(&product(3)));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_dedup() {
        let mut wishlist: Wishlist = serde_json::from_value(serde_json::json!({
            "items": [product(1), product(1), product(2)]
        }))
        .unwrap();
        wishlist.dedup();
        assert_eq!(wishlist.len(), 2);
    }
}
