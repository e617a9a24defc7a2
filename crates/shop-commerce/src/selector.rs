//! Variant, size, image and quantity selection for a product page.

use crate::cart::CartItem;
use crate::catalog::{Product, Size, Variant};
use crate::error::CommerceError;
use crate::money::Money;
use serde::Serialize;

/// Transient selection state for one product.
///
/// The selected size defaults to the first size of the variant even when
/// it is out of stock; adding to the cart is then disabled until an
/// available size is picked.
#[derive(Debug, Clone, Serialize)]
pub struct VariantSelection<'a> {
    #[serde(skip)]
    product: &'a Product,
    variant: usize,
    size: Option<usize>,
    image: usize,
    quantity: u32,
}

impl<'a> VariantSelection<'a> {
    pub fn new(product: &'a Product) -> Self {
        let size = product
            .variants
            .first()
            .filter(|v| !v.sizes.is_empty())
            .map(|_| 0);
        Self {
            product,
            variant: 0,
            size,
            image: 0,
            quantity: 1,
        }
    }

    pub fn product(&self) -> &'a Product {
        self.product
    }

    pub fn variant_index(&self) -> usize {
        self.variant
    }

    pub fn size_index(&self) -> Option<usize> {
        self.size
    }

    pub fn image_index(&self) -> usize {
        self.image
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn variant(&self) -> Option<&'a Variant> {
        self.product.variants.get(self.variant)
    }

    pub fn size(&self) -> Option<&'a Size> {
        let index = self.size?;
        self.variant()?.sizes.get(index)
    }

    /// Selected image URL, if the variant has images.
    pub fn image(&self) -> Option<&'a str> {
        self.variant()?.images.get(self.image).map(String::as_str)
    }

    /// Switch colour variant.
    ///
    /// Size resets to the variant's first size and the image to the first
    /// one; quantity is clamped to the new stock but never below 1.
    pub fn select_variant(&mut self, index: usize) -> Result<(), CommerceError> {
        let variant = self.product.variant(index)?;
        self.variant = index;
        self.size = if variant.sizes.is_empty() { None } else { Some(0) };
        self.image = 0;
        self.quantity = self.quantity.min(self.current_stock()).max(1);
        Ok(())
    }

    /// Select a size by label. Unknown or sold-out sizes leave the state
    /// unchanged and return false.
    pub fn select_size(&mut self, name: &str) -> bool {
        let Some(variant) = self.variant() else {
            return false;
        };
        match variant.find_size(name) {
            Some((index, size)) if size.is_available() => {
                self.size = Some(index);
                self.quantity = self.quantity.min(size.stock).max(1);
                true
            }
            _ => false,
        }
    }

    /// Select an image of the current variant.
    pub fn select_image(&mut self, index: usize) -> bool {
        let count = self.variant().map_or(0, |v| v.images.len());
        if index < count {
            self.image = index;
            true
        } else {
            false
        }
    }

    /// Price of the selected size, or the product's base price.
    pub fn current_price(&self) -> Money {
        self.size().map_or(self.product.base_price, |s| s.price)
    }

    /// Stock of the selected size, or 0 when none is selected.
    pub fn current_stock(&self) -> u32 {
        self.size().map_or(0, |s| s.stock)
    }

    pub fn can_increment(&self) -> bool {
        self.quantity < self.current_stock()
    }

    pub fn can_decrement(&self) -> bool {
        self.current_stock() > 0 && self.quantity > 1
    }

    pub fn increment(&mut self) -> bool {
        if self.can_increment() {
            self.quantity += 1;
            true
        } else {
            false
        }
    }

    pub fn decrement(&mut self) -> bool {
        if self.can_decrement() {
            self.quantity -= 1;
            true
        } else {
            false
        }
    }

    /// Set the quantity directly, accepted only within 1 and current stock.
    pub fn set_quantity(&mut self, quantity: u32) -> bool {
        if (1..=self.current_stock()).contains(&quantity) {
            self.quantity = quantity;
            true
        } else {
            false
        }
    }

    pub fn can_add_to_cart(&self) -> bool {
        self.current_stock() > 0 && self.quantity <= self.current_stock()
    }

    /// Stock label shown next to the size picker, and whether it is low.
    pub fn stock_label(&self) -> (String, bool) {
        match self.current_stock() {
            0 => ("Out of stock".to_string(), true),
            n => (format!("{} in stock", n), n < 5),
        }
    }

    /// Cart line for the current selection, or `None` when out of stock.
    pub fn to_cart_item(&self) -> Option<CartItem> {
        if !self.can_add_to_cart() {
            return None;
        }
        Some(CartItem::new(
            self.product.clone(),
            self.variant,
            self.size?,
            self.quantity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> Product {
        Product::new(1, "Oxford Shirt", Money::inr(2499), "Shirts")
            .with_variant(
                Variant::new("White", "#FFFFFF")
                    .with_size("S", Money::inr(2499), 10)
                    .with_size("XL", Money::inr(2699), 5)
                    .with_image("white-1.jpg")
                    .with_image("white-2.jpg"),
            )
            .with_variant(
                Variant::new("Black", "#000000")
                    .with_size("S", Money::inr(2499), 3)
                    .with_size("XL", Money::inr(2699), 0),
            )
    }

    #[test]
    fn test_defaults() {
        let product = shirt();
        let selection = VariantSelection::new(&product);
        assert_eq!(selection.variant_index(), 0);
        assert_eq!(selection.size().unwrap().name, "S");
        assert_eq!(selection.quantity(), 1);
        assert_eq!(selection.current_price().amount, 2499);
        assert_eq!(selection.image(), Some("white-1.jpg"));
    }

    #[test]
    fn test_select_size() {
        let product = shirt();
        let mut selection = VariantSelection::new(&product);
        assert!(selection.select_size("xl"));
        assert_eq!(selection.current_price().amount, 2699);
        assert_eq!(selection.current_stock(), 5);

        assert!(!selection.select_size("XXL"));
        selection.select_variant(1).unwrap();
        assert!(!selection.select_size("XL"));
        assert_eq!(selection.size().unwrap().name, "S");
    }

    #[test]
    fn test_variant_change_resets_and_clamps() {
        let product = shirt();
        let mut selection = VariantSelection::new(&product);
        assert!(selection.select_image(1));
        assert!(selection.set_quantity(8));

        selection.select_variant(1).unwrap();
        assert_eq!(selection.image_index(), 0);
        assert_eq!(selection.size_index(), Some(0));
        assert_eq!(selection.quantity(), 3);
        assert!(!selection.select_image(0));

        assert!(matches!(
            selection.select_variant(4),
            Err(CommerceError::VariantNotFound { index: 4, .. })
        ));
        assert_eq!(selection.variant_index(), 1);
    }

    #[test]
    fn test_quantity_stepper() {
        let product = shirt();
        let mut selection = VariantSelection::new(&product);
        selection.select_variant(1).unwrap();

        assert!(!selection.decrement());
        assert!(selection.increment());
        assert!(selection.increment());
        assert!(!selection.increment());
        assert_eq!(selection.quantity(), 3);
        assert!(selection.decrement());
        assert!(!selection.set_quantity(0));
        assert!(!selection.set_quantity(4));
    }

    #[test]
    fn test_out_of_stock_default_size() {
        let product = Product::new(2, "Tee", Money::inr(999), "T-Shirts").with_variant(
            Variant::new("Grey", "#808080")
                .with_size("S", Money::inr(999), 0)
                .with_size("M", Money::inr(999), 2),
        );
        let mut selection = VariantSelection::new(&product);
        assert_eq!(selection.size().unwrap().name, "S");
        assert!(!selection.can_add_to_cart());
        assert!(!selection.increment());
        assert!(!selection.decrement());
        assert!(selection.to_cart_item().is_none());
        assert_eq!(selection.stock_label(), ("Out of stock".to_string(), true));

        assert!(selection.select_size("M"));
        let item = selection.to_cart_item().unwrap();
        assert_eq!((item.variant_index, item.size_index, item.quantity), (0, 1, 1));
        assert_eq!(selection.stock_label(), ("2 in stock".to_string(), true));
    }
}
