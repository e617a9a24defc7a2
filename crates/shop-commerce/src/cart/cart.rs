//! Cart and line item types.

use crate::cart::{CartTotals, Coupon, PricingPolicy};
use crate::catalog::{Product, Size, Variant};
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line in the cart.
///
/// Holds a snapshot of the product taken when it was added; lines are
/// identified by product id, variant index and size index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    pub variant_index: usize,
    pub size_index: usize,
    pub quantity: u32,
}

impl CartItem {
    /// Create a line. Indices are checked when the line is added to a cart.
    pub fn new(product: Product, variant_index: usize, size_index: usize, quantity: u32) -> Self {
        Self {
            product,
            variant_index,
            size_index,
            quantity,
        }
    }

    pub fn variant(&self) -> Result<&Variant, CommerceError> {
        self.product.variant(self.variant_index)
    }

    pub fn size(&self) -> Result<&Size, CommerceError> {
        self.product.size(self.variant_index, self.size_index)
    }

    /// Price of one unit of the selected size.
    pub fn unit_price(&self) -> Result<Money, CommerceError> {
        Ok(self.size()?.price)
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price()?.checked_mul(self.quantity)
    }

    /// Whether two lines refer to the same product, variant and size.
    pub fn same_line(&self, other: &CartItem) -> bool {
        self.product.id == other.product.id
            && self.variant_index == other.variant_index
            && self.size_index == other.size_index
    }

    /// Display label, e.g. "Slim Fit Chinos (Navy, 32)".
    pub fn label(&self) -> String {
        match (self.variant(), self.size()) {
            (Ok(variant), Ok(size)) => {
                format!("{} ({}, {})", self.product.name, variant.color_name, size.name)
            }
            _ => self.product.name.clone(),
        }
    }

    fn insufficient(&self, requested: u32, available: u32) -> CommerceError {
        CommerceError::InsufficientStock {
            product: self.label(),
            requested,
            available,
        }
    }
}

/// A shopping cart.
///
/// Totals are derived: every mutation recomputes them, and they are
/// recomputed again after the cart is read back from storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    #[serde(default)]
    coupon: Option<Coupon>,
    #[serde(default)]
    totals: CartTotals,
    #[serde(skip)]
    pricing: PricingPolicy,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Create an empty cart with default pricing.
    pub fn new() -> Self {
        Self::with_pricing(PricingPolicy::default())
    }

    pub fn with_pricing(pricing: PricingPolicy) -> Self {
        Self {
            items: Vec::new(),
            coupon: None,
            totals: CartTotals::empty(&pricing),
            pricing,
        }
    }

    /// Swap the pricing policy and recompute. The cart is unchanged if the
    /// lines cannot be priced under the new policy.
    pub fn set_pricing(&mut self, pricing: PricingPolicy) -> Result<(), CommerceError> {
        self.commit(self.items.clone(), self.coupon.clone(), pricing)
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// Price a candidate state and adopt it only if that succeeds.
    fn commit(
        &mut self,
        items: Vec<CartItem>,
        coupon: Option<Coupon>,
        pricing: PricingPolicy,
    ) -> Result<(), CommerceError> {
        let totals = CartTotals::compute(&items, coupon.as_ref(), &pricing)?;
        self.items = items;
        self.coupon = coupon;
        self.pricing = pricing;
        self.totals = totals;
        Ok(())
    }

    /// Add a line, merging into an existing line for the same size.
    ///
    /// Fails without changing the cart if the quantity is zero, the indices
    /// are out of range, the resulting quantity exceeds stock, or the line
    /// cannot be priced. Returns the position of the affected line.
    pub fn add(&mut self, item: CartItem) -> Result<usize, CommerceError> {
        if item.quantity == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }
        let size = item.size()?;

        let position = self.items.iter().position(|i| i.same_line(&item));
        let existing = position.map_or(0, |p| self.items[p].quantity);
        let wanted = existing
            .checked_add(item.quantity)
            .ok_or(CommerceError::Overflow)?;
        if !size.can_fulfill(wanted) {
            return Err(item.insufficient(wanted, size.stock));
        }

        let mut items = self.items.clone();
        let index = match position {
            Some(p) => {
                items[p].quantity = wanted;
                p
            }
            None => {
                items.push(item);
                items.len() - 1
            }
        };
        self.commit(items, self.coupon.clone(), self.pricing)?;
        Ok(index)
    }

    /// Remove the line at `index`.
    pub fn remove(&mut self, index: usize) -> Result<CartItem, CommerceError> {
        if index >= self.items.len() {
            return Err(CommerceError::ItemNotInCart(index));
        }
        let mut items = self.items.clone();
        let removed = items.remove(index);
        self.commit(items, self.coupon.clone(), self.pricing)?;
        Ok(removed)
    }

    /// Set the quantity of the line at `index`.
    ///
    /// Quantities below 1 are rejected; removal is explicit.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let item = self
            .items
            .get(index)
            .ok_or(CommerceError::ItemNotInCart(index))?;
        let size = item.size()?;
        let quantity = u32::try_from(quantity).map_err(|_| CommerceError::InvalidQuantity(quantity))?;
        if !size.can_fulfill(quantity) {
            return Err(item.insufficient(quantity, size.stock));
        }

        let mut items = self.items.clone();
        items[index].quantity = quantity;
        self.commit(items, self.coupon.clone(), self.pricing)
    }

    /// Remove all lines and any applied coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon = None;
        self.totals = CartTotals::empty(&self.pricing);
    }

    /// Apply a coupon, replacing any previous one.
    pub fn apply_coupon(&mut self, coupon: Coupon) -> Result<(), CommerceError> {
        coupon.validate()?;
        coupon.ensure_eligible(&self.totals.subtotal)?;
        self.commit(self.items.clone(), Some(coupon), self.pricing)
    }

    pub fn remove_coupon(&mut self) -> Result<Option<Coupon>, CommerceError> {
        let removed = self.coupon.clone();
        self.commit(self.items.clone(), None, self.pricing)?;
        Ok(removed)
    }

    /// Drop lines that no longer resolve to a size or have no quantity.
    /// Returns how many were dropped.
    pub(crate) fn retain_valid(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|i| i.quantity > 0 && i.size().is_ok());
        before - self.items.len()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&CartItem> {
        self.items.get(index)
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u32 {
        self.totals.item_count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Variant;
    use crate::money::Currency;

    fn shirt(stock: u32) -> Product {
        Product::new(1, "Oxford Shirt", Money::inr(1000), "Shirts").with_variant(
            Variant::new("White", "#FFFFFF")
                .with_size("M", Money::inr(1000), stock)
                .with_size("L", Money::inr(1200), 5),
        )
    }

    #[test]
    fn test_add_and_merge() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(CartItem::new(shirt(5), 0, 0, 1)).unwrap(), 0);
        assert_eq!(cart.add(CartItem::new(shirt(5), 0, 1, 1)).unwrap(), 1);
        assert_eq!(cart.add(CartItem::new(shirt(5), 0, 0, 2)).unwrap(), 0);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.totals().subtotal.amount, 4200);
    }

    #[test]
    fn test_merge_respects_stock() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(shirt(2), 0, 0, 2)).unwrap();
        let err = cart.add(CartItem::new(shirt(2), 0, 0, 1)).unwrap_err();
        assert!(matches!(
            err,
            CommerceError::InsufficientStock { requested: 3, available: 2, .. }
        ));
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_add_rejects_bad_lines() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add(CartItem::new(shirt(2), 0, 0, 0)),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add(CartItem::new(shirt(2), 3, 0, 1)),
            Err(CommerceError::VariantNotFound { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(shirt(4), 0, 0, 1)).unwrap();

        cart.update_quantity(0, 4).unwrap();
        assert_eq!(cart.totals().subtotal.amount, 4000);

        assert!(matches!(cart.update_quantity(0, 0), Err(CommerceError::InvalidQuantity(0))));
        assert!(matches!(cart.update_quantity(0, -2), Err(CommerceError::InvalidQuantity(-2))));
        assert!(matches!(
            cart.update_quantity(0, 5),
            Err(CommerceError::InsufficientStock { requested: 5, available: 4, .. })
        ));
        assert!(matches!(cart.update_quantity(7, 1), Err(CommerceError::ItemNotInCart(7))));
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(shirt(4), 0, 0, 1)).unwrap();
        cart.add(CartItem::new(shirt(4), 0, 1, 1)).unwrap();

        let removed = cart.remove(0).unwrap();
        assert_eq!(removed.label(), "Oxford Shirt (White, M)");
        assert_eq!(cart.items()[0].size_index, 1);
        assert!(matches!(cart.remove(5), Err(CommerceError::ItemNotInCart(5))));

        cart.apply_coupon(Coupon::percentage("TEN", 10)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.coupon().is_none());
        assert_eq!(cart.totals().subtotal.amount, 0);
        assert_eq!(cart.totals().shipping.amount, 99);
        assert_eq!(cart.totals().total.amount, 99);
        assert_eq!(cart.totals(), &CartTotals::compute(&[], None, cart.pricing()).unwrap());
        assert_eq!(Cart::new().totals(), cart.totals());
    }

    #[test]
    fn test_shipping_rule() {
        let mut cart = Cart::new();
        let cheap = Product::new(2, "Socks", Money::inr(499), "Misc")
            .with_variant(Variant::new("Black", "#000000").with_size("M", Money::inr(499), 10));

        cart.add(CartItem::new(cheap.clone(), 0, 0, 1)).unwrap();
        assert_eq!(cart.totals().shipping.amount, 99);
        assert_eq!(cart.totals().total.amount, 598);

        cart.add(CartItem::new(cheap, 0, 0, 2)).unwrap();
        assert_eq!(cart.totals().subtotal.amount, 1497);
        assert_eq!(cart.totals().shipping.amount, 0);
    }

    #[test]
    fn test_coupons() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(shirt(5), 0, 0, 2)).unwrap();

        assert!(matches!(
            cart.apply_coupon(Coupon::fixed("BIG", 500).with_minimum(5000)),
            Err(CommerceError::CouponNotEligible { .. })
        ));

        cart.apply_coupon(Coupon::percentage("TEN", 10)).unwrap();
        assert_eq!(cart.totals().discount.amount, 200);
        assert_eq!(cart.totals().total.amount, 1800);

        let removed = cart.remove_coupon().unwrap();
        assert_eq!(removed.map(|c| c.code), Some("TEN".to_string()));
        assert_eq!(cart.totals().discount.amount, 0);
    }

    #[test]
    fn test_serde_skips_pricing_and_keeps_order() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(shirt(5), 0, 1, 1)).unwrap();
        cart.add(CartItem::new(shirt(5), 0, 0, 1)).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.get("pricing").is_none());
        assert_eq!(json["items"][0]["sizeIndex"], 1);

        let mut restored: Cart = serde_json::from_value(json).unwrap();
        restored.set_pricing(PricingPolicy::default()).unwrap();
        assert_eq!(restored, cart);
    }

    fn usd_pricing() -> PricingPolicy {
        PricingPolicy {
            currency: Currency::USD,
            ..PricingPolicy::default()
        }
    }

    #[test]
    fn test_unpriceable_add_leaves_cart_untouched() {
        let mut cart = Cart::with_pricing(usd_pricing());
        let before = cart.clone();

        let err = cart.add(CartItem::new(shirt(5), 0, 0, 1)).unwrap_err();
        assert!(matches!(err, CommerceError::CurrencyMismatch { .. }));
        assert_eq!(cart, before);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_failed_repricing_keeps_previous_state() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(shirt(5), 0, 0, 2)).unwrap();
        let before = cart.clone();

        assert!(cart.set_pricing(usd_pricing()).is_err());
        assert_eq!(cart, before);
        assert_eq!(cart.pricing().currency, Currency::INR);

        // Later edits still price against the original policy.
        cart.update_quantity(0, 3).unwrap();
        assert_eq!(cart.totals().subtotal.amount, 3000);
    }
}
