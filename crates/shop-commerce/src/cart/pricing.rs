//! Cart pricing calculations.

use crate::cart::{CartItem, Coupon};
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Store-wide pricing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    pub currency: Currency,
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: i64,
    /// Flat fee charged otherwise.
    pub shipping_fee: i64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            currency: Currency::INR,
            free_shipping_threshold: 999,
            shipping_fee: 99,
        }
    }
}

impl PricingPolicy {
    /// Shipping for a subtotal. The fee applies to any subtotal at or
    /// below the threshold, including an empty cart.
    pub fn shipping_for(&self, subtotal: &Money) -> Money {
        if subtotal.amount > self.free_shipping_threshold {
            Money::zero(self.currency)
        } else {
            Money::new(self.shipping_fee, self.currency)
        }
    }

    /// How much more the customer needs to spend for free shipping.
    pub fn remaining_for_free_shipping(&self, subtotal: &Money) -> Money {
        let needed = (self.free_shipping_threshold + 1 - subtotal.amount).max(0);
        Money::new(needed, self.currency)
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of size price times quantity.
    pub subtotal: Money,
    /// Coupon value.
    pub discount: Money,
    pub shipping: Money,
    /// subtotal - discount + shipping
    pub total: Money,
    /// Sum of quantities.
    pub item_count: u32,
}

impl CartTotals {
    /// Totals of a cart with no lines: nothing but the shipping fee.
    pub fn empty(policy: &PricingPolicy) -> Self {
        let zero = Money::zero(policy.currency);
        let shipping = policy.shipping_for(&zero);
        Self {
            subtotal: zero,
            discount: zero,
            shipping,
            total: shipping,
            item_count: 0,
        }
    }

    /// Compute totals for a set of lines and an optional coupon.
    pub fn compute(
        items: &[CartItem],
        coupon: Option<&Coupon>,
        policy: &PricingPolicy,
    ) -> Result<Self, CommerceError> {
        let lines = items
            .iter()
            .map(CartItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        let subtotal = Money::try_sum(lines.iter(), policy.currency)?;

        let discount = coupon
            .map(|c| c.discount_for(&subtotal))
            .unwrap_or(Money::zero(policy.currency));

        let shipping = if coupon.map_or(false, |c| c.waives_shipping(&subtotal)) {
            Money::zero(policy.currency)
        } else {
            policy.shipping_for(&subtotal)
        };

        let total = subtotal.checked_sub(&discount)?.checked_add(&shipping)?;
        let item_count = items
            .iter()
            .try_fold(0u32, |acc, i| acc.checked_add(i.quantity))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            discount,
            shipping,
            total,
            item_count,
        })
    }

    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_threshold() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.shipping_for(&Money::inr(999)).amount, 99);
        assert_eq!(policy.shipping_for(&Money::inr(1000)).amount, 0);
        assert_eq!(policy.shipping_for(&Money::inr(0)).amount, 99);
    }

    #[test]
    fn test_remaining_for_free_shipping() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.remaining_for_free_shipping(&Money::inr(900)).amount, 100);
        assert_eq!(policy.remaining_for_free_shipping(&Money::inr(5000)).amount, 0);
    }

    #[test]
    fn test_empty_totals() {
        let policy = PricingPolicy::default();
        let totals = CartTotals::compute(&[], None, &policy).unwrap();
        assert_eq!(totals, CartTotals::empty(&policy));
        assert_eq!(totals.subtotal, Money::zero(Currency::INR));
        assert_eq!(totals.shipping.amount, 99);
        assert_eq!(totals.total.amount, 99);
        assert!(!totals.has_discount());

        let generous = PricingPolicy {
            free_shipping_threshold: -1,
            ..policy
        };
        assert_eq!(CartTotals::empty(&generous).total.amount, 0);
    }
}
