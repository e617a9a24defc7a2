//! Coupon types.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// What a coupon takes off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponKind {
    /// Whole percent of the subtotal.
    Percentage,
    /// Fixed amount, never more than the subtotal.
    Fixed,
    /// Waives the shipping fee.
    FreeShipping,
}

/// A coupon definition.
///
/// Codes compare case-insensitively and are stored upper-case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coupon {
    /// Coupon code (e.g., "WELCOME10").
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub kind: CouponKind,
    /// Percent for `percentage`, amount for `fixed`, unused for `free_shipping`.
    #[serde(default)]
    pub value: i64,
    /// Subtotal required before the coupon applies.
    #[serde(default)]
    pub minimum_subtotal: Option<i64>,
}

impl Coupon {
    fn build(code: impl Into<String>, kind: CouponKind, value: i64) -> Self {
        Self {
            code: code.into().trim().to_uppercase(),
            description: None,
            kind,
            value,
            minimum_subtotal: None,
        }
    }

    /// Create a percentage coupon.
    pub fn percentage(code: impl Into<String>, percent: u8) -> Self {
        Self::build(code, CouponKind::Percentage, i64::from(percent))
    }

    /// Create a fixed amount coupon.
    pub fn fixed(code: impl Into<String>, amount: i64) -> Self {
        Self::build(code, CouponKind::Fixed, amount)
    }

    /// Create a free shipping coupon.
    pub fn free_shipping(code: impl Into<String>) -> Self {
        Self::build(code, CouponKind::FreeShipping, 0)
    }

    /// Require a minimum subtotal (builder style).
    pub fn with_minimum(mut self, amount: i64) -> Self {
        self.minimum_subtotal = Some(amount);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether `code` names this coupon.
    pub fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    /// Check the value is in range for the kind.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.code.trim().is_empty() {
            return Err(CommerceError::InvalidCoupon("empty code".to_string()));
        }
        let in_range = match self.kind {
            CouponKind::Percentage => (0..=100).contains(&self.value),
            CouponKind::Fixed => self.value >= 0,
            CouponKind::FreeShipping => true,
        };
        if !in_range || self.minimum_subtotal.map_or(false, |m| m < 0) {
            return Err(CommerceError::InvalidCoupon(self.code.clone()));
        }
        Ok(())
    }

    /// Whether the subtotal meets the minimum.
    pub fn is_eligible(&self, subtotal: &Money) -> bool {
        self.minimum_subtotal.map_or(true, |min| subtotal.amount >= min)
    }

    /// Fail with `CouponNotEligible` when the minimum is not met.
    pub fn ensure_eligible(&self, subtotal: &Money) -> Result<(), CommerceError> {
        if self.is_eligible(subtotal) {
            return Ok(());
        }
        let minimum = Money::new(self.minimum_subtotal.unwrap_or_default(), subtotal.currency);
        Err(CommerceError::CouponNotEligible {
            code: self.code.clone(),
            minimum: minimum.display(),
        })
    }

    /// Amount taken off the subtotal. Zero when not eligible.
    pub fn discount_for(&self, subtotal: &Money) -> Money {
        if !self.is_eligible(subtotal) {
            return Money::zero(subtotal.currency);
        }
        match self.kind {
            CouponKind::Percentage => {
                let percent = u8::try_from(self.value.clamp(0, 100)).unwrap_or(0);
                subtotal.percentage(percent)
            }
            CouponKind::Fixed => Money::new(self.value.max(0), subtotal.currency).min(*subtotal),
            CouponKind::FreeShipping => Money::zero(subtotal.currency),
        }
    }

    /// Whether the coupon waives shipping for this subtotal.
    pub fn waives_shipping(&self, subtotal: &Money) -> bool {
        self.kind == CouponKind::FreeShipping && self.is_eligible(subtotal)
    }

    /// Short human summary (e.g., "10% off", "₹500 off").
    pub fn summary(&self, currency: crate::money::Currency) -> String {
        let text = match self.kind {
            CouponKind::Percentage => format!("{}% off", self.value),
            CouponKind::Fixed => format!("{} off", Money::new(self.value, currency)),
            CouponKind::FreeShipping => "free shipping".to_string(),
        };
        match self.minimum_subtotal {
            Some(min) => format!("{} on orders of {} or more", text, Money::new(min, currency)),
            None => text,
        }
    }
}

/// The set of coupons a storefront accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    /// Build a book, rejecting invalid or duplicate codes.
    pub fn new(coupons: Vec<Coupon>) -> Result<Self, CommerceError> {
        let mut book = Self::default();
        for mut coupon in coupons {
            coupon.code = coupon.code.trim().to_uppercase();
            coupon.validate()?;
            if book.find(&coupon.code).is_some() {
                return Err(CommerceError::InvalidCoupon(format!("duplicate code {}", coupon.code)));
            }
            book.coupons.push(coupon);
        }
        Ok(book)
    }

    /// Find a coupon by code.
    pub fn find(&self, code: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.matches(code))
    }

    /// Find a coupon by code, failing with `InvalidCoupon`.
    pub fn require(&self, code: &str) -> Result<&Coupon, CommerceError> {
        self.find(code)
            .ok_or_else(|| CommerceError::InvalidCoupon(code.trim().to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}
