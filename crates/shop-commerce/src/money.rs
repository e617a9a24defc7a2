//! Money type for representing monetary values.
//!
//! Storefront prices are whole display units (₹2499, not paise), held as
//! integers so totals are exact.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }

    /// Digit grouping used when displaying amounts.
    ///
    /// Indian grouping puts the first separator after three digits and
    /// every following one after two (`1,00,000`).
    fn group_digits(&self, digits: &str) -> String {
        let (head, tail) = if digits.len() > 3 {
            digits.split_at(digits.len() - 3)
        } else {
            return digits.to_string();
        };

        let group = match self {
            Currency::INR => 2,
            _ => 3,
        };

        let mut groups = Vec::new();
        let mut rest = head;
        while rest.len() > group {
            let (left, right) = rest.split_at(rest.len() - group);
            groups.push(right);
            rest = left;
        }
        groups.push(rest);
        groups.reverse();

        format!("{},{}", groups.join(","), tail)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in whole display units.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value.
    pub const fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Shorthand for an amount in rupees.
    pub const fn inr(amount: i64) -> Self {
        Self::new(amount, Currency::INR)
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Format as a display string (e.g., "₹2,499").
    pub fn display(&self) -> String {
        let digits = self.amount.unsigned_abs().to_string();
        let sign = if self.amount < 0 { "-" } else { "" };
        format!(
            "{}{}{}",
            sign,
            self.currency.symbol(),
            self.currency.group_digits(&digits)
        )
    }

    /// Add another Money value.
    pub fn checked_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Subtract another Money value.
    pub fn checked_sub(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Multiply by a quantity.
    pub fn checked_mul(&self, factor: u32) -> Result<Money, CommerceError> {
        let amount = self
            .amount
            .checked_mul(i64::from(factor))
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Calculate a whole-percent share of this amount, rounded half up.
    pub fn percentage(&self, percent: u8) -> Money {
        let scaled = i128::from(self.amount) * i128::from(percent);
        let rounded = (scaled + 50).div_euclid(100);
        Money::new(rounded as i64, self.currency)
    }

    /// The smaller of two amounts in the same currency.
    pub fn min(self, other: Money) -> Money {
        if other.amount < self.amount {
            other
        } else {
            self
        }
    }

    /// Sum an iterator of Money values.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

impl PartialOrd for Money {
    /// Amounts in different currencies are incomparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        Some(self.amount.cmp(&other.amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
