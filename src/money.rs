//! Money type for representing monetary values.
//!
//! Uses a minor-unit (cents) integer representation to avoid the
//! floating-point rounding drift that plagues monetary calculations.
//! Rounding happens only at display boundaries, never mid-calculation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A monetary amount in the storefront's single currency.
///
/// Stored in the smallest currency unit (cents), so intermediate sums are
/// exact integers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in minor units (cents).
    pub cents: i64,
}

impl Money {
    /// Create a Money value from minor units.
    pub const fn new(cents: i64) -> Self {
        Self { cents }
    }

    /// Create a Money value from whole currency units.
    ///
    /// ```
    /// use brew_cart::money::Money;
    /// assert_eq!(Money::from_major(150).cents, 15000);
    /// ```
    pub const fn from_major(units: i64) -> Self {
        Self {
            cents: units * 100,
        }
    }

    /// Create a Money value from a decimal amount, rounding half-up to
    /// the nearest cent.
    pub fn from_decimal(amount: f64) -> Self {
        Self {
            cents: (amount * 100.0).round() as i64,
        }
    }

    /// The zero amount.
    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    /// Checked addition.
    pub fn try_add(&self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::new)
    }

    /// Checked subtraction.
    pub fn try_subtract(&self, other: Money) -> Option<Money> {
        self.cents.checked_sub(other.cents).map(Money::new)
    }

    /// Checked multiplication by a quantity.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.cents.checked_mul(factor).map(Money::new)
    }

    /// Saturating subtraction, clamped at zero.
    ///
    /// Used for shortfall math, which must never go negative or error.
    pub fn saturating_minus(&self, other: Money) -> Money {
        Money::new(self.cents.saturating_sub(other.cents).max(0))
    }

    /// Saturating addition.
    pub fn saturating_plus(&self, other: Money) -> Money {
        Money::new(self.cents.saturating_add(other.cents))
    }

    /// Sum an iterator of Money values, returning `None` on overflow.
    pub fn try_sum(mut iter: impl Iterator<Item = Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }

    /// Format without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics on overflow. Use `try_add` for fallible addition.
    fn add(self, other: Money) -> Money {
        self.try_add(other).expect("overflow in money addition")
    }
}

impl Sub for Money {
    type Output = Money;

    /// # Panics
    /// Panics on overflow. Use `try_subtract` for fallible subtraction.
    fn sub(self, other: Money) -> Money {
        self.try_subtract(other)
            .expect("overflow in money subtraction")
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    /// # Panics
    /// Panics on overflow. Use `try_multiply` for fallible multiplication.
    fn mul(self, factor: i64) -> Money {
        self.try_multiply(factor)
            .expect("overflow in money multiplication")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_amount())
    }
}
