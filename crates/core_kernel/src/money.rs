//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of rupee amounts using
//! rust_decimal for precise calculations without floating-point errors.
//! Everything the shop bills is in INR, so amounts carry no currency tag.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// A rupee amount
///
/// Money keeps full decimal precision through intermediate arithmetic.
/// Rounding to the two fractional digits printed on an invoice happens
/// exactly once, in [`Money::rounded`] (also used by `Display`), with
/// round-half-up. Wrong rounding here means wrong invoices, so nothing
/// in this type ever touches binary floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a new Money value, preserving the full precision of `amount`
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates Money from an integer amount in paise (minor units)
    pub fn from_paise(paise: i64) -> Self {
        Self(Decimal::new(paise, 2))
    }

    /// Returns the underlying decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to 2 decimal places using round-half-up
    ///
    /// This is the display-boundary rounding step. Intermediate sums must be
    /// taken over unrounded values and rounded once at the end.
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiplies by a scalar (e.g., a quantity)
    pub fn multiply(&self, factor: Decimal) -> Money {
        Money(self.0 * factor)
    }

    /// Divides by a scalar
    pub fn divide(&self, divisor: Decimal) -> Result<Money, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Money(self.0 / divisor))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Round first, then pad; "{:.2}" on an already 2-dp value only pads.
        write!(f, "{:.2}", self.rounded().0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// A percentage rate (e.g., a GST component rate)
///
/// Stored as the percentage figure itself: `Percent::new(dec!(9))` is 9%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    /// The zero rate
    pub const ZERO: Percent = Percent(Decimal::ZERO);

    /// Creates a rate from a percentage figure (e.g., 9 for 9%)
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the percentage figure
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Applies this rate to a base amount: `base * percent / 100`
    pub fn apply(&self, base: Money) -> Money {
        base.multiply(self.0 / dec!(100))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(100.50));
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_from_paise() {
        let m = Money::from_paise(10050);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00));
        let b = Money::new(dec!(50.00));

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(Money::new(dec!(99.999)).rounded().amount(), dec!(100.00));
        assert_eq!(Money::new(dec!(0.005)).rounded().amount(), dec!(0.01));
        assert_eq!(Money::new(dec!(2.675)).rounded().amount(), dec!(2.68));
        assert_eq!(Money::new(dec!(2.674)).rounded().amount(), dec!(2.67));
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Money::new(dec!(100)).to_string(), "100.00");
        assert_eq!(Money::new(dec!(99.999)).to_string(), "100.00");
        assert_eq!(Money::new(dec!(18.5)).to_string(), "18.50");
    }

    #[test]
    fn test_percent_apply() {
        let rate = Percent::new(dec!(9));
        let base = Money::new(dec!(200.00));

        assert_eq!(rate.apply(base).amount(), dec!(18.00));
    }

    #[test]
    fn test_percent_display() {
        assert_eq!(Percent::new(dec!(9)).to_string(), "9%");
        assert_eq!(Percent::new(dec!(2.5)).to_string(), "2.5%");
    }

    #[test]
    fn test_divide_by_zero() {
        let m = Money::new(dec!(10));
        assert_eq!(m.divide(Decimal::ZERO), Err(MoneyError::DivisionByZero));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn money_sum_matches_decimal_sum(
            amounts in proptest::collection::vec(-1_000_000i64..1_000_000i64, 1..50)
        ) {
            let total: Money = amounts.iter().map(|&p| Money::from_paise(p)).sum();
            let expected: Decimal = amounts.iter().map(|&p| Decimal::new(p, 2)).sum();
            prop_assert_eq!(total.amount(), expected);
        }

        #[test]
        fn money_addition_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let (ma, mb, mc) = (Money::from_paise(a), Money::from_paise(b), Money::from_paise(c));
            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }

        #[test]
        fn rounding_is_idempotent(paise in -1_000_000i64..1_000_000i64) {
            let m = Money::from_paise(paise);
            prop_assert_eq!(m.rounded(), m.rounded().rounded());
        }
    }
}
