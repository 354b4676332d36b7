//! Currency amounts stored as whole cents

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// A non-negative amount of money in cents (USD)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest unit price accepted from the backend ($1,000,000.00)
    pub const MAX_PRICE: Money = Money(100_000_000);

    pub const fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    /// Whole currency units, e.g. a +2 quality surcharge
    pub const fn from_units(units: u64) -> Self {
        Money(units * 100)
    }

    /// Convert a decimal amount as sent by the backend.
    ///
    /// Returns `None` for negative or non-finite values and for amounts
    /// above `MAX_PRICE`.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents > Self::MAX_PRICE.0 as f64 {
            return None;
        }
        Some(Money(cents as u64))
    }

    /// Parse a decimal string such as `"19.99"`
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<f64>().ok().and_then(Self::from_decimal)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Amount multiplied by a line quantity, saturating at `u64::MAX` cents
    pub const fn times(self, quantity: u32) -> Self {
        Money(self.0.saturating_mul(quantity as u64))
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_decimals() {
        assert_eq!(Money::parse("19.99"), Some(Money::from_cents(1999)));
        assert_eq!(Money::from_decimal(23.99), Some(Money::from_cents(2399)));
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::from_decimal(-1.0), None);
    }

    #[test]
    fn test_amounts_above_ceiling_rejected() {
        assert_eq!(Money::from_decimal(1_000_000.0), Some(Money::MAX_PRICE));
        assert_eq!(Money::from_decimal(1_000_000.01), None);
        assert_eq!(Money::from_decimal(1e17), None);
        assert_eq!(Money::parse("1e300"), None);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(u64::MAX - 1);
        assert_eq!(huge.times(2), Money::from_cents(u64::MAX));
        assert_eq!(huge + Money::from_cents(5), Money::from_cents(u64::MAX));

        let total: Money = [huge, huge, Money::from_cents(1)].into_iter().sum();
        assert_eq!(total, Money::from_cents(u64::MAX));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(6397).to_string(), "$63.97");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_sum_of_line_totals() {
        let total: Money = [Money::from_cents(1999).times(2), Money::from_cents(2399).times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_cents(6397));
    }
}
