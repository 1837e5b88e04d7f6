//! # Money Module
//!
//! Provides the `Money` type used for cart arithmetic.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog sends prices as decimal strings: "10.00", "5.5", "19.99"  │
//! │                                                                         │
//! │  Parsing into floats and summing:                                       │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: parse the string straight into integer cents            │
//! │    "10.00" → 1000   "5.5" → 550   "19.99" → 1999                       │
//! │    Sum in i64, format back with exactly two decimals                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::parse_amount("10.00").unwrap();
//! let line = price.multiply_quantity(2);
//! let total = line + Money::parse_amount("5.5").unwrap();
//! assert_eq!(total.to_string(), "25.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Money carries no currency code. The cart sums whatever it is given;
/// reconciling currencies is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal amount string such as `"25.50"` into cents.
    ///
    /// ## Accepted Shapes
    /// - optional leading sign: `"-5.00"`, `"+5"`
    /// - whole part, fraction part, or both: `"12"`, `".5"`, `"12."`
    /// - surrounding whitespace is ignored
    ///
    /// Digits past the second decimal place round half away from zero:
    /// `"0.125"` → 13 cents.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::parse_amount("5.5").unwrap().cents(), 550);
    /// assert_eq!(Money::parse_amount("-0.99").unwrap().cents(), -99);
    /// assert!(Money::parse_amount("abc").is_err());
    /// ```
    pub fn parse_amount(amount: &str) -> CoreResult<Money> {
        let invalid = |reason: &str| CoreError::InvalidAmount {
            amount: amount.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = amount.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected digits with an optional decimal point"));
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|units| units.checked_mul(100))
                .ok_or_else(|| invalid("amount is too large"))?
        };

        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tens = digits.next().unwrap_or(0);
        let ones = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let cents = whole_cents
            .checked_add(tens * 10 + ones + i64::from(round_up))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// Saturates instead of overflowing; no real cart gets close.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit = Money::from_cents(299);
    /// assert_eq!(unit.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Formats as a plain decimal amount with exactly two places.
    ///
    /// This is the format the cart total is reported in (`"25.50"`).
    pub fn to_amount_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays as a plain two-decimal amount without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_amount_string())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

// Addition and subtraction saturate like `multiply_quantity`.

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_shapes() {
        assert_eq!(Money::parse_amount("10.00").unwrap().cents(), 1000);
        assert_eq!(Money::parse_amount("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse_amount("10.").unwrap().cents(), 1000);
        assert_eq!(Money::parse_amount(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse_amount("5.5").unwrap().cents(), 550);
        assert_eq!(Money::parse_amount(" 19.99 ").unwrap().cents(), 1999);
        assert_eq!(Money::parse_amount("+3.10").unwrap().cents(), 310);
        assert_eq!(Money::parse_amount("-5.50").unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_amount_rounds_extra_digits() {
        assert_eq!(Money::parse_amount("0.125").unwrap().cents(), 13);
        assert_eq!(Money::parse_amount("0.124").unwrap().cents(), 12);
        assert_eq!(Money::parse_amount("1.9999").unwrap().cents(), 200);
        assert_eq!(Money::parse_amount("-0.125").unwrap().cents(), -13);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(Money::parse_amount("").is_err());
        assert!(Money::parse_amount(".").is_err());
        assert!(Money::parse_amount("-").is_err());
        assert!(Money::parse_amount("abc").is_err());
        assert!(Money::parse_amount("1.2.3").is_err());
        assert!(Money::parse_amount("1,50").is_err());
        assert!(Money::parse_amount("99999999999999999999").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(550);

        assert_eq!((a + b).cents(), 1550);
        assert_eq!((a - b).cents(), 450);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2100);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);

        assert_eq!((max + Money::from_cents(1)).cents(), i64::MAX);
        assert_eq!((min - Money::from_cents(1)).cents(), i64::MIN);

        let mut acc = max;
        acc += max;
        assert_eq!(acc.cents(), i64::MAX);

        let total: Money = [max, max, min].iter().sum();
        assert_eq!(total.cents(), -1);
    }

    /// 0.1 + 0.2 done in floats is the classic failure; in cents it is exact.
    #[test]
    fn test_no_float_drift() {
        let total: Money = ["0.1", "0.2"]
            .iter()
            .map(|s| Money::parse_amount(s).unwrap())
            .sum();
        assert_eq!(total.to_string(), "0.30");
    }
}
