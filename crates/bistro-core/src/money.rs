//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    7.10 + 5.20 = 12.299999999999999  ❌ WRONG!                          │
//! │                                                                         │
//! │  Truncating to whole units instead:                                     │
//! │    int(10.99) + int(3.99) = 13       ❌ Lost $1.98!                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "10.99" → 1099 cents, "3.99" → 399 cents                            │
//! │    1099 + 399 = 1498 cents = "14.98" exactly                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::money::Money;
//!
//! let price = Money::parse_decimal("10.99").unwrap();
//! assert_eq!(price.cents(), 1099);
//!
//! let total = price + Money::from_cents(500);
//! assert_eq!(total.to_string(), "15.99");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits carried by [`Money`].
pub const FRACTION_DIGITS: usize = 2;

/// Largest price [`Money::parse_decimal`] accepts: 10,000,000,000.00.
///
/// A maximal items text holds at most `MAX_ITEMS_TEXT_LEN / 2` segments, and
/// that many prices at this bound still sum well inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Arithmetic stays total; line item prices are
///   non-negative by construction in [`Money::parse_decimal`]
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **String serialization**: JSON carries `"10.99"`, never a float
///   (exported to TypeScript as `string` at each field)
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  "Burger 10.99" ──► LineItem.price ──┬──► total_price() ──► Order      │
/// │                                      │                                  │
/// │                                      └──► items JSON "price": "10.99"  │
/// │                                                                         │
/// │  Order.total_price (status = paid) ──► RevenueSummary.revenue           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Parses a plain non-negative decimal amount into exact cents.
    ///
    /// ## Accepted Grammar
    /// ```text
    /// amount   := digits [ "." [ fraction ] ] | "." fraction
    /// digits   := [0-9]+
    /// fraction := [0-9]{1,2}
    /// ```
    ///
    /// Signs, exponents, `NaN`/`inf`, thousands separators and more than two
    /// fractional digits are all rejected. Nothing goes through `f64`.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("10.99").unwrap().cents(), 1099);
    /// assert_eq!(Money::parse_decimal("2.5").unwrap().cents(), 250);
    /// assert_eq!(Money::parse_decimal("7").unwrap().cents(), 700);
    /// assert!(Money::parse_decimal("ten").is_err());
    /// assert!(Money::parse_decimal("-1.00").is_err());
    /// assert!(Money::parse_decimal("1.999").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Money, MoneyParseError> {
        if input.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (whole, fraction) = match input.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (input, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(MoneyParseError::InvalidDigits);
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(MoneyParseError::InvalidDigits);
        }
        if fraction.len() > FRACTION_DIGITS {
            return Err(MoneyParseError::TooPrecise {
                digits: fraction.len(),
            });
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|units| units.checked_mul(100))
                .ok_or(MoneyParseError::Overflow)?
        };

        // "5" → 50 cents, "05" → 5 cents
        let fraction_cents = match fraction.len() {
            0 => 0,
            1 => i64::from(fraction.as_bytes()[0] - b'0') * 10,
            _ => i64::from(fraction.as_bytes()[0] - b'0') * 10
                + i64::from(fraction.as_bytes()[1] - b'0'),
        };

        whole_cents
            .checked_add(fraction_cents)
            .filter(|cents| *cents <= MAX_PRICE_CENTS)
            .map(Money)
            .ok_or(MoneyParseError::Overflow)
    }
}

// =============================================================================
// Parse Error
// =============================================================================

/// Why a decimal amount could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// Nothing to parse.
    #[error("amount is empty")]
    Empty,

    /// Contains something other than digits and one decimal point.
    #[error("amount must be a non-negative decimal number")]
    InvalidDigits,

    /// More fractional digits than the currency carries.
    #[error("amount has {digits} fractional digits, at most 2 are allowed")]
    TooPrecise { digits: usize },

    /// Above [`MAX_PRICE_CENTS`].
    #[error("amount is too large")]
    Overflow,
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the plain decimal form, e.g. `10.99` or `-5.50`.
///
/// ## Note
/// No currency symbol: this is the canonical text form, also used by the
/// items column and JSON payloads.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_decimal(s)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Money::parse_decimal(&text).map_err(serde::de::Error::custom)
    }
}

/// Default money is zero.
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
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_decimal_accepts_plain_amounts() {
        assert_eq!(Money::parse_decimal("10.99"), Ok(Money::from_cents(1099)));
        assert_eq!(Money::parse_decimal("10"), Ok(Money::from_cents(1000)));
        assert_eq!(Money::parse_decimal("10."), Ok(Money::from_cents(1000)));
        assert_eq!(Money::parse_decimal("2.5"), Ok(Money::from_cents(250)));
        assert_eq!(Money::parse_decimal("2.05"), Ok(Money::from_cents(205)));
        assert_eq!(Money::parse_decimal(".5"), Ok(Money::from_cents(50)));
        assert_eq!(Money::parse_decimal("0"), Ok(Money::zero()));
        assert_eq!(Money::parse_decimal("007.10"), Ok(Money::from_cents(710)));
    }

    #[test]
    fn test_parse_decimal_rejects_non_decimals() {
        assert_eq!(Money::parse_decimal(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse_decimal("."), Err(MoneyParseError::InvalidDigits));
        assert_eq!(Money::parse_decimal("ten"), Err(MoneyParseError::InvalidDigits));
        assert_eq!(Money::parse_decimal("-1.00"), Err(MoneyParseError::InvalidDigits));
        assert_eq!(Money::parse_decimal("+1.00"), Err(MoneyParseError::InvalidDigits));
        assert_eq!(Money::parse_decimal("1e3"), Err(MoneyParseError::InvalidDigits));
        assert_eq!(Money::parse_decimal("NaN"), Err(MoneyParseError::InvalidDigits));
        assert_eq!(Money::parse_decimal("1,50"), Err(MoneyParseError::InvalidDigits));
        assert_eq!(Money::parse_decimal("1.2.3"), Err(MoneyParseError::InvalidDigits));
        assert_eq!(
            Money::parse_decimal("1.999"),
            Err(MoneyParseError::TooPrecise { digits: 3 })
        );
        assert_eq!(
            Money::parse_decimal("99999999999999999999"),
            Err(MoneyParseError::Overflow)
        );
    }

    #[test]
    fn test_display_parse_round_trip() {
        for cents in [0, 5, 99, 100, 1099, 123_456] {
            let money = Money::from_cents(cents);
            assert_eq!(money.to_string().parse::<Money>(), Ok(money));
        }
    }

    #[test]
    fn test_sum_is_exact() {
        // 0.10 added ten times is exactly 1.00
        let total: Money = std::iter::repeat(Money::from_cents(10)).take(10).sum();
        assert_eq!(total, Money::from_cents(100));

        let empty: Money = Vec::<Money>::new().iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_checked_add_overflow() {
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(1).checked_add(Money::from_cents(2)),
            Some(Money::from_cents(3))
        );
    }

    #[test]
    fn test_parse_decimal_upper_bound() {
        assert_eq!(
            Money::parse_decimal("10000000000.00"),
            Ok(Money::from_cents(MAX_PRICE_CENTS))
        );
        assert_eq!(
            Money::parse_decimal("10000000000.01"),
            Err(MoneyParseError::Overflow)
        );
        assert_eq!(
            Money::parse_decimal("92233720368547758.07"),
            Err(MoneyParseError::Overflow)
        );
    }

    #[test]
    fn test_addition_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max + Money::from_cents(1), max);

        let mut total = max;
        total += Money::from_cents(500);
        assert_eq!(total, max);

        let total: Money = [max, max, Money::from_cents(1)].iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_serde_uses_decimal_strings() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "\"10.99\"");

        let back: Money = serde_json::from_str("\"3.99\"").unwrap();
        assert_eq!(back.cents(), 399);

        assert!(serde_json::from_str::<Money>("3.99").is_err());
        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
    }
}
