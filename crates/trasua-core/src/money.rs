//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The shop service stores prices as JavaScript numbers:                  │
//! │    25000 * 3 = 75000, but 0.1 + 0.2 = 0.30000000000000004               │
//! │                                                                         │
//! │  OUR SOLUTION: Whole Đồng                                               │
//! │    The Vietnamese đồng has no minor unit in circulation, so every       │
//! │    price is an integer number of đồng. Floats from the wire are         │
//! │    rounded once on the way in and never touched again.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use trasua_core::money::Money;
//!
//! let price = Money::from_dong(25_000);
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.dong(), 75_000);
//! assert_eq!(line_total.to_string(), "75.000 ₫");
//! ```

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole Vietnamese đồng.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never panics on underflow of a total
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialize as a bare number**: matches the shop service's `gia` fields
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLineItem.unit_price (snapshot) ──► line total
///                                                        │
///                   CartStore::total_price() ◄───────────┘
///                            │
///                            ▼
///                   OrderReceipt.total ──► "75.000 ₫"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole đồng.
    ///
    /// ## Example
    /// ```rust
    /// use trasua_core::money::Money;
    ///
    /// let price = Money::from_dong(25_000);
    /// assert_eq!(price.dong(), 25_000);
    /// ```
    #[inline]
    pub const fn from_dong(dong: i64) -> Self {
        Money(dong)
    }

    /// Returns the value in đồng.
    #[inline]
    pub const fn dong(&self) -> i64 {
        self.0
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use trasua_core::money::Money;
    ///
    /// let unit_price = Money::from_dong(32_000);
    /// assert_eq!(unit_price.multiply_quantity(2).dong(), 64_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats like the storefront does: `25.000 ₫`.
///
/// Thousands are grouped with `.` as in the vi-VN locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{} ₫", sign, grouped)
    }
}

/// The shop service sends prices as JSON numbers, sometimes with a
/// fractional part. Integers are taken as-is, floats are rounded.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(dong) => Ok(Money(dong)),
            Raw::Float(value) if value.is_finite() => Ok(Money(value.round() as i64)),
            Raw::Float(_) => Err(de::Error::custom("amount must be a finite number")),
        }
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a cart quantity.
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

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dong() {
        let money = Money::from_dong(25_000);
        assert_eq!(money.dong(), 25_000);
        assert!(money.is_positive());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_dong(25_000).to_string(), "25.000 ₫");
        assert_eq!(Money::from_dong(1_250_000).to_string(), "1.250.000 ₫");
        assert_eq!(Money::from_dong(500).to_string(), "500 ₫");
        assert_eq!(Money::from_dong(0).to_string(), "0 ₫");
        assert_eq!(Money::from_dong(-45_000).to_string(), "-45.000 ₫");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_dong(30_000);
        let b = Money::from_dong(5_000);

        assert_eq!((a + b).dong(), 35_000);
        assert_eq!((a - b).dong(), 25_000);
        assert_eq!((a * 3).dong(), 90_000);

        let mut c = a;
        c += b;
        c -= Money::from_dong(1_000);
        assert_eq!(c.dong(), 34_000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [10_000, 20_000, 5_000]
            .into_iter()
            .map(Money::from_dong)
            .sum();
        assert_eq!(total.dong(), 35_000);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_deserialize_integer_and_float() {
        let int: Money = serde_json::from_str("25000").unwrap();
        assert_eq!(int.dong(), 25_000);

        let float: Money = serde_json::from_str("25000.4").unwrap();
        assert_eq!(float.dong(), 25_000);

        let rounded_up: Money = serde_json::from_str("29999.5").unwrap();
        assert_eq!(rounded_up.dong(), 30_000);

        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&Money::from_dong(25_000)).unwrap();
        assert_eq!(json, "25000");
    }
}
