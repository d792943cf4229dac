//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer currency units                                   │
//! │    Prices are whole đồng (VND has no minor unit in practice).           │
//! │    Floats only appear inside the pricing module while applying a        │
//! │    material/size multiplier; the result is rounded back to an integer.  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use layerline_core::money::Money;
//!
//! let price = Money::from_units(50_000);
//! let line_total = price * 3;
//! assert_eq!(line_total.units(), 150_000);
//! assert_eq!(line_total.to_string(), "150.000 ₫");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units (đồng).
///
/// Serializes as a bare JSON number, which is what the browser storefront
/// writes for `filePrice` and `printBasePrice`.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.file_price ──────┐                                             │
/// │                           ├──► unit price × quantity ──► subtotal       │
/// │  Product.print_base_price ┘                                  │          │
/// │        │                                                     ▼          │
/// │        └──► × material × size ──► print quote      subtotal + shipping  │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use layerline_core::money::Money;
    ///
    /// let price = Money::from_units(120_000);
    /// assert_eq!(price.units(), 120_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
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

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use layerline_core::money::Money;
    ///
    /// let unit_price = Money::from_units(20_000);
    /// assert_eq!(unit_price.multiply_quantity(3).units(), 60_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the amount the way `vi-VN` currency formatting does:
/// dot-grouped thousands followed by the đồng sign.
///
/// ```rust
/// use layerline_core::money::Money;
///
/// assert_eq!(Money::from_units(1_234_567).to_string(), "1.234.567 ₫");
/// ```
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

// Arithmetic saturates at the i64 bounds; quantities are unbounded.
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a line quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
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
    fn test_from_units() {
        let money = Money::from_units(100_000);
        assert_eq!(money.units(), 100_000);
        assert!(money.is_positive());
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_units(0).to_string(), "0 ₫");
        assert_eq!(Money::from_units(999).to_string(), "999 ₫");
        assert_eq!(Money::from_units(30_000).to_string(), "30.000 ₫");
        assert_eq!(Money::from_units(1_500_000).to_string(), "1.500.000 ₫");
        assert_eq!(Money::from_units(-250_000).to_string(), "-250.000 ₫");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(50_000);
        let b = Money::from_units(20_000);

        assert_eq!((a + b).units(), 70_000);
        assert_eq!((a - b).units(), 30_000);
        assert_eq!((a * 3).units(), 150_000);

        let mut c = a;
        c += b;
        c -= Money::from_units(10_000);
        assert_eq!(c.units(), 60_000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [10_000, 20_000, 30_000]
            .into_iter()
            .map(Money::from_units)
            .sum();
        assert_eq!(total.units(), 60_000);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_units(i64::MAX);
        assert_eq!((max + Money::from_units(1)).units(), i64::MAX);
        assert_eq!((Money::from_units(i64::MIN) - Money::from_units(1)).units(), i64::MIN);
        assert_eq!(Money::from_units(350_000).multiply_quantity(i64::MAX), max);

        let total: Money = [max, max, Money::from_units(30_000)].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::from_units(42_000)).unwrap();
        assert_eq!(json, "42000");

        let back: Money = serde_json::from_str("42000").unwrap();
        assert_eq!(back, Money::from_units(42_000));
    }
}
