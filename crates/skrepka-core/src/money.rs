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
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On a financial document that is not a display bug: the total, the     │
//! │  VAT line and the amount-in-words text all derive from the same        │
//! │  figure and must agree to the kopeck.                                  │
//! │                                                                         │
//! │  OUR SOLUTION: integer minor units (kopecks), i128 intermediates,      │
//! │  round-half-up applied once per derived line value.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input DTOs carry decimal numbers; they are converted to `Money` exactly
//! once, at the boundary, via [`Money::try_from_decimal`]. Everything after
//! that point is integer arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::{Quantity, VatRate};

/// Largest decimal magnitude accepted at the conversion boundary.
///
/// Well under f64's exact-integer range once scaled to kopecks, and far
/// beyond any document total this system will ever see.
const MAX_DECIMAL_AMOUNT: f64 = 1.0e13;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (kopecks for RUB).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction (subtotal = total - vat) never traps on sign
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support, serialized as the raw minor-unit integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from kopecks (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use skrepka_core::money::Money;
    ///
    /// let price = Money::from_kopecks(10000); // 100.00
    /// assert_eq!(price.kopecks(), 10000);
    /// ```
    #[inline]
    pub const fn from_kopecks(kopecks: i64) -> Self {
        Money(kopecks)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use skrepka_core::money::Money;
    ///
    /// let price = Money::from_major_minor(120, 50); // 120.50
    /// assert_eq!(price.kopecks(), 12050);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a decimal amount (e.g. a JSON number from an input DTO)
    /// into fixed-point money, rounding half away from zero to the kopeck.
    ///
    /// Returns `None` for non-finite values or magnitudes beyond what the
    /// fixed-point representation can hold exactly.
    ///
    /// ## Example
    /// ```rust
    /// use skrepka_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_decimal(100.0), Some(Money::from_kopecks(10000)));
    /// assert_eq!(Money::try_from_decimal(0.015), Some(Money::from_kopecks(2)));
    /// assert_eq!(Money::try_from_decimal(f64::NAN), None);
    /// ```
    pub fn try_from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() > MAX_DECIMAL_AMOUNT {
            return None;
        }
        Some(Money((value * 100.0).round() as i64))
    }

    /// Returns the value in kopecks (smallest currency unit).
    #[inline]
    pub const fn kopecks(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rubles) portion.
    ///
    /// ## Example
    /// ```rust
    /// use skrepka_core::money::Money;
    ///
    /// assert_eq!(Money::from_kopecks(12050).major_part(), 120);
    /// ```
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (kopecks) portion, always 0-99.
    #[inline]
    pub const fn minor_part(&self) -> i64 {
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

    /// Multiplies a unit price by a fixed-point quantity, rounding half-up
    /// to the kopeck. This is the only place a line total is derived.
    ///
    /// ## Example
    /// ```rust
    /// use skrepka_core::money::Money;
    /// use skrepka_core::types::Quantity;
    ///
    /// let unit_price = Money::from_kopecks(999);        // 9.99
    /// let qty = Quantity::try_from_decimal(2.5).unwrap();
    /// let line_total = unit_price.times(qty);
    /// assert_eq!(line_total.kopecks(), 2498);           // 24.975 -> 24.98
    /// ```
    pub fn times(&self, qty: Quantity) -> Money {
        let numerator = self.0 as i128 * qty.thousandths() as i128;
        Money(round_half_up(numerator, 1000))
    }

    /// Extracts the VAT portion of a VAT-inclusive amount:
    /// `vat = amount * rate / (100% + rate)`, rounded half-up to the kopeck.
    ///
    /// ## Example
    /// ```rust
    /// use skrepka_core::money::Money;
    /// use skrepka_core::types::VatRate;
    ///
    /// let line_total = Money::from_kopecks(12000);  // 120.00 incl. 20% VAT
    /// let vat = line_total.extract_vat(VatRate::from_percent(20));
    /// assert_eq!(vat.kopecks(), 2000);              // 20.00
    /// ```
    pub fn extract_vat(&self, rate: VatRate) -> Money {
        let numerator = self.0 as i128 * rate.bps() as i128;
        let denominator = 10_000 + rate.bps() as i128;
        Money(round_half_up(numerator, denominator))
    }
}

/// Integer division rounding half away from zero for non-negative operands.
///
/// `round(n / d) = (2n + d) / (2d)` holds for `n >= 0, d > 0` in exact
/// integer arithmetic; i128 keeps the doubling overflow-free.
fn round_half_up(numerator: i128, denominator: i128) -> i64 {
    debug_assert!(numerator >= 0 && denominator > 0);
    ((2 * numerator + denominator) / (2 * denominator)) as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money as a plain decimal.
///
/// This is for logs and error messages. Document-facing formatting
/// (space-grouped, comma decimals) lives in the render module.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_part().abs(), self.minor_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Summing an iterator of Money values (line totals, VAT amounts).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
