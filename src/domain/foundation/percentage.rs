//! Percentage value object (exact decimal, unbounded).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A percentage such as a profit margin or ROI.
///
/// Unlike an allocation fraction this is not clamped: losses give negative
/// values and strong returns exceed 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a percentage from a value already on the 0-100 scale.
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Creates a percentage from a fraction (0.25 -> 25%).
    pub fn from_fraction(fraction: Decimal) -> Self {
        Self(fraction * Decimal::ONE_HUNDRED)
    }

    /// Like [`Percentage::from_fraction`], returning `None` on overflow.
    pub fn checked_from_fraction(fraction: Decimal) -> Option<Self> {
        fraction.checked_mul(Decimal::ONE_HUNDRED).map(Self)
    }

    /// Returns the value on the 0-100 scale.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the value as a fraction.
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Lossy conversion for display only.
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn percentage_from_fraction_scales_by_hundred() {
        assert_eq!(Percentage::from_fraction(dec!(0.504784)).value(), dec!(50.4784));
        assert_eq!(Percentage::from_fraction(dec!(-0.5)).value(), dec!(-50));
    }

    #[test]
    fn percentage_checked_from_fraction_detects_overflow() {
        assert_eq!(Percentage::checked_from_fraction(Decimal::MAX), None);
        assert_eq!(
            Percentage::checked_from_fraction(dec!(0.25)),
            Some(Percentage::new(dec!(25)))
        );
    }

    #[test]
    fn percentage_allows_values_outside_0_100() {
        assert_eq!(Percentage::new(dec!(511.95)).value(), dec!(511.95));
        assert!(Percentage::new(dec!(-33.3)) < Percentage::ZERO);
    }

    #[test]
    fn percentage_as_fraction_converts_correctly() {
        assert_eq!(Percentage::new(dec!(15)).as_fraction(), dec!(0.15));
        assert_eq!(Percentage::HUNDRED.as_fraction(), Decimal::ONE);
    }

    #[test]
    fn percentage_as_f64_for_display() {
        assert!((Percentage::new(dec!(50.48)).as_f64() - 50.48).abs() < 1e-9);
    }

    #[test]
    fn percentage_displays_two_decimals() {
        assert_eq!(format!("{}", Percentage::new(dec!(50.4784))), "50.48%");
        assert_eq!(format!("{}", Percentage::ZERO), "0.00%");
    }

    #[test]
    fn percentage_default_is_zero() {
        assert_eq!(Percentage::default(), Percentage::ZERO);
    }

    #[test]
    fn percentage_ordering_works() {
        let p1 = Percentage::new(dec!(4.99));
        let p2 = Percentage::new(dec!(5));
        assert!(p1 < p2);
    }
}
