//! Sizing units.
//!
//! A [`Unit`] is either a [`Fixed`] quantity (absolute pixels plus a fraction
//! of the available space) or one of the symbolic markers `Auto` and `Fill`.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Absolute pixels combined with a ratio of the available space.
///
/// Fixed quantities add componentwise, which is how a container accumulates
/// children that mix absolute and proportional sizing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fixed {
    /// Absolute pixel component
    pub value: i32,
    /// Fraction of the available space (0.0 to 1.0)
    pub ratio: f32,
}

impl Fixed {
    pub const ZERO: Self = Self { value: 0, ratio: 0.0 };

    pub const fn new(value: i32, ratio: f32) -> Self {
        Self { value, ratio }
    }

    /// A purely absolute quantity.
    pub const fn scalar(value: i32) -> Self {
        Self { value, ratio: 0.0 }
    }

    /// A purely proportional quantity.
    pub const fn ratio(ratio: f32) -> Self {
        Self { value: 0, ratio }
    }

    /// Project onto a single pixel estimate by solving `x = value + ratio * x`.
    ///
    /// Ratios of 1 or more have no finite solution and rectify to `i64::MAX`.
    pub fn rectify(self) -> i64 {
        let denominator = 1.0 - self.ratio as f64;
        if !denominator.is_finite() || denominator <= 0.0 {
            return i64::MAX;
        }
        (self.value as f64 / denominator).round() as i64
    }

    /// The smaller of two quantities by rectified value. Ties return `other`.
    pub fn min(self, other: Fixed) -> Fixed {
        if self.rectify() < other.rectify() {
            self
        } else {
            other
        }
    }

    /// The larger of two quantities by rectified value. Ties return `other`.
    pub fn max(self, other: Fixed) -> Fixed {
        if self.rectify() > other.rectify() {
            self
        } else {
            other
        }
    }

    /// Pixels claimed out of a concrete extent.
    pub fn resolve(self, available: i64) -> i64 {
        self.value as i64 + (self.ratio as f64 * available as f64).floor() as i64
    }

    pub fn is_zero(self) -> bool {
        self.value == 0 && self.ratio == 0.0
    }

    /// Componentwise sum, `None` if the pixel component overflows.
    pub fn checked_add(self, other: Fixed) -> Option<Fixed> {
        Some(Fixed {
            value: self.value.checked_add(other.value)?,
            ratio: self.ratio + other.ratio,
        })
    }
}

impl Add for Fixed {
    type Output = Fixed;

    /// Componentwise sum. The pixel component saturates at the `i32` bounds.
    fn add(self, other: Fixed) -> Fixed {
        Fixed {
            value: self.value.saturating_add(other.value),
            ratio: self.ratio + other.ratio,
        }
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, other: Fixed) {
        *self = *self + other;
    }
}

impl Sum for Fixed {
    fn sum<I: Iterator<Item = Fixed>>(iter: I) -> Self {
        iter.fold(Fixed::ZERO, Add::add)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ratio == 0.0 {
            write!(f, "{}px", self.value)
        } else if self.value == 0 {
            write!(f, "{}%", self.ratio * 100.0)
        } else {
            write!(f, "{}px+{}%", self.value, self.ratio * 100.0)
        }
    }
}

/// A sizing quantity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// A concrete amount
    Fixed(Fixed),
    /// No intrinsic preference, defers to the minimum
    #[default]
    Auto,
    /// Claims a weighted share of leftover space
    Fill { weight: u32 },
}

impl Unit {
    pub const fn scalar(value: i32) -> Self {
        Unit::Fixed(Fixed::scalar(value))
    }

    pub const fn ratio(ratio: f32) -> Self {
        Unit::Fixed(Fixed::ratio(ratio))
    }

    /// Fill with the default weight of 1.
    pub const fn fill() -> Self {
        Unit::Fill { weight: 1 }
    }

    pub const fn fill_weighted(weight: u32) -> Self {
        Unit::Fill { weight }
    }

    /// The fixed quantity, if this is one.
    pub fn as_fixed(self) -> Option<Fixed> {
        match self {
            Unit::Fixed(fixed) => Some(fixed),
            Unit::Auto | Unit::Fill { .. } => None,
        }
    }

    /// Fill weight, if this is a fill marker.
    pub fn fill_weight(self) -> Option<u32> {
        match self {
            Unit::Fill { weight } => Some(weight),
            Unit::Fixed(_) | Unit::Auto => None,
        }
    }
}

impl From<Fixed> for Unit {
    fn from(fixed: Fixed) -> Self {
        Unit::Fixed(fixed)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Fixed(fixed) => fixed.fmt(f),
            Unit::Auto => f.write_str("auto"),
            Unit::Fill { weight: 1 } => f.write_str("fill"),
            Unit::Fill { weight } => write!(f, "fill({})", weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Fixed::scalar(12), Fixed::new(12, 0.0));
        assert_eq!(Fixed::ratio(0.25), Fixed::new(0, 0.25));
        assert_eq!(Unit::scalar(3).as_fixed(), Some(Fixed::scalar(3)));
        assert_eq!(Unit::Auto.as_fixed(), None);
        assert_eq!(Unit::fill().fill_weight(), Some(1));
    }

    #[test]
    fn test_addition_is_componentwise() {
        let sum = Fixed::new(10, 0.25) + Fixed::new(5, 0.5);
        assert_eq!(sum, Fixed::new(15, 0.75));

        let total: Fixed = [Fixed::scalar(1), Fixed::scalar(2), Fixed::ratio(0.5)]
            .into_iter()
            .sum();
        assert_eq!(total, Fixed::new(3, 0.5));
    }

    #[test]
    fn test_addition_near_i32_bounds() {
        let large = Fixed::scalar(1_500_000_000);
        assert_eq!(large.checked_add(large), None);
        assert_eq!(large + large, Fixed::scalar(i32::MAX));
        assert_eq!(
            Fixed::new(10, 0.25).checked_add(Fixed::new(5, 0.5)),
            Some(Fixed::new(15, 0.75))
        );
    }

    #[test]
    fn test_rectify() {
        assert_eq!(Fixed::scalar(100).rectify(), 100);
        // x = 50 + 0.5x  =>  x = 100
        assert_eq!(Fixed::new(50, 0.5).rectify(), 100);
        assert_eq!(Fixed::ratio(0.5).rectify(), 0);
    }

    #[test]
    fn test_rectify_degenerate_ratio() {
        assert_eq!(Fixed::new(10, 1.0).rectify(), i64::MAX);
        assert_eq!(Fixed::new(10, 1.5).rectify(), i64::MAX);
        assert_eq!(Fixed::new(10, f32::NAN).rectify(), i64::MAX);
    }

    #[test]
    fn test_min_max_keep_original_operand() {
        let proportional = Fixed::new(50, 0.5); // rectifies to 100
        let absolute = Fixed::scalar(80);

        assert_eq!(proportional.max(absolute), proportional);
        assert_eq!(proportional.min(absolute), absolute);
    }

    #[test]
    fn test_min_max_ties_return_second() {
        let a = Fixed::new(50, 0.5);
        let b = Fixed::scalar(100);
        assert_eq!(a.max(b), b);
        assert_eq!(a.min(b), b);
        assert_eq!(b.max(a), a);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Fixed::scalar(20).resolve(400), 20);
        assert_eq!(Fixed::new(20, 0.25).resolve(400), 120);
        assert_eq!(Fixed::ratio(0.5).resolve(101), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Unit::scalar(4).to_string(), "4px");
        assert_eq!(Unit::ratio(0.5).to_string(), "50%");
        assert_eq!(Unit::fill().to_string(), "fill");
        assert_eq!(Unit::fill_weighted(3).to_string(), "fill(3)");
        assert_eq!(Unit::Auto.to_string(), "auto");
    }

    fn fixed_strategy() -> impl Strategy<Value = Fixed> {
        // Ratios on a 1/64 grid keep float sums exact.
        (-10_000i32..10_000, 0u8..64).prop_map(|(value, k)| Fixed::new(value, k as f32 / 64.0))
    }

    proptest! {
        #[test]
        fn addition_commutes(a in fixed_strategy(), b in fixed_strategy()) {
            prop_assert_eq!(a + b, b + a);
        }

        #[test]
        fn addition_associates(a in fixed_strategy(), b in fixed_strategy(), c in fixed_strategy()) {
            prop_assert_eq!((a + b) + c, a + (b + c));
        }

        #[test]
        fn rectify_is_monotonic_in_value(value in -100_000i32..100_000, k in 0u8..64) {
            let ratio = k as f32 / 64.0;
            let lower = Fixed::new(value, ratio);
            let higher = Fixed::new(value + 1, ratio);
            prop_assert!(higher.rectify() > lower.rectify());
        }
    }
}
