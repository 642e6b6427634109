//! Size records produced by the pack phase and the rules for combining them.

use std::ops::Add;

use aether_core::{Constraints, Directions, Fixed, Orientation, Unit};

/// Minimum, desired and maximum extents of an element along both axes.
///
/// A `None` maximum means unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatedSizes {
    pub minimum_horizontal: Fixed,
    pub minimum_vertical: Fixed,
    pub desired_horizontal: Fixed,
    pub desired_vertical: Fixed,
    pub maximum_horizontal: Option<Fixed>,
    pub maximum_vertical: Option<Fixed>,
}

impl Default for CalculatedSizes {
    fn default() -> Self {
        Self::ZERO
    }
}

impl CalculatedSizes {
    /// All zero, maxima included. Returned for elements that were never packed.
    pub const ZERO: Self = Self {
        minimum_horizontal: Fixed::ZERO,
        minimum_vertical: Fixed::ZERO,
        desired_horizontal: Fixed::ZERO,
        desired_vertical: Fixed::ZERO,
        maximum_horizontal: Some(Fixed::ZERO),
        maximum_vertical: Some(Fixed::ZERO),
    };

    /// Zero minimum and desired, unbounded maxima.
    pub const UNBOUNDED: Self = Self {
        minimum_horizontal: Fixed::ZERO,
        minimum_vertical: Fixed::ZERO,
        desired_horizontal: Fixed::ZERO,
        desired_vertical: Fixed::ZERO,
        maximum_horizontal: None,
        maximum_vertical: None,
    };

    /// Build a record from a per-axis function returning `(minimum, desired, maximum)`.
    pub fn from_axes(mut f: impl FnMut(Orientation) -> (Fixed, Fixed, Option<Fixed>)) -> Self {
        let (minimum_horizontal, desired_horizontal, maximum_horizontal) = f(Orientation::Horizontal);
        let (minimum_vertical, desired_vertical, maximum_vertical) = f(Orientation::Vertical);
        Self {
            minimum_horizontal,
            minimum_vertical,
            desired_horizontal,
            desired_vertical,
            maximum_horizontal,
            maximum_vertical,
        }
    }

    /// Like [`CalculatedSizes::from_axes`], failing if either axis fails.
    pub fn try_from_axes(
        mut f: impl FnMut(Orientation) -> Option<(Fixed, Fixed, Option<Fixed>)>,
    ) -> Option<Self> {
        let (minimum_horizontal, desired_horizontal, maximum_horizontal) = f(Orientation::Horizontal)?;
        let (minimum_vertical, desired_vertical, maximum_vertical) = f(Orientation::Vertical)?;
        Some(Self {
            minimum_horizontal,
            minimum_vertical,
            desired_horizontal,
            desired_vertical,
            maximum_horizontal,
            maximum_vertical,
        })
    }

    /// The element's own box, ignoring any children.
    ///
    /// A desired size that is not fixed falls back to the minimum; extra space
    /// for it is only handed out while settling.
    pub fn of_constraints(constraints: &Constraints) -> Self {
        Self::from_axes(|axis| {
            let minimum = constraints.size_minimum.for_orientation(axis);
            let desired = constraints
                .size_desired
                .for_orientation(axis)
                .as_fixed()
                .unwrap_or(minimum);
            (minimum, desired, constraints.size_maximum.for_orientation(axis))
        })
    }

    /// Space taken by margins or padding. Only fixed sides contribute.
    pub fn of_directions(directions: &Directions<Unit>) -> Self {
        Self::from_axes(|axis| {
            let total = directions.along(axis);
            (total, total, Some(total))
        })
    }

    pub fn minimum(&self, orientation: Orientation) -> Fixed {
        match orientation {
            Orientation::Horizontal => self.minimum_horizontal,
            Orientation::Vertical => self.minimum_vertical,
        }
    }

    pub fn desired(&self, orientation: Orientation) -> Fixed {
        match orientation {
            Orientation::Horizontal => self.desired_horizontal,
            Orientation::Vertical => self.desired_vertical,
        }
    }

    pub fn maximum(&self, orientation: Orientation) -> Option<Fixed> {
        match orientation {
            Orientation::Horizontal => self.maximum_horizontal,
            Orientation::Vertical => self.maximum_vertical,
        }
    }

    /// Combine two siblings laid out along `orientation`.
    ///
    /// On-axis, minimum and desired add and maximum adds unless either side is
    /// unbounded. Off-axis, minimum and desired take the larger value and
    /// maximum takes the tighter bound, ignoring an unbounded side.
    pub fn coalesce(self, other: CalculatedSizes, orientation: Orientation) -> CalculatedSizes {
        Self::from_axes(|axis| {
            if axis == orientation {
                (
                    self.minimum(axis) + other.minimum(axis),
                    self.desired(axis) + other.desired(axis),
                    sum_bounded(self.maximum(axis), other.maximum(axis)),
                )
            } else {
                (
                    self.minimum(axis).max(other.minimum(axis)),
                    self.desired(axis).max(other.desired(axis)),
                    tightest_bound(self.maximum(axis), other.maximum(axis)),
                )
            }
        })
    }

    /// [`CalculatedSizes::coalesce`], or `None` if a pixel sum overflows.
    pub fn checked_coalesce(self, other: CalculatedSizes, orientation: Orientation) -> Option<CalculatedSizes> {
        Self::try_from_axes(|axis| {
            if axis == orientation {
                Some((
                    self.minimum(axis).checked_add(other.minimum(axis))?,
                    self.desired(axis).checked_add(other.desired(axis))?,
                    checked_sum_bounded(self.maximum(axis), other.maximum(axis))?,
                ))
            } else {
                Some((
                    self.minimum(axis).max(other.minimum(axis)),
                    self.desired(axis).max(other.desired(axis)),
                    tightest_bound(self.maximum(axis), other.maximum(axis)),
                ))
            }
        })
    }

    /// Componentwise sum, or `None` if a pixel sum overflows.
    pub fn checked_add(self, other: CalculatedSizes) -> Option<CalculatedSizes> {
        Self::try_from_axes(|axis| {
            Some((
                self.minimum(axis).checked_add(other.minimum(axis))?,
                self.desired(axis).checked_add(other.desired(axis))?,
                checked_sum_bounded(self.maximum(axis), other.maximum(axis))?,
            ))
        })
    }

    /// Final size of a container from its own box and its content.
    ///
    /// Minimum and desired never shrink below the content. The maximum is the
    /// tighter of the two bounds; an unbounded side never loosens the other.
    /// A bound below the resulting minimum is raised to it.
    ///
    /// Content whose minimum passes the container's own maximum is a
    /// configuration error the engine reports before calling this.
    pub fn enclose(own: CalculatedSizes, content: CalculatedSizes) -> CalculatedSizes {
        Self::from_axes(|axis| {
            let minimum = own.minimum(axis).max(content.minimum(axis));
            (
                minimum,
                own.desired(axis).max(content.desired(axis)),
                tightest_bound(own.maximum(axis), content.maximum(axis))
                    .map(|maximum| if maximum.rectify() < minimum.rectify() { minimum } else { maximum }),
            )
        })
    }

    /// Swap the horizontal and vertical components.
    pub fn transpose(self) -> CalculatedSizes {
        Self {
            minimum_horizontal: self.minimum_vertical,
            minimum_vertical: self.minimum_horizontal,
            desired_horizontal: self.desired_vertical,
            desired_vertical: self.desired_horizontal,
            maximum_horizontal: self.maximum_vertical,
            maximum_vertical: self.maximum_horizontal,
        }
    }
}

impl Add for CalculatedSizes {
    type Output = CalculatedSizes;

    /// Componentwise sum. An unbounded maximum on either side stays unbounded.
    fn add(self, other: CalculatedSizes) -> CalculatedSizes {
        Self::from_axes(|axis| {
            (
                self.minimum(axis) + other.minimum(axis),
                self.desired(axis) + other.desired(axis),
                sum_bounded(self.maximum(axis), other.maximum(axis)),
            )
        })
    }
}

fn sum_bounded(a: Option<Fixed>, b: Option<Fixed>) -> Option<Fixed> {
    a.zip(b).map(|(a, b)| a + b)
}

fn checked_sum_bounded(a: Option<Fixed>, b: Option<Fixed>) -> Option<Option<Fixed>> {
    match (a, b) {
        (Some(a), Some(b)) => a.checked_add(b).map(Some),
        _ => Some(None),
    }
}

fn tightest_bound(a: Option<Fixed>, b: Option<Fixed>) -> Option<Fixed> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (bound, None) | (None, bound) => bound,
    }
}
