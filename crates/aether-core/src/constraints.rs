//! Per-element sizing constraints.

use crate::errors::ConstraintError;
use crate::orientation::Orientation;
use crate::units::{Fixed, Unit};

/// Four directional values (margins, padding).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Directions<T> {
    pub start: T,
    pub top: T,
    pub end: T,
    pub bottom: T,
}

impl<T: Copy> Directions<T> {
    pub const fn new(start: T, top: T, end: T, bottom: T) -> Self {
        Self { start, top, end, bottom }
    }

    /// Same value for both horizontal sides and both vertical sides.
    pub const fn symmetric(horizontal: T, vertical: T) -> Self {
        Self {
            start: horizontal,
            top: vertical,
            end: horizontal,
            bottom: vertical,
        }
    }

    pub const fn uniform(all: T) -> Self {
        Self { start: all, top: all, end: all, bottom: all }
    }

    /// The side facing the negative end of an axis (start or top).
    pub fn leading(&self, orientation: Orientation) -> T {
        match orientation {
            Orientation::Horizontal => self.start,
            Orientation::Vertical => self.top,
        }
    }

    /// The side facing the positive end of an axis (end or bottom).
    pub fn trailing(&self, orientation: Orientation) -> T {
        match orientation {
            Orientation::Horizontal => self.end,
            Orientation::Vertical => self.bottom,
        }
    }
}

impl Directions<Unit> {
    /// Combined fixed amount along an axis. Auto and fill sides are ignored.
    pub fn along(&self, orientation: Orientation) -> Fixed {
        self.leading_fixed(orientation) + self.trailing_fixed(orientation)
    }

    pub fn leading_fixed(&self, orientation: Orientation) -> Fixed {
        self.leading(orientation).as_fixed().unwrap_or(Fixed::ZERO)
    }

    pub fn trailing_fixed(&self, orientation: Orientation) -> Fixed {
        self.trailing(orientation).as_fixed().unwrap_or(Fixed::ZERO)
    }
}

impl Default for Directions<Unit> {
    fn default() -> Self {
        Directions::uniform(Unit::scalar(0))
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions<T> {
    pub width: T,
    pub height: T,
}

impl<T: Copy> Dimensions<T> {
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    pub const fn uniform(all: T) -> Self {
        Self { width: all, height: all }
    }

    pub fn for_orientation(&self, orientation: Orientation) -> T {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}

/// The sizing rules for one element.
///
/// Configured sizes describe the element's whole box, padding included.
/// Margins are applied by the containing element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    pub margins: Directions<Unit>,
    pub padding: Directions<Unit>,
    pub size_minimum: Dimensions<Fixed>,
    pub size_desired: Dimensions<Unit>,
    /// `None` means unbounded
    pub size_maximum: Dimensions<Option<Fixed>>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            margins: Directions::default(),
            padding: Directions::default(),
            size_minimum: Dimensions::uniform(Fixed::ZERO),
            size_desired: Dimensions::uniform(Unit::Auto),
            size_maximum: Dimensions::uniform(None),
        }
    }
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimum(mut self, width: Fixed, height: Fixed) -> Self {
        self.size_minimum = Dimensions::new(width, height);
        self
    }

    pub fn with_desired(mut self, width: impl Into<Unit>, height: impl Into<Unit>) -> Self {
        self.size_desired = Dimensions::new(width.into(), height.into());
        self
    }

    pub fn with_maximum(mut self, width: Option<Fixed>, height: Option<Fixed>) -> Self {
        self.size_maximum = Dimensions::new(width, height);
        self
    }

    pub fn with_margins(mut self, margins: Directions<Unit>) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_padding(mut self, padding: Directions<Unit>) -> Self {
        self.padding = padding;
        self
    }

    /// Check that the configuration is internally consistent.
    ///
    /// Per axis: `minimum <= desired <= maximum` by rectified value, ratios in
    /// `[0, 1)`, no negative amounts, and positive fill weights.
    pub fn validate(&self) -> Result<(), ConstraintError> {
        for axis in Orientation::ALL {
            self.validate_axis(axis)?;
        }
        for (kind, directions) in [("margin", &self.margins), ("padding", &self.padding)] {
            for unit in [directions.start, directions.top, directions.end, directions.bottom] {
                if let Unit::Fixed(fixed) = unit {
                    check_amount(kind, fixed)?;
                }
            }
        }
        Ok(())
    }

    fn validate_axis(&self, axis: Orientation) -> Result<(), ConstraintError> {
        let minimum = self.size_minimum.for_orientation(axis);
        check_amount(field(axis, Bound::Minimum), minimum)?;

        let desired = match self.size_desired.for_orientation(axis) {
            Unit::Fixed(desired) => {
                check_amount(field(axis, Bound::Desired), desired)?;
                Some(desired)
            }
            Unit::Fill { weight: 0 } => {
                return Err(ConstraintError::ZeroFillWeight {
                    field: field(axis, Bound::Desired),
                })
            }
            Unit::Fill { .. } | Unit::Auto => None,
        };

        let maximum = self.size_maximum.for_orientation(axis);
        if let Some(maximum) = maximum {
            check_amount(field(axis, Bound::Maximum), maximum)?;
        }

        if let Some(desired) = desired {
            if minimum.rectify() > desired.rectify() {
                return Err(ConstraintError::MinimumExceedsDesired { axis, minimum, desired });
            }
        }

        if let Some(maximum) = maximum {
            if minimum.rectify() > maximum.rectify() {
                return Err(ConstraintError::MinimumExceedsMaximum { axis, minimum, maximum });
            }
            if let Some(desired) = desired {
                if desired.rectify() > maximum.rectify() {
                    return Err(ConstraintError::DesiredExceedsMaximum { axis, desired, maximum });
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Minimum,
    Desired,
    Maximum,
}

fn field(axis: Orientation, bound: Bound) -> &'static str {
    match (axis, bound) {
        (Orientation::Horizontal, Bound::Minimum) => "minimum width",
        (Orientation::Horizontal, Bound::Desired) => "desired width",
        (Orientation::Horizontal, Bound::Maximum) => "maximum width",
        (Orientation::Vertical, Bound::Minimum) => "minimum height",
        (Orientation::Vertical, Bound::Desired) => "desired height",
        (Orientation::Vertical, Bound::Maximum) => "maximum height",
    }
}

fn check_amount(field: &'static str, fixed: Fixed) -> Result<(), ConstraintError> {
    if !fixed.ratio.is_finite() || fixed.ratio < 0.0 || fixed.ratio >= 1.0 {
        return Err(ConstraintError::InvalidRatio { field, ratio: fixed.ratio });
    }
    if fixed.value < 0 {
        return Err(ConstraintError::NegativeSize { field, value: fixed });
    }
    Ok(())
}
