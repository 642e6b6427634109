//! Layout axis selection.

use std::fmt;

/// An orientation in 2D space.
///
/// A container lays its children out along its orientation (the on-axis) and
/// stretches them along the orthogonal one (the off-axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Parallel to the X axis (left to right)
    #[default]
    Horizontal,
    /// Parallel to the Y axis (top to bottom)
    Vertical,
}

impl Orientation {
    /// Both orientations, horizontal first.
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// The orthogonal orientation.
    pub fn orthogonal(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub fn is_horizontal(self) -> bool {
        self == Orientation::Horizontal
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orthogonal_round_trip() {
        for orientation in Orientation::ALL {
            assert_ne!(orientation, orientation.orthogonal());
            assert_eq!(orientation, orientation.orthogonal().orthogonal());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Orientation::Horizontal.to_string(), "horizontal");
        assert_eq!(Orientation::Vertical.to_string(), "vertical");
    }
}
