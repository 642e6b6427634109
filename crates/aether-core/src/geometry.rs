//! Integer geometry for settled layouts.

use glam::{IVec2, UVec2};

use crate::orientation::Orientation;

/// A position in 2D space, relative to the parent element's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component along an orientation.
    pub fn along(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// Build a position from on-axis and off-axis offsets.
    pub fn from_axes(orientation: Orientation, on_axis: i32, off_axis: i32) -> Self {
        match orientation {
            Orientation::Horizontal => Position::new(on_axis, off_axis),
            Orientation::Vertical => Position::new(off_axis, on_axis),
        }
    }

    /// Offset by another position.
    pub fn offset(&self, by: Position) -> Position {
        Position::new(self.x + by.x, self.y + by.y)
    }
}

impl From<Position> for IVec2 {
    fn from(position: Position) -> Self {
        IVec2::new(position.x, position.y)
    }
}

impl From<IVec2> for Position {
    fn from(v: IVec2) -> Self {
        Position::new(v.x, v.y)
    }
}

/// The extent of a rectangular box. Unsigned, so never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Self = Self { width: 0, height: 0 };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Extent along an orientation.
    pub fn along(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Build a size from on-axis and off-axis extents.
    pub fn from_axes(orientation: Orientation, on_axis: u32, off_axis: u32) -> Self {
        match orientation {
            Orientation::Horizontal => Size::new(on_axis, off_axis),
            Orientation::Vertical => Size::new(off_axis, on_axis),
        }
    }
}

impl From<Size> for UVec2 {
    fn from(size: Size) -> Self {
        UVec2::new(size.width, size.height)
    }
}

impl From<UVec2> for Size {
    fn from(v: UVec2) -> Self {
        Size::new(v.x, v.y)
    }
}

/// Axis-aligned box: a position plus a size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub position: Position,
    pub size: Size,
}

impl Rect {
    pub const fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> i64 {
        self.position.x as i64 + self.size.width as i64
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> i64 {
        self.position.y as i64 + self.size.height as i64
    }

    /// Get position as a vector.
    pub fn origin(&self) -> IVec2 {
        self.position.into()
    }

    /// Get size as a vector.
    pub fn extent(&self) -> UVec2 {
        self.size.into()
    }

    /// Check if another rect lies entirely inside this one.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.position.x >= self.position.x
            && other.position.y >= self.position.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_axes() {
        let size = Size::from_axes(Orientation::Vertical, 300, 120);
        assert_eq!(size, Size::new(120, 300));
        assert_eq!(size.along(Orientation::Vertical), 300);
        assert_eq!(size.along(Orientation::Horizontal), 120);
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(Position::new(10, 20), Size::new(100, 50));
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 70);
        assert_eq!(rect.origin(), IVec2::new(10, 20));
        assert_eq!(rect.extent(), UVec2::new(100, 50));
    }

    #[test]
    fn test_contains_rect() {
        let outer = Rect::new(Position::ORIGIN, Size::new(100, 100));
        let inner = Rect::new(Position::new(10, 10), Size::new(50, 90));
        let spilling = Rect::new(Position::new(60, 0), Size::new(50, 10));
        assert!(outer.contains_rect(&inner));
        assert!(!outer.contains_rect(&spilling));
    }
}
