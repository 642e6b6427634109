//! Core value types for the Aether layout engine.
//!
//! This crate provides the foundational types used across the other aether crates:
//! - Sizing units (fixed pixels plus ratio, auto, fill)
//! - Per-element constraint sets (margins, padding, min/desired/max)
//! - Orientation and geometry types
//! - Error types

pub mod constraints;
pub mod errors;
pub mod geometry;
pub mod orientation;
pub mod types;
pub mod units;

pub use constraints::*;
pub use errors::*;
pub use geometry::*;
pub use orientation::*;
pub use types::*;
pub use units::*;
