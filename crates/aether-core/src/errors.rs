//! Error types for the Aether engine.

use thiserror::Error;

use crate::orientation::Orientation;
use crate::types::{ElementId, WindowId};
use crate::units::Fixed;

/// Top-level error type for the Aether engine.
#[derive(Debug, Error)]
pub enum AetherError {
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Invalid constraint configuration. Never corrected silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("{axis} minimum {minimum} exceeds desired size {desired}")]
    MinimumExceedsDesired {
        axis: Orientation,
        minimum: Fixed,
        desired: Fixed,
    },

    #[error("{axis} desired size {desired} exceeds maximum {maximum}")]
    DesiredExceedsMaximum {
        axis: Orientation,
        desired: Fixed,
        maximum: Fixed,
    },

    #[error("{axis} minimum {minimum} exceeds maximum {maximum}")]
    MinimumExceedsMaximum {
        axis: Orientation,
        minimum: Fixed,
        maximum: Fixed,
    },

    #[error("Invalid ratio {ratio} for {field}: expected a finite value in [0, 1)")]
    InvalidRatio { field: &'static str, ratio: f32 },

    #[error("Negative {field}: {value}")]
    NegativeSize { field: &'static str, value: Fixed },

    #[error("Fill weight for {field} must be positive")]
    ZeroFillWeight { field: &'static str },

    #[error("{axis} content minimum {content} exceeds maximum {maximum}")]
    ContentExceedsMaximum {
        axis: Orientation,
        content: Fixed,
        maximum: Fixed,
    },
}

/// Errors from element tree wiring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Unknown element {0}")]
    UnknownElement(ElementId),

    #[error("Element {0} is not a container")]
    NotAContainer(ElementId),

    #[error("Element {child} already belongs to container {parent}")]
    AlreadyAttached { child: ElementId, parent: ElementId },

    #[error("Attaching {child} to {parent} would create a cycle")]
    CycleDetected { child: ElementId, parent: ElementId },
}

/// Errors during a layout pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Invalid constraints on element {element}: {source}")]
    InvalidConstraints {
        element: ElementId,
        #[source]
        source: ConstraintError,
    },

    #[error("Element {element} was settled before being packed")]
    NotPacked { element: ElementId },

    #[error("Element {element} changed since it was packed")]
    StalePack { element: ElementId },

    #[error("Resolved {axis} size of element {element} is out of range: {value}")]
    SizeOutOfRange {
        element: ElementId,
        axis: Orientation,
        value: i64,
    },

    #[error("Aggregated size of element {element} overflows")]
    SizeOverflow { element: ElementId },

    #[error("Maximum layout depth ({depth}) exceeded at element {element}")]
    MaxDepthExceeded { element: ElementId, depth: usize },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Errors from a window or its platform backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WindowError {
    #[error("Unknown {0}")]
    UnknownWindow(WindowId),

    #[error("{0} is already initialized")]
    AlreadyInitialized(WindowId),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl LayoutError {
    /// The element the error was detected on, when known.
    pub fn element(&self) -> Option<ElementId> {
        match self {
            LayoutError::InvalidConstraints { element, .. }
            | LayoutError::NotPacked { element }
            | LayoutError::StalePack { element }
            | LayoutError::SizeOutOfRange { element, .. }
            | LayoutError::SizeOverflow { element }
            | LayoutError::MaxDepthExceeded { element, .. } => Some(*element),
            LayoutError::Tree(TreeError::UnknownElement(element))
            | LayoutError::Tree(TreeError::NotAContainer(element)) => Some(*element),
            LayoutError::Tree(TreeError::AlreadyAttached { child, .. })
            | LayoutError::Tree(TreeError::CycleDetected { child, .. }) => Some(*child),
        }
    }
}
