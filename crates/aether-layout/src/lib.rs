//! Layout computation for Aether element trees.
//!
//! This crate computes the sizes and positions of elements from their
//! constraints and the space their window offers.
//!
//! # Architecture
//!
//! 1. **Pack**: bottom-up measurement into [`CalculatedSizes`], memoized per element
//! 2. **Settle**: top-down distribution of the available box among children
//!
//! # Example
//!
//! ```
//! use aether_core::{Constraints, Fixed, Orientation, Size, Unit};
//! use aether_layout::{Element, ElementTree, LayoutEngine};
//!
//! let mut tree = ElementTree::new();
//! let root = tree.insert(Element::container(Orientation::Horizontal));
//! let sidebar = tree.insert(Element::leaf().with_constraints(
//!     Constraints::new().with_minimum(Fixed::scalar(200), Fixed::ZERO),
//! ));
//! let content = tree.insert(Element::leaf().with_constraints(
//!     Constraints::new().with_desired(Unit::fill(), Unit::Auto),
//! ));
//! tree.attach(root, sidebar)?;
//! tree.attach(root, content)?;
//!
//! let mut engine = LayoutEngine::new();
//! let report = engine.layout(&mut tree, root, Size::new(800, 600))?;
//! assert!(report.is_clean());
//! assert_eq!(tree.get(content).unwrap().size(), Size::new(600, 600));
//! # Ok::<(), aether_core::AetherError>(())
//! ```

mod distribute;
mod engine;
mod sizes;
mod tree;

pub use distribute::{distribute_on_axis, fit_off_axis, AxisDistribution, AxisItem, OffAxisFit};
pub use engine::{compute_layout, LayoutEngine, LayoutOptions, LayoutReport, LayoutState, Overflow};
pub use sizes::CalculatedSizes;
pub use tree::{Children, Element, ElementKind, ElementTree};
