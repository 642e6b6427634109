//! Top-level windows for Aether.
//!
//! A [`Window`] owns the root of an element tree and the size that tree is
//! settled into. Title, visibility and size changes are mirrored to a
//! [`Backend`], the seam to the native platform.
//!
//! # Example
//!
//! ```
//! use aether_core::Orientation;
//! use aether_layout::{Element, ElementTree, LayoutEngine};
//! use aether_window::{HeadlessBackend, Window, WindowOptions};
//!
//! let mut backend = HeadlessBackend::new();
//! let mut window = Window::open(WindowOptions::new("Demo"), &mut backend)?;
//!
//! let mut tree = ElementTree::new();
//! let root = tree.insert(Element::container(Orientation::Vertical));
//! window.set_root(&mut tree, root)?;
//! window.set_visible(true, &mut backend)?;
//!
//! let report = window.relayout(&mut LayoutEngine::new(), &mut tree)?;
//! assert!(report.is_clean());
//! # Ok::<(), aether_core::WindowError>(())
//! ```

mod backend;
mod window;

pub use backend::{Backend, BackendCall, HeadlessBackend, WindowState};
pub use window::{Window, WindowOptions};
