//! Top-level windows.

use std::sync::atomic::{AtomicU64, Ordering};

use aether_core::{ElementId, Size, WindowError, WindowId};
use aether_layout::{ElementTree, LayoutEngine, LayoutReport};
use tracing::{debug, info};

use crate::backend::{Backend, WindowState};

static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

/// Window configuration.
#[derive(Clone, Debug)]
pub struct WindowOptions {
    /// Window title
    pub title: String,
    /// Initial size in pixels
    pub size: Size,
    /// Whether the window starts visible
    pub visible: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Aether".to_string(),
            size: Size::new(600, 480),
            visible: false,
        }
    }
}

impl WindowOptions {
    /// Create options with a title and default everything else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// A top-level window hosting one element tree.
///
/// The window's size is imposed from outside and is the space its root
/// element is settled into. Every setter pushes the change to the backend.
#[derive(Debug)]
pub struct Window {
    id: WindowId,
    title: String,
    visible: bool,
    size: Size,
    root: Option<ElementId>,
}

impl Window {
    /// Create a window and its native counterpart.
    ///
    /// The backend receives the initial state, then title, size and
    /// visibility in that order.
    pub fn open<B: Backend + ?Sized>(options: WindowOptions, backend: &mut B) -> Result<Self, WindowError> {
        let window = Self {
            id: WindowId(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed)),
            title: options.title,
            visible: options.visible,
            size: options.size,
            root: None,
        };

        backend.initialize_window(window.id, &window.state())?;
        backend.set_window_title(window.id, &window.title)?;
        backend.set_window_size(window.id, window.size)?;
        backend.set_window_visibility(window.id, window.visible)?;
        info!(id = %window.id, backend = backend.name(), title = %window.title, "window opened");
        Ok(window)
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Root element, if one is attached.
    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    /// Snapshot of the state mirrored by the backend.
    pub fn state(&self) -> WindowState {
        WindowState {
            title: self.title.clone(),
            visible: self.visible,
            size: self.size,
        }
    }

    pub fn set_title<B: Backend + ?Sized>(&mut self, title: impl Into<String>, backend: &mut B) -> Result<(), WindowError> {
        self.title = title.into();
        backend.set_window_title(self.id, &self.title)
    }

    pub fn set_visible<B: Backend + ?Sized>(&mut self, visible: bool, backend: &mut B) -> Result<(), WindowError> {
        self.visible = visible;
        backend.set_window_visibility(self.id, visible)
    }

    /// Resize the window. Call [`Window::relayout`] afterwards to re-settle the root.
    pub fn set_size<B: Backend + ?Sized>(&mut self, size: Size, backend: &mut B) -> Result<(), WindowError> {
        self.size = size;
        backend.set_window_size(self.id, size)
    }

    /// Make `root` the window's content.
    ///
    /// The previous root, if any, and its subtree lose their window
    /// reference; the new subtree gains it.
    pub fn set_root(&mut self, tree: &mut ElementTree, root: ElementId) -> Result<(), WindowError> {
        tree.element(root)?;
        if let Some(previous) = self.root.take() {
            tree.propagate_window(previous, None)?;
        }
        let count = tree.propagate_window(root, Some(self.id))?;
        self.root = Some(root);
        debug!(id = %self.id, %root, elements = count, "root attached");
        Ok(())
    }

    /// Remove the root. Returns it, if any.
    pub fn clear_root(&mut self, tree: &mut ElementTree) -> Result<Option<ElementId>, WindowError> {
        let Some(root) = self.root.take() else {
            return Ok(None);
        };
        tree.propagate_window(root, None)?;
        Ok(Some(root))
    }

    /// Pack the root and settle it into the window's size.
    ///
    /// A window without a root yields an empty report.
    pub fn relayout(&self, engine: &mut LayoutEngine, tree: &mut ElementTree) -> Result<LayoutReport, WindowError> {
        match self.root {
            Some(root) => Ok(engine.layout(tree, root, self.size)?),
            None => Ok(LayoutReport::default()),
        }
    }

    /// Destroy the native window.
    pub fn close<B: Backend + ?Sized>(mut self, tree: &mut ElementTree, backend: &mut B) -> Result<(), WindowError> {
        self.clear_root(tree)?;
        backend.release_window(self.id)?;
        info!(id = %self.id, "window closed");
        Ok(())
    }
}
