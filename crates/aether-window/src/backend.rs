//! Platform backend seam.

use aether_core::{Size, WindowError, WindowId};
use indexmap::IndexMap;
use tracing::debug;

/// Native window state a backend keeps in sync with a [`crate::Window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    pub title: String,
    pub visible: bool,
    pub size: Size,
}

/// Platform backend driven by windows.
///
/// Implemented by each platform integration. Backends only mirror window
/// state; they never compute layout.
pub trait Backend {
    /// Create the native window for `id` with its initial state.
    fn initialize_window(&mut self, id: WindowId, state: &WindowState) -> Result<(), WindowError>;

    fn set_window_title(&mut self, id: WindowId, title: &str) -> Result<(), WindowError>;

    fn set_window_visibility(&mut self, id: WindowId, visible: bool) -> Result<(), WindowError>;

    fn set_window_size(&mut self, id: WindowId, size: Size) -> Result<(), WindowError>;

    /// Destroy the native window for `id`.
    fn release_window(&mut self, id: WindowId) -> Result<(), WindowError>;

    /// Get the backend name.
    fn name(&self) -> &'static str;
}

/// A backend call, as recorded by [`HeadlessBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Initialize(WindowId),
    SetTitle(WindowId, String),
    SetVisibility(WindowId, bool),
    SetSize(WindowId, Size),
    Release(WindowId),
}

/// In-memory backend for tests and servers without a display.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    windows: IndexMap<WindowId, WindowState>,
    calls: Vec<BackendCall>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a window.
    pub fn window(&self, id: WindowId) -> Option<&WindowState> {
        self.windows.get(&id)
    }

    /// Open windows in creation order.
    pub fn windows(&self) -> impl Iterator<Item = (WindowId, &WindowState)> {
        self.windows.iter().map(|(id, state)| (*id, state))
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    fn state_mut(&mut self, id: WindowId) -> Result<&mut WindowState, WindowError> {
        self.windows.get_mut(&id).ok_or(WindowError::UnknownWindow(id))
    }
}

impl Backend for HeadlessBackend {
    fn initialize_window(&mut self, id: WindowId, state: &WindowState) -> Result<(), WindowError> {
        if self.windows.contains_key(&id) {
            return Err(WindowError::AlreadyInitialized(id));
        }
        self.windows.insert(id, state.clone());
        self.calls.push(BackendCall::Initialize(id));
        debug!(%id, title = %state.title, "headless window created");
        Ok(())
    }

    fn set_window_title(&mut self, id: WindowId, title: &str) -> Result<(), WindowError> {
        self.state_mut(id)?.title = title.to_owned();
        self.calls.push(BackendCall::SetTitle(id, title.to_owned()));
        Ok(())
    }

    fn set_window_visibility(&mut self, id: WindowId, visible: bool) -> Result<(), WindowError> {
        self.state_mut(id)?.visible = visible;
        self.calls.push(BackendCall::SetVisibility(id, visible));
        Ok(())
    }

    fn set_window_size(&mut self, id: WindowId, size: Size) -> Result<(), WindowError> {
        self.state_mut(id)?.size = size;
        self.calls.push(BackendCall::SetSize(id, size));
        Ok(())
    }

    fn release_window(&mut self, id: WindowId) -> Result<(), WindowError> {
        self.windows
            .shift_remove(&id)
            .ok_or(WindowError::UnknownWindow(id))?;
        self.calls.push(BackendCall::Release(id));
        debug!(%id, "headless window released");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "headless"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(title: &str) -> WindowState {
        WindowState {
            title: title.to_owned(),
            visible: false,
            size: Size::new(600, 480),
        }
    }

    #[test]
    fn test_records_state_and_calls() {
        let mut backend = HeadlessBackend::new();
        let id = WindowId(1);
        backend.initialize_window(id, &state("main")).unwrap();
        backend.set_window_title(id, "renamed").unwrap();
        backend.set_window_visibility(id, true).unwrap();
        backend.set_window_size(id, Size::new(1024, 768)).unwrap();

        let window = backend.window(id).unwrap();
        assert_eq!(window.title, "renamed");
        assert!(window.visible);
        assert_eq!(window.size, Size::new(1024, 768));
        assert_eq!(backend.calls().len(), 4);
        assert_eq!(backend.calls()[0], BackendCall::Initialize(id));
        assert_eq!(backend.name(), "headless");
    }

    #[test]
    fn test_unknown_and_duplicate_windows() {
        let mut backend = HeadlessBackend::new();
        assert_eq!(
            backend.set_window_title(WindowId(9), "x"),
            Err(WindowError::UnknownWindow(WindowId(9)))
        );

        backend.initialize_window(WindowId(1), &state("a")).unwrap();
        assert_eq!(
            backend.initialize_window(WindowId(1), &state("b")),
            Err(WindowError::AlreadyInitialized(WindowId(1)))
        );
        assert!(backend.calls().iter().all(|call| !matches!(call, BackendCall::SetTitle(..))));
    }

    #[test]
    fn test_windows_keep_creation_order() {
        let mut backend = HeadlessBackend::new();
        for n in [3, 1, 2] {
            backend.initialize_window(WindowId(n), &state("w")).unwrap();
        }
        backend.release_window(WindowId(1)).unwrap();
        let ids: Vec<WindowId> = backend.windows().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![WindowId(3), WindowId(2)]);
        assert_eq!(
            backend.release_window(WindowId(1)),
            Err(WindowError::UnknownWindow(WindowId(1)))
        );
    }
}
