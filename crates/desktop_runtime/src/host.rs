//! Host-side seams: storage backends and the presentation adapter that maps window ids to
//! concrete UI handles.
//!
//! The registry never touches a rendering surface directly. The runtime forwards reducer effects
//! to a [`WindowSurface`], so the core runs headless in tests.

use std::rc::Rc;

use platform_host::{KeyValueStore, MemoryKeyValueStore};
use platform_host_web::{durable_store, session_store, storage_strategy_name};

use crate::{
    model::{WindowId, WindowPosition, WindowRecord},
    taskbar::TaskbarButton,
};

/// Presentation adapter driven by runtime effects.
pub trait WindowSurface {
    /// Creates the UI handle for a newly registered window.
    fn mount(&mut self, window: &WindowRecord);

    /// Drops the UI handle of a window that left the registry.
    fn unmount(&mut self, window_id: &WindowId);

    /// Applies position, visibility, and z-order to an existing handle.
    fn repaint(&mut self, window: &WindowRecord);

    /// Redraws the taskbar button strip.
    fn render_taskbar(&mut self, buttons: &[TaskbarButton]);

    /// Position the window is actually rendered at, when the surface knows it.
    fn rendered_position(&self, _window_id: &WindowId) -> Option<WindowPosition> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Surface that renders nothing.
pub struct HeadlessSurface;

impl WindowSurface for HeadlessSurface {
    fn mount(&mut self, _window: &WindowRecord) {}

    fn unmount(&mut self, _window_id: &WindowId) {}

    fn repaint(&mut self, _window: &WindowRecord) {}

    fn render_taskbar(&mut self, _buttons: &[TaskbarButton]) {}
}

#[derive(Clone)]
/// Storage backends handed to the runtime.
pub struct DesktopHostContext {
    pub durable: Rc<dyn KeyValueStore>,
    pub session: Rc<dyn KeyValueStore>,
    pub strategy_name: &'static str,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self {
            durable: durable_store(),
            session: session_store(),
            strategy_name: storage_strategy_name(),
        }
    }
}

impl DesktopHostContext {
    /// Independent in-memory backends.
    pub fn in_memory() -> Self {
        Self {
            durable: Rc::new(MemoryKeyValueStore::default()),
            session: Rc::new(MemoryKeyValueStore::default()),
            strategy_name: "in-memory",
        }
    }
}

impl std::fmt::Debug for DesktopHostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopHostContext")
            .field("strategy_name", &self.strategy_name)
            .finish_non_exhaustive()
    }
}
