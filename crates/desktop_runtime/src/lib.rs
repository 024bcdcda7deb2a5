//! Window registry, taskbar, drag handling, and window-state persistence for the browser desktop.

pub mod config;
pub mod drag;
pub mod file_open;
pub mod host;
pub mod model;
pub mod persistence;
pub mod quick_search;
pub mod reducer;
pub mod runtime;
pub mod taskbar;
pub mod window_manager;

pub use config::{DesktopConfig, WINDOWS_STATE_KEY};
pub use drag::{DragController, DragSession, DragState};
pub use file_open::{
    escape_html, route_file, text_window_content, FileOpen, UNSUPPORTED_PREVIEW_MESSAGE,
};
pub use host::{DesktopHostContext, HeadlessSurface, WindowSurface};
pub use model::*;
pub use persistence::WindowStateStorage;
pub use quick_search::{normalize_site_url, resolve_quick_search};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime::DesktopRuntime;
pub use taskbar::{AlternatePrompt, Taskbar, TaskbarButton, DEFAULT_TASKBAR_ICON};
