//! Reducer actions, side-effect intents, and transition logic for the window registry.

use thiserror::Error;

use crate::{
    drag::{DragController, DragSession},
    model::{
        DesktopState, PointerPosition, Visibility, WindowId, WindowOrigin, WindowPosition,
        WindowRecord,
    },
    window_manager::{
        bring_to_front_internal, cascade_position, set_visibility, toggle_show_desktop,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Show a window and raise it.
    Open {
        /// Window to open.
        window_id: WindowId,
    },
    /// Hide a static window, or remove a dynamic one.
    Close {
        /// Window to close.
        window_id: WindowId,
    },
    /// Hide a window while keeping it registered.
    Minimize {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Restore-and-raise a hidden window, or minimize a visible one.
    ToggleMinimize {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Assign a fresh maximum z-order.
    BringToFront {
        /// Window to raise.
        window_id: WindowId,
    },
    /// Create a dynamic window.
    Create {
        /// Display label, fixed for the window's lifetime.
        title: String,
        /// Content markup handed to the presentation layer.
        content: String,
    },
    /// Hide everything, or restore what the previous hide remembered.
    ShowDesktop,
    /// Pointer-down on a title bar.
    BeginDrag {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
        /// Rendered position reported by the presentation layer, when it knows better.
        rendered: Option<WindowPosition>,
    },
    /// Pointer-move during a drag.
    UpdateDrag {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Pointer-up or pointer-cancel.
    EndDrag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime to execute.
pub enum RuntimeEffect {
    /// Persist the current window-state snapshot.
    PersistLayout,
    /// A new window needs a presentation handle.
    MountWindow(WindowId),
    /// A window left the registry; drop its presentation handle.
    UnmountWindow(WindowId),
    /// A window's position, visibility, or z-order changed.
    RepaintWindow(WindowId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions.
pub enum ReducerError {
    /// The target window id was not found in the registry.
    #[error("window not found: {0}")]
    WindowNotFound(WindowId),
}

/// Applies a [`DesktopAction`] to the registry and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when an action references a window that is not
/// registered. The state is left untouched in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    drag: &mut DragController,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::Open { window_id } => {
            set_visibility(state, &window_id, Visibility::Visible)?;
            bring_to_front_internal(state, &window_id)?;
            effects.push(RuntimeEffect::RepaintWindow(window_id));
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::Close { window_id } => {
            let origin = find_window(state, &window_id)?.origin;
            match origin {
                WindowOrigin::Static => {
                    set_visibility(state, &window_id, Visibility::Hidden)?;
                    effects.push(RuntimeEffect::RepaintWindow(window_id));
                }
                WindowOrigin::Dynamic => {
                    state.windows.retain(|w| w.id != window_id);
                    if drag.session().map(|s| &s.window_id) == Some(&window_id) {
                        drag.end();
                    }
                    effects.push(RuntimeEffect::UnmountWindow(window_id));
                }
            }
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::Minimize { window_id } => {
            set_visibility(state, &window_id, Visibility::Hidden)?;
            effects.push(RuntimeEffect::RepaintWindow(window_id));
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::ToggleMinimize { window_id } => {
            if find_window(state, &window_id)?.is_visible() {
                set_visibility(state, &window_id, Visibility::Hidden)?;
            } else {
                set_visibility(state, &window_id, Visibility::Visible)?;
                bring_to_front_internal(state, &window_id)?;
            }
            effects.push(RuntimeEffect::RepaintWindow(window_id));
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::BringToFront { window_id } => {
            bring_to_front_internal(state, &window_id)?;
            effects.push(RuntimeEffect::RepaintWindow(window_id));
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::Create { title, content } => {
            state.created_count = state.created_count.saturating_add(1);
            let n = state.created_count;
            let window_id = WindowId::new(format!("{}{n}", state.config.dynamic_id_prefix));
            let position = cascade_position(state, n);
            state.z_counter = state.z_counter.saturating_add(1);
            state.windows.push(WindowRecord {
                id: window_id.clone(),
                title,
                origin: WindowOrigin::Dynamic,
                position: Some(position),
                visibility: Visibility::Visible,
                z_order: state.z_counter,
                content,
                prior_visibility: None,
            });
            effects.push(RuntimeEffect::MountWindow(window_id));
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::ShowDesktop => {
            toggle_show_desktop(state);
            effects.extend(state.window_ids().into_iter().map(RuntimeEffect::RepaintWindow));
        }
        DesktopAction::BeginDrag {
            window_id,
            pointer,
            rendered,
        } => {
            let origin = rendered
                .or(find_window(state, &window_id)?.position)
                .unwrap_or_default();
            bring_to_front_internal(state, &window_id)?;
            if let Some(previous) = drag.begin(DragSession {
                window_id: window_id.clone(),
                pointer_start: pointer,
                origin,
            }) {
                log::debug!("drag on `{}` replaced by `{window_id}`", previous.window_id);
            }
            if let Some(window) = state.window_mut(&window_id) {
                window.position = Some(origin);
            }
            effects.push(RuntimeEffect::RepaintWindow(window_id));
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::UpdateDrag { pointer } => {
            if let Some((window_id, position)) = drag.pointer_move(pointer) {
                let Some(window) = state.window_mut(&window_id) else {
                    drag.end();
                    return Err(ReducerError::WindowNotFound(window_id));
                };
                window.position = Some(position);
                effects.push(RuntimeEffect::RepaintWindow(window_id));
            }
        }
        DesktopAction::EndDrag => {
            if drag.end().is_some() {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
    }
    Ok(effects)
}

fn find_window<'a>(
    state: &'a DesktopState,
    window_id: &WindowId,
) -> Result<&'a WindowRecord, ReducerError> {
    state
        .window(window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))
}
