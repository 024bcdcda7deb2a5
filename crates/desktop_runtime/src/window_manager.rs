//! Shared window-manager transition helpers used by the desktop reducer.

use crate::{
    model::{DesktopState, Visibility, WindowId, WindowPosition},
    reducer::ReducerError,
};

/// Raises `window_id` to a fresh maximum z-order and returns it.
///
/// Unknown ids leave the counter untouched.
pub fn bring_to_front_internal(
    state: &mut DesktopState,
    window_id: &WindowId,
) -> Result<u32, ReducerError> {
    if !state.contains(window_id) {
        return Err(ReducerError::WindowNotFound(window_id.clone()));
    }
    state.z_counter = state.z_counter.saturating_add(1);
    let z_order = state.z_counter;
    if let Some(window) = state.window_mut(window_id) {
        window.z_order = z_order;
    }
    Ok(z_order)
}

/// Sets the visibility of a registered window.
pub fn set_visibility(
    state: &mut DesktopState,
    window_id: &WindowId,
    visibility: Visibility,
) -> Result<(), ReducerError> {
    let window = state
        .window_mut(window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))?;
    window.visibility = visibility;
    Ok(())
}

/// Cascade position of the `n`th dynamically created window (1-based).
pub fn cascade_position(state: &DesktopState, n: u32) -> WindowPosition {
    let steps = i32::try_from(n).unwrap_or(i32::MAX);
    let offset = state
        .config
        .cascade_origin
        .saturating_add(steps.saturating_mul(state.config.cascade_step));
    WindowPosition::new(offset, offset)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of one show-desktop toggle.
pub enum ShowDesktopOutcome {
    /// At least one window was visible; every window is now hidden.
    HidAll,
    /// Nothing was visible; remembered states were restored.
    Restored,
}

/// Global hide-all / restore-all toggle.
///
/// Hiding remembers each window's visibility. Restoring applies the remembered value and falls
/// back to visible for windows with nothing remembered.
pub fn toggle_show_desktop(state: &mut DesktopState) -> ShowDesktopOutcome {
    if state.any_visible() {
        for window in &mut state.windows {
            window.prior_visibility = Some(window.visibility);
            window.visibility = Visibility::Hidden;
        }
        ShowDesktopOutcome::HidAll
    } else {
        for window in &mut state.windows {
            window.visibility = window
                .prior_visibility
                .take()
                .unwrap_or(Visibility::Visible);
        }
        ShowDesktopOutcome::Restored
    }
}
