//! Taskbar button list derived from the window registry.
//!
//! Buttons are created lazily the first time a registered window is observed without one, and
//! dropped once their window leaves the registry. The active flag is recomputed from z-order on
//! every sync.

use serde::{Deserialize, Serialize};

use crate::{
    model::{DesktopState, WindowId},
    reducer::DesktopAction,
};

/// Glyph shown on buttons that carry no dedicated icon.
pub const DEFAULT_TASKBAR_ICON: &str = "▣";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarButton {
    pub window_id: WindowId,
    pub label: String,
    pub icon: String,
    /// True iff the window holds the maximum z-order and is visible.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Taskbar {
    buttons: Vec<TaskbarButton>,
}

impl Taskbar {
    pub fn buttons(&self) -> &[TaskbarButton] {
        &self.buttons
    }

    pub fn button(&self, window_id: &WindowId) -> Option<&TaskbarButton> {
        self.buttons.iter().find(|b| &b.window_id == window_id)
    }

    pub fn active_button(&self) -> Option<&TaskbarButton> {
        self.buttons.iter().find(|b| b.active)
    }

    /// Reconciles buttons with `state`. Returns `true` when anything changed.
    pub fn sync(&mut self, state: &DesktopState) -> bool {
        let before = self.buttons.clone();

        self.buttons.retain(|b| state.contains(&b.window_id));
        for window in &state.windows {
            match self.buttons.iter_mut().find(|b| b.window_id == window.id) {
                Some(button) => {
                    if button.label != window.title {
                        button.label = window.title.clone();
                    }
                }
                None => self.buttons.push(TaskbarButton {
                    window_id: window.id.clone(),
                    label: window.title.clone(),
                    icon: DEFAULT_TASKBAR_ICON.to_string(),
                    active: false,
                }),
            }
        }
        self.update_active_state(state);

        self.buttons != before
    }

    /// Highlights the button of the active window. Idempotent.
    pub fn update_active_state(&mut self, state: &DesktopState) {
        let active = state
            .active_window_id()
            .filter(|id| state.window(id).is_some_and(|w| w.is_visible()));
        for button in &mut self.buttons {
            button.active = Some(&button.window_id) == active;
        }
    }

    /// Primary click: toggle the window's minimized state.
    pub fn click(&self, window_id: &WindowId) -> Option<DesktopAction> {
        self.button(window_id).map(|b| DesktopAction::ToggleMinimize {
            window_id: b.window_id.clone(),
        })
    }

    /// Secondary action (right-click / long-press): asks the user to pick close or toggle.
    pub fn alternate_action(&self, window_id: &WindowId) -> Option<AlternatePrompt> {
        self.button(window_id).map(|b| AlternatePrompt {
            window_id: b.window_id.clone(),
            label: b.label.clone(),
        })
    }
}

/// Pending user-confirmation gate raised by [`Taskbar::alternate_action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternatePrompt {
    pub window_id: WindowId,
    pub label: String,
}

impl AlternatePrompt {
    pub fn message(&self) -> String {
        format!(
            "¿Cerrar ventana \"{}\"? Aceptar = cerrar, Cancelar = minimizar/restaurar",
            self.label
        )
    }

    /// Confirmed closes the window; declined toggles minimize/restore.
    pub fn resolve(self, confirmed: bool) -> DesktopAction {
        if confirmed {
            DesktopAction::Close {
                window_id: self.window_id,
            }
        } else {
            DesktopAction::ToggleMinimize {
                window_id: self.window_id,
            }
        }
    }
}
