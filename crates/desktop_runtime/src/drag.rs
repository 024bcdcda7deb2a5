//! Pointer-drag session state machine (`Idle -> Dragging -> Idle`).

use crate::model::{PointerPosition, WindowId, WindowPosition};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One in-progress drag gesture.
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    /// Window position when the gesture started.
    pub origin: WindowPosition,
}

impl DragSession {
    /// Pure delta translation: `origin + (pointer - pointer_start)`, unclamped.
    pub fn position_for(&self, pointer: PointerPosition) -> WindowPosition {
        self.origin.offset(
            pointer.x.saturating_sub(self.pointer_start.x),
            pointer.y.saturating_sub(self.pointer_start.y),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Owns the single system-wide drag session.
///
/// While `Dragging`, the move/up/cancel listener set is considered attached; returning to `Idle`
/// detaches it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Enters `Dragging`, returning any session it replaced.
    pub fn begin(&mut self, session: DragSession) -> Option<DragSession> {
        match std::mem::replace(&mut self.state, DragState::Dragging(session)) {
            DragState::Idle => None,
            DragState::Dragging(previous) => Some(previous),
        }
    }

    /// Position the dragged window should take for `pointer`, or `None` while idle.
    pub fn pointer_move(&self, pointer: PointerPosition) -> Option<(WindowId, WindowPosition)> {
        self.session()
            .map(|session| (session.window_id.clone(), session.position_for(pointer)))
    }

    /// Returns to `Idle`, yielding the finished session if one was active.
    pub fn end(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }
}
