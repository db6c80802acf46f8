//! Drag state — `Idle` or `Dragging` with the session captured at pointer-down.

/// Ephemeral state of one drag, alive from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Distance from the pointer to the handle's left edge at pointer-down.
    /// Held constant so the handle does not jump under the pointer.
    pub anchor_mouse_offset: f64,
}

impl DragSession {
    pub fn begin(pointer_x: f64, handle_left: f64) -> Self {
        Self {
            anchor_mouse_offset: pointer_x - handle_left,
        }
    }

    /// Offset of the handle's left edge along the track for a pointer position.
    /// Unclamped: the ratio is clamped later by the domain sanitizer.
    pub fn offset_for(&self, pointer_x: f64, track_origin: f64) -> f64 {
        pointer_x - track_origin - self.anchor_mouse_offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_active(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Arm a drag. Returns false (and changes nothing) if one is already active.
    pub fn begin(&mut self, pointer_x: f64, handle_left: f64) -> bool {
        if self.is_active() {
            return false;
        }
        *self = DragState::Dragging(DragSession::begin(pointer_x, handle_left));
        true
    }

    /// Disarm. Returns the session that was active, if any.
    pub fn end(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }
}
