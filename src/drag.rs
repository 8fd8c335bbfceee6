//! Drag-and-drop state machine: Idle -> Dragging -> Idle.
//!
//! The controller owns the only reference to the task being dragged. It never looks at the
//! terminal; callers hand it the midpoints of the cards currently drawn in a column.

use crate::board::{Board, Status, TaskPos};

/// Follow-up work the event loop runs on its next turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Apply the "being dragged" styling for the given gesture
    MarkDragging { gesture: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging {
        task: TaskPos,
        gesture: u64,
        /// Set by the deferred follow-up, not by `begin`
        styled: bool,
    },
}

#[derive(Debug)]
pub struct DragController {
    state: DragState,
    next_gesture: u64,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            next_gesture: 0,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Task currently being dragged, if any
    pub fn dragged(&self) -> Option<TaskPos> {
        match self.state {
            DragState::Dragging { task, .. } => Some(task),
            DragState::Idle => None,
        }
    }

    /// Whether the dragged card should be drawn with the dragging style
    pub fn is_styled(&self) -> bool {
        matches!(self.state, DragState::Dragging { styled: true, .. })
    }

    /// Start a gesture on `task`. The returned action must be scheduled, not applied
    /// immediately, so the first frame of the drag still shows the card unstyled.
    pub fn begin(&mut self, task: TaskPos) -> Deferred {
        self.next_gesture += 1;
        let gesture = self.next_gesture;
        self.state = DragState::Dragging {
            task,
            gesture,
            styled: false,
        };
        tracing::debug!(status = task.status.as_str(), index = task.index, gesture, "drag begin");
        Deferred::MarkDragging { gesture }
    }

    /// Run a deferred follow-up. Actions from a gesture that already ended are dropped.
    pub fn apply(&mut self, action: Deferred) {
        match action {
            Deferred::MarkDragging { gesture } => {
                if let DragState::Dragging {
                    gesture: current,
                    ref mut styled,
                    ..
                } = self.state
                {
                    if current == gesture {
                        *styled = true;
                    }
                }
            }
        }
    }

    /// Pointer moved over `status` at `pointer_y` while dragging.
    ///
    /// `midpoints` are the vertical midpoints of the cards drawn in that column, top to
    /// bottom, with the dragged card left out. Returns the dragged task's new position.
    pub fn drag_over(
        &mut self,
        board: &mut Board,
        status: Status,
        midpoints: &[f64],
        pointer_y: f64,
    ) -> Option<TaskPos> {
        let DragState::Dragging { task, gesture, styled } = self.state else {
            return None;
        };
        let before = closest_below(midpoints, pointer_y);
        let moved = board.move_task(task, status, before)?;
        self.state = DragState::Dragging {
            task: moved,
            gesture,
            styled,
        };
        Some(moved)
    }

    /// Finish the gesture and return where the task ended up. The caller persists.
    pub fn end(&mut self) -> Option<TaskPos> {
        let dropped = self.dragged();
        self.state = DragState::Idle;
        if let Some(pos) = dropped {
            tracing::debug!(status = pos.status.as_str(), index = pos.index, "drag end");
        }
        dropped
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the card whose midpoint is the closest one below the pointer.
///
/// Scans top to bottom keeping the largest negative `pointer_y - midpoint`; ties keep the
/// earlier card. `None` means the pointer is below every card (or there are none).
pub fn closest_below(midpoints: &[f64], pointer_y: f64) -> Option<usize> {
    let mut closest: Option<(usize, f64)> = None;
    for (i, mid) in midpoints.iter().enumerate() {
        let offset = pointer_y - mid;
        let best = closest.map_or(f64::NEG_INFINITY, |(_, o)| o);
        if offset < 0.0 && offset > best {
            closest = Some((i, offset));
        }
    }
    closest.map(|(i, _)| i)
}
