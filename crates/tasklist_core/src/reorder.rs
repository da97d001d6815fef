//! Drag-and-drop reorder coordination.
//!
//! # Responsibility
//! - Remember which task a drag started on.
//! - Translate the drop target into a positional move on the full list.
//!
//! # Invariants
//! - A drop with no drag in progress is ignored.
//! - A drag is consumed by the first drop that follows it.
//! - Sibling relations are taken from the rows currently on screen.

use crate::model::task::TaskId;
use crate::model::task_list::TaskListError;
use crate::view::ViewFrame;

/// Positional move for `TaskList::reorder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderMove {
    pub from: usize,
    pub to: usize,
}

impl ReorderMove {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Tracks one in-flight drag gesture.
#[derive(Debug, Default)]
pub struct ReorderCoordinator {
    dragged: Option<TaskId>,
}

impl ReorderCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_start(&mut self, id: TaskId) {
        self.dragged = Some(id);
    }

    /// Whether a drop would currently be accepted.
    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn dragged(&self) -> Option<TaskId> {
        self.dragged
    }

    /// Resolves a drop on `target` against the displayed rows.
    ///
    /// - Dragged and target differ: dragged moves before target.
    /// - Dropped on itself: the row already precedes its next sibling (or is
    ///   last), so the move is a no-op. Hidden tasks are never crossed.
    ///
    /// Returns `Ok(None)` when no drag was in progress.
    ///
    /// # Errors
    /// - `UnknownTask` when either task is no longer displayed.
    pub fn drop_on(
        &mut self,
        target: TaskId,
        frame: &ViewFrame,
    ) -> Result<Option<ReorderMove>, TaskListError> {
        let Some(dragged) = self.dragged.take() else {
            return Ok(None);
        };

        let source_slot = slot_of(frame, dragged)?;
        let target_slot = slot_of(frame, target)?;
        let from = frame.rows[source_slot].index;

        let to = if source_slot == target_slot {
            from
        } else {
            frame.rows[target_slot].index
        };
        Ok(Some(ReorderMove { from, to }))
    }
}

fn slot_of(frame: &ViewFrame, id: TaskId) -> Result<usize, TaskListError> {
    frame
        .rows
        .iter()
        .position(|row| row.id == id)
        .ok_or(TaskListError::UnknownTask(id))
}
