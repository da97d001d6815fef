//! Ordered task collection and its mutation rules.
//!
//! # Responsibility
//! - Own the ordered sequence of tasks (single source of truth).
//! - Apply add/toggle/delete/reorder/clear-completed atomically.
//! - Encode and decode the persisted snapshot shape.
//!
//! # Invariants
//! - A failed operation leaves the list untouched.
//! - Hydration fully replaces the list; on failure the list is empty.
//! - Order changes only through append, removal and explicit reorder.

use crate::model::task::{Task, TaskId, TaskValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors for task list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    /// Description is empty after trimming.
    InvalidInput,
    /// Positional reference outside the current list.
    IndexOutOfRange { index: usize, len: usize },
    /// Identity reference to a task that no longer exists.
    UnknownTask(TaskId),
    /// Persisted snapshot cannot be decoded into a task list.
    CorruptSnapshot(String),
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "task description must not be blank"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "task index {index} out of range for list of {len}")
            }
            Self::UnknownTask(id) => write!(f, "task not found: {id}"),
            Self::CorruptSnapshot(message) => write!(f, "corrupt task snapshot: {message}"),
        }
    }
}

impl Error for TaskListError {}

impl From<TaskValidationError> for TaskListError {
    fn from(_: TaskValidationError) -> Self {
        Self::InvalidInput
    }
}

impl TaskListError {
    /// Returns whether this error comes from a stale UI reference.
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. } | Self::UnknownTask(_))
    }
}

/// Ordered task collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Resolves a stable id to its current position.
    pub fn position(&self, id: TaskId) -> Result<usize, TaskListError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskListError::UnknownTask(id))
    }

    /// Number of tasks not yet completed.
    pub fn items_left(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_active()).count()
    }

    /// Appends a new open task.
    ///
    /// # Errors
    /// - `InvalidInput` when `description` is blank after trimming.
    pub fn add(&mut self, description: &str) -> Result<TaskId, TaskListError> {
        let task = Task::new(description)?;
        let id = task.id;
        self.tasks.push(task);
        Ok(id)
    }

    /// Flips completion of the task at `index` and returns the new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool, TaskListError> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(TaskListError::IndexOutOfRange { index, len })?;
        task.toggle();
        Ok(task.completed)
    }

    /// Removes the task at `index`; later tasks shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<Task, TaskListError> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Removes every completed task, keeping the relative order of the rest.
    ///
    /// Returns the number of removed tasks.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_active);
        before - self.tasks.len()
    }

    /// Moves the task at `from` so it ends up immediately before the task
    /// currently at `to`.
    ///
    /// Returns `false` when the order did not change (`from == to`, or the
    /// task already precedes the target).
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<bool, TaskListError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(false);
        }

        let destination = if from < to { to - 1 } else { to };
        if destination == from {
            return Ok(false);
        }
        let task = self.tasks.remove(from);
        self.tasks.insert(destination, task);
        Ok(true)
    }

    /// Replaces the whole list with a decoded snapshot.
    ///
    /// Returns the number of hydrated tasks.
    ///
    /// # Errors
    /// - `CorruptSnapshot` when bytes are not an array of task records, a
    ///   description is blank, or two records share an id. The list is left
    ///   empty in that case.
    pub fn hydrate(&mut self, snapshot: &[u8]) -> Result<usize, TaskListError> {
        self.tasks.clear();
        let tasks = decode_snapshot(snapshot)?;
        self.tasks = tasks;
        Ok(self.tasks.len())
    }

    /// Serializes the list into the persisted snapshot shape.
    pub fn to_snapshot(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.tasks)
    }

    fn check_index(&self, index: usize) -> Result<(), TaskListError> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TaskListError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }
}

fn decode_snapshot(snapshot: &[u8]) -> Result<Vec<Task>, TaskListError> {
    let tasks: Vec<Task> = serde_json::from_slice(snapshot)
        .map_err(|err| TaskListError::CorruptSnapshot(err.to_string()))?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for (position, task) in tasks.iter().enumerate() {
        task.validate().map_err(|err| {
            TaskListError::CorruptSnapshot(format!("record {position}: {err}"))
        })?;
        if !seen.insert(task.id) {
            return Err(TaskListError::CorruptSnapshot(format!(
                "record {position}: duplicate id {}",
                task.id
            )));
        }
    }

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::{TaskList, TaskListError};

    fn list_of(entries: &[(&str, bool)]) -> TaskList {
        let mut list = TaskList::new();
        for (index, (description, completed)) in entries.iter().enumerate() {
            list.add(description).expect("valid description");
            if *completed {
                list.toggle(index).expect("index just added");
            }
        }
        list
    }

    fn descriptions(list: &TaskList) -> Vec<&str> {
        list.tasks()
            .iter()
            .map(|task| task.description.as_str())
            .collect()
    }

    #[test]
    fn add_appends_open_task() {
        let mut list = TaskList::new();
        let id = list.add("Read book").expect("valid");
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].id, id);
        assert_eq!(list.tasks()[0].description, "Read book");
        assert!(!list.tasks()[0].completed);
        assert_eq!(list.items_left(), 1);
    }

    #[test]
    fn add_whitespace_is_invalid_and_leaves_list_unchanged() {
        let mut list = list_of(&[("A", false)]);
        let before = list.clone();
        assert_eq!(list.add("   "), Err(TaskListError::InvalidInput));
        assert_eq!(list, before);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut list = list_of(&[("A", false), ("B", false), ("C", false)]);
        assert_eq!(list.toggle(1), Ok(true));
        assert_eq!(list.toggle(1), Ok(false));
        assert!(list.tasks().iter().all(|task| !task.completed));
    }

    #[test]
    fn toggle_out_of_range_is_reported() {
        let mut list = list_of(&[("A", false)]);
        let err = list.toggle(3).unwrap_err();
        assert_eq!(err, TaskListError::IndexOutOfRange { index: 3, len: 1 });
        assert!(err.is_stale_reference());
    }

    #[test]
    fn delete_shifts_following_tasks() {
        let mut list = list_of(&[("A", false), ("B", true), ("C", false)]);
        let removed = list.delete(1).expect("valid index");
        assert_eq!(removed.description, "B");
        assert_eq!(descriptions(&list), vec!["A", "C"]);
    }

    #[test]
    fn clear_completed_keeps_open_tasks_in_order() {
        let mut list = list_of(&[("A", false), ("B", true), ("C", true)]);
        assert_eq!(list.clear_completed(), 2);
        assert_eq!(descriptions(&list), vec!["A"]);
        assert_eq!(list.clear_completed(), 0);
        assert_eq!(descriptions(&list), vec!["A"]);
    }

    #[test]
    fn reorder_forward_lands_before_target() {
        let mut list = list_of(&[("A", false), ("B", false), ("C", false), ("D", false)]);
        assert_eq!(list.reorder(0, 2), Ok(true));
        assert_eq!(descriptions(&list), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn reorder_backward_lands_before_target() {
        let mut list = list_of(&[("A", false), ("B", false), ("C", false), ("D", false)]);
        assert_eq!(list.reorder(3, 1), Ok(true));
        assert_eq!(descriptions(&list), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn reorder_onto_next_sibling_is_noop() {
        let mut list = list_of(&[("A", false), ("B", false)]);
        assert_eq!(list.reorder(0, 1), Ok(false));
        assert_eq!(descriptions(&list), vec!["A", "B"]);
    }

    #[test]
    fn reorder_same_index_is_noop() {
        let mut list = list_of(&[("A", false), ("B", false)]);
        assert_eq!(list.reorder(1, 1), Ok(false));
        assert_eq!(descriptions(&list), vec!["A", "B"]);
    }

    #[test]
    fn reorder_rejects_invalid_indices() {
        let mut list = list_of(&[("A", false), ("B", false)]);
        assert_eq!(
            list.reorder(0, 2),
            Err(TaskListError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            list.reorder(5, 0),
            Err(TaskListError::IndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn hydrate_replaces_existing_tasks() {
        let source = list_of(&[("X", true), ("Y", false)]);
        let snapshot = source.to_snapshot().expect("encode");

        let mut target = list_of(&[("old", false)]);
        assert_eq!(target.hydrate(&snapshot), Ok(2));
        assert_eq!(target, source);
    }

    #[test]
    fn hydrate_accepts_records_without_id() {
        let mut list = TaskList::new();
        let snapshot = br#"[{"description":"Buy milk","completed":false},{"description":"Walk dog","completed":true}]"#;
        assert_eq!(list.hydrate(snapshot), Ok(2));
        assert_eq!(descriptions(&list), vec!["Buy milk", "Walk dog"]);
        assert_ne!(list.tasks()[0].id, list.tasks()[1].id);
        assert!(list.tasks()[1].completed);
    }

    #[test]
    fn hydrate_corrupt_bytes_leaves_list_empty() {
        let mut list = list_of(&[("A", false)]);
        let err = list.hydrate(b"{not json").unwrap_err();
        assert!(matches!(err, TaskListError::CorruptSnapshot(_)));
        assert!(list.is_empty());
    }

    #[test]
    fn hydrate_rejects_wrong_field_types() {
        let mut list = TaskList::new();
        let err = list
            .hydrate(br#"[{"description":"A","completed":"yes"}]"#)
            .unwrap_err();
        assert!(matches!(err, TaskListError::CorruptSnapshot(_)));
        assert!(list.is_empty());
    }

    #[test]
    fn hydrate_rejects_blank_description_without_partial_state() {
        let mut list = TaskList::new();
        let err = list
            .hydrate(br#"[{"description":"A","completed":false},{"description":"  ","completed":false}]"#)
            .unwrap_err();
        assert!(matches!(err, TaskListError::CorruptSnapshot(message) if message.contains("record 1")));
        assert!(list.is_empty());
    }

    #[test]
    fn hydrate_rejects_duplicate_ids() {
        let id = "6f1c8a36-3f4e-4a51-9f53-0f3d2a3f2b10";
        let payload = format!(
            r#"[{{"id":"{id}","description":"A","completed":false}},{{"id":"{id}","description":"B","completed":true}}]"#
        );
        let mut list = TaskList::new();
        let err = list.hydrate(payload.as_bytes()).unwrap_err();
        assert!(matches!(err, TaskListError::CorruptSnapshot(message) if message.contains("duplicate")));
    }

    #[test]
    fn position_resolves_ids_and_reports_unknown() {
        let mut list = list_of(&[("A", false), ("B", false)]);
        let id = list.tasks()[1].id;
        assert_eq!(list.position(id), Ok(1));
        list.delete(1).expect("valid");
        assert_eq!(list.position(id), Err(TaskListError::UnknownTask(id)));
    }
}
