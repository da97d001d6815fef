//! Task domain model.
//!
//! # Responsibility
//! - Define the single entity rendered by the widget.
//! - Validate user-provided descriptions before a task exists.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `description` is non-empty after trimming and immutable after creation.
//! - `completed` is a plain boolean; there is no intermediate state.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task, assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for task construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Description is empty or whitespace-only.
    EmptyDescription,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "task description must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// One entry in the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Missing in legacy snapshots; a fresh id is generated on read.
    #[serde(default)]
    pub id: TaskId,
    pub description: String,
    pub completed: bool,
}

impl Task {
    /// Creates an open task from user input.
    ///
    /// The description is trimmed before storage.
    ///
    /// # Errors
    /// - Returns `EmptyDescription` when `description` is blank after trim.
    pub fn new(description: &str) -> Result<Self, TaskValidationError> {
        Self::with_id(TaskId::new(), description, false)
    }

    /// Creates a task with a caller-provided identity and state.
    ///
    /// Used by hydration paths where identity already exists.
    pub fn with_id(
        id: TaskId,
        description: &str,
        completed: bool,
    ) -> Result<Self, TaskValidationError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        Ok(Self {
            id,
            description: trimmed.to_string(),
            completed,
        })
    }

    /// Checks record-level invariants for data read from storage.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.description.trim().is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        Ok(())
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Returns whether this task counts towards "items left".
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskId, TaskValidationError};

    #[test]
    fn new_task_is_open_and_trimmed() {
        let task = Task::new("  Buy milk \n").expect("non-blank description");
        assert_eq!(task.description, "Buy milk");
        assert!(!task.completed);
        assert!(task.is_active());
    }

    #[test]
    fn blank_description_is_rejected() {
        assert_eq!(
            Task::new(" \t ").unwrap_err(),
            TaskValidationError::EmptyDescription
        );
    }

    #[test]
    fn ids_are_unique_per_task() {
        let first = Task::new("a").expect("valid");
        let second = Task::new("a").expect("valid");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn toggle_flips_completion() {
        let mut task = Task::new("Walk dog").expect("valid");
        task.toggle();
        assert!(task.completed);
        task.toggle();
        assert!(!task.completed);
    }

    #[test]
    fn id_serializes_as_plain_uuid_string() {
        let id = TaskId::new();
        let json = serde_json::to_string(&id).expect("serialize id");
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}
