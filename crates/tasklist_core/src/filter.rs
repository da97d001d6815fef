//! Filter policy: derives visible sub-views from the full task list.
//!
//! # Invariants
//! - Selecting a view never mutates the underlying tasks.
//! - Relative order of the full list is preserved in every view.
//! - Each view entry keeps the task's position in the full list.

use crate::model::task::Task;
use std::fmt::{Display, Formatter};

/// Status filter selected by the filter tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    /// Parses a filter tab name.
    ///
    /// Unknown names fall back to `All`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Returns whether a task is visible under this mode.
    pub fn admits(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl Display for FilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One visible task plus its position in the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewEntry<'a> {
    pub index: usize,
    pub task: &'a Task,
}

/// Selects the ordered sub-view of `tasks` admitted by `mode`.
pub fn select_view(tasks: &[Task], mode: FilterMode) -> Vec<ViewEntry<'_>> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| mode.admits(task))
        .map(|(index, task)| ViewEntry { index, task })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{select_view, FilterMode};
    use crate::model::task::Task;

    fn sample() -> Vec<Task> {
        let mut walk = Task::new("Walk dog").expect("valid");
        walk.completed = true;
        vec![
            Task::new("Buy milk").expect("valid"),
            walk,
            Task::new("Read book").expect("valid"),
        ]
    }

    #[test]
    fn parse_known_and_unknown_modes() {
        assert_eq!(FilterMode::parse("Active"), FilterMode::Active);
        assert_eq!(FilterMode::parse(" completed "), FilterMode::Completed);
        assert_eq!(FilterMode::parse("all"), FilterMode::All);
        assert_eq!(FilterMode::parse("archived"), FilterMode::All);
    }

    #[test]
    fn all_mode_returns_everything_in_order() {
        let tasks = sample();
        let view = select_view(&tasks, FilterMode::All);
        let indices: Vec<usize> = view.iter().map(|entry| entry.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn active_mode_keeps_full_list_positions() {
        let tasks = sample();
        let view = select_view(&tasks, FilterMode::Active);
        let picked: Vec<(usize, &str)> = view
            .iter()
            .map(|entry| (entry.index, entry.task.description.as_str()))
            .collect();
        assert_eq!(picked, vec![(0, "Buy milk"), (2, "Read book")]);
    }

    #[test]
    fn completed_mode_selects_done_tasks() {
        let tasks = sample();
        let view = select_view(&tasks, FilterMode::Completed);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].index, 1);
        assert!(view[0].task.completed);
    }

    #[test]
    fn empty_input_yields_empty_views() {
        for mode in [FilterMode::All, FilterMode::Active, FilterMode::Completed] {
            assert!(select_view(&[], mode).is_empty());
        }
    }
}
