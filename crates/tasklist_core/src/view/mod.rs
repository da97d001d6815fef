//! View projection of the task list.
//!
//! # Responsibility
//! - Turn the task list (through the active filter) into renderable rows.
//! - Keep row-level state and the "items left" label in sync after every
//!   mutation.
//! - Stay independent of any rendering technology via `ViewSink`.
//!
//! # Invariants
//! - Every row carries the id and full-list index of exactly one task.
//! - Checkbox and strike-through always mirror the live `completed` value.
//! - Under the `all` filter, row count equals task count once rendering
//!   settles.

mod projector;

pub use projector::Projector;

use crate::filter::FilterMode;
use crate::model::task::TaskId;

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub id: TaskId,
    /// Position in the full task list, not in the filtered view.
    pub index: usize,
    pub description: String,
    pub completed: bool,
}

impl ViewRow {
    pub fn checkbox_checked(&self) -> bool {
        self.completed
    }

    pub fn struck_through(&self) -> bool {
        self.completed
    }
}

/// Last settled render state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFrame {
    pub filter: FilterMode,
    pub rows: Vec<ViewRow>,
    pub items_left: usize,
}

impl ViewFrame {
    pub fn items_left_label(&self) -> String {
        items_left_label(self.items_left)
    }

    /// Returns the row displayed at `position` (0-based, visible order).
    pub fn row_at(&self, position: usize) -> Option<&ViewRow> {
        self.rows.get(position)
    }

    pub fn row_for(&self, id: TaskId) -> Option<&ViewRow> {
        self.rows.iter().find(|row| row.id == id)
    }
}

/// Colour scheme switched by the theme toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Rendering backend driven by the projector.
pub trait ViewSink {
    /// Replaces every displayed row.
    fn render_rows(&mut self, filter: FilterMode, rows: &[ViewRow]);
    /// Refreshes one row already on screen.
    fn update_row(&mut self, row: &ViewRow);
    fn set_items_left(&mut self, label: &str);
    fn set_theme(&mut self, _theme: Theme) {}
}

/// Formats the footer counter: "1 item left", otherwise "N items left".
pub fn items_left_label(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} item{suffix} left")
}

#[cfg(test)]
mod tests {
    use super::{items_left_label, Theme};

    #[test]
    fn label_pluralizes_everything_but_one() {
        assert_eq!(items_left_label(0), "0 items left");
        assert_eq!(items_left_label(1), "1 item left");
        assert_eq!(items_left_label(2), "2 items left");
        assert_eq!(items_left_label(11), "11 items left");
    }

    #[test]
    fn theme_toggle_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
