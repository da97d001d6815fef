//! Projector: keeps a `ViewSink` consistent with the task list.

use super::{items_left_label, Theme, ViewFrame, ViewRow, ViewSink};
use crate::filter::{select_view, FilterMode};
use crate::model::task::TaskId;
use crate::model::task_list::TaskList;
use log::debug;

/// Renders a task list through the active filter into a sink.
pub struct Projector<V: ViewSink> {
    sink: V,
    frame: ViewFrame,
    theme: Theme,
}

impl<V: ViewSink> Projector<V> {
    pub fn new(sink: V, filter: FilterMode) -> Self {
        Self {
            sink,
            frame: ViewFrame {
                filter,
                ..ViewFrame::default()
            },
            theme: Theme::default(),
        }
    }

    pub fn filter(&self) -> FilterMode {
        self.frame.filter
    }

    pub fn frame(&self) -> &ViewFrame {
        &self.frame
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn sink(&self) -> &V {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut V {
        &mut self.sink
    }

    /// Switches the filter and re-renders.
    pub fn set_filter(&mut self, list: &TaskList, filter: FilterMode) {
        self.frame.filter = filter;
        self.render(list);
    }

    /// Full re-render of rows and counter.
    pub fn render(&mut self, list: &TaskList) {
        let rows: Vec<ViewRow> = select_view(list.tasks(), self.frame.filter)
            .into_iter()
            .map(|entry| ViewRow {
                id: entry.task.id,
                index: entry.index,
                description: entry.task.description.clone(),
                completed: entry.task.completed,
            })
            .collect();

        debug!(
            "event=view_render module=view status=ok filter={} rows={} tasks={}",
            self.frame.filter,
            rows.len(),
            list.len()
        );
        self.sink.render_rows(self.frame.filter, &rows);
        self.frame.rows = rows;
        self.refresh_items_left(list);
    }

    /// Targeted refresh after a single task changed state.
    ///
    /// Falls back to a full render when the task enters or leaves the
    /// filtered view.
    pub fn refresh_task(&mut self, list: &TaskList, id: TaskId) {
        let Ok(index) = list.position(id) else {
            self.render(list);
            return;
        };
        let Some(task) = list.get(index) else {
            self.render(list);
            return;
        };

        let admitted = self.frame.filter.admits(task);
        let slot = self.frame.rows.iter().position(|row| row.id == id);
        match (admitted, slot) {
            (true, Some(slot)) => {
                let row = &mut self.frame.rows[slot];
                row.index = index;
                row.completed = task.completed;
                self.sink.update_row(row);
                self.refresh_items_left(list);
            }
            _ => self.render(list),
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.sink.set_theme(self.theme);
        self.theme
    }

    fn refresh_items_left(&mut self, list: &TaskList) {
        self.frame.items_left = list.items_left();
        self.sink.set_items_left(&items_left_label(self.frame.items_left));
    }
}
