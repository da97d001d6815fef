//! Task list use-case service.
//!
//! # Responsibility
//! - Own the task list, its store and its projector for one session.
//! - Map discrete UI intents (`Command`) onto list operations.
//! - Run every mutation as: mutate -> save -> re-filter -> render.
//!
//! # Invariants
//! - Dispatch never fails; rejected intents leave list and view untouched.
//! - A failed save never rolls back or blocks the in-memory mutation.
//! - Every mutation that changes the list is persisted, reorder included.
//! - Tasks are addressed by `TaskId`; positions are resolved at dispatch.

use crate::config::WidgetConfig;
use crate::filter::FilterMode;
use crate::model::task::TaskId;
use crate::model::task_list::{TaskList, TaskListError};
use crate::reorder::{ReorderCoordinator, ReorderMove};
use crate::repo::snapshot_store::{LoadOutcome, SnapshotStore, StoreError};
use crate::view::{Projector, Theme, ViewFrame, ViewSink};
use log::{debug, info, warn};

/// Discrete UI intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text submitted from the input field.
    Add(String),
    Toggle(TaskId),
    Delete(TaskId),
    SetFilter(FilterMode),
    /// Move `from` so it lands immediately before `to`.
    Reorder { from: TaskId, to: TaskId },
    DragStart(TaskId),
    Drop(TaskId),
    ClearCompleted,
    ToggleTheme,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Toggle(_) => "toggle",
            Self::Delete(_) => "delete",
            Self::SetFilter(_) => "set_filter",
            Self::Reorder { .. } => "reorder",
            Self::DragStart(_) => "drag_start",
            Self::Drop(_) => "drop",
            Self::ClearCompleted => "clear_completed",
            Self::ToggleTheme => "toggle_theme",
        }
    }
}

/// What a dispatched command did.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// List changed, was saved and rendered.
    Applied,
    /// List changed and was rendered, but the save failed.
    AppliedUnsaved(StoreError),
    /// Accepted, but the list did not change.
    Unchanged,
    /// Rejected without touching list or view.
    Ignored(TaskListError),
}

impl DispatchOutcome {
    pub fn changed_list(&self) -> bool {
        matches!(self, Self::Applied | Self::AppliedUnsaved(_))
    }
}

/// Result of startup hydration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationOutcome {
    /// No snapshot was stored.
    Empty,
    Restored(usize),
    /// Stored snapshot was unreadable; the session starts empty.
    Discarded(TaskListError),
}

/// One widget session: list, persistence and view.
pub struct TaskListService<S: SnapshotStore, V: ViewSink> {
    list: TaskList,
    store: S,
    projector: Projector<V>,
    reorder: ReorderCoordinator,
    config: WidgetConfig,
}

impl<S: SnapshotStore, V: ViewSink> TaskListService<S, V> {
    /// Creates a session with an empty list; call `start` to hydrate.
    pub fn new(store: S, sink: V, config: WidgetConfig) -> Self {
        let projector = Projector::new(sink, config.initial_filter);
        Self {
            list: TaskList::new(),
            store,
            projector,
            reorder: ReorderCoordinator::new(),
            config,
        }
    }

    /// Hydrates from the store (full replacement) and renders the first frame.
    pub fn start(&mut self) -> HydrationOutcome {
        let outcome = match self.store.load() {
            LoadOutcome::Absent => {
                self.list = TaskList::new();
                HydrationOutcome::Empty
            }
            LoadOutcome::Snapshot(bytes) => match self.list.hydrate(&bytes) {
                Ok(count) => HydrationOutcome::Restored(count),
                Err(err) => {
                    warn!(
                        "event=hydrate module=service status=error namespace={} error={}",
                        self.config.namespace, err
                    );
                    HydrationOutcome::Discarded(err)
                }
            },
        };

        info!(
            "event=hydrate module=service status=ok namespace={} tasks={}",
            self.config.namespace,
            self.list.len()
        );
        self.projector.render(&self.list);
        outcome
    }

    pub fn tasks(&self) -> &TaskList {
        &self.list
    }

    pub fn frame(&self) -> &ViewFrame {
        self.projector.frame()
    }

    pub fn filter(&self) -> FilterMode {
        self.projector.filter()
    }

    pub fn theme(&self) -> Theme {
        self.projector.theme()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn sink(&self) -> &V {
        self.projector.sink()
    }

    /// Direct sink access for host-side drawing; must not alter rows.
    pub fn sink_mut(&mut self) -> &mut V {
        self.projector.sink_mut()
    }

    /// Handles one UI intent to completion.
    pub fn dispatch(&mut self, command: Command) -> DispatchOutcome {
        let name = command.name();
        let outcome = match self.apply(command) {
            Ok(outcome) => outcome,
            Err(err) => DispatchOutcome::Ignored(err),
        };

        match &outcome {
            DispatchOutcome::Ignored(err) => warn!(
                "event=dispatch module=service status=ignored command={name} error={err}"
            ),
            DispatchOutcome::AppliedUnsaved(err) => warn!(
                "event=dispatch module=service status=unsaved command={name} error={err}"
            ),
            DispatchOutcome::Applied | DispatchOutcome::Unchanged => debug!(
                "event=dispatch module=service status=ok command={name} tasks={} changed={}",
                self.list.len(),
                outcome.changed_list()
            ),
        }
        outcome
    }

    fn apply(&mut self, command: Command) -> Result<DispatchOutcome, TaskListError> {
        match command {
            Command::Add(text) => {
                self.list.add(&text)?;
                Ok(self.commit_and_render())
            }
            Command::Toggle(id) => {
                let index = self.list.position(id)?;
                self.list.toggle(index)?;
                let saved = self.persist();
                self.projector.refresh_task(&self.list, id);
                Ok(saved_outcome(saved))
            }
            Command::Delete(id) => {
                let index = self.list.position(id)?;
                self.list.delete(index)?;
                Ok(self.commit_and_render())
            }
            Command::SetFilter(mode) => {
                self.projector.set_filter(&self.list, mode);
                Ok(DispatchOutcome::Unchanged)
            }
            Command::Reorder { from, to } => {
                let planned = ReorderMove {
                    from: self.list.position(from)?,
                    to: self.list.position(to)?,
                };
                self.apply_move(planned)
            }
            Command::DragStart(id) => {
                self.list.position(id)?;
                self.reorder.drag_start(id);
                Ok(DispatchOutcome::Unchanged)
            }
            Command::Drop(target) => {
                let planned = self.reorder.drop_on(target, self.projector.frame())?;
                match planned {
                    Some(planned) => self.apply_move(planned),
                    None => Ok(DispatchOutcome::Unchanged),
                }
            }
            Command::ClearCompleted => {
                if self.list.clear_completed() == 0 {
                    return Ok(DispatchOutcome::Unchanged);
                }
                Ok(self.commit_and_render())
            }
            Command::ToggleTheme => {
                self.projector.toggle_theme();
                Ok(DispatchOutcome::Unchanged)
            }
        }
    }

    fn apply_move(&mut self, planned: ReorderMove) -> Result<DispatchOutcome, TaskListError> {
        if !self.list.reorder(planned.from, planned.to)? {
            return Ok(DispatchOutcome::Unchanged);
        }
        Ok(self.commit_and_render())
    }

    fn commit_and_render(&mut self) -> DispatchOutcome {
        let saved = self.persist();
        self.projector.render(&self.list);
        saved_outcome(saved)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let snapshot = self
            .list
            .to_snapshot()
            .map_err(|err| StoreError::Encode(err.to_string()))?;
        self.store.save(&snapshot).inspect_err(|err| {
            warn!(
                "event=snapshot_save module=service status=error namespace={} bytes={} error={}",
                self.config.namespace,
                snapshot.len(),
                err
            );
        })
    }
}

fn saved_outcome(saved: Result<(), StoreError>) -> DispatchOutcome {
    match saved {
        Ok(()) => DispatchOutcome::Applied,
        Err(err) => DispatchOutcome::AppliedUnsaved(err),
    }
}
