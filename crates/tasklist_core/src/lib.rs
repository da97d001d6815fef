//! Core logic for the task list widget.
//! This crate is the single source of truth for list invariants; hosts only
//! translate user gestures into `Command`s and draw what `ViewSink` receives.

pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod reorder;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{ConfigError, WidgetConfig, DEFAULT_NAMESPACE};
pub use filter::{select_view, FilterMode, ViewEntry};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use model::task_list::{TaskList, TaskListError};
pub use reorder::{ReorderCoordinator, ReorderMove};
pub use repo::snapshot_store::{
    LoadOutcome, MemorySnapshotStore, SnapshotStore, SqliteSnapshotStore, StoreError, StoreResult,
};
pub use service::task_list_service::{Command, DispatchOutcome, HydrationOutcome, TaskListService};
pub use view::{items_left_label, Projector, Theme, ViewFrame, ViewRow, ViewSink};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
