//! Domain model for the task list widget.
//!
//! # Responsibility
//! - Define the canonical task record and the ordered list that owns it.
//! - Keep every mutation rule in one place so view and storage stay derived.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - List order is display order for the `all` filter.

pub mod task;
pub mod task_list;
