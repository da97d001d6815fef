//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persistence contract used by the task list service.
//! - Isolate SQLite query details from list and view logic.

pub mod snapshot_store;
