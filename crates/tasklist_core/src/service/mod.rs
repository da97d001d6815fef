//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate list mutations, persistence and view refresh per UI intent.
//! - Keep hosts decoupled from storage and rendering details.

pub mod task_list_service;
