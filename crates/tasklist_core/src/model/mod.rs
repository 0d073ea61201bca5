//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the task record and the input shapes used to create or change it.
//!
//! # Invariants
//! - Every task is identified by a non-nil `TaskId`.
//! - Task text is trimmed and non-empty once accepted.

pub mod task;
