//! Persistence collaborators for the task list.
//!
//! # Responsibility
//! - Define the `load()`/`save(list)` contract the store depends on.
//! - Keep serialization and slot details out of the store.
//!
//! # Invariants
//! - The whole list is written on every save; there are no partial updates.
//! - Read paths reject malformed data instead of masking it; the caller
//!   decides how to recover.

pub mod task_repo;
