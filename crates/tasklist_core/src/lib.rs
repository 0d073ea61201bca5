//! Core logic for the to-do list.
//! This crate is the single source of truth for task invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod slot;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
pub use repo::task_repo::{
    decode_task_list, RepoError, RepoResult, SlotTaskRepository, TaskRepository,
    TASKS_STORAGE_KEY,
};
pub use service::task_store::{TaskList, TaskListSubscription, TaskStore, TaskStoreError};
pub use slot::{KeyValueSlot, MemorySlot, SlotError, SlotResult, SqliteSlot};
pub use view::{
    Alert, EditPrompt, ListBody, ListView, ListViewConfig, TaskForm, TaskRow, TodoApp,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
