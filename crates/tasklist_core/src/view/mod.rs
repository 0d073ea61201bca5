//! Presentation tree for the to-do list.
//!
//! # Responsibility
//! - Project the store's current list into renderable view data.
//! - Capture user intent (submit, toggle, edit, delete) and delegate every
//!   mutation to the store.
//!
//! # Invariants
//! - Views hold no authoritative task data; the only local state is the
//!   form's in-progress input.
//! - Rejections reach the user as `Alert`s; storage errors never do.

mod app;
mod form;
mod list;

pub use app::TodoApp;
pub use form::TaskForm;
pub use list::{EditPrompt, ListBody, ListView, ListViewConfig, TaskRow};

use crate::service::task_store::TaskStoreError;
use std::fmt::{Display, Formatter};

/// Blocking user-facing warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

impl Alert {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for Alert {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<TaskStoreError> for Alert {
    fn from(value: TaskStoreError) -> Self {
        Self::new(value.to_string())
    }
}
