//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record and its wire shape.
//! - Define the draft (create) and patch (partial update) inputs.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `text` is trimmed and non-empty.
//! - Deserialization validates records, so invalid persisted data is rejected
//!   instead of being masked.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one task.
pub type TaskId = Uuid;

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The nil UUID is reserved and never identifies a task.
    NilId,
    /// Text is empty or whitespace-only.
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::EmptyText => write!(f, "task text must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do record.
///
/// Fields are private: tasks are created by the store's add operation or by
/// deserializing persisted data, and changed only through `TaskPatch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
}

#[derive(Deserialize)]
struct RawTask {
    id: TaskId,
    text: String,
    #[serde(default)]
    completed: bool,
}

impl TryFrom<RawTask> for Task {
    type Error = TaskValidationError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        Task::new(raw.id, raw.text, raw.completed)
    }
}

impl Task {
    /// Builds a validated task. Text is stored trimmed.
    pub(crate) fn new(
        id: TaskId,
        text: impl AsRef<str>,
        completed: bool,
    ) -> Result<Self, TaskValidationError> {
        if id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        let text = normalize_text(text.as_ref()).ok_or(TaskValidationError::EmptyText)?;
        Ok(Self {
            id,
            text,
            completed,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns a copy with `patch` merged on top.
    ///
    /// Fields absent from `patch` are left untouched; `id` never changes.
    pub(crate) fn merged(&self, patch: &TaskPatch) -> Result<Self, TaskValidationError> {
        let text = match patch.text.as_deref() {
            Some(text) => normalize_text(text).ok_or(TaskValidationError::EmptyText)?,
            None => self.text.clone(),
        };
        Ok(Self {
            id: self.id,
            text,
            completed: patch.completed.unwrap_or(self.completed),
        })
    }
}

/// Candidate record for the add operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl TaskDraft {
    /// Draft with text and the default completion state.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }
}

/// Partial update for one task. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }
}

/// Trims `value`, returning `None` for blank input.
pub(crate) fn normalize_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
