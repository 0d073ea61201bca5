//! Task list repository contract and slot-backed implementation.
//!
//! # Responsibility
//! - Serialize the full task list as one JSON array.
//! - Mirror it into a `KeyValueSlot` under a fixed key.
//!
//! # Invariants
//! - An absent slot value loads as an empty list.
//! - Unparseable JSON, a non-array document, invalid records and duplicate
//!   ids all surface as `RepoError::InvalidData`.

use crate::model::task::{Task, TaskId};
use crate::slot::{KeyValueSlot, SlotError};
use log::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed slot key holding the serialized task list.
pub const TASKS_STORAGE_KEY: &str = "todos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task list load/save.
#[derive(Debug)]
pub enum RepoError {
    Slot(SlotError),
    Serialize(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slot(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize task list: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task list: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Slot(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<SlotError> for RepoError {
    fn from(value: SlotError) -> Self {
        Self::Slot(value)
    }
}

/// Persistence collaborator injected into the task store.
pub trait TaskRepository {
    /// Reads the persisted list. Absent data is an empty list.
    fn load(&self) -> RepoResult<Vec<Task>>;
    /// Overwrites the persisted list with `tasks`.
    fn save(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// Repository storing the list as JSON in one key-value slot.
#[derive(Debug, Clone)]
pub struct SlotTaskRepository<S: KeyValueSlot> {
    slot: S,
    key: String,
}

impl<S: KeyValueSlot> SlotTaskRepository<S> {
    /// Uses the fixed `TASKS_STORAGE_KEY`.
    pub fn new(slot: S) -> Self {
        Self::with_key(slot, TASKS_STORAGE_KEY)
    }

    /// Uses a caller-chosen key, for embedding several lists in one slot.
    pub fn with_key(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }
}

impl<S: KeyValueSlot> TaskRepository for SlotTaskRepository<S> {
    fn load(&self) -> RepoResult<Vec<Task>> {
        match self.slot.get_item(&self.key)? {
            Some(raw) => decode_task_list(&raw),
            None => {
                debug!("event=tasks_load module=repo status=empty key={}", self.key);
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let raw = serde_json::to_string(tasks).map_err(RepoError::Serialize)?;
        self.slot.set_item(&self.key, &raw)?;
        Ok(())
    }
}

/// Parses a serialized task list document.
///
/// The document must be a JSON array of valid task records with unique ids.
pub fn decode_task_list(raw: &str) -> RepoResult<Vec<Task>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("not valid JSON: {err}")))?;
    if !value.is_array() {
        return Err(RepoError::InvalidData(format!(
            "expected an array, found {}",
            json_kind(&value)
        )));
    }

    let tasks: Vec<Task> = serde_json::from_value(value)
        .map_err(|err| RepoError::InvalidData(format!("invalid task record: {err}")))?;

    let mut seen: HashSet<TaskId> = HashSet::with_capacity(tasks.len());
    if let Some(duplicate) = tasks.iter().find(|task| !seen.insert(task.id())) {
        return Err(RepoError::InvalidData(format!(
            "duplicate task id {}",
            duplicate.id()
        )));
    }

    Ok(tasks)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_task_list, RepoError};

    #[test]
    fn decode_rejects_non_array_documents() {
        for raw in ["{}", "null", "42", "\"todos\""] {
            let err = decode_task_list(raw).unwrap_err();
            assert!(
                matches!(err, RepoError::InvalidData(ref message) if message.contains("expected an array")),
                "unexpected error for {raw}: {err}"
            );
        }
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let raw = r#"[
            {"id": "11111111-2222-4333-8444-555555555555", "text": "a", "completed": false},
            {"id": "11111111-2222-4333-8444-555555555555", "text": "b", "completed": true}
        ]"#;
        let err = decode_task_list(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate task id"));
    }

    #[test]
    fn decode_defaults_missing_completed_flag() {
        let raw = r#"[{"id": "11111111-2222-4333-8444-555555555555", "text": "a"}]"#;
        let tasks = decode_task_list(raw).unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].is_completed());
    }
}
