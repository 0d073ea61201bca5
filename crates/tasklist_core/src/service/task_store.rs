//! Persisted list store.
//!
//! # Responsibility
//! - Own the authoritative, insertion-ordered task list.
//! - Apply add/update/delete/replace with referential replacement.
//! - Mirror every committed list into the injected repository and notify
//!   subscribers.
//!
//! # Invariants
//! - Task ids are unique within the list at all times.
//! - Every effective mutation installs a new `TaskList`; a call that changes
//!   nothing keeps the current `Arc`, skips persistence and sends nothing.
//! - Persistence failures are logged and never undo the in-memory change.

use crate::model::task::{normalize_text, Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
use crate::repo::task_repo::TaskRepository;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use uuid::Uuid;

/// Immutable snapshot of the task list.
///
/// Compare snapshots with `Arc::ptr_eq` to detect a change.
pub type TaskList = Arc<Vec<Task>>;

/// User-visible warning raised by a rejected store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStoreError {
    /// Text missing, empty or whitespace-only.
    EmptyText,
    /// No task with this id.
    NotFound(TaskId),
    /// Replacement list carries the same id twice.
    DuplicateId(TaskId),
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "Please enter a task."),
            Self::NotFound(_) => write!(f, "Task not found."),
            Self::DuplicateId(id) => write!(f, "Duplicate task id {id}."),
        }
    }
}

impl Error for TaskStoreError {}

impl From<TaskValidationError> for TaskStoreError {
    fn from(value: TaskValidationError) -> Self {
        match value {
            // Store-assigned ids are never nil, so only text can fail here.
            TaskValidationError::EmptyText | TaskValidationError::NilId => Self::EmptyText,
        }
    }
}

/// Receiving end of store change notifications.
///
/// Dropping the subscription unsubscribes it. Queued snapshots are held
/// until `latest()` drains them, so a live subscription must be drained
/// regularly (after every dispatched action, as `TodoApp` does).
#[derive(Debug)]
pub struct TaskListSubscription {
    rx: Receiver<TaskList>,
}

impl TaskListSubscription {
    /// Returns the newest list committed since the last call, if any.
    pub fn latest(&self) -> Option<TaskList> {
        self.rx.try_iter().last()
    }
}

/// Store owning the task list and its persistence.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: TaskList,
    subscribers: Vec<Sender<TaskList>>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Loads the persisted list, falling back to an empty one on failure.
    ///
    /// Load failures are logged, never returned.
    pub fn initialize(repo: R) -> Self {
        let tasks = match repo.load() {
            Ok(tasks) => {
                info!(
                    "event=tasks_load module=store status=ok count={}",
                    tasks.len()
                );
                tasks
            }
            Err(err) => {
                error!(
                    "event=tasks_load module=store status=error fallback=empty error={}",
                    err
                );
                Vec::new()
            }
        };

        Self {
            repo,
            tasks: Arc::new(tasks),
            subscribers: Vec::new(),
        }
    }

    /// Current list snapshot.
    pub fn tasks(&self) -> TaskList {
        Arc::clone(&self.tasks)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Registers a change listener.
    pub fn subscribe(&mut self) -> TaskListSubscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        TaskListSubscription { rx }
    }

    /// Appends a new task built from `draft` and returns its assigned id.
    ///
    /// # Errors
    /// - `EmptyText` when `draft.text` is missing or blank; the list is
    ///   unchanged.
    pub fn add(&mut self, draft: TaskDraft) -> Result<TaskId, TaskStoreError> {
        let text = draft
            .text
            .as_deref()
            .and_then(normalize_text)
            .ok_or_else(|| {
                warn!("event=task_add module=store status=rejected reason=empty_text");
                TaskStoreError::EmptyText
            })?;

        let id = self.fresh_id();
        let task = Task::new(id, text, draft.completed.unwrap_or(false))?;

        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.extend(self.tasks.iter().cloned());
        next.push(task);
        self.commit(next, "task_add");
        Ok(id)
    }

    /// Merges `patch` onto the task with `id`.
    ///
    /// # Errors
    /// - `NotFound` when no task has `id`.
    /// - `EmptyText` when the patch carries blank text.
    ///
    /// In both cases the list is unchanged.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> Result<(), TaskStoreError> {
        let Some(index) = self.tasks.iter().position(|task| task.id() == id) else {
            warn!("event=task_update module=store status=rejected reason=not_found id={id}");
            return Err(TaskStoreError::NotFound(id));
        };

        let merged = self.tasks[index].merged(&patch).map_err(|err| {
            warn!("event=task_update module=store status=rejected reason=empty_text id={id}");
            TaskStoreError::from(err)
        })?;
        if merged == self.tasks[index] {
            debug!("event=task_update module=store status=unchanged id={id}");
            return Ok(());
        }

        let mut next = (*self.tasks).clone();
        next[index] = merged;
        self.commit(next, "task_update");
        Ok(())
    }

    /// Removes the task with `id`. Returns whether a task was removed.
    ///
    /// An unknown id is a silent no-op.
    pub fn delete(&mut self, id: TaskId) -> bool {
        if self.get(id).is_none() {
            debug!("event=task_delete module=store status=unchanged id={id}");
            return false;
        }

        let next = self
            .tasks
            .iter()
            .filter(|task| task.id() != id)
            .cloned()
            .collect();
        self.commit(next, "task_delete");
        true
    }

    /// Replaces the whole list, keeping the given order.
    ///
    /// A list equal to the current one is a no-op.
    ///
    /// # Errors
    /// - `DuplicateId` when two tasks share an id; the list is unchanged.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> Result<(), TaskStoreError> {
        let mut seen = HashSet::with_capacity(tasks.len());
        if let Some(duplicate) = tasks.iter().find(|task| !seen.insert(task.id())) {
            warn!(
                "event=task_replace module=store status=rejected reason=duplicate_id id={}",
                duplicate.id()
            );
            return Err(TaskStoreError::DuplicateId(duplicate.id()));
        }

        if tasks.as_slice() == self.tasks.as_slice() {
            debug!("event=task_replace module=store status=unchanged");
            return Ok(());
        }

        self.commit(tasks, "task_replace");
        Ok(())
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self, next: Vec<Task>, event: &'static str) {
        self.tasks = Arc::new(next);
        debug!(
            "event={event} module=store status=ok count={}",
            self.tasks.len()
        );
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        if let Err(err) = self.repo.save(&self.tasks) {
            error!(
                "event=tasks_save module=store status=error count={} error={}",
                self.tasks.len(),
                err
            );
        }
    }

    fn notify(&mut self) {
        let tasks = &self.tasks;
        self.subscribers
            .retain(|subscriber| subscriber.send(Arc::clone(tasks)).is_ok());
    }
}
