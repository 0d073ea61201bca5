//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the to-do view and its actions to Dart via FRB.
//! - Translate core alerts and errors into plain strings.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Calls are serialized through one process-wide app instance.

use log::{error, info};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, Alert, EditPrompt,
    ListBody, ListViewConfig, SlotTaskRepository, SqliteSlot, TaskId, TodoApp,
};

type FfiApp = TodoApp<SlotTaskRepository<SqliteSlot>>;

const NOT_OPENED_MESSAGE: &str = "todo store is not open; call todo_open first";
const TASK_NOT_FOUND_MESSAGE: &str = "Task not found.";

static APP: Mutex<Option<FfiApp>> = Mutex::new(None);

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRowDto {
    /// Stable task ID in string form.
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub status_label: String,
}

/// Full view snapshot for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoViewDto {
    pub app_title: String,
    pub title: String,
    /// Set only when the list is empty.
    pub empty_message: Option<String>,
    pub rows: Vec<TodoRowDto>,
    /// Current content of the new-task input.
    pub input: String,
}

/// Result envelope for one user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    pub ok: bool,
    /// Blocking message to show the user, if any.
    pub alert: Option<String>,
}

impl TodoActionResponse {
    fn success() -> Self {
        Self {
            ok: true,
            alert: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            alert: Some(message.into()),
        }
    }
}

impl From<Result<(), Alert>> for TodoActionResponse {
    fn from(value: Result<(), Alert>) -> Self {
        match value {
            Ok(()) => Self::success(),
            Err(alert) => Self::failure(alert.message),
        }
    }
}

/// Opens the SQLite slot at `db_path` and rebuilds the app from it.
///
/// # FFI contract
/// - Sync call; performs file-system and migration work.
/// - Replaces any previously opened app.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_open(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }

    match SqliteSlot::open(trimmed) {
        Ok(slot) => {
            let app = TodoApp::new(SlotTaskRepository::new(slot), ListViewConfig::default());
            *lock_app() = Some(app);
            info!("event=todo_open module=ffi status=ok");
            String::new()
        }
        Err(err) => {
            error!("event=todo_open module=ffi status=error error={err}");
            format!("todo_open failed: {err}")
        }
    }
}

/// Returns the current view snapshot, or an empty view before `todo_open`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_view() -> TodoViewDto {
    match lock_app().as_ref() {
        Some(app) => to_view_dto(app),
        None => TodoViewDto {
            app_title: String::new(),
            title: String::new(),
            empty_message: Some(NOT_OPENED_MESSAGE.to_string()),
            rows: Vec::new(),
            input: String::new(),
        },
    }
}

/// Updates the new-task input text.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_set_input(text: String) -> TodoActionResponse {
    with_app(|app| {
        app.set_input(text);
        Ok(())
    })
}

/// Submits the current input as a new task.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_submit() -> TodoActionResponse {
    with_app(|app| app.submit())
}

/// Flips the completion flag of one task.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(id: String) -> TodoActionResponse {
    with_task(&id, |app, id| app.toggle(id))
}

/// Applies the result of the edit prompt to one task.
///
/// `confirmed = false` means the user dismissed the prompt.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_edit(id: String, confirmed: bool, value: String) -> TodoActionResponse {
    let prompt = EditPrompt { confirmed, value };
    with_task(&id, |app, id| app.edit(id, &prompt))
}

/// Deletes one task. Unknown ids are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(id: String) -> TodoActionResponse {
    match parse_task_id(&id) {
        Some(id) => with_app(|app| {
            app.delete(id);
            Ok(())
        }),
        None => with_app(|_| Ok(())),
    }
}

fn lock_app() -> MutexGuard<'static, Option<FfiApp>> {
    // A panic mid-action cannot leave the store half-written; keep serving.
    APP.lock().unwrap_or_else(PoisonError::into_inner)
}

fn with_app(f: impl FnOnce(&mut FfiApp) -> Result<(), Alert>) -> TodoActionResponse {
    match lock_app().as_mut() {
        Some(app) => f(app).into(),
        None => TodoActionResponse::failure(NOT_OPENED_MESSAGE),
    }
}

fn with_task(
    id: &str,
    f: impl FnOnce(&mut FfiApp, TaskId) -> Result<(), Alert>,
) -> TodoActionResponse {
    match parse_task_id(id) {
        Some(task_id) => with_app(|app| f(app, task_id)),
        None => with_app(|_| Err(Alert::new(TASK_NOT_FOUND_MESSAGE))),
    }
}

fn parse_task_id(raw: &str) -> Option<TaskId> {
    TaskId::parse_str(raw.trim()).ok()
}

fn to_view_dto(app: &FfiApp) -> TodoViewDto {
    let view = app.view();
    let empty_message = match &view.body {
        ListBody::Empty { message } => Some(message.clone()),
        ListBody::Rows(_) => None,
    };
    TodoViewDto {
        app_title: view.app_title.clone(),
        title: view.title.clone(),
        empty_message,
        rows: view
            .rows()
            .iter()
            .map(|row| TodoRowDto {
                id: row.id.to_string(),
                text: row.text.clone(),
                completed: row.completed,
                status_label: row.status_label.to_string(),
            })
            .collect(),
        input: app.form().input().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, todo_delete, todo_edit, todo_open, todo_set_input,
        todo_submit, todo_toggle, todo_view,
    };
    use std::sync::Mutex;

    // Tests share the process-wide app; run them one at a time.
    static SERIAL: Mutex<()> = Mutex::new(());

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_arguments() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn todo_open_rejects_empty_path() {
        assert!(!todo_open("  ".to_string()).is_empty());
    }

    #[test]
    fn full_flow_persists_across_reopen() {
        let _guard = SERIAL.lock().unwrap_or_else(|err| err.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("todos.db").to_str().unwrap().to_string();

        assert_eq!(todo_open(db_path.clone()), "");
        let view = todo_view();
        assert_eq!(view.app_title, "My Tasks");
        assert_eq!(view.rows.len(), 0);
        assert!(view.empty_message.is_some());

        assert!(todo_set_input("buy milk".to_string()).ok);
        assert_eq!(todo_view().input, "buy milk");
        assert!(todo_submit().ok);

        let view = todo_view();
        assert_eq!(view.input, "");
        assert_eq!(view.empty_message, None);
        let id = view.rows[0].id.clone();

        assert!(todo_toggle(id.clone()).ok);
        assert!(todo_edit(id.clone(), true, "buy oat milk".to_string()).ok);
        let cancelled = todo_edit(id.clone(), false, String::new());
        assert!(cancelled.ok);
        assert_eq!(cancelled.alert, None);

        assert_eq!(todo_open(db_path), "");
        let row = todo_view().rows[0].clone();
        assert_eq!(row.id, id);
        assert_eq!(row.text, "buy oat milk");
        assert!(row.completed);

        assert!(todo_delete(id).ok);
        assert!(todo_view().rows.is_empty());
    }

    #[test]
    fn invalid_actions_return_alerts() {
        let _guard = SERIAL.lock().unwrap_or_else(|err| err.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("alerts.db").to_str().unwrap().to_string();
        assert_eq!(todo_open(db_path), "");

        todo_set_input("   ".to_string());
        let blank = todo_submit();
        assert!(!blank.ok);
        assert_eq!(blank.alert.as_deref(), Some("Please enter a task."));

        let bad_id = todo_toggle("not-a-uuid".to_string());
        assert_eq!(bad_id.alert.as_deref(), Some("Task not found."));

        let unknown = todo_edit(
            "11111111-2222-4333-8444-555555555555".to_string(),
            true,
            "x".to_string(),
        );
        assert_eq!(unknown.alert.as_deref(), Some("Task not found."));

        assert!(todo_delete("not-a-uuid".to_string()).ok);
    }
}
