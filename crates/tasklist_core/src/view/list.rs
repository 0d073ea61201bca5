//! List projection and per-row affordances.

use super::Alert;
use crate::model::task::{normalize_text, Task, TaskId, TaskPatch};
use crate::service::task_store::TaskStoreError;

const DEFAULT_APP_TITLE: &str = "My Tasks";
const DEFAULT_LIST_TITLE: &str = "Today's tasks";
const DEFAULT_EMPTY_MESSAGE: &str = "Add a new task!";
const STATUS_DONE: &str = "Done";
const STATUS_OPEN: &str = "Not done";

/// Static texts of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewConfig {
    /// Page heading above the list.
    pub app_title: String,
    pub list_title: String,
    pub empty_message: String,
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self {
            app_title: DEFAULT_APP_TITLE.to_string(),
            list_title: DEFAULT_LIST_TITLE.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

/// Renderable projection of one task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub app_title: String,
    pub title: String,
    pub body: ListBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Empty { message: String },
    /// One row per task, in list order.
    Rows(Vec<TaskRow>),
}

impl ListView {
    /// Projects `tasks` into view data. Pure: same input, same output.
    pub fn project(tasks: &[Task], config: &ListViewConfig) -> Self {
        let body = if tasks.is_empty() {
            ListBody::Empty {
                message: config.empty_message.clone(),
            }
        } else {
            ListBody::Rows(tasks.iter().map(TaskRow::from_task).collect())
        };
        Self {
            app_title: config.app_title.clone(),
            title: config.list_title.clone(),
            body,
        }
    }

    pub fn rows(&self) -> &[TaskRow] {
        match &self.body {
            ListBody::Rows(rows) => rows,
            ListBody::Empty { .. } => &[],
        }
    }

    pub fn row(&self, id: TaskId) -> Option<&TaskRow> {
        self.rows().iter().find(|row| row.id == id)
    }
}

/// Result of the edit affordance's text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPrompt {
    /// `false` when the user dismissed the prompt.
    pub confirmed: bool,
    pub value: String,
}

impl EditPrompt {
    pub fn confirmed(value: impl Into<String>) -> Self {
        Self {
            confirmed: true,
            value: value.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            confirmed: false,
            value: String::new(),
        }
    }

    /// Patch for this prompt result.
    ///
    /// Returns `Ok(None)` when the prompt was dismissed and an `Alert` when
    /// it was confirmed with blank text. Independent of the target task.
    pub fn patch(&self) -> Result<Option<TaskPatch>, Alert> {
        if !self.confirmed {
            return Ok(None);
        }
        let text = normalize_text(&self.value).ok_or(TaskStoreError::EmptyText)?;
        Ok(Some(TaskPatch::text(text)))
    }
}

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub status_label: &'static str,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id(),
            text: task.text().to_string(),
            completed: task.is_completed(),
            status_label: if task.is_completed() {
                STATUS_DONE
            } else {
                STATUS_OPEN
            },
        }
    }

    /// Patch flipping the completion flag.
    pub fn toggle_patch(&self) -> TaskPatch {
        TaskPatch::completed(!self.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::{EditPrompt, ListBody, ListView, ListViewConfig, TaskRow};
    use crate::model::task::{Task, TaskPatch};
    use uuid::Uuid;

    fn row(completed: bool) -> TaskRow {
        let task = Task::new(Uuid::new_v4(), "walk dog", completed).unwrap();
        TaskRow::from_task(&task)
    }

    #[test]
    fn empty_list_projects_empty_message() {
        let config = ListViewConfig {
            list_title: "Chores".to_string(),
            empty_message: "Nothing to do".to_string(),
            ..ListViewConfig::default()
        };
        let view = ListView::project(&[], &config);
        assert_eq!(view.app_title, "My Tasks");
        assert_eq!(view.title, "Chores");
        assert_eq!(
            view.body,
            ListBody::Empty {
                message: "Nothing to do".to_string()
            }
        );
        assert!(view.rows().is_empty());
    }

    #[test]
    fn rows_follow_list_order_and_status() {
        let first = Task::new(Uuid::new_v4(), "first", false).unwrap();
        let second = Task::new(Uuid::new_v4(), "second", true).unwrap();
        let view = ListView::project(&[first.clone(), second.clone()], &ListViewConfig::default());

        let rows = view.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, first.id());
        assert_eq!(rows[0].status_label, "Not done");
        assert_eq!(rows[1].id, second.id());
        assert_eq!(rows[1].status_label, "Done");
        assert_eq!(view.row(second.id()), Some(&rows[1]));
    }

    #[test]
    fn toggle_patch_flips_completion() {
        assert_eq!(row(false).toggle_patch(), TaskPatch::completed(true));
        assert_eq!(row(true).toggle_patch(), TaskPatch::completed(false));
    }

    #[test]
    fn edit_prompt_patch_handles_cancel_blank_and_text() {
        assert_eq!(EditPrompt::cancelled().patch(), Ok(None));
        assert_eq!(
            EditPrompt::confirmed("  feed cat ").patch(),
            Ok(Some(TaskPatch::text("feed cat")))
        );

        let alert = EditPrompt::confirmed("   ").patch().unwrap_err();
        assert_eq!(alert.message, "Please enter a task.");
    }
}
