//! New-task submission control.

use crate::model::task::TaskDraft;

/// Free-text input local to the submission control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    input: String,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Takes the current input as a draft and clears the field.
    ///
    /// The draft is not validated here; blank text is rejected by the store.
    pub fn submit(&mut self) -> TaskDraft {
        let text = std::mem::take(&mut self.input);
        TaskDraft {
            text: Some(text.trim().to_string()),
            completed: Some(false),
        }
    }
}
