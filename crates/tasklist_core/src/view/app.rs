//! Composition root wiring the store to the presentation tree.

use super::{Alert, EditPrompt, ListView, ListViewConfig, TaskForm};
use crate::model::task::{TaskId, TaskPatch};
use crate::repo::task_repo::TaskRepository;
use crate::service::task_store::{TaskList, TaskListSubscription, TaskStore};
use std::sync::Arc;

/// Single-view to-do application.
///
/// Every action runs to completion, then the app re-projects the list if
/// the store reported a new one.
pub struct TodoApp<R: TaskRepository> {
    store: TaskStore<R>,
    subscription: TaskListSubscription,
    config: ListViewConfig,
    form: TaskForm,
    rendered: TaskList,
    view: ListView,
}

impl<R: TaskRepository> TodoApp<R> {
    /// Initializes the store from `repo` and renders the first view.
    pub fn new(repo: R, config: ListViewConfig) -> Self {
        let mut store = TaskStore::initialize(repo);
        let subscription = store.subscribe();
        let rendered = store.tasks();
        let view = ListView::project(&rendered, &config);
        Self {
            store,
            subscription,
            config,
            form: TaskForm::new(),
            rendered,
            view,
        }
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn store(&self) -> &TaskStore<R> {
        &self.store
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.form.set_input(value);
    }

    /// Submits the form's input as a new task.
    ///
    /// The input is cleared even when the store rejects the draft.
    pub fn submit(&mut self) -> Result<(), Alert> {
        let draft = self.form.submit();
        let result = self.store.add(draft).map(|_| ());
        self.refresh();
        result.map_err(Alert::from)
    }

    /// Flips the completion flag of the row with `id`.
    pub fn toggle(&mut self, id: TaskId) -> Result<(), Alert> {
        // An unknown id still goes through the store so it reports not-found.
        let patch = self
            .view
            .row(id)
            .map(|row| row.toggle_patch())
            .unwrap_or_default();
        self.apply_update(id, patch)
    }

    /// Applies an edit prompt result to the row with `id`.
    ///
    /// The prompt is checked before the id: a dismissed prompt is silent and
    /// blank text alerts even when `id` is unknown.
    pub fn edit(&mut self, id: TaskId, prompt: &EditPrompt) -> Result<(), Alert> {
        match prompt.patch()? {
            Some(patch) => self.apply_update(id, patch),
            None => Ok(()),
        }
    }

    /// Deletes the row with `id`; unknown ids are ignored.
    pub fn delete(&mut self, id: TaskId) {
        self.store.delete(id);
        self.refresh();
    }

    fn apply_update(&mut self, id: TaskId, patch: TaskPatch) -> Result<(), Alert> {
        let result = self.store.update(id, patch);
        self.refresh();
        result.map_err(Alert::from)
    }

    fn refresh(&mut self) {
        let Some(latest) = self.subscription.latest() else {
            return;
        };
        if Arc::ptr_eq(&latest, &self.rendered) {
            return;
        }
        self.view = ListView::project(&latest, &self.config);
        self.rendered = latest;
    }
}
