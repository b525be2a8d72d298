//! Core task operations shared between the TUI and the CLI
//!
//! `TaskService` is the only code path that mutates the task collection. It
//! owns the `TaskStore`, validates input, applies each mutation in memory and
//! then persists the whole list.
//!
//! ## Architecture
//!
//! ```text
//! TUI (src/app.rs)  ──┐
//!                     ├──> operations::tasks (this module) ──> storage::tasks::TaskStore
//! CLI (src/cli)  ─────┘
//! ```
//!
//! A logical failure (`NotFound`, `Validation`) is returned as `Err` before
//! anything is touched. A failed save after a successful mutation is reported
//! through [`Applied::storage_error`]; the in-memory change is kept.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{Result, TaskError};
use crate::storage::config::TasksConfig;
use crate::storage::tasks::{Task, TaskStore};

/// Input validation rules for task names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Accept names that are empty after trimming
    pub allow_empty_name: bool,
}

impl From<&TasksConfig> for ValidationPolicy {
    fn from(config: &TasksConfig) -> Self {
        Self {
            allow_empty_name: config.allow_empty_name,
        }
    }
}

/// Result of a mutation that was applied in memory
///
/// `storage_error` is set when the follow-up save failed; the change is live
/// but may not survive a restart.
#[must_use]
#[derive(Debug)]
pub struct Applied<T> {
    pub value: T,
    pub storage_error: Option<TaskError>,
}

impl<T> Applied<T> {
    /// Treat a failed save as an error (for callers that exit right after)
    pub fn into_persisted(self) -> Result<T> {
        match self.storage_error {
            Some(e) => Err(e),
            None => Ok(self.value),
        }
    }
}

/// Task mutation service
#[derive(Debug)]
pub struct TaskService {
    store: TaskStore,
    policy: ValidationPolicy,
}

impl TaskService {
    pub fn new(store: TaskStore, policy: ValidationPolicy) -> Self {
        Self { store, policy }
    }

    /// Open the store in `data_dir` and wrap it
    pub fn open(data_dir: &Path, policy: ValidationPolicy) -> Result<Self> {
        Ok(Self::new(TaskStore::open_in(data_dir)?, policy))
    }

    /// Tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Create a task at the end of the list
    ///
    /// # Errors
    ///
    /// `Validation` if the name is empty and the policy rejects empty names.
    pub fn add_task(&mut self, name: &str, due_date: DateTime<Utc>) -> Result<Applied<Task>> {
        let name = self.validate_name(name)?;

        let task = Task {
            id: self.store.next_id(),
            name,
            due_date,
            is_completed: false,
        };
        self.store.tasks_mut().push(task.clone());
        debug!(id = task.id, "added task");

        Ok(self.persist(task))
    }

    /// Replace name and due date; id and completion are kept
    ///
    /// # Errors
    ///
    /// - `Validation` for a rejected name
    /// - `NotFound` if no task has this id
    pub fn edit_task(
        &mut self,
        id: u64,
        new_name: &str,
        new_due_date: DateTime<Utc>,
    ) -> Result<Applied<()>> {
        let name = self.validate_name(new_name)?;

        let task = self.find_mut(id)?;
        task.name = name;
        task.due_date = new_due_date;
        debug!(id, "edited task");

        Ok(self.persist(()))
    }

    /// Flip completion, returning the new value
    pub fn toggle_complete(&mut self, id: u64) -> Result<Applied<bool>> {
        let task = self.find_mut(id)?;
        task.is_completed = !task.is_completed;
        let completed = task.is_completed;
        debug!(id, completed, "toggled task");

        Ok(self.persist(completed))
    }

    /// Remove a task; removing an absent id is a no-op returning `false`
    pub fn delete_task(&mut self, id: u64) -> Applied<bool> {
        let tasks = self.store.tasks_mut();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        let removed = tasks.len() != before;
        debug!(id, removed, "deleted task");

        self.persist(removed)
    }

    /// Remove every completed task in one pass, keeping the order of the rest
    pub fn delete_completed(&mut self) -> Applied<usize> {
        let tasks = self.store.tasks_mut();
        let before = tasks.len();
        tasks.retain(|t| !t.is_completed);
        let removed = before - tasks.len();
        debug!(removed, "deleted completed tasks");

        self.persist(removed)
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut Task> {
        self.store
            .tasks_mut()
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    fn validate_name(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() && !self.policy.allow_empty_name {
            return Err(TaskError::validation("task name must not be empty"));
        }
        Ok(name.to_string())
    }

    fn persist<T>(&self, value: T) -> Applied<T> {
        let storage_error = match self.store.commit() {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "task change kept in memory but not saved");
                Some(e)
            }
        };
        Applied {
            value,
            storage_error,
        }
    }
}
