//! Task use-case service.
//!
//! # Responsibility
//! - Provide CRUD and toggle entry points for task callers.
//! - Project the derived `Overdue` display status onto every read.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - `Overdue` is computed against the caller-supplied `today`, never
//!   written back implicitly.

use crate::model::task::{Task, TaskDraft, TaskPatch, TaskStatus};
use crate::repo::task_repo::{TaskOrder, TaskRepository};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;

/// Use-case service wrapper for task CRUD operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a task and returns the stored record.
    ///
    /// Status always starts as `Pending`; `created_at`/`updated_at` are
    /// stamped by storage.
    pub fn create_task(&self, draft: &TaskDraft) -> RepoResult<Task> {
        let id = self.repo.create_task(draft)?;
        self.read_back(id)
    }

    /// Gets one task with its display status projected for `today`.
    pub fn get_task(&self, id: i64, today: NaiveDate) -> RepoResult<Option<Task>> {
        Ok(self.repo.get_task(id)?.map(|task| project(task, today)))
    }

    /// Lists tasks in the requested order, statuses projected for `today`.
    pub fn list_tasks(&self, order: TaskOrder, today: NaiveDate) -> RepoResult<Vec<Task>> {
        let tasks = self.repo.list_tasks(order)?;
        Ok(tasks.into_iter().map(|task| project(task, today)).collect())
    }

    /// Applies a partial update and returns the refreshed record.
    pub fn update_task(&self, id: i64, patch: &TaskPatch, today: NaiveDate) -> RepoResult<Task> {
        self.repo.update_task(id, patch)?;
        self.read_back(id).map(|task| project(task, today))
    }

    /// Flips a task between not-done and done.
    ///
    /// A completed task returns to `Pending`; anything else (pending, or a
    /// status explicitly stored as overdue) becomes `Completed`.
    pub fn toggle_task(&self, id: i64, today: NaiveDate) -> RepoResult<Task> {
        let stored = self.repo.get_task(id)?.ok_or(RepoError::NotFound(id))?;
        let next = if stored.status == TaskStatus::Completed {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        };

        let patch = TaskPatch {
            status: Some(next),
            ..TaskPatch::default()
        };
        self.repo.update_task(id, &patch)?;
        self.read_back(id).map(|task| project(task, today))
    }

    /// Hard-deletes a task by id.
    pub fn delete_task(&self, id: i64) -> RepoResult<()> {
        self.repo.delete_task(id)
    }

    fn read_back(&self, id: i64) -> RepoResult<Task> {
        self.repo.get_task(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("task {id} missing on read-back after write"))
        })
    }
}

fn project(mut task: Task, today: NaiveDate) -> Task {
    task.status = task.effective_status(today);
    task
}
