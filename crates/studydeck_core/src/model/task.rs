//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical todo record and its write-path shapes.
//! - Derive the display status (`Overdue`) from the due date at read time.
//!
//! # Invariants
//! - `id` is assigned by storage on creation and never reused.
//! - `Overdue` is a derived projection; storage keeps whatever status was
//!   last explicitly written (normally `Pending`).
//! - `updated_at` moves forward on every successful mutation.

use crate::model::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task urgency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created and not yet completed.
    Pending,
    /// Marked done by the user.
    Completed,
    /// Past its due date while still pending. Derived on read.
    Overdue,
}

/// Canonical todo record as persisted in the `todos` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Unix epoch milliseconds, stamped once at creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every mutation.
    pub updated_at: i64,
}

impl Task {
    /// Returns the status the UI should display for `today`.
    ///
    /// A pending task whose due date has passed is shown as `Overdue`;
    /// everything else is shown as stored.
    pub fn effective_status(&self, today: NaiveDate) -> TaskStatus {
        if self.status == TaskStatus::Pending && self.due_date < today {
            TaskStatus::Overdue
        } else {
            self.status
        }
    }
}

/// Input shape for creating a task. Status always starts as `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Partial update for a task; only set fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task, TaskDraft, TaskPatch, TaskStatus};
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    fn date(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    fn task_due(due: &str, status: TaskStatus) -> Task {
        Task {
            id: 1,
            title: "write report".to_string(),
            description: String::new(),
            due_date: date(due),
            priority: Priority::Medium,
            status,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn pending_task_past_due_date_reads_as_overdue() {
        let task = task_due("2026-03-01", TaskStatus::Pending);
        assert_eq!(
            task.effective_status(date("2026-03-02")),
            TaskStatus::Overdue
        );
    }

    #[test]
    fn pending_task_due_today_is_not_overdue() {
        let task = task_due("2026-03-01", TaskStatus::Pending);
        assert_eq!(
            task.effective_status(date("2026-03-01")),
            TaskStatus::Pending
        );
    }

    #[test]
    fn completed_task_never_reads_as_overdue() {
        let task = task_due("2026-03-01", TaskStatus::Completed);
        assert_eq!(
            task.effective_status(date("2026-04-01")),
            TaskStatus::Completed
        );
    }

    #[test]
    fn draft_with_blank_title_fails_validation() {
        let draft = TaskDraft {
            title: "   ".to_string(),
            description: String::new(),
            due_date: date("2026-03-01"),
            priority: Priority::Low,
        };
        assert_eq!(draft.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn empty_patch_fails_validation() {
        assert_eq!(
            TaskPatch::default().validate(),
            Err(ValidationError::EmptyPatch)
        );
    }

    #[test]
    fn patch_with_blank_title_fails_validation() {
        let patch = TaskPatch {
            title: Some(String::new()),
            ..TaskPatch::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::EmptyTitle));
    }
}
