//! Task record and request types.
//!
//! # Invariants
//! - `id` and `user_id` never change after creation.
//! - `updated_at` is never earlier than `created_at`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Task priority, ordered by urgency (`Low < Medium < High < Urgent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// All priorities in ascending rank order.
    pub const ALL: [TaskPriority; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Parses an exact wire value.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Task lifecycle state, ordered by progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// All statuses in ascending rank order.
    pub const ALL: [TaskStatus; 3] = [Self::NotStarted, Self::InProgress, Self::Completed];

    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Human-readable column label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Parses an exact wire value.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Returns whether the task is past due at `now` and still open.
    ///
    /// The due date is compared at the start of its day (UTC).
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Completed && self.due_at() < now
    }

    /// Start of the due day as a UTC instant.
    pub fn due_at(&self) -> DateTime<Utc> {
        self.due_date.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Checks record-level invariants for data read back from storage.
    pub fn check_invariants(&self) -> Result<(), RecordInvariantError> {
        check_record(&self.id, self.created_at, self.updated_at)
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub project_id: Option<String>,
}

/// Partial update for an existing task. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub project_id: Option<String>,
}

impl UpdateTaskRequest {
    /// Update that only moves a task to another status.
    pub fn status_change(id: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns a copy of `task` with this update applied. Identity and
    /// ownership fields are carried over untouched.
    pub fn apply_to(&self, task: &Task, updated_at: DateTime<Utc>) -> Task {
        Task {
            id: task.id.clone(),
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| task.description.clone()),
            due_date: self.due_date.unwrap_or(task.due_date),
            priority: self.priority.unwrap_or(task.priority),
            status: self.status.unwrap_or(task.status),
            project_id: self.project_id.clone().or_else(|| task.project_id.clone()),
            user_id: task.user_id.clone(),
            created_at: task.created_at,
            updated_at,
        }
    }
}

/// Violated record invariant detected on persisted data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordInvariantError {
    #[error("record id must not be empty")]
    EmptyId,
    #[error("record {id}: updatedAt ({updated_at}) precedes createdAt ({created_at})")]
    UpdatedBeforeCreated {
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    },
}

pub(crate) fn check_record(
    id: &str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Result<(), RecordInvariantError> {
    if id.trim().is_empty() {
        return Err(RecordInvariantError::EmptyId);
    }
    if updated_at < created_at {
        return Err(RecordInvariantError::UpdatedBeforeCreated {
            id: id.to_string(),
            created_at,
            updated_at,
        });
    }
    Ok(())
}
