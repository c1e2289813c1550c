//! Project record and request types.
//!
//! `task_ids` is informational only: deleting a project never cascades to
//! its tasks.

use super::task::{check_record, RecordInvariantError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub task_ids: Vec<String>,
}

impl Project {
    /// Checks record-level invariants for data read back from storage.
    pub fn check_invariants(&self) -> Result<(), RecordInvariantError> {
        check_record(&self.id, self.created_at, self.updated_at)
    }
}

/// Input for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
}

/// Partial update for an existing project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Per-project task counters for list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub total_tasks: usize,
    pub not_started_tasks: usize,
    pub in_progress_tasks: usize,
    pub completed_tasks: usize,
}
