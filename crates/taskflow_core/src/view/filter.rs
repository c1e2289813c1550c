//! Filter, sort and search pipeline for task lists.
//!
//! # Invariants
//! - Filtering keeps the relative order of the input.
//! - Sorting is stable: equal keys keep input order in both directions.
//! - Without a sort key the filtered order is the input order.

use crate::model::task::{Task, TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Field a task list is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    DueDate,
    Priority,
    Status,
    #[default]
    Title,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Status => "status",
            Self::Title => "title",
        }
    }

    /// Parses a sort key name. Unknown names sort by title.
    pub fn parse(value: &str) -> Self {
        match value {
            "dueDate" | "due_date" | "due" => Self::DueDate,
            "priority" => Self::Priority,
            "status" => Self::Status,
            _ => Self::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses `asc`/`desc`; anything else is ascending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// Filter and sort parameters. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl TaskFilters {
    /// Returns `self` overridden by every field `update` sets.
    pub fn merged_with(&self, update: &TaskFilters) -> TaskFilters {
        TaskFilters {
            status: update.status.or(self.status),
            priority: update.priority.or(self.priority),
            project_id: update.project_id.clone().or_else(|| self.project_id.clone()),
            sort_by: update.sort_by.or(self.sort_by),
            sort_order: update.sort_order.or(self.sort_order),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |status| task.status == status)
            && self.priority.map_or(true, |priority| task.priority == priority)
            && self
                .project_id
                .as_deref()
                .map_or(true, |project| task.project_id.as_deref() == Some(project))
    }
}

/// Applies status, priority and project filters, then the requested sort.
pub fn apply_filters(tasks: &[Task], filters: &TaskFilters) -> Vec<Task> {
    let mut filtered: Vec<Task> = tasks
        .iter()
        .filter(|task| filters.matches(task))
        .cloned()
        .collect();
    if let Some(key) = filters.sort_by {
        sort_tasks(&mut filtered, key, filters.sort_order.unwrap_or_default());
    }
    filtered
}

/// Total order on tasks for one sort key, ascending.
pub fn compare_tasks(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::DueDate => a.due_date.cmp(&b.due_date),
        SortKey::Priority => a.priority.cmp(&b.priority),
        SortKey::Status => a.status.cmp(&b.status),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

/// Stable in-place sort.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Asc => tasks.sort_by(|a, b| compare_tasks(a, b, key)),
        SortOrder::Desc => tasks.sort_by(|a, b| compare_tasks(b, a, key)),
    }
}

/// Case-insensitive substring search over title and description.
/// A blank query returns every task.
pub fn search_tasks(tasks: &[Task], query: &str) -> Vec<Task> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return tasks.to_vec();
    }
    tasks
        .iter()
        .filter(|task| {
            task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Tasks owned by `user_id`, in input order.
pub fn tasks_for_user(tasks: &[Task], user_id: &str) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.user_id == user_id)
        .cloned()
        .collect()
}
