//! Dashboard statistics: counts, completion rate, overdue and recent tasks.

use crate::model::task::{Task, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of entries in the recent-tasks list.
pub const RECENT_TASK_LIMIT: usize = 5;

/// Task counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status {
                TaskStatus::NotStarted => stats.not_started += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            stats
        })
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::NotStarted => self.not_started,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }

    /// Completed share as a whole percent, rounded half up. Zero when empty.
    pub fn completion_rate(&self) -> u32 {
        percent(self.completed, self.total)
    }
}

/// Count and share of one priority.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityShare {
    pub priority: TaskPriority,
    pub count: usize,
    pub percentage: f64,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: TaskStats,
    pub completion_rate: u32,
    pub overdue_count: usize,
    pub overdue_tasks: Vec<Task>,
    pub recent_tasks: Vec<Task>,
    pub priority_breakdown: Vec<PriorityShare>,
}

/// Computes the dashboard for `tasks` as of `now`.
pub fn compute_dashboard(tasks: &[Task], now: DateTime<Utc>) -> DashboardView {
    let stats = TaskStats::from_tasks(tasks);
    let overdue_tasks = overdue_tasks(tasks, now);
    DashboardView {
        stats,
        completion_rate: stats.completion_rate(),
        overdue_count: overdue_tasks.len(),
        overdue_tasks,
        recent_tasks: recent_tasks(tasks, RECENT_TASK_LIMIT),
        priority_breakdown: priority_breakdown(tasks),
    }
}

/// Open tasks due before `now`, earliest due date first.
pub fn overdue_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    let mut overdue: Vec<Task> = tasks
        .iter()
        .filter(|task| task.is_overdue(now))
        .cloned()
        .collect();
    overdue.sort_by_key(|task| task.due_date);
    overdue
}

/// The `limit` most recently created tasks, newest first.
pub fn recent_tasks(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut recent = tasks.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(limit);
    recent
}

pub fn priority_breakdown(tasks: &[Task]) -> Vec<PriorityShare> {
    TaskPriority::ALL
        .into_iter()
        .map(|priority| {
            let count = tasks.iter().filter(|t| t.priority == priority).count();
            let percentage = if tasks.is_empty() {
                0.0
            } else {
                count as f64 / tasks.len() as f64 * 100.0
            };
            PriorityShare {
                priority,
                count,
                percentage,
            }
        })
        .collect()
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
