//! Kanban board: one column per status.

use crate::model::task::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub title: &'static str,
    pub tasks: Vec<Task>,
    pub count: usize,
    pub overdue: usize,
}

/// Groups tasks into columns in status order, keeping input order inside
/// each column.
pub fn build_board(tasks: &[Task], now: DateTime<Utc>) -> Vec<BoardColumn> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| {
            let column_tasks: Vec<Task> = tasks
                .iter()
                .filter(|task| task.status == status)
                .cloned()
                .collect();
            let overdue = column_tasks.iter().filter(|t| t.is_overdue(now)).count();
            BoardColumn {
                status,
                title: status.label(),
                count: column_tasks.len(),
                overdue,
                tasks: column_tasks,
            }
        })
        .collect()
}
