//! Read-only projections of [`AppState`].

use super::AppState;
use crate::model::project::Project;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::user::User;
use crate::view::dashboard::TaskStats;

pub fn select_all_tasks(state: &AppState) -> &[Task] {
    &state.tasks.tasks
}

pub fn select_filtered_tasks(state: &AppState) -> &[Task] {
    &state.tasks.filtered_tasks
}

pub fn select_task_loading(state: &AppState) -> bool {
    state.tasks.loading
}

pub fn select_task_error(state: &AppState) -> Option<&str> {
    state.tasks.error.as_deref()
}

/// All tasks referencing `project_id`.
pub fn select_tasks_by_project(state: &AppState, project_id: &str) -> Vec<Task> {
    state
        .tasks
        .tasks
        .iter()
        .filter(|task| task.project_id.as_deref() == Some(project_id))
        .cloned()
        .collect()
}

/// Filtered tasks with `status`.
pub fn select_tasks_by_status(state: &AppState, status: TaskStatus) -> Vec<Task> {
    state
        .tasks
        .filtered_tasks
        .iter()
        .filter(|task| task.status == status)
        .cloned()
        .collect()
}

/// Filtered tasks with `priority`.
pub fn select_tasks_by_priority(state: &AppState, priority: TaskPriority) -> Vec<Task> {
    state
        .tasks
        .filtered_tasks
        .iter()
        .filter(|task| task.priority == priority)
        .cloned()
        .collect()
}

/// Status counters over all tasks.
pub fn select_task_stats(state: &AppState) -> TaskStats {
    TaskStats::from_tasks(&state.tasks.tasks)
}

pub fn select_all_projects(state: &AppState) -> &[Project] {
    &state.projects.projects
}

pub fn select_project_loading(state: &AppState) -> bool {
    state.projects.loading
}

pub fn select_project_error(state: &AppState) -> Option<&str> {
    state.projects.error.as_deref()
}

pub fn select_project_by_id<'a>(state: &'a AppState, id: &str) -> Option<&'a Project> {
    state.projects.projects.iter().find(|project| project.id == id)
}

pub fn select_current_user(state: &AppState) -> Option<&User> {
    state.auth.user.as_ref()
}

pub fn select_is_authenticated(state: &AppState) -> bool {
    state.auth.is_authenticated
}

pub fn select_auth_error(state: &AppState) -> Option<&str> {
    state.auth.error.as_deref()
}
