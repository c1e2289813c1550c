//! Task slice: state, actions and reducer.
//!
//! # Invariants
//! - `filtered_tasks` only ever holds records also present in `tasks`,
//!   except that create-success appends to both lists regardless of the
//!   active filters.
//! - Start actions set `loading` and clear `error`; success and failure
//!   actions clear `loading`.

use super::ActionName;
use crate::model::task::{CreateTaskRequest, Task, UpdateTaskRequest};
use crate::view::filter::{apply_filters, TaskFilters};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskState {
    pub tasks: Vec<Task>,
    pub filtered_tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: TaskFilters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    Load,
    LoadSuccess(Vec<Task>),
    LoadFailure(String),
    Create(CreateTaskRequest),
    CreateSuccess(Task),
    CreateFailure(String),
    Update(UpdateTaskRequest),
    UpdateSuccess(Task),
    UpdateFailure(String),
    Delete(String),
    DeleteSuccess(String),
    DeleteFailure(String),
    Filter(TaskFilters),
}

impl ActionName for TaskAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Load => "task/load",
            Self::LoadSuccess(_) => "task/load_success",
            Self::LoadFailure(_) => "task/load_failure",
            Self::Create(_) => "task/create",
            Self::CreateSuccess(_) => "task/create_success",
            Self::CreateFailure(_) => "task/create_failure",
            Self::Update(_) => "task/update",
            Self::UpdateSuccess(_) => "task/update_success",
            Self::UpdateFailure(_) => "task/update_failure",
            Self::Delete(_) => "task/delete",
            Self::DeleteSuccess(_) => "task/delete_success",
            Self::DeleteFailure(_) => "task/delete_failure",
            Self::Filter(_) => "task/filter",
        }
    }
}

pub fn reduce_tasks(state: &TaskState, action: &TaskAction) -> TaskState {
    match action {
        TaskAction::Load | TaskAction::Create(_) | TaskAction::Update(_) | TaskAction::Delete(_) => {
            TaskState {
                loading: true,
                error: None,
                ..state.clone()
            }
        }
        TaskAction::LoadSuccess(tasks) => TaskState {
            tasks: tasks.clone(),
            filtered_tasks: tasks.clone(),
            loading: false,
            error: None,
            filters: state.filters.clone(),
        },
        TaskAction::LoadFailure(error)
        | TaskAction::CreateFailure(error)
        | TaskAction::UpdateFailure(error)
        | TaskAction::DeleteFailure(error) => TaskState {
            loading: false,
            error: Some(error.clone()),
            ..state.clone()
        },
        TaskAction::CreateSuccess(task) => {
            let mut next = state.clone();
            next.tasks.push(task.clone());
            next.filtered_tasks.push(task.clone());
            next.loading = false;
            next.error = None;
            next
        }
        TaskAction::UpdateSuccess(task) => TaskState {
            tasks: replace_by_id(&state.tasks, task),
            filtered_tasks: replace_by_id(&state.filtered_tasks, task),
            loading: false,
            error: None,
            filters: state.filters.clone(),
        },
        TaskAction::DeleteSuccess(id) => TaskState {
            tasks: without_id(&state.tasks, id),
            filtered_tasks: without_id(&state.filtered_tasks, id),
            loading: false,
            error: None,
            filters: state.filters.clone(),
        },
        TaskAction::Filter(filters) => TaskState {
            filtered_tasks: apply_filters(&state.tasks, filters),
            filters: state.filters.merged_with(filters),
            ..state.clone()
        },
    }
}

fn replace_by_id(tasks: &[Task], updated: &Task) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == updated.id {
                updated.clone()
            } else {
                task.clone()
            }
        })
        .collect()
}

fn without_id(tasks: &[Task], id: &str) -> Vec<Task> {
    tasks.iter().filter(|task| task.id != id).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::{reduce_tasks, TaskAction, TaskState};
    use crate::model::task::{Task, TaskPriority, TaskStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn task(id: &str) -> Task {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Task {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            priority: TaskPriority::Medium,
            status: TaskStatus::NotStarted,
            project_id: None,
            user_id: "u1".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn start_actions_set_loading_and_clear_error() {
        let state = TaskState {
            error: Some("boom".into()),
            ..TaskState::default()
        };
        let next = reduce_tasks(&state, &TaskAction::Delete("x".into()));
        assert!(next.loading);
        assert_eq!(next.error, None);
        // input untouched
        assert_eq!(state.error.as_deref(), Some("boom"));
    }

    #[test]
    fn failure_keeps_lists_and_records_error() {
        let loaded = reduce_tasks(&TaskState::default(), &TaskAction::LoadSuccess(vec![task("a")]));
        let next = reduce_tasks(&loaded, &TaskAction::UpdateFailure("Task not found".into()));
        assert!(!next.loading);
        assert_eq!(next.error.as_deref(), Some("Task not found"));
        assert_eq!(next.tasks, loaded.tasks);
    }

    #[test]
    fn update_success_for_absent_id_is_a_no_op_on_lists() {
        let loaded = reduce_tasks(&TaskState::default(), &TaskAction::LoadSuccess(vec![task("a")]));
        let next = reduce_tasks(&loaded, &TaskAction::UpdateSuccess(task("zzz")));
        assert_eq!(next.tasks, loaded.tasks);
        assert_eq!(next.filtered_tasks, loaded.filtered_tasks);
    }
}
