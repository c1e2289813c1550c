//! Task use-case service.
//!
//! # Invariants
//! - Callers only see and mutate tasks they own; foreign ids read as
//!   not found.
//! - Each update strictly advances `updated_at`.

use super::{ensure_valid, Clock, ServiceError, ServiceResult};
use crate::model::task::{CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest};
use crate::model::{new_record_id, next_timestamp};
use crate::repo::task_repo::TaskRepository;
use crate::validation::task::{validate_task, validate_task_update, TaskDraft};
use crate::view::filter::{search_tasks, tasks_for_user};
use log::info;

/// Task CRUD scoped to one owner per call.
pub struct TaskService<R: TaskRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: TaskRepository, C: Clock> TaskService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Tasks owned by `user_id`, in creation order.
    pub fn list_tasks(&self, user_id: &str) -> ServiceResult<Vec<Task>> {
        Ok(tasks_for_user(&self.repo.list_tasks()?, user_id))
    }

    pub fn get_task(&self, user_id: &str, id: &str) -> ServiceResult<Task> {
        self.repo
            .get_task(id)?
            .filter(|task| task.user_id == user_id)
            .ok_or_else(|| ServiceError::not_found("Task", id))
    }

    /// Validates and stores a new task with status `not_started`.
    pub fn create_task(&self, user_id: &str, request: &CreateTaskRequest) -> ServiceResult<Task> {
        ensure_valid(validate_task(&TaskDraft::from(request), self.clock.today()))?;
        let now = self.clock.now();
        let task = Task {
            id: new_record_id(),
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            due_date: request.due_date,
            priority: request.priority,
            status: TaskStatus::NotStarted,
            project_id: request.project_id.clone(),
            user_id: user_id.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.repo.create_task(&task)?;
        info!(
            "event=task_create module=service status=ok task_id={} user_id={user_id}",
            task.id
        );
        Ok(task)
    }

    /// Applies a partial update to an owned task.
    pub fn update_task(&self, user_id: &str, request: &UpdateTaskRequest) -> ServiceResult<Task> {
        let existing = self.get_task(user_id, &request.id)?;
        ensure_valid(validate_task_update(
            &TaskDraft::from(request),
            &existing,
            self.clock.today(),
        ))?;
        let updated_at = next_timestamp(existing.updated_at, self.clock.now());
        let mut updated = request.apply_to(&existing, updated_at);
        updated.title = updated.title.trim().to_string();
        updated.description = updated.description.trim().to_string();
        self.repo.update_task(&updated)?;
        info!(
            "event=task_update module=service status=ok task_id={} status_value={}",
            updated.id, updated.status
        );
        Ok(updated)
    }

    /// Moves an owned task to `status`.
    pub fn set_status(&self, user_id: &str, id: &str, status: TaskStatus) -> ServiceResult<Task> {
        self.update_task(user_id, &UpdateTaskRequest::status_change(id, status))
    }

    pub fn delete_task(&self, user_id: &str, id: &str) -> ServiceResult<()> {
        self.get_task(user_id, id)?;
        self.repo.delete_task(id)?;
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }

    /// Owned tasks whose title or description contains `query`.
    pub fn search(&self, user_id: &str, query: &str) -> ServiceResult<Vec<Task>> {
        Ok(search_tasks(&self.list_tasks(user_id)?, query))
    }
}

#[cfg(test)]
mod tests {
    use super::TaskService;
    use crate::db::open_db_in_memory;
    use crate::model::task::{CreateTaskRequest, TaskPriority, TaskStatus, UpdateTaskRequest};
    use crate::repo::kv_store::SqliteKvStore;
    use crate::repo::task_repo::KvTaskRepository;
    use crate::service::{FixedClock, ServiceError};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn request(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.into(),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            priority: TaskPriority::Medium,
            project_id: None,
        }
    }

    #[test]
    fn foreign_tasks_are_invisible() {
        let conn = open_db_in_memory().unwrap();
        let repo = KvTaskRepository::new(SqliteKvStore::try_new(&conn).unwrap());
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap());
        let service = TaskService::new(repo, clock);

        let task = service.create_task("alice", &request("Mine")).unwrap();
        assert_eq!(task.status, TaskStatus::NotStarted);
        assert!(service.list_tasks("bob").unwrap().is_empty());
        let err = service
            .update_task("bob", &UpdateTaskRequest::status_change(&task.id, TaskStatus::Completed))
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { kind: "Task", .. }));
        assert!(service.delete_task("bob", &task.id).is_err());
    }

    #[test]
    fn update_with_fixed_clock_still_advances_timestamp() {
        let conn = open_db_in_memory().unwrap();
        let repo = KvTaskRepository::new(SqliteKvStore::try_new(&conn).unwrap());
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap());
        let service = TaskService::new(repo, clock);

        let task = service.create_task("alice", &request("Mine")).unwrap();
        let first = service.set_status("alice", &task.id, TaskStatus::InProgress).unwrap();
        let second = service.set_status("alice", &task.id, TaskStatus::Completed).unwrap();
        assert!(first.updated_at > task.updated_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.created_at, task.created_at);
    }
}
