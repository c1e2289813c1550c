//! Side-effect orchestration between the store and services.
//!
//! Each operation dispatches its start action, optionally waits the
//! configured simulated latency, calls the service, then dispatches the
//! matching success or failure action. The service result is returned to
//! the caller unchanged.

use super::auth_state::AuthAction;
use super::project_state::ProjectAction;
use super::task_state::TaskAction;
use super::{ActionName, AppAction, AppStore};
use crate::model::project::{CreateProjectRequest, Project, UpdateProjectRequest};
use crate::model::task::{CreateTaskRequest, Task, UpdateTaskRequest};
use crate::model::user::{RegisterRequest, User};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::user_repo::UserRepository;
use crate::service::auth_service::AuthService;
use crate::service::project_service::ProjectService;
use crate::service::task_service::TaskService;
use crate::service::{Clock, ServiceError, ServiceResult};
use log::warn;
use std::time::Duration;

/// Shared dispatch plumbing for all effect groups.
#[derive(Clone, Copy)]
pub struct EffectRunner<'s> {
    store: &'s AppStore,
    latency: Duration,
}

impl<'s> EffectRunner<'s> {
    pub fn new(store: &'s AppStore, latency: Duration) -> Self {
        Self { store, latency }
    }

    pub fn store(&self) -> &'s AppStore {
        self.store
    }

    fn run<T>(
        &self,
        start: impl Into<AppAction>,
        call: impl FnOnce() -> ServiceResult<T>,
        on_ok: impl FnOnce(&T) -> AppAction,
        on_err: impl FnOnce(String) -> AppAction,
    ) -> ServiceResult<T> {
        let start = start.into();
        let operation = start.name();
        self.store.dispatch(start);
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        match call() {
            Ok(value) => {
                self.store.dispatch(on_ok(&value));
                Ok(value)
            }
            Err(err) => {
                warn!("event=effect module=store status=error action={operation} error={err}");
                self.store.dispatch(on_err(err.to_string()));
                Err(err)
            }
        }
    }
}

pub struct TaskEffects<'s, R: TaskRepository, C: Clock> {
    runner: EffectRunner<'s>,
    service: &'s TaskService<R, C>,
}

impl<'s, R: TaskRepository, C: Clock> TaskEffects<'s, R, C> {
    pub fn new(runner: EffectRunner<'s>, service: &'s TaskService<R, C>) -> Self {
        Self { runner, service }
    }

    pub fn load_tasks(&self, user_id: &str) -> ServiceResult<Vec<Task>> {
        self.runner.run(
            TaskAction::Load,
            || self.service.list_tasks(user_id),
            |tasks| TaskAction::LoadSuccess(tasks.clone()).into(),
            |error| TaskAction::LoadFailure(error).into(),
        )
    }

    pub fn create_task(&self, user_id: &str, request: &CreateTaskRequest) -> ServiceResult<Task> {
        self.runner.run(
            TaskAction::Create(request.clone()),
            || self.service.create_task(user_id, request),
            |task| TaskAction::CreateSuccess(task.clone()).into(),
            |error| TaskAction::CreateFailure(error).into(),
        )
    }

    pub fn update_task(&self, user_id: &str, request: &UpdateTaskRequest) -> ServiceResult<Task> {
        self.runner.run(
            TaskAction::Update(request.clone()),
            || self.service.update_task(user_id, request),
            |task| TaskAction::UpdateSuccess(task.clone()).into(),
            |error| TaskAction::UpdateFailure(error).into(),
        )
    }

    pub fn delete_task(&self, user_id: &str, id: &str) -> ServiceResult<()> {
        self.runner.run(
            TaskAction::Delete(id.to_string()),
            || self.service.delete_task(user_id, id),
            |_| TaskAction::DeleteSuccess(id.to_string()).into(),
            |error| TaskAction::DeleteFailure(error).into(),
        )
    }
}

pub struct ProjectEffects<'s, R: ProjectRepository, C: Clock> {
    runner: EffectRunner<'s>,
    service: &'s ProjectService<R, C>,
}

impl<'s, R: ProjectRepository, C: Clock> ProjectEffects<'s, R, C> {
    pub fn new(runner: EffectRunner<'s>, service: &'s ProjectService<R, C>) -> Self {
        Self { runner, service }
    }

    pub fn load_projects(&self) -> ServiceResult<Vec<Project>> {
        self.runner.run(
            ProjectAction::Load,
            || self.service.list_projects(),
            |projects| ProjectAction::LoadSuccess(projects.clone()).into(),
            |error| ProjectAction::LoadFailure(error).into(),
        )
    }

    pub fn create_project(&self, request: &CreateProjectRequest) -> ServiceResult<Project> {
        self.runner.run(
            ProjectAction::Create(request.clone()),
            || self.service.create_project(request),
            |project| ProjectAction::CreateSuccess(project.clone()).into(),
            |error| ProjectAction::CreateFailure(error).into(),
        )
    }

    pub fn update_project(&self, request: &UpdateProjectRequest) -> ServiceResult<Project> {
        self.runner.run(
            ProjectAction::Update(request.clone()),
            || self.service.update_project(request),
            |project| ProjectAction::UpdateSuccess(project.clone()).into(),
            |error| ProjectAction::UpdateFailure(error).into(),
        )
    }

    pub fn delete_project(&self, id: &str) -> ServiceResult<()> {
        self.runner.run(
            ProjectAction::Delete(id.to_string()),
            || self.service.delete_project(id),
            |_| ProjectAction::DeleteSuccess(id.to_string()).into(),
            |error| ProjectAction::DeleteFailure(error).into(),
        )
    }
}

pub struct AuthEffects<'s, R: UserRepository, C: Clock> {
    runner: EffectRunner<'s>,
    service: &'s AuthService<R, C>,
}

impl<'s, R: UserRepository, C: Clock> AuthEffects<'s, R, C> {
    pub fn new(runner: EffectRunner<'s>, service: &'s AuthService<R, C>) -> Self {
        Self { runner, service }
    }

    pub fn login(&self, identifier: &str, password: &str) -> ServiceResult<User> {
        self.runner.run(
            AuthAction::Login {
                identifier: identifier.to_string(),
            },
            || self.service.login(identifier, password),
            |user| AuthAction::LoginSuccess(user.clone()).into(),
            |error| AuthAction::LoginFailure(error).into(),
        )
    }

    pub fn register(&self, request: &RegisterRequest) -> ServiceResult<User> {
        let mut redacted = request.clone();
        redacted.password.clear();
        self.runner.run(
            AuthAction::Register(redacted),
            || self.service.register(request),
            |user| AuthAction::RegisterSuccess(user.clone()).into(),
            |error| AuthAction::RegisterFailure(error).into(),
        )
    }

    pub fn logout(&self) -> ServiceResult<()> {
        self.runner.run(
            AuthAction::Logout,
            || self.service.logout(),
            |_| AuthAction::LogoutSuccess.into(),
            |error| AuthAction::LogoutFailure(error).into(),
        )
    }

    /// Restores the persisted session into the store.
    pub fn check_auth(&self) -> ServiceResult<Option<User>> {
        let store = self.runner.store();
        store.dispatch(AuthAction::CheckAuth.into());
        let result = self.service.restore_session();
        let action = match &result {
            Ok(Some(user)) => AuthAction::LoginSuccess(user.clone()),
            Ok(None) => AuthAction::LogoutSuccess,
            Err(ServiceError::SessionExpired) => AuthAction::TokenExpired,
            Err(err) => AuthAction::LoginFailure(err.to_string()),
        };
        store.dispatch(action.into());
        result
    }
}
