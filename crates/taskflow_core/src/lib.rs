//! Core domain logic for TaskFlow.
//! This crate owns task, project and session rules; front ends only drive it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod validation;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use db::{open_db, open_db_in_memory, Connection, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{CreateProjectRequest, Project, ProjectSummary, UpdateProjectRequest};
pub use model::task::{CreateTaskRequest, Task, TaskPriority, TaskStatus, UpdateTaskRequest};
pub use model::user::{RegisterRequest, User};
pub use repo::kv_store::{KeyValueStore, SqliteKvStore};
pub use repo::project_repo::{KvProjectRepository, ProjectRepository};
pub use repo::task_repo::{KvTaskRepository, TaskRepository};
pub use repo::user_repo::{KvUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::auth_service::AuthService;
pub use service::project_service::ProjectService;
pub use service::task_service::TaskService;
pub use service::{Clock, FixedClock, ServiceError, ServiceResult, SystemClock};
pub use store::{AppAction, AppState, AppStore, Store, SubscriptionId};
pub use validation::{format_validation_errors, ErrorCode, ValidationError};
pub use view::filter::{SortKey, SortOrder, TaskFilters};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
