//! Command execution over the core store, effects and services.

use crate::cli::{Command, ProjectCommand, TaskCommand};
use log::{info, warn};
use taskflow_core::model::project::{CreateProjectRequest, UpdateProjectRequest};
use taskflow_core::model::task::{Task, TaskPriority, TaskStatus};
use taskflow_core::model::user::{RegisterRequest, User};
use taskflow_core::service::seed::{seed_default_projects, seed_default_tasks};
use taskflow_core::store::effects::{AuthEffects, EffectRunner, ProjectEffects, TaskEffects};
use taskflow_core::store::selectors::{select_current_user, select_filtered_tasks};
use taskflow_core::store::task_state::TaskAction;
use taskflow_core::validation::task::TaskDraft;
use taskflow_core::validation::{ErrorCode, ValidationError};
use taskflow_core::view::board::build_board;
use taskflow_core::view::dashboard::compute_dashboard;
use taskflow_core::{
    AppConfig, AppStore, AuthService, Clock, Connection, KvProjectRepository, KvTaskRepository,
    KvUserRepository, ProjectService, RepoError, ServiceError, SortKey, SortOrder, SqliteKvStore,
    SystemClock, TaskFilters, TaskService,
};

/// Result of one command: exit code plus lines for stdout and stderr.
#[derive(Debug, Default)]
pub struct CliOutput {
    pub exit_code: u8,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// Storage errors from seeding and store setup surface as service errors.
impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Service(value.into())
    }
}

type KvStore<'c> = SqliteKvStore<'c>;

/// Services and store wired over one connection.
struct Context<'c> {
    store: AppStore,
    latency: std::time::Duration,
    task_repo: KvTaskRepository<KvStore<'c>>,
    tasks: TaskService<KvTaskRepository<KvStore<'c>>, SystemClock>,
    projects: ProjectService<KvProjectRepository<KvStore<'c>>, SystemClock>,
    auth: AuthService<KvUserRepository<KvStore<'c>>, SystemClock>,
    notices: Vec<String>,
}

impl<'c> Context<'c> {
    fn open(conn: &'c Connection, config: &AppConfig) -> Result<Self, CliError> {
        let kv = SqliteKvStore::try_new(conn)?;
        let mut ctx = Self {
            store: AppStore::app(),
            latency: config.simulated_latency(),
            task_repo: KvTaskRepository::new(kv),
            tasks: TaskService::new(KvTaskRepository::new(kv), SystemClock),
            projects: ProjectService::new(KvProjectRepository::new(kv), SystemClock),
            auth: AuthService::new(KvUserRepository::new(kv), SystemClock),
            notices: Vec::new(),
        };
        if config.seed_demo_data {
            // Sample data belongs to the first run only; later deletes stick.
            if let Some(demo) = ctx.auth.create_demo_user_if_missing()? {
                let now = SystemClock.now();
                seed_default_tasks(&ctx.task_repo, &demo.id, now)?;
                seed_default_projects(&KvProjectRepository::new(kv), now)?;
            }
        }
        let restored = ctx.auth_effects().check_auth();
        match restored {
            Ok(_) => {}
            Err(ServiceError::SessionExpired) => {
                ctx.notices.push(ServiceError::SessionExpired.to_string());
            }
            Err(err) => return Err(err.into()),
        }
        Ok(ctx)
    }

    fn runner(&self) -> EffectRunner<'_> {
        EffectRunner::new(&self.store, self.latency)
    }

    fn task_effects(&self) -> TaskEffects<'_, KvTaskRepository<KvStore<'c>>, SystemClock> {
        TaskEffects::new(self.runner(), &self.tasks)
    }

    fn project_effects(&self) -> ProjectEffects<'_, KvProjectRepository<KvStore<'c>>, SystemClock> {
        ProjectEffects::new(self.runner(), &self.projects)
    }

    fn auth_effects(&self) -> AuthEffects<'_, KvUserRepository<KvStore<'c>>, SystemClock> {
        AuthEffects::new(self.runner(), &self.auth)
    }

    fn current_user(&self) -> Result<User, CliError> {
        self.store
            .with_state(|state| select_current_user(state).cloned())
            .ok_or_else(|| ServiceError::NotAuthenticated.into())
    }
}

/// Runs `command` against `conn`.
pub fn run(command: Command, conn: &Connection, config: &AppConfig) -> CliOutput {
    if let Command::Version = command {
        return CliOutput {
            stdout: vec![format!("taskflow v{}", taskflow_core::core_version())],
            ..CliOutput::default()
        };
    }

    let mut output = CliOutput::default();
    let result = Context::open(conn, config).and_then(|ctx| {
        output.stderr.extend(ctx.notices.iter().cloned());
        execute(&ctx, command)
    });
    match result {
        Ok(lines) => output.stdout.extend(lines),
        Err(err) => {
            warn!("event=cli_command module=cli status=error error={err}");
            output.exit_code = 1;
            output.stderr.push(format!("error: {err}"));
        }
    }
    output
}

fn execute(ctx: &Context<'_>, command: Command) -> Result<Vec<String>, CliError> {
    match command {
        Command::Register {
            username,
            email,
            password,
            name,
        } => run_register(ctx, username, email, password, name),
        Command::Login {
            identifier,
            password,
        } => {
            let user = ctx.auth_effects().login(&identifier, &password)?;
            Ok(vec![format!("Signed in as {} <{}>", user.display_name, user.email)])
        }
        Command::Logout => {
            ctx.auth_effects().logout()?;
            Ok(vec!["Signed out".to_string()])
        }
        Command::Whoami => {
            let user = ctx.current_user()?;
            Ok(vec![format!(
                "{} ({}) <{}> id={}",
                user.display_name, user.username, user.email, user.id
            )])
        }
        Command::Task(command) => run_task_cmd(ctx, command),
        Command::Project(command) => run_project_cmd(ctx, command),
        Command::Dashboard { json } => run_dashboard(ctx, json),
        Command::Board => run_board(ctx),
        Command::Version => Ok(vec![format!("taskflow v{}", taskflow_core::core_version())]),
    }
}

fn run_register(
    ctx: &Context<'_>,
    username: String,
    email: String,
    password: String,
    display_name: String,
) -> Result<Vec<String>, CliError> {
    let request = RegisterRequest {
        username,
        email,
        display_name,
        password,
    };
    let user = ctx.auth_effects().register(&request)?;
    let seeded = seed_default_tasks(&ctx.task_repo, &user.id, SystemClock.now())?;
    info!(
        "event=cli_register module=cli status=ok user_id={} seeded={seeded}",
        user.id
    );
    Ok(vec![
        format!("Registered {} (id={})", user.username, user.id),
        format!("Added {seeded} starter tasks"),
    ])
}

fn run_task_cmd(ctx: &Context<'_>, command: TaskCommand) -> Result<Vec<String>, CliError> {
    let user = ctx.current_user()?;
    let effects = ctx.task_effects();
    let today = ctx.tasks.clock().today();
    match command {
        TaskCommand::Add {
            title,
            description,
            due,
            priority,
            project,
        } => {
            let draft = TaskDraft {
                title: Some(title),
                description: Some(description),
                due_date: Some(due),
                priority: Some(priority),
                status: None,
                project_id: project,
            };
            let request = draft
                .into_create_request(today)
                .map_err(ServiceError::Validation)?;
            if let Some(project_id) = request.project_id.as_deref() {
                ctx.projects.get_project(project_id)?;
            }
            let task = effects.create_task(&user.id, &request)?;
            if let Some(project_id) = task.project_id.as_deref() {
                ctx.projects.link_task(project_id, &task.id)?;
            }
            Ok(vec![format!("Created task {}", task.id), format_task(&task, ctx)])
        }
        TaskCommand::List {
            status,
            priority,
            project,
            sort,
            order,
            json,
        } => {
            let filters = TaskFilters {
                status: status.as_deref().map(parse_status).transpose()?,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                project_id: project,
                sort_by: sort.as_deref().map(SortKey::parse),
                sort_order: order.as_deref().map(SortOrder::parse),
            };
            effects.load_tasks(&user.id)?;
            ctx.store.dispatch(TaskAction::Filter(filters).into());
            let tasks = ctx
                .store
                .with_state(|state| select_filtered_tasks(state).to_vec());
            if json {
                return Ok(vec![serde_json::to_string_pretty(&tasks)?]);
            }
            Ok(format_task_list(&tasks, ctx))
        }
        TaskCommand::Update {
            id,
            title,
            description,
            due,
            priority,
            status,
            project,
        } => {
            let existing = ctx.tasks.get_task(&user.id, &id)?;
            let draft = TaskDraft {
                title,
                description,
                due_date: due,
                priority,
                status,
                project_id: project,
            };
            let request = draft
                .into_update_request(&existing, today)
                .map_err(ServiceError::Validation)?;
            if let Some(project_id) = request.project_id.as_deref() {
                ctx.projects.get_project(project_id)?;
            }
            let task = effects.update_task(&user.id, &request)?;
            if task.project_id != existing.project_id {
                if let Some(previous) = existing.project_id.as_deref() {
                    ctx.projects.unlink_task(previous, &task.id)?;
                }
            }
            if let Some(project_id) = task.project_id.as_deref() {
                ctx.projects.link_task(project_id, &task.id)?;
            }
            Ok(vec![format!("Updated task {}", task.id), format_task(&task, ctx)])
        }
        TaskCommand::Delete { id } => {
            let project_id = ctx.tasks.get_task(&user.id, &id)?.project_id;
            effects.delete_task(&user.id, &id)?;
            if let Some(project_id) = project_id.as_deref() {
                ctx.projects.unlink_task(project_id, &id)?;
            }
            Ok(vec![format!("Deleted task {id}")])
        }
        TaskCommand::Search { query } => {
            let tasks = ctx.tasks.search(&user.id, &query)?;
            Ok(format_task_list(&tasks, ctx))
        }
    }
}

fn run_project_cmd(ctx: &Context<'_>, command: ProjectCommand) -> Result<Vec<String>, CliError> {
    let user = ctx.current_user()?;
    let effects = ctx.project_effects();
    match command {
        ProjectCommand::Add { name, description } => {
            let project = effects.create_project(&CreateProjectRequest { name, description })?;
            Ok(vec![format!("Created project {} (id={})", project.name, project.id)])
        }
        ProjectCommand::List => {
            effects.load_projects()?;
            let tasks = ctx.tasks.list_tasks(&user.id)?;
            let summaries = ctx.projects.summaries(&tasks)?;
            if summaries.is_empty() {
                return Ok(vec!["No projects".to_string()]);
            }
            Ok(summaries
                .iter()
                .map(|s| {
                    format!(
                        "{}  {}  total={} todo={} doing={} done={}",
                        s.id,
                        s.name,
                        s.total_tasks,
                        s.not_started_tasks,
                        s.in_progress_tasks,
                        s.completed_tasks
                    )
                })
                .collect())
        }
        ProjectCommand::Update {
            id,
            name,
            description,
        } => {
            let project = effects.update_project(&UpdateProjectRequest {
                id,
                name,
                description,
            })?;
            Ok(vec![format!("Updated project {} (id={})", project.name, project.id)])
        }
        ProjectCommand::Delete { id } => {
            effects.delete_project(&id)?;
            Ok(vec![format!("Deleted project {id}")])
        }
    }
}

fn run_dashboard(ctx: &Context<'_>, json: bool) -> Result<Vec<String>, CliError> {
    let user = ctx.current_user()?;
    let tasks = ctx.task_effects().load_tasks(&user.id)?;
    let view = compute_dashboard(&tasks, ctx.tasks.clock().now());
    if json {
        return Ok(vec![serde_json::to_string_pretty(&view)?]);
    }
    let mut lines = vec![
        format!("Tasks: {}", view.stats.total),
        format!(
            "To Do: {}  In Progress: {}  Completed: {}",
            view.stats.not_started, view.stats.in_progress, view.stats.completed
        ),
        format!("Completion: {}%", view.completion_rate),
        format!("Overdue: {}", view.overdue_count),
    ];
    for task in &view.overdue_tasks {
        lines.push(format!("  ! {}", format_task(task, ctx)));
    }
    lines.push("Recent:".to_string());
    for task in &view.recent_tasks {
        lines.push(format!("  {}", format_task(task, ctx)));
    }
    lines.push("Priorities:".to_string());
    for share in &view.priority_breakdown {
        lines.push(format!(
            "  {:<6} {:>3} ({:.0}%)",
            share.priority, share.count, share.percentage
        ));
    }
    Ok(lines)
}

fn run_board(ctx: &Context<'_>) -> Result<Vec<String>, CliError> {
    let user = ctx.current_user()?;
    let tasks = ctx.task_effects().load_tasks(&user.id)?;
    let mut lines = Vec::new();
    for column in build_board(&tasks, ctx.tasks.clock().now()) {
        lines.push(format!(
            "== {} ({}, {} overdue) ==",
            column.title, column.count, column.overdue
        ));
        for task in &column.tasks {
            lines.push(format!("  {}", format_task(task, ctx)));
        }
    }
    Ok(lines)
}

fn format_task_list(tasks: &[Task], ctx: &Context<'_>) -> Vec<String> {
    if tasks.is_empty() {
        return vec!["No tasks".to_string()];
    }
    tasks.iter().map(|task| format_task(task, ctx)).collect()
}

fn format_task(task: &Task, ctx: &Context<'_>) -> String {
    let overdue = if task.is_overdue(ctx.tasks.clock().now()) {
        " (overdue)"
    } else {
        ""
    };
    format!(
        "{}  [{}] {:<6} due {}{}  {}",
        task.id,
        task.status.label(),
        task.priority,
        task.due_date,
        overdue,
        task.title
    )
}

fn parse_status(value: &str) -> Result<TaskStatus, ServiceError> {
    TaskStatus::parse(value).ok_or_else(|| {
        ServiceError::Validation(vec![ValidationError {
            field: "status",
            code: ErrorCode::InvalidValue,
            message: "Status must be one of: not_started, in_progress, completed".to_string(),
        }])
    })
}

fn parse_priority(value: &str) -> Result<TaskPriority, ServiceError> {
    TaskPriority::parse(value).ok_or_else(|| {
        ServiceError::Validation(vec![ValidationError {
            field: "priority",
            code: ErrorCode::InvalidValue,
            message: "Priority must be one of: low, medium, high, urgent".to_string(),
        }])
    })
}
