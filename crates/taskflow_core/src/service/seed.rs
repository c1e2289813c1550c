//! Starter data for new accounts and fresh databases.

use crate::model::new_record_id;
use crate::model::project::Project;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoResult;
use chrono::{DateTime, Duration, Utc};
use log::info;

struct SeedTask {
    title: &'static str,
    description: &'static str,
    due_in_days: i64,
    priority: TaskPriority,
    status: TaskStatus,
}

const DEFAULT_TASKS: [SeedTask; 10] = [
    SeedTask {
        title: "Setup Project Infrastructure",
        description: "Initialize the project with proper folder structure, dependencies, and configuration files.",
        due_in_days: 2,
        priority: TaskPriority::High,
        status: TaskStatus::InProgress,
    },
    SeedTask {
        title: "Design User Interface Mockups",
        description: "Create wireframes and mockups for the main application screens including dashboard, task list, and forms.",
        due_in_days: 5,
        priority: TaskPriority::Medium,
        status: TaskStatus::NotStarted,
    },
    SeedTask {
        title: "Implement Authentication System",
        description: "Build user registration, login, and session management functionality with proper security measures.",
        due_in_days: 3,
        priority: TaskPriority::High,
        status: TaskStatus::NotStarted,
    },
    SeedTask {
        title: "Create Task Management CRUD",
        description: "Develop complete task creation, reading, updating, and deletion functionality with proper validation.",
        due_in_days: 7,
        priority: TaskPriority::High,
        status: TaskStatus::NotStarted,
    },
    SeedTask {
        title: "Build Kanban Board Component",
        description: "Implement a kanban board for visual task management with status columns.",
        due_in_days: 4,
        priority: TaskPriority::Medium,
        status: TaskStatus::NotStarted,
    },
    SeedTask {
        title: "Add Data Persistence",
        description: "Implement local storage to save and retrieve user data and tasks.",
        due_in_days: 2,
        priority: TaskPriority::Medium,
        status: TaskStatus::Completed,
    },
    SeedTask {
        title: "Implement Responsive Design",
        description: "Ensure the application works on mobile, tablet, and desktop devices.",
        due_in_days: 6,
        priority: TaskPriority::Medium,
        status: TaskStatus::NotStarted,
    },
    SeedTask {
        title: "Add Task Filtering and Search",
        description: "Implement filtering options and search for better task management.",
        due_in_days: 8,
        priority: TaskPriority::Low,
        status: TaskStatus::NotStarted,
    },
    SeedTask {
        title: "Create User Dashboard",
        description: "Build a dashboard with task statistics, recent activities, and quick actions.",
        due_in_days: 1,
        priority: TaskPriority::High,
        status: TaskStatus::Completed,
    },
    SeedTask {
        title: "Write Documentation",
        description: "Create documentation for the project including setup instructions and API documentation.",
        due_in_days: 10,
        priority: TaskPriority::Low,
        status: TaskStatus::NotStarted,
    },
];

const DEFAULT_PROJECTS: [(&str, &str); 2] = [
    (
        "Task Management App",
        "A task management system with boards, dashboards and filtering",
    ),
    ("Documentation", "Create comprehensive documentation for the project"),
];

/// Seeds the default task list for `user_id` unless the user already owns
/// tasks. Returns the number of tasks created.
pub fn seed_default_tasks(
    repo: &impl TaskRepository,
    user_id: &str,
    now: DateTime<Utc>,
) -> RepoResult<usize> {
    let mut tasks = repo.list_tasks()?;
    if tasks.iter().any(|task| task.user_id == user_id) {
        return Ok(0);
    }
    let today = now.date_naive();
    let seeded: Vec<Task> = DEFAULT_TASKS
        .iter()
        .map(|seed| Task {
            id: new_record_id(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            due_date: today + Duration::days(seed.due_in_days),
            priority: seed.priority,
            status: seed.status,
            project_id: None,
            user_id: user_id.to_string(),
            created_at: now,
            updated_at: now,
        })
        .collect();
    let count = seeded.len();
    tasks.extend(seeded);
    repo.replace_all_tasks(&tasks)?;
    info!("event=seed_tasks module=service status=ok user_id={user_id} count={count}");
    Ok(count)
}

/// Seeds the sample projects when no project exists yet.
pub fn seed_default_projects(
    repo: &impl ProjectRepository,
    now: DateTime<Utc>,
) -> RepoResult<usize> {
    if !repo.list_projects()?.is_empty() {
        return Ok(0);
    }
    for (name, description) in DEFAULT_PROJECTS {
        repo.create_project(&Project {
            id: new_record_id(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
            task_ids: Vec::new(),
        })?;
    }
    info!(
        "event=seed_projects module=service status=ok count={}",
        DEFAULT_PROJECTS.len()
    );
    Ok(DEFAULT_PROJECTS.len())
}
