//! Project list read model.

use crate::model::project::{Project, ProjectSummary};
use crate::model::task::{Task, TaskStatus};

/// Builds one summary per project, counting tasks that reference it.
pub fn summarize_projects(projects: &[Project], tasks: &[Task]) -> Vec<ProjectSummary> {
    projects
        .iter()
        .map(|project| summarize_project(project, tasks))
        .collect()
}

pub fn summarize_project(project: &Project, tasks: &[Task]) -> ProjectSummary {
    let mut summary = ProjectSummary {
        id: project.id.clone(),
        name: project.name.clone(),
        description: project.description.clone(),
        total_tasks: 0,
        not_started_tasks: 0,
        in_progress_tasks: 0,
        completed_tasks: 0,
    };
    for task in tasks
        .iter()
        .filter(|task| task.project_id.as_deref() == Some(project.id.as_str()))
    {
        summary.total_tasks += 1;
        match task.status {
            TaskStatus::NotStarted => summary.not_started_tasks += 1,
            TaskStatus::InProgress => summary.in_progress_tasks += 1,
            TaskStatus::Completed => summary.completed_tasks += 1,
        }
    }
    summary
}
