//! Project use-case service.
//!
//! Names are unique case-insensitively. Stored text is sanitized after
//! validation passes.

use super::{ensure_valid, Clock, ServiceError, ServiceResult};
use crate::model::project::{CreateProjectRequest, Project, ProjectSummary, UpdateProjectRequest};
use crate::model::task::Task;
use crate::model::{new_record_id, next_timestamp};
use crate::repo::project_repo::ProjectRepository;
use crate::validation::markup::sanitize_text;
use crate::validation::project::{validate_project, validate_project_update};
use crate::view::summary::summarize_projects;
use log::info;

pub const DUPLICATE_NAME_MESSAGE: &str = "Project with this name already exists";

pub struct ProjectService<R: ProjectRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: ProjectRepository, C: Clock> ProjectService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.repo.list_projects()?)
    }

    pub fn get_project(&self, id: &str) -> ServiceResult<Project> {
        self.repo
            .get_project(id)?
            .ok_or_else(|| ServiceError::not_found("Project", id))
    }

    pub fn create_project(&self, request: &CreateProjectRequest) -> ServiceResult<Project> {
        ensure_valid(validate_project(request))?;
        let name = sanitize_text(&request.name);
        self.ensure_unique_name(&name, None)?;
        let now = self.clock.now();
        let project = Project {
            id: new_record_id(),
            name,
            description: sanitize_text(&request.description),
            created_at: now,
            updated_at: now,
            task_ids: Vec::new(),
        };
        self.repo.create_project(&project)?;
        info!(
            "event=project_create module=service status=ok project_id={}",
            project.id
        );
        Ok(project)
    }

    pub fn update_project(&self, request: &UpdateProjectRequest) -> ServiceResult<Project> {
        let existing = self.get_project(&request.id)?;
        ensure_valid(validate_project_update(request))?;
        let name = request.name.as_deref().map(sanitize_text);
        if let Some(name) = name.as_deref() {
            self.ensure_unique_name(name, Some(&existing.id))?;
        }
        let description = request
            .description
            .as_deref()
            .map(sanitize_text)
            .unwrap_or_else(|| existing.description.clone());
        let updated_at = next_timestamp(existing.updated_at, self.clock.now());
        let updated = Project {
            name: name.unwrap_or_else(|| existing.name.clone()),
            description,
            updated_at,
            ..existing
        };
        self.repo.update_project(&updated)?;
        info!(
            "event=project_update module=service status=ok project_id={}",
            updated.id
        );
        Ok(updated)
    }

    /// Deletes the project only; tasks referencing it are left untouched.
    pub fn delete_project(&self, id: &str) -> ServiceResult<()> {
        self.repo.delete_project(id)?;
        info!("event=project_delete module=service status=ok project_id={id}");
        Ok(())
    }

    /// Records `task_id` in the project's informational task list.
    pub fn link_task(&self, project_id: &str, task_id: &str) -> ServiceResult<Project> {
        let mut project = self.get_project(project_id)?;
        if !project.task_ids.iter().any(|id| id == task_id) {
            project.task_ids.push(task_id.to_string());
            project.updated_at = next_timestamp(project.updated_at, self.clock.now());
            self.repo.update_project(&project)?;
        }
        Ok(project)
    }

    /// Drops `task_id` from the project's task list. A project that no
    /// longer exists is ignored.
    pub fn unlink_task(&self, project_id: &str, task_id: &str) -> ServiceResult<()> {
        let Some(mut project) = self.repo.get_project(project_id)? else {
            return Ok(());
        };
        let before = project.task_ids.len();
        project.task_ids.retain(|id| id != task_id);
        if project.task_ids.len() != before {
            project.updated_at = next_timestamp(project.updated_at, self.clock.now());
            self.repo.update_project(&project)?;
        }
        Ok(())
    }

    /// Per-project task counts over `tasks`.
    pub fn summaries(&self, tasks: &[Task]) -> ServiceResult<Vec<ProjectSummary>> {
        Ok(summarize_projects(&self.repo.list_projects()?, tasks))
    }

    fn ensure_unique_name(&self, name: &str, except_id: Option<&str>) -> ServiceResult<()> {
        let lowered = name.to_lowercase();
        let taken = self.repo.list_projects()?.into_iter().any(|project| {
            Some(project.id.as_str()) != except_id && project.name.to_lowercase() == lowered
        });
        if taken {
            return Err(ServiceError::Conflict(DUPLICATE_NAME_MESSAGE.to_string()));
        }
        Ok(())
    }
}
