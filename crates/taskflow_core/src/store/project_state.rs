//! Project slice: state, actions and reducer.

use super::ActionName;
use crate::model::project::{CreateProjectRequest, Project, UpdateProjectRequest};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectState {
    pub projects: Vec<Project>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectAction {
    Load,
    LoadSuccess(Vec<Project>),
    LoadFailure(String),
    Create(CreateProjectRequest),
    CreateSuccess(Project),
    CreateFailure(String),
    Update(UpdateProjectRequest),
    UpdateSuccess(Project),
    UpdateFailure(String),
    Delete(String),
    DeleteSuccess(String),
    DeleteFailure(String),
}

impl ActionName for ProjectAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Load => "project/load",
            Self::LoadSuccess(_) => "project/load_success",
            Self::LoadFailure(_) => "project/load_failure",
            Self::Create(_) => "project/create",
            Self::CreateSuccess(_) => "project/create_success",
            Self::CreateFailure(_) => "project/create_failure",
            Self::Update(_) => "project/update",
            Self::UpdateSuccess(_) => "project/update_success",
            Self::UpdateFailure(_) => "project/update_failure",
            Self::Delete(_) => "project/delete",
            Self::DeleteSuccess(_) => "project/delete_success",
            Self::DeleteFailure(_) => "project/delete_failure",
        }
    }
}

pub fn reduce_projects(state: &ProjectState, action: &ProjectAction) -> ProjectState {
    match action {
        ProjectAction::Load
        | ProjectAction::Create(_)
        | ProjectAction::Update(_)
        | ProjectAction::Delete(_) => ProjectState {
            loading: true,
            error: None,
            ..state.clone()
        },
        ProjectAction::LoadSuccess(projects) => ProjectState {
            projects: projects.clone(),
            loading: false,
            error: None,
        },
        ProjectAction::LoadFailure(error)
        | ProjectAction::CreateFailure(error)
        | ProjectAction::UpdateFailure(error)
        | ProjectAction::DeleteFailure(error) => ProjectState {
            loading: false,
            error: Some(error.clone()),
            ..state.clone()
        },
        ProjectAction::CreateSuccess(project) => {
            let mut projects = state.projects.clone();
            projects.push(project.clone());
            ProjectState {
                projects,
                loading: false,
                error: None,
            }
        }
        ProjectAction::UpdateSuccess(project) => ProjectState {
            projects: state
                .projects
                .iter()
                .map(|p| if p.id == project.id { project.clone() } else { p.clone() })
                .collect(),
            loading: false,
            error: None,
        },
        ProjectAction::DeleteSuccess(id) => ProjectState {
            projects: state
                .projects
                .iter()
                .filter(|p| &p.id != id)
                .cloned()
                .collect(),
            loading: false,
            error: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce_projects, ProjectAction, ProjectState};
    use crate::model::project::Project;
    use chrono::Utc;

    fn project(id: &str, name: &str) -> Project {
        let now = Utc::now();
        Project {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            created_at: now,
            updated_at: now,
            task_ids: Vec::new(),
        }
    }

    #[test]
    fn create_update_delete_cycle() {
        let state = reduce_projects(
            &ProjectState::default(),
            &ProjectAction::CreateSuccess(project("p1", "Alpha")),
        );
        assert_eq!(state.projects.len(), 1);

        let state = reduce_projects(
            &state,
            &ProjectAction::UpdateSuccess(project("p1", "Beta")),
        );
        assert_eq!(state.projects[0].name, "Beta");

        let state = reduce_projects(&state, &ProjectAction::DeleteSuccess("p1".into()));
        assert!(state.projects.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn failure_sets_error() {
        let state = reduce_projects(&ProjectState::default(), &ProjectAction::Load);
        assert!(state.loading);
        let state = reduce_projects(&state, &ProjectAction::LoadFailure("disk".into()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("disk"));
    }
}
