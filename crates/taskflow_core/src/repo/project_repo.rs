//! Project persistence contract and key-value implementation.

use super::collection::JsonCollection;
use super::kv_store::KeyValueStore;
use super::RepoResult;
use crate::model::project::Project;

/// Storage key holding the JSON array of all projects.
pub const PROJECTS_KEY: &str = "task_management_projects";

/// Repository contract for project persistence.
pub trait ProjectRepository {
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn get_project(&self, id: &str) -> RepoResult<Option<Project>>;
    fn create_project(&self, project: &Project) -> RepoResult<()>;
    fn update_project(&self, project: &Project) -> RepoResult<()>;
    fn delete_project(&self, id: &str) -> RepoResult<Project>;
}

/// Project repository persisting under [`PROJECTS_KEY`].
#[derive(Clone)]
pub struct KvProjectRepository<S> {
    projects: JsonCollection<S, Project>,
}

impl<S: KeyValueStore> KvProjectRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            projects: JsonCollection::new(store, PROJECTS_KEY),
        }
    }
}

impl<S: KeyValueStore> ProjectRepository for KvProjectRepository<S> {
    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.projects.load_all()
    }

    fn get_project(&self, id: &str) -> RepoResult<Option<Project>> {
        self.projects.get(id)
    }

    fn create_project(&self, project: &Project) -> RepoResult<()> {
        self.projects.insert(project)
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        self.projects.replace(project)
    }

    fn delete_project(&self, id: &str) -> RepoResult<Project> {
        self.projects.remove(id)
    }
}
