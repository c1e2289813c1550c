//! Task persistence contract and key-value implementation.

use super::collection::JsonCollection;
use super::kv_store::KeyValueStore;
use super::RepoResult;
use crate::model::task::Task;

/// Storage key holding the JSON array of all tasks.
pub const TASKS_KEY: &str = "task_management_tasks";

/// Repository contract for task persistence.
pub trait TaskRepository {
    /// All tasks in insertion order.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn get_task(&self, id: &str) -> RepoResult<Option<Task>>;
    fn create_task(&self, task: &Task) -> RepoResult<()>;
    /// Replaces an existing task. Fails with `NotFound` for unknown ids.
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    /// Removes a task and returns it. Fails with `NotFound` for unknown ids.
    fn delete_task(&self, id: &str) -> RepoResult<Task>;
    fn replace_all_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// Task repository persisting under [`TASKS_KEY`].
#[derive(Clone)]
pub struct KvTaskRepository<S> {
    tasks: JsonCollection<S, Task>,
}

impl<S: KeyValueStore> KvTaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            tasks: JsonCollection::new(store, TASKS_KEY),
        }
    }
}

impl<S: KeyValueStore> TaskRepository for KvTaskRepository<S> {
    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.tasks.load_all()
    }

    fn get_task(&self, id: &str) -> RepoResult<Option<Task>> {
        self.tasks.get(id)
    }

    fn create_task(&self, task: &Task) -> RepoResult<()> {
        self.tasks.insert(task)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        self.tasks.replace(task)
    }

    fn delete_task(&self, id: &str) -> RepoResult<Task> {
        self.tasks.remove(id)
    }

    fn replace_all_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        self.tasks.save_all(tasks)
    }
}
