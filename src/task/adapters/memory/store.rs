//! In-memory task and subtask store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Subtask, SubtaskId, Task, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Tasks and subtasks share one lock, so cascade deletes and
/// parent-plus-child inserts are atomic with respect to readers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    subtasks: HashMap<SubtaskId, Subtask>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Checks that the incoming version directly follows the stored one.
fn check_version(stored: &Task, incoming: &Task) -> TaskStoreResult<()> {
    if incoming.version() == stored.version() + 1 {
        Ok(())
    } else {
        Err(TaskStoreError::Conflict {
            task_id: incoming.id(),
            stored: stored.version(),
            proposed: incoming.version(),
        })
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn store(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| TaskStoreError::persistence(std::io::Error::other(e.to_string())))?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| TaskStoreError::persistence(std::io::Error::other(e.to_string())))?;
        let stored = state
            .tasks
            .get(&task.id())
            .ok_or(TaskStoreError::TaskNotFound(task.id()))?;
        check_version(stored, task)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self
            .state
            .read()
            .map_err(|e| TaskStoreError::persistence(std::io::Error::other(e.to_string())))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_open(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(|e| TaskStoreError::persistence(std::io::Error::other(e.to_string())))?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.status().is_open())
            .cloned()
            .collect())
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| TaskStoreError::persistence(std::io::Error::other(e.to_string())))?;
        let task = state
            .tasks
            .remove(&id)
            .ok_or(TaskStoreError::TaskNotFound(id))?;
        for subtask_id in task.subtask_ids() {
            state.subtasks.remove(subtask_id);
        }
        Ok(())
    }

    async fn insert_subtask(&self, parent: &Task, subtask: &Subtask) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| TaskStoreError::persistence(std::io::Error::other(e.to_string())))?;
        let stored = state
            .tasks
            .get(&parent.id())
            .ok_or(TaskStoreError::TaskNotFound(parent.id()))?;
        check_version(stored, parent)?;
        if state.subtasks.contains_key(&subtask.id()) {
            return Err(TaskStoreError::DuplicateSubtask(subtask.id()));
        }
        state.tasks.insert(parent.id(), parent.clone());
        state.subtasks.insert(subtask.id(), subtask.clone());
        Ok(())
    }

    async fn update_subtask(&self, subtask: &Subtask) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| TaskStoreError::persistence(std::io::Error::other(e.to_string())))?;
        if !state.subtasks.contains_key(&subtask.id()) {
            return Err(TaskStoreError::SubtaskNotFound(subtask.id()));
        }
        state.subtasks.insert(subtask.id(), subtask.clone());
        Ok(())
    }

    async fn find_subtask(&self, id: SubtaskId) -> TaskStoreResult<Option<Subtask>> {
        let state = self
            .state
            .read()
            .map_err(|e| TaskStoreError::persistence(std::io::Error::other(e.to_string())))?;
        Ok(state.subtasks.get(&id).cloned())
    }

    async fn list_subtasks(&self, task_id: TaskId) -> TaskStoreResult<Vec<Subtask>> {
        let state = self
            .state
            .read()
            .map_err(|e| TaskStoreError::persistence(std::io::Error::other(e.to_string())))?;
        let Some(task) = state.tasks.get(&task_id) else {
            return Ok(Vec::new());
        };
        Ok(task
            .subtask_ids()
            .iter()
            .filter_map(|id| state.subtasks.get(id).cloned())
            .collect())
    }
}
