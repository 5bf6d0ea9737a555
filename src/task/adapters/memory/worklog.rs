//! In-memory work log store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{TaskId, WorkLog, WorkLogCorrection, WorkLogEntry, WorkLogId},
    ports::{WorkLogStore, WorkLogStoreError, WorkLogStoreResult},
};

/// Thread-safe in-memory work log store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkLogStore {
    state: Arc<RwLock<InMemoryWorkLogState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkLogState {
    entries: HashMap<WorkLogId, WorkLog>,
    corrections: HashMap<WorkLogId, WorkLogCorrection>,
}

impl InMemoryWorkLogStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkLogStore for InMemoryWorkLogStore {
    async fn append(&self, entry: &WorkLog) -> WorkLogStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| WorkLogStoreError::persistence(std::io::Error::other(e.to_string())))?;
        if state.entries.contains_key(&entry.id()) {
            return Err(WorkLogStoreError::DuplicateWorkLog(entry.id()));
        }
        state.entries.insert(entry.id(), entry.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: WorkLogId) -> WorkLogStoreResult<Option<WorkLog>> {
        let state = self
            .state
            .read()
            .map_err(|e| WorkLogStoreError::persistence(std::io::Error::other(e.to_string())))?;
        Ok(state.entries.get(&id).cloned())
    }

    async fn attach_correction(&self, correction: &WorkLogCorrection) -> WorkLogStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| WorkLogStoreError::persistence(std::io::Error::other(e.to_string())))?;
        let id = correction.work_log_id();
        if !state.entries.contains_key(&id) {
            return Err(WorkLogStoreError::WorkLogNotFound(id));
        }
        if state.corrections.contains_key(&id) {
            return Err(WorkLogStoreError::CorrectionExists(id));
        }
        state.corrections.insert(id, correction.clone());
        Ok(())
    }

    async fn find_correction(
        &self,
        work_log_id: WorkLogId,
    ) -> WorkLogStoreResult<Option<WorkLogCorrection>> {
        let state = self
            .state
            .read()
            .map_err(|e| WorkLogStoreError::persistence(std::io::Error::other(e.to_string())))?;
        Ok(state.corrections.get(&work_log_id).cloned())
    }

    async fn list_for_task(&self, task_id: TaskId) -> WorkLogStoreResult<Vec<WorkLogEntry>> {
        let state = self
            .state
            .read()
            .map_err(|e| WorkLogStoreError::persistence(std::io::Error::other(e.to_string())))?;
        let mut entries: Vec<WorkLogEntry> = state
            .entries
            .values()
            .filter(|entry| entry.task_id() == task_id)
            .map(|entry| WorkLogEntry {
                log: entry.clone(),
                correction: state.corrections.get(&entry.id()).cloned(),
            })
            .collect();
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.log.created_at()));
        Ok(entries)
    }
}
