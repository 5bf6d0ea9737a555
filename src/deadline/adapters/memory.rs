//! In-memory watermark store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::deadline::{
    domain::DeadlineWatermark,
    ports::{WatermarkStore, WatermarkStoreError, WatermarkStoreResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory watermark store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWatermarkStore {
    state: Arc<RwLock<HashMap<TaskId, DeadlineWatermark>>>,
}

impl InMemoryWatermarkStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WatermarkStore for InMemoryWatermarkStore {
    async fn find(&self, task_id: TaskId) -> WatermarkStoreResult<Option<DeadlineWatermark>> {
        let state = self
            .state
            .read()
            .map_err(|e| WatermarkStoreError::persistence(std::io::Error::other(e.to_string())))?;
        Ok(state.get(&task_id).cloned())
    }

    async fn save(&self, watermark: &DeadlineWatermark) -> WatermarkStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| WatermarkStoreError::persistence(std::io::Error::other(e.to_string())))?;
        state.insert(watermark.task_id(), watermark.clone());
        Ok(())
    }
}
