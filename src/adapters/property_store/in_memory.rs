//! In-memory property store for testing.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

use crate::ports::{PropertyPath, PropertyStore, PropertyStoreError};

/// Records every write in order; optionally fails them all.
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    writes: Mutex<Vec<(PropertyPath, String)>>,
    failure: Option<PropertyStoreError>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write with `error`.
    pub fn failing(error: PropertyStoreError) -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    /// Successful writes, in order.
    pub fn writes(&self) -> Vec<(PropertyPath, String)> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Latest value written at `project/name`.
    pub fn value(&self, project: &str, name: &str) -> Option<String> {
        let path = PropertyPath::new(project, name);
        self.writes()
            .into_iter()
            .rev()
            .find(|(written, _)| *written == path)
            .map(|(_, value)| value)
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn put(&self, path: &PropertyPath, value: &str) -> Result<(), PropertyStoreError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path.clone(), value.to_string()));
        Ok(())
    }
}
