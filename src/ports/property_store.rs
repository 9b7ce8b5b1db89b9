//! Downstream property store port.
//!
//! The configuration/secret store deployment pipelines read from. Each
//! property is a flat key/value pair addressed by project and name.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Address of a property: `<project>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    pub project: String,
    pub name: String,
}

impl PropertyPath {
    pub fn new(project: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.name)
    }
}

/// Port for writing properties to the downstream store.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Creates or overwrites the property at `path`.
    async fn put(&self, path: &PropertyPath, value: &str) -> Result<(), PropertyStoreError>;
}

/// Errors from the downstream store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyStoreError {
    #[error("Property store unreachable: {0}")]
    Network(String),

    #[error("Property store rejected {path} (HTTP {status}): {body}")]
    Rejected {
        path: String,
        status: u16,
        body: String,
    },
}
