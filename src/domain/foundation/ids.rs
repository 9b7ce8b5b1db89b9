//! Strongly-typed identifier value objects.
//!
//! Both identifiers are opaque strings assigned by the remote
//! feature-management service. They are never generated locally except by
//! the in-memory backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a feature-management application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Wraps a remote application id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ApplicationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Key of an environment, consumed by flag-evaluation clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentKey(String);

impl EnvironmentKey {
    /// Wraps a remote environment key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the remote service returned a blank key.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EnvironmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EnvironmentKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}
