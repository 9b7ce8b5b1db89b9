//! Environments scoped to one application.

mod keys;
mod role;

pub use keys::EnvironmentKeys;
pub use role::EnvironmentRole;

use serde::{Deserialize, Serialize};

use super::foundation::{EnvironmentKey, Named};

/// An environment as listed by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub key: EnvironmentKey,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Named for Environment {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Body of an environment upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEnvironment {
    pub name: String,
    pub description: String,
}

impl NewEnvironment {
    /// The environment desired for `role`.
    pub fn for_role(role: EnvironmentRole) -> Self {
        Self {
            name: role.display_name().to_string(),
            description: role.description(),
        }
    }
}
