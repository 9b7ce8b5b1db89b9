//! Feature-management application record.

use serde::{Deserialize, Serialize};

use super::foundation::{ApplicationId, Named};

/// An application as listed by the remote service.
///
/// Matching uses `name`; the `id` is the handle every later call needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub name: String,
}

impl Application {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ApplicationId::new(id),
            name: name.into(),
        }
    }
}

impl Named for Application {
    fn name(&self) -> &str {
        &self.name
    }
}
