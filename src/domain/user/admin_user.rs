//! Administrative users and their application entitlements.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::environment::EnvironmentRole;
use crate::domain::foundation::ApplicationId;

/// Access level a user holds on an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessLevel {
    Read,
    Write,
    /// Any other level, passed through untouched.
    Other(String),
}

impl AccessLevel {
    pub fn as_str(&self) -> &str {
        match self {
            AccessLevel::Read => "read",
            AccessLevel::Write => "write",
            AccessLevel::Other(level) => level,
        }
    }
}

impl From<String> for AccessLevel {
    fn from(level: String) -> Self {
        match level.as_str() {
            "read" => AccessLevel::Read,
            "write" => AccessLevel::Write,
            _ => AccessLevel::Other(level),
        }
    }
}

impl From<AccessLevel> for String {
    fn from(level: AccessLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Per-environment access on one application, keyed by environment name.
///
/// Unknown per-application fields are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationEntitlement {
    #[serde(default)]
    pub environments: BTreeMap<String, AccessLevel>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApplicationEntitlement {
    pub fn new(environments: BTreeMap<String, AccessLevel>) -> Self {
        Self {
            environments,
            extra: Map::new(),
        }
    }

    /// Write access on the production environment only.
    pub fn production_write() -> Self {
        let mut environments = BTreeMap::new();
        environments.insert(
            EnvironmentRole::Production.display_name().to_string(),
            AccessLevel::Write,
        );
        Self::new(environments)
    }
}

/// Application id → entitlement.
pub type Applications = BTreeMap<String, ApplicationEntitlement>;

/// A user of the feature-management service.
///
/// Fields the service returns beyond the known ones are kept in `extra` and
/// sent back unchanged on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub email: String,
    /// Empty when the service returned no name; omitted again on update.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub team_admin: bool,
    #[serde(default)]
    pub applications: Applications,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdminUser {
    /// A new non-admin user named after its email, holding one entitlement.
    pub fn new(
        email: impl Into<String>,
        application_id: &ApplicationId,
        entitlement: ApplicationEntitlement,
    ) -> Self {
        let email = email.into();
        let mut applications = Applications::new();
        applications.insert(application_id.to_string(), entitlement);
        Self {
            name: email.clone(),
            email,
            team_admin: false,
            applications,
            extra: Map::new(),
        }
    }

    /// Merges one entitlement into the existing map.
    ///
    /// The new entry replaces any entry for the same application; entries for
    /// other applications are kept.
    pub fn with_entitlement(
        mut self,
        application_id: &ApplicationId,
        entitlement: ApplicationEntitlement,
    ) -> Self {
        self.applications
            .insert(application_id.to_string(), entitlement);
        self
    }
}
