//! Environment roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical role of an environment within an application.
///
/// The set is fixed; declaration order is the reconciliation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum EnvironmentRole {
    Production,
    PreProd,
    Qa,
    Dev,
}

impl EnvironmentRole {
    /// All roles in reconciliation order.
    pub const ALL: [EnvironmentRole; 4] = [
        EnvironmentRole::Production,
        EnvironmentRole::PreProd,
        EnvironmentRole::Qa,
        EnvironmentRole::Dev,
    ];

    /// Display name of the environment on the remote service.
    pub fn display_name(&self) -> &'static str {
        match self {
            EnvironmentRole::Production => "Production",
            EnvironmentRole::PreProd => "Pre-Prod",
            EnvironmentRole::Qa => "QA",
            EnvironmentRole::Dev => "Dev",
        }
    }

    /// Description sent when the environment is created.
    pub fn description(&self) -> String {
        format!("{} Environment", self.display_name())
    }

    /// Stable identifier of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentRole::Production => "production",
            EnvironmentRole::PreProd => "preProd",
            EnvironmentRole::Qa => "qa",
            EnvironmentRole::Dev => "dev",
        }
    }
}

impl fmt::Display for EnvironmentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnvironmentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnvironmentRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown environment role '{}'", s))
    }
}
