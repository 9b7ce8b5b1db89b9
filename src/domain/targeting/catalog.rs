//! Desired target-group catalog.
//!
//! The built-in catalog holds the four audiences every provisioned
//! application gets. A YAML file with the same shape as the wire format can
//! replace it.

use std::collections::HashSet;
use std::path::Path;

use super::{Condition, TargetGroup};
use crate::domain::foundation::CatalogError;

/// Ordered, name-unique list of desired target groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetGroupCatalog {
    groups: Vec<TargetGroup>,
}

impl TargetGroupCatalog {
    /// Builds a catalog, rejecting empty or duplicate names.
    pub fn new(groups: Vec<TargetGroup>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (position, group) in groups.iter().enumerate() {
            if group.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { position });
            }
            if !seen.insert(group.name.as_str()) {
                return Err(CatalogError::DuplicateName {
                    name: group.name.clone(),
                });
            }
        }
        Ok(Self { groups })
    }

    /// The catalog provisioned when no file is configured.
    pub fn builtin() -> Self {
        let customers = |name: &str, account: &str| {
            TargetGroup::new(
                name,
                vec![Condition::in_array("accountType", [account, "all-in-one"])],
            )
        };

        Self {
            groups: vec![
                TargetGroup::new("betaUsers", vec![Condition::is_true("isBetaUser")]),
                customers("dentalCustomers", "dental"),
                customers("visionCustomers", "vision"),
                customers("healthCustomers", "health"),
            ],
        }
    }

    /// Parses a YAML list of target groups.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let groups: Vec<TargetGroup> =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(groups)
    }

    /// Reads and parses a YAML catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let yaml = std::fs::read_to_string(path).map_err(|e| CatalogError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn groups(&self) -> &[TargetGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for TargetGroupCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
