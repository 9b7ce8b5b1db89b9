//! Resolved role → key mapping.

use std::collections::BTreeMap;

use super::EnvironmentRole;
use crate::domain::foundation::EnvironmentKey;

/// Environment keys resolved during a run, ordered by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentKeys {
    keys: BTreeMap<EnvironmentRole, EnvironmentKey>,
}

impl EnvironmentKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the key for a role, replacing any earlier one.
    pub fn insert(&mut self, role: EnvironmentRole, key: EnvironmentKey) {
        self.keys.insert(role, key);
    }

    pub fn get(&self, role: EnvironmentRole) -> Option<&EnvironmentKey> {
        self.keys.get(&role)
    }

    /// First role of `desired` with no usable key, if any.
    pub fn first_unresolved(&self, desired: &[EnvironmentRole]) -> Option<EnvironmentRole> {
        desired.iter().copied().find(|role| {
            self.keys
                .get(role)
                .map_or(true, |key| key.is_blank())
        })
    }

    /// Iterates in role order.
    pub fn iter(&self) -> impl Iterator<Item = (EnvironmentRole, &EnvironmentKey)> {
        self.keys.iter().map(|(role, key)| (*role, key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
