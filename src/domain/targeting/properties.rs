//! Custom targeting properties.
//!
//! Process-wide defaults registered with flag-evaluation clients. The
//! provisioning run never persists them; it uses them to check that every
//! condition in the catalog refers to a property clients actually set.

use std::collections::BTreeMap;
use std::fmt;

use super::{ConditionOperator, TargetGroupCatalog};
use crate::domain::foundation::CatalogError;

/// Default value of a custom property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Boolean(bool),
    String(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(value) => write!(f, "{}", value),
            PropertyValue::String(value) => write!(f, "{}", value),
        }
    }
}

/// Declared custom properties and their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetingProperties {
    properties: BTreeMap<String, PropertyValue>,
}

impl Default for TargetingProperties {
    fn default() -> Self {
        Self::empty()
            .with_boolean("isBetaUser", false)
            .with_string("accountType", "dental")
    }
}

impl TargetingProperties {
    pub fn empty() -> Self {
        Self {
            properties: BTreeMap::new(),
        }
    }

    pub fn with_boolean(mut self, name: impl Into<String>, default: bool) -> Self {
        self.properties
            .insert(name.into(), PropertyValue::Boolean(default));
        self
    }

    pub fn with_string(mut self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.properties
            .insert(name.into(), PropertyValue::String(default.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Checks every catalog condition against the declared properties.
    ///
    /// Known operators must match the property type; unknown operators only
    /// need the property to be declared.
    pub fn check_catalog(&self, catalog: &TargetGroupCatalog) -> Result<(), CatalogError> {
        for group in catalog.groups() {
            for condition in &group.conditions {
                let value = self
                    .get(&condition.property)
                    .ok_or_else(|| CatalogError::undeclared(&group.name, &condition.property))?;

                let type_matches = match (&condition.operator, value) {
                    (ConditionOperator::IsTrue, PropertyValue::Boolean(_)) => true,
                    (ConditionOperator::InArray, PropertyValue::String(_)) => true,
                    (ConditionOperator::Other(_), _) => true,
                    _ => false,
                };
                if !type_matches {
                    return Err(CatalogError::PropertyTypeMismatch {
                        group: group.name.clone(),
                        property: condition.property.clone(),
                        operator: condition.operator.to_string(),
                    });
                }

                if condition.operator == ConditionOperator::InArray
                    && condition.operand.as_ref().map_or(true, |values| values.is_empty())
                {
                    return Err(CatalogError::MissingOperand {
                        group: group.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
