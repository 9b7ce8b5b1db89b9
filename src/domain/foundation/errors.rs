//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised while building or checking the target-group catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Target group at position {position} has an empty name")]
    EmptyName { position: usize },

    #[error("Target group '{name}' is declared more than once")]
    DuplicateName { name: String },

    #[error("Target group '{group}' references undeclared property '{property}'")]
    UndeclaredProperty { group: String, property: String },

    #[error("Target group '{group}' uses '{operator}' on property '{property}' of the wrong type")]
    PropertyTypeMismatch {
        group: String,
        property: String,
        operator: String,
    },

    #[error("Target group '{group}' uses 'in-array' without an operand")]
    MissingOperand { group: String },

    #[error("Failed to read catalog file '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),
}

impl CatalogError {
    /// Creates an undeclared property error.
    pub fn undeclared(group: impl Into<String>, property: impl Into<String>) -> Self {
        CatalogError::UndeclaredProperty {
            group: group.into(),
            property: property.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undeclared_property_message_names_both_sides() {
        let err = CatalogError::undeclared("betaUsers", "isBeta");
        assert_eq!(
            err.to_string(),
            "Target group 'betaUsers' references undeclared property 'isBeta'"
        );
    }
}
