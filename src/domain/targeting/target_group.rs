//! Target groups and their conditions.
//!
//! Conditions are forwarded to the remote service verbatim. Operators other
//! than the two the catalog uses are preserved as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Named;

/// Wire value of the `type` field.
pub const TARGET_GROUP_TYPE: &str = "target-group";

/// Operator of a targeting condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionOperator {
    /// Boolean property is true.
    IsTrue,
    /// String property is one of the operand values.
    InArray,
    /// Any other operator, passed through untouched.
    Other(String),
}

impl ConditionOperator {
    pub fn as_str(&self) -> &str {
        match self {
            ConditionOperator::IsTrue => "is-true",
            ConditionOperator::InArray => "in-array",
            ConditionOperator::Other(op) => op,
        }
    }
}

impl From<String> for ConditionOperator {
    fn from(op: String) -> Self {
        match op.as_str() {
            "is-true" => ConditionOperator::IsTrue,
            "in-array" => ConditionOperator::InArray,
            _ => ConditionOperator::Other(op),
        }
    }
}

impl From<ConditionOperator> for String {
    fn from(op: ConditionOperator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single condition over a custom user property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub operator: ConditionOperator,
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operand: Option<Vec<String>>,
}

impl Condition {
    /// `property` is true.
    pub fn is_true(property: impl Into<String>) -> Self {
        Self {
            operator: ConditionOperator::IsTrue,
            property: property.into(),
            operand: None,
        }
    }

    /// `property` is one of `values`.
    pub fn in_array<I, S>(property: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            operator: ConditionOperator::InArray,
            property: property.into(),
            operand: Some(values.into_iter().map(Into::into).collect()),
        }
    }
}

fn default_type() -> String {
    TARGET_GROUP_TYPE.to_string()
}

/// Full definition of a target group, as sent on upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroup {
    #[serde(rename = "type", default = "default_type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl TargetGroup {
    pub fn new(name: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            kind: default_type(),
            name: name.into(),
            conditions,
        }
    }
}

impl Named for TargetGroup {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A target group as listed by the remote service.
///
/// Only the name is needed for matching; existing conditions are never read
/// back, so groups built with unknown condition shapes still list cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroupSummary {
    pub name: String,
}

impl Named for TargetGroupSummary {
    fn name(&self) -> &str {
        &self.name
    }
}
