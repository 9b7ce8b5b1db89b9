//! Targeting: target groups, the desired catalog and custom properties.

mod catalog;
mod properties;
mod target_group;

pub use catalog::TargetGroupCatalog;
pub use properties::{PropertyValue, TargetingProperties};
pub use target_group::{
    Condition, ConditionOperator, TargetGroup, TargetGroupSummary, TARGET_GROUP_TYPE,
};
