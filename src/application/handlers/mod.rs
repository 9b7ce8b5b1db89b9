//! Application handlers.
//!
//! One handler per reconciliation stage. Each owns its ports and exposes a
//! single `handle(command)` entry point.

mod ensure_application;
mod ensure_environments;
mod ensure_target_groups;
mod ensure_user_entitlement;
mod publish_properties;

pub use ensure_application::{
    EnsureApplicationCommand, EnsureApplicationHandler, EnsureApplicationResult,
};
pub use ensure_environments::{
    EnsureEnvironmentsCommand, EnsureEnvironmentsHandler, EnsureEnvironmentsResult,
};
pub use ensure_target_groups::{
    EnsureTargetGroupsCommand, EnsureTargetGroupsHandler, EnsureTargetGroupsResult,
};
pub use ensure_user_entitlement::{
    EnsureUserEntitlementCommand, EnsureUserEntitlementHandler, EntitlementOutcome,
};
pub use publish_properties::{
    environment_key_property, PublishPropertiesCommand, PublishPropertiesHandler,
    APPLICATION_KEY_PROPERTY,
};
