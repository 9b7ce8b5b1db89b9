//! Application layer - Commands, Handlers and the provisioning pipeline.
//!
//! Handlers reconcile one kind of remote resource each. The pipeline runs
//! them in dependency order and applies each stage's error policy.

mod error;
pub mod handlers;
mod pipeline;

pub use error::{ErrorPolicy, ProvisionError, Stage, StageStatus};
pub use handlers::{
    EnsureApplicationCommand, EnsureApplicationHandler, EnsureApplicationResult,
    EnsureEnvironmentsCommand, EnsureEnvironmentsHandler, EnsureEnvironmentsResult,
    EnsureTargetGroupsCommand, EnsureTargetGroupsHandler, EnsureTargetGroupsResult,
    EnsureUserEntitlementCommand, EnsureUserEntitlementHandler, EntitlementOutcome,
    PublishPropertiesCommand, PublishPropertiesHandler,
};
pub use pipeline::{ProvisioningPipeline, ProvisioningPlan, ProvisioningReport, PublishTarget};
