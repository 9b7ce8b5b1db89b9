//! ProvisioningPipeline - one idempotent reconciliation run.
//!
//! Stages run strictly in order: application, environments, target groups,
//! then the optional entitlement and publish stages. Every stage after the
//! first depends on the application id, and the last two also on the
//! environment keys.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::error::{ProvisionError, Stage, StageStatus};
use super::handlers::{
    EnsureApplicationCommand, EnsureApplicationHandler, EnsureEnvironmentsCommand,
    EnsureEnvironmentsHandler, EnsureTargetGroupsCommand, EnsureTargetGroupsHandler,
    EnsureUserEntitlementCommand, EnsureUserEntitlementHandler, EntitlementOutcome,
    PublishPropertiesCommand, PublishPropertiesHandler,
};
use crate::domain::application::Application;
use crate::domain::environment::{EnvironmentKeys, EnvironmentRole};
use crate::domain::foundation::ReconcileOutcome;
use crate::domain::targeting::{TargetGroupCatalog, TargetingProperties};
use crate::ports::{FeatureManagementApi, Pacer, PropertyStore};

/// Desired state for one run.
#[derive(Debug, Clone)]
pub struct ProvisioningPlan {
    pub app_name: String,
    pub environments: Vec<EnvironmentRole>,
    pub catalog: TargetGroupCatalog,
    pub targeting: TargetingProperties,
    /// Entitlement stage runs only when set.
    pub entitlement_email: Option<String>,
}

impl ProvisioningPlan {
    /// Every role, the built-in catalog and default properties.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            environments: EnvironmentRole::ALL.to_vec(),
            catalog: TargetGroupCatalog::builtin(),
            targeting: TargetingProperties::default(),
            entitlement_email: None,
        }
    }

    pub fn with_catalog(mut self, catalog: TargetGroupCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_entitlement(mut self, email: impl Into<String>) -> Self {
        self.entitlement_email = Some(email.into());
        self
    }
}

/// Downstream store and the project to publish under.
pub struct PublishTarget {
    pub project: String,
    pub store: Arc<dyn PropertyStore>,
}

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct ProvisioningReport {
    pub application: Application,
    pub application_outcome: ReconcileOutcome,
    pub environment_keys: EnvironmentKeys,
    pub environments: BTreeMap<EnvironmentRole, ReconcileOutcome>,
    pub target_groups: Vec<(String, ReconcileOutcome)>,
    pub entitlement: StageStatus<EntitlementOutcome>,
    /// Number of properties written.
    pub publish: StageStatus<usize>,
}

impl ProvisioningReport {
    /// Number of resources created by this run.
    pub fn created_count(&self) -> usize {
        let app = usize::from(self.application_outcome.is_created());
        let envs = self.environments.values().filter(|o| o.is_created()).count();
        let groups = self
            .target_groups
            .iter()
            .filter(|(_, o)| o.is_created())
            .count();
        app + envs + groups
    }
}

/// Runs the reconciliation stages against injected ports.
pub struct ProvisioningPipeline {
    api: Arc<dyn FeatureManagementApi>,
    pacer: Arc<dyn Pacer>,
    publish: Option<PublishTarget>,
}

impl ProvisioningPipeline {
    pub fn new(api: Arc<dyn FeatureManagementApi>, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            api,
            pacer,
            publish: None,
        }
    }

    /// Enables the publish stage.
    pub fn with_publish(mut self, target: PublishTarget) -> Self {
        self.publish = Some(target);
        self
    }

    pub async fn run(&self, plan: &ProvisioningPlan) -> Result<ProvisioningReport, ProvisionError> {
        // Reject a catalog clients could never match before touching the network.
        plan.targeting.check_catalog(&plan.catalog)?;
        for (property, default) in plan.targeting.iter() {
            tracing::debug!(property, default = %default, "Targeting property default");
        }

        tracing::info!(stage = %Stage::Application, application = %plan.app_name, "Starting stage");
        let app = EnsureApplicationHandler::new(self.api.clone(), self.pacer.clone())
            .handle(EnsureApplicationCommand {
                name: plan.app_name.clone(),
            })
            .await?;
        let application_id = app.application.id.clone();

        tracing::info!(stage = %Stage::Environments, application_id = %application_id, "Starting stage");
        let environments = EnsureEnvironmentsHandler::new(self.api.clone(), self.pacer.clone())
            .handle(EnsureEnvironmentsCommand::for_roles(
                application_id.clone(),
                plan.environments.iter().copied(),
            ))
            .await?;

        tracing::info!(stage = %Stage::TargetGroups, application_id = %application_id, "Starting stage");
        let target_groups = EnsureTargetGroupsHandler::new(self.api.clone(), self.pacer.clone())
            .handle(EnsureTargetGroupsCommand {
                application_id: application_id.clone(),
                catalog: plan.catalog.clone(),
            })
            .await?;

        let entitlement = match &plan.entitlement_email {
            Some(email) => {
                tracing::info!(stage = %Stage::Entitlement, email = %email, "Starting stage");
                let result = EnsureUserEntitlementHandler::new(self.api.clone(), self.pacer.clone())
                    .handle(EnsureUserEntitlementCommand {
                        email: email.clone(),
                        application_id: application_id.clone(),
                    })
                    .await;
                Stage::Entitlement
                    .error_policy()
                    .apply(Stage::Entitlement, result)?
            }
            None => {
                tracing::debug!(stage = %Stage::Entitlement, "No user configured, skipping");
                StageStatus::Skipped
            }
        };

        let publish = match &self.publish {
            Some(target) => {
                tracing::info!(stage = %Stage::Publish, project = %target.project, "Starting stage");
                let result = PublishPropertiesHandler::new(target.store.clone())
                    .handle(PublishPropertiesCommand {
                        project: target.project.clone(),
                        application_id: application_id.clone(),
                        keys: environments.keys.clone(),
                    })
                    .await;
                Stage::Publish.error_policy().apply(Stage::Publish, result)?
            }
            None => {
                tracing::debug!(stage = %Stage::Publish, "Downstream store not configured, skipping");
                StageStatus::Skipped
            }
        };

        let report = ProvisioningReport {
            application: app.application,
            application_outcome: app.outcome,
            environment_keys: environments.keys,
            environments: environments.outcomes,
            target_groups: target_groups.outcomes,
            entitlement,
            publish,
        };

        tracing::info!(
            application_id = %application_id,
            created = report.created_count(),
            "Provisioning run complete"
        );
        Ok(report)
    }
}
