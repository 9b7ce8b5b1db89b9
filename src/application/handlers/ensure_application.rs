//! EnsureApplicationHandler - makes sure one application with the desired
//! name exists and returns its id.

use std::sync::Arc;

use crate::application::ProvisionError;
use crate::domain::application::Application;
use crate::domain::foundation::{find_by_name, NameMatch, ReconcileOutcome};
use crate::ports::{FeatureManagementApi, PaceTier, Pacer};

/// Command to reconcile the application.
#[derive(Debug, Clone)]
pub struct EnsureApplicationCommand {
    pub name: String,
}

/// The application to provision under, and whether it was just created.
#[derive(Debug, Clone)]
pub struct EnsureApplicationResult {
    pub application: Application,
    pub outcome: ReconcileOutcome,
}

/// Handler for application reconciliation.
pub struct EnsureApplicationHandler {
    api: Arc<dyn FeatureManagementApi>,
    pacer: Arc<dyn Pacer>,
}

impl EnsureApplicationHandler {
    pub fn new(api: Arc<dyn FeatureManagementApi>, pacer: Arc<dyn Pacer>) -> Self {
        Self { api, pacer }
    }

    pub async fn handle(
        &self,
        cmd: EnsureApplicationCommand,
    ) -> Result<EnsureApplicationResult, ProvisionError> {
        let applications = self
            .api
            .list_applications()
            .await
            .map_err(ProvisionError::api("list applications"))?;

        let found = find_by_name(&applications, &cmd.name);
        if let NameMatch::Ambiguous { first, count } = &found {
            tracing::warn!(
                application = %cmd.name,
                matches = count,
                application_id = %first.id,
                "Multiple matching applications found, using the first"
            );
        }

        if let Some(existing) = found.existing() {
            tracing::info!(application = %cmd.name, application_id = %existing.id, "Matching application found");
            return Ok(EnsureApplicationResult {
                application: existing.clone(),
                outcome: ReconcileOutcome::Existing,
            });
        }

        tracing::info!(application = %cmd.name, "No existing application with desired name, creating");
        self.pacer.wait(PaceTier::Short).await;
        let created = self
            .api
            .create_application(&cmd.name)
            .await
            .map_err(ProvisionError::api("create application"))?;

        // Give the service time to finish provisioning before dependent calls.
        self.pacer.wait(PaceTier::Long).await;
        tracing::info!(application = %cmd.name, application_id = %created.id, "Created application");

        Ok(EnsureApplicationResult {
            application: created,
            outcome: ReconcileOutcome::Created,
        })
    }
}
