//! EnsureEnvironmentsHandler - makes sure each desired environment role
//! exists under the application and collects the key of each.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::ProvisionError;
use crate::domain::environment::{EnvironmentKeys, EnvironmentRole, NewEnvironment};
use crate::domain::foundation::{find_by_name, ApplicationId, NameMatch, ReconcileOutcome};
use crate::ports::{FeatureManagementApi, PaceTier, Pacer};

/// Command to reconcile environments.
#[derive(Debug, Clone)]
pub struct EnsureEnvironmentsCommand {
    pub application_id: ApplicationId,
    /// Roles to reconcile, deduplicated, in role order.
    pub roles: Vec<EnvironmentRole>,
}

impl EnsureEnvironmentsCommand {
    /// Reconciles every role.
    pub fn all(application_id: ApplicationId) -> Self {
        Self::for_roles(application_id, EnvironmentRole::ALL)
    }

    pub fn for_roles(
        application_id: ApplicationId,
        roles: impl IntoIterator<Item = EnvironmentRole>,
    ) -> Self {
        let mut roles: Vec<_> = roles.into_iter().collect();
        roles.sort();
        roles.dedup();
        Self {
            application_id,
            roles,
        }
    }
}

/// Keys for every requested role, plus what was done for each.
#[derive(Debug, Clone)]
pub struct EnsureEnvironmentsResult {
    pub keys: EnvironmentKeys,
    pub outcomes: BTreeMap<EnvironmentRole, ReconcileOutcome>,
}

/// Handler for environment reconciliation.
pub struct EnsureEnvironmentsHandler {
    api: Arc<dyn FeatureManagementApi>,
    pacer: Arc<dyn Pacer>,
}

impl EnsureEnvironmentsHandler {
    pub fn new(api: Arc<dyn FeatureManagementApi>, pacer: Arc<dyn Pacer>) -> Self {
        Self { api, pacer }
    }

    pub async fn handle(
        &self,
        cmd: EnsureEnvironmentsCommand,
    ) -> Result<EnsureEnvironmentsResult, ProvisionError> {
        self.pacer.wait(PaceTier::Short).await;
        let existing = self
            .api
            .list_environments(&cmd.application_id)
            .await
            .map_err(ProvisionError::api("list environments"))?;

        let mut keys = EnvironmentKeys::new();
        let mut outcomes = BTreeMap::new();

        for role in &cmd.roles {
            let role = *role;
            let name = role.display_name();

            let found = find_by_name(&existing, name);
            if let NameMatch::Ambiguous { count, .. } = &found {
                tracing::warn!(environment = name, matches = count, "Multiple matching environments found, using the first");
            }

            if let Some(environment) = found.existing() {
                tracing::debug!(environment = name, "Environment already exists");
                keys.insert(role, environment.key.clone());
                outcomes.insert(role, ReconcileOutcome::Existing);
                continue;
            }

            tracing::info!(environment = name, application_id = %cmd.application_id, "Creating environment");
            self.pacer.wait(PaceTier::Short).await;
            let created = self
                .api
                .upsert_environment(&cmd.application_id, &NewEnvironment::for_role(role))
                .await
                .map_err(ProvisionError::api("create environment"))?;

            keys.insert(role, created.key);
            outcomes.insert(role, ReconcileOutcome::Created);
        }

        if let Some(role) = keys.first_unresolved(&cmd.roles) {
            return Err(ProvisionError::UnresolvedEnvironmentKey(role));
        }

        Ok(EnsureEnvironmentsResult { keys, outcomes })
    }
}
