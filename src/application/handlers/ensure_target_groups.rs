//! EnsureTargetGroupsHandler - creates catalog target groups the
//! application does not have yet. Existing groups are never modified.

use std::sync::Arc;

use crate::application::ProvisionError;
use crate::domain::foundation::{find_by_name, ApplicationId, NameMatch, ReconcileOutcome};
use crate::domain::targeting::TargetGroupCatalog;
use crate::ports::{FeatureManagementApi, PaceTier, Pacer};

/// Command to reconcile target groups.
#[derive(Debug, Clone)]
pub struct EnsureTargetGroupsCommand {
    pub application_id: ApplicationId,
    pub catalog: TargetGroupCatalog,
}

/// Outcome per catalog group, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct EnsureTargetGroupsResult {
    pub outcomes: Vec<(String, ReconcileOutcome)>,
}

impl EnsureTargetGroupsResult {
    pub fn created_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_created()).count()
    }
}

/// Handler for target-group reconciliation.
pub struct EnsureTargetGroupsHandler {
    api: Arc<dyn FeatureManagementApi>,
    pacer: Arc<dyn Pacer>,
}

impl EnsureTargetGroupsHandler {
    pub fn new(api: Arc<dyn FeatureManagementApi>, pacer: Arc<dyn Pacer>) -> Self {
        Self { api, pacer }
    }

    pub async fn handle(
        &self,
        cmd: EnsureTargetGroupsCommand,
    ) -> Result<EnsureTargetGroupsResult, ProvisionError> {
        self.pacer.wait(PaceTier::Short).await;
        let existing = self
            .api
            .list_target_groups(&cmd.application_id)
            .await
            .map_err(ProvisionError::api("list target groups"))?;

        let mut result = EnsureTargetGroupsResult::default();

        for group in cmd.catalog.groups() {
            let found = find_by_name(&existing, &group.name);
            if let NameMatch::Ambiguous { count, .. } = &found {
                tracing::warn!(target_group = %group.name, matches = count, "Multiple matching target groups found");
            }

            if found.existing().is_some() {
                tracing::debug!(target_group = %group.name, "Target group already exists");
                result
                    .outcomes
                    .push((group.name.clone(), ReconcileOutcome::Existing));
                continue;
            }

            tracing::info!(target_group = %group.name, application_id = %cmd.application_id, "Creating target group");
            self.pacer.wait(PaceTier::Short).await;
            self.api
                .upsert_target_group(&cmd.application_id, group)
                .await
                .map_err(ProvisionError::api("create target group"))?;

            result
                .outcomes
                .push((group.name.clone(), ReconcileOutcome::Created));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ApiCall, ApiOperation, InMemoryFeatureManagementApi, RecordingPacer};
    use crate::domain::targeting::{Condition, TargetGroup};
    use crate::ports::ApiError;

    fn command() -> EnsureTargetGroupsCommand {
        EnsureTargetGroupsCommand {
            application_id: ApplicationId::new("a1"),
            catalog: TargetGroupCatalog::builtin(),
        }
    }

    fn handler(
        api: &Arc<InMemoryFeatureManagementApi>,
        pacer: &Arc<RecordingPacer>,
    ) -> EnsureTargetGroupsHandler {
        EnsureTargetGroupsHandler::new(api.clone(), pacer.clone())
    }

    #[tokio::test]
    async fn creates_every_group_on_empty_application() {
        let api = Arc::new(InMemoryFeatureManagementApi::new());
        let pacer = Arc::new(RecordingPacer::new());

        let result = handler(&api, &pacer).handle(command()).await.unwrap();

        assert_eq!(result.created_count(), 4);
        let stored = api.target_groups(&ApplicationId::new("a1"));
        assert_eq!(stored, TargetGroupCatalog::builtin().groups().to_vec());
        assert_eq!(pacer.count(PaceTier::Short), 5);
    }

    #[tokio::test]
    async fn existing_group_is_left_untouched() {
        let customised = TargetGroup::new("betaUsers", vec![Condition::is_true("isInternal")]);
        let api = Arc::new(
            InMemoryFeatureManagementApi::new().with_target_group("a1", customised.clone()),
        );
        let pacer = Arc::new(RecordingPacer::new());

        let result = handler(&api, &pacer).handle(command()).await.unwrap();

        assert_eq!(
            result.outcomes[0],
            ("betaUsers".to_string(), ReconcileOutcome::Existing)
        );
        assert_eq!(result.created_count(), 3);
        assert!(!api.calls().contains(&ApiCall::UpsertTargetGroup {
            application_id: ApplicationId::new("a1"),
            name: "betaUsers".to_string(),
        }));
        assert_eq!(api.target_groups(&ApplicationId::new("a1"))[0], customised);
    }

    #[tokio::test]
    async fn duplicate_group_names_are_not_recreated() {
        let api = Arc::new(
            InMemoryFeatureManagementApi::new()
                .with_target_group("a1", TargetGroup::new("betaUsers", vec![]))
                .with_target_group("a1", TargetGroup::new("betaUsers", vec![])),
        );
        let pacer = Arc::new(RecordingPacer::new());

        let result = handler(&api, &pacer).handle(command()).await.unwrap();

        assert_eq!(result.outcomes[0].1, ReconcileOutcome::Existing);
        assert!(!api.calls().contains(&ApiCall::UpsertTargetGroup {
            application_id: ApplicationId::new("a1"),
            name: "betaUsers".to_string(),
        }));
        assert_eq!(api.target_groups(&ApplicationId::new("a1")).len(), 5);
    }

    #[tokio::test]
    async fn upsert_failure_stops_remaining_groups() {
        let api = Arc::new(
            InMemoryFeatureManagementApi::new()
                .failing(ApiOperation::UpsertTargetGroup, ApiError::status(429, "slow down")),
        );
        let pacer = Arc::new(RecordingPacer::new());

        let err = handler(&api, &pacer).handle(command()).await.unwrap_err();

        assert!(matches!(
            err,
            ProvisionError::Api {
                operation: "create target group",
                ..
            }
        ));
        assert_eq!(api.mutation_count(), 1);
    }
}
