//! Integration tests for the provisioning pipeline.
//!
//! These tests run whole reconciliation passes against the in-memory
//! adapters and verify:
//! 1. Repeated runs converge and issue no writes
//! 2. Pacing happens at the right points
//! 3. Optional stages are skipped or degrade as configured

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use fm_provisioner::adapters::{
    ApiCall, ApiOperation, InMemoryFeatureManagementApi, InMemoryPropertyStore, RecordingPacer,
};
use fm_provisioner::application::{
    EntitlementOutcome, ProvisionError, ProvisioningPipeline, ProvisioningPlan, PublishTarget,
    StageStatus,
};
use fm_provisioner::domain::environment::EnvironmentRole;
use fm_provisioner::domain::foundation::{ApplicationId, ReconcileOutcome};
use fm_provisioner::domain::targeting::{Condition, TargetGroup};
use fm_provisioner::domain::user::{AccessLevel, AdminUser, ApplicationEntitlement};
use fm_provisioner::ports::{ApiError, PaceTier, Pacer};

// =============================================================================
// Test Infrastructure
// =============================================================================

const EMAIL: &str = "ops@example.com";

fn pipeline(api: &Arc<InMemoryFeatureManagementApi>) -> ProvisioningPipeline {
    ProvisioningPipeline::new(api.clone(), Arc::new(RecordingPacer::new()))
}

/// Pacer that records, for each wait, how many API calls preceded it.
struct CallCountingPacer {
    api: Arc<InMemoryFeatureManagementApi>,
    waits: Mutex<Vec<(PaceTier, usize)>>,
}

impl CallCountingPacer {
    fn new(api: Arc<InMemoryFeatureManagementApi>) -> Self {
        Self {
            api,
            waits: Mutex::new(Vec::new()),
        }
    }

    fn waits(&self) -> Vec<(PaceTier, usize)> {
        self.waits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for CallCountingPacer {
    async fn wait(&self, tier: PaceTier) {
        let calls = self.api.calls().len();
        self.waits.lock().unwrap().push((tier, calls));
    }
}

// =============================================================================
// Idempotence
// =============================================================================

#[tokio::test]
async fn second_run_issues_no_writes_and_returns_same_keys() {
    let api = Arc::new(InMemoryFeatureManagementApi::new());
    let plan = ProvisioningPlan::new("checkout");

    let first = pipeline(&api).run(&plan).await.unwrap();
    api.clear_calls();
    let second = pipeline(&api).run(&plan).await.unwrap();

    assert_eq!(api.mutation_count(), 0);
    assert_eq!(first.application.id, second.application.id);
    assert_eq!(first.environment_keys, second.environment_keys);
    assert_eq!(second.application_outcome, ReconcileOutcome::Existing);
    assert_eq!(second.created_count(), 0);
}

#[tokio::test]
async fn second_run_only_reads() {
    let api = Arc::new(InMemoryFeatureManagementApi::new());
    let plan = ProvisioningPlan::new("checkout");

    pipeline(&api).run(&plan).await.unwrap();
    api.clear_calls();
    let report = pipeline(&api).run(&plan).await.unwrap();
    let id = report.application.id;

    assert_eq!(
        api.calls(),
        vec![
            ApiCall::ListApplications,
            ApiCall::ListEnvironments {
                application_id: id.clone()
            },
            ApiCall::ListTargetGroups { application_id: id },
        ]
    );
}

#[tokio::test]
async fn single_application_after_repeated_runs() {
    let api = Arc::new(InMemoryFeatureManagementApi::new());
    let plan = ProvisioningPlan::new("checkout");

    for _ in 0..3 {
        pipeline(&api).run(&plan).await.unwrap();
    }

    assert_eq!(api.applications().len(), 1);
    let id = &api.applications()[0].id;
    assert_eq!(api.environments(id).len(), 4);
    assert_eq!(api.target_groups(id).len(), 4);
}

// =============================================================================
// Pacing
// =============================================================================

#[tokio::test]
async fn long_pace_follows_application_create_once() {
    let api = Arc::new(InMemoryFeatureManagementApi::new());
    let pacer = Arc::new(CallCountingPacer::new(api.clone()));

    ProvisioningPipeline::new(api.clone(), pacer.clone())
        .run(&ProvisioningPlan::new("checkout"))
        .await
        .unwrap();

    let longs: Vec<_> = pacer
        .waits()
        .into_iter()
        .filter(|(tier, _)| *tier == PaceTier::Long)
        .collect();
    // After list + create, before the environment listing.
    assert_eq!(longs, vec![(PaceTier::Long, 2)]);
    assert!(matches!(api.calls()[2], ApiCall::ListEnvironments { .. }));
}

#[tokio::test]
async fn existing_application_has_no_long_pace() {
    let api = Arc::new(InMemoryFeatureManagementApi::new().with_application("a1", "checkout"));
    let pacer = Arc::new(RecordingPacer::new());

    ProvisioningPipeline::new(api.clone(), pacer.clone())
        .run(&ProvisioningPlan::new("checkout"))
        .await
        .unwrap();

    assert_eq!(pacer.count(PaceTier::Long), 0);
}

#[tokio::test]
async fn every_call_after_application_listing_is_paced() {
    let api = Arc::new(InMemoryFeatureManagementApi::new());
    let pacer = Arc::new(CallCountingPacer::new(api.clone()));

    ProvisioningPipeline::new(api.clone(), pacer.clone())
        .run(&ProvisioningPlan::new("checkout").with_entitlement(EMAIL))
        .await
        .unwrap();

    let total_calls = api.calls().len();
    let shorts: Vec<usize> = pacer
        .waits()
        .into_iter()
        .filter(|(tier, _)| *tier == PaceTier::Short)
        .map(|(_, calls)| calls)
        .collect();
    // One short pace immediately before each call except the first listing.
    assert_eq!(shorts, (1..total_calls).collect::<Vec<_>>());
}

// =============================================================================
// Target groups
// =============================================================================

#[tokio::test]
async fn existing_target_group_is_skipped() {
    let api = Arc::new(
        InMemoryFeatureManagementApi::new()
            .with_application("a1", "checkout")
            .with_target_group(
                "a1",
                TargetGroup::new("betaUsers", vec![Condition::is_true("isBetaUser")]),
            ),
    );

    let report = pipeline(&api)
        .run(&ProvisioningPlan::new("checkout"))
        .await
        .unwrap();

    let created: Vec<_> = api
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            ApiCall::UpsertTargetGroup { name, .. } => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(
        created,
        vec!["dentalCustomers", "visionCustomers", "healthCustomers"]
    );
    assert_eq!(report.target_groups[0].1, ReconcileOutcome::Existing);
}

// =============================================================================
// Entitlement
// =============================================================================

#[tokio::test]
async fn entitlement_merge_keeps_other_applications() {
    let mut read = std::collections::BTreeMap::new();
    read.insert("Dev".to_string(), AccessLevel::Read);
    let existing = AdminUser::new(
        EMAIL,
        &ApplicationId::new("app-a"),
        ApplicationEntitlement::new(read),
    );
    let api = Arc::new(
        InMemoryFeatureManagementApi::new()
            .with_application("app-b", "checkout")
            .with_user(existing),
    );

    let report = pipeline(&api)
        .run(&ProvisioningPlan::new("checkout").with_entitlement(EMAIL))
        .await
        .unwrap();

    assert_eq!(
        report.entitlement,
        StageStatus::Completed(EntitlementOutcome::Updated)
    );
    let user = api.user(EMAIL).unwrap();
    assert_eq!(user.applications.len(), 2);
    assert_eq!(user.applications["app-a"].environments["Dev"], AccessLevel::Read);
    assert_eq!(
        user.applications["app-b"].environments["Production"],
        AccessLevel::Write
    );
}

#[tokio::test]
async fn entitlement_failure_still_succeeds() {
    let api = Arc::new(
        InMemoryFeatureManagementApi::new()
            .failing(ApiOperation::UpsertUser, ApiError::status(500, "boom")),
    );

    let report = pipeline(&api)
        .run(&ProvisioningPlan::new("checkout").with_entitlement(EMAIL))
        .await
        .unwrap();

    assert!(matches!(report.entitlement, StageStatus::Failed { .. }));
    assert_eq!(report.environment_keys.len(), 4);
}

// =============================================================================
// Publish
// =============================================================================

#[tokio::test]
async fn publish_skipped_when_unconfigured() {
    let api = Arc::new(InMemoryFeatureManagementApi::new());

    let report = pipeline(&api)
        .run(&ProvisioningPlan::new("checkout"))
        .await
        .unwrap();

    assert!(report.publish.is_skipped());
}

#[tokio::test]
async fn publish_writes_every_role_and_application_id() {
    let api = Arc::new(InMemoryFeatureManagementApi::new());
    let store = Arc::new(InMemoryPropertyStore::new());

    let report = pipeline(&api)
        .with_publish(PublishTarget {
            project: "payments".to_string(),
            store: store.clone(),
        })
        .run(&ProvisioningPlan::new("checkout"))
        .await
        .unwrap();

    for role in EnvironmentRole::ALL {
        let key = report.environment_keys.get(role).unwrap();
        assert_eq!(
            store.value("payments", &format!("{}-FMKey", role.display_name())),
            Some(key.to_string())
        );
    }
    assert_eq!(
        store.value("payments", "FMAppKey"),
        Some(report.application.id.to_string())
    );
}

// =============================================================================
// Fatal failures
// =============================================================================

#[tokio::test]
async fn environment_failure_stops_later_stages() {
    let api = Arc::new(
        InMemoryFeatureManagementApi::new()
            .failing(ApiOperation::UpsertEnvironment, ApiError::status(500, "boom")),
    );
    let store = Arc::new(InMemoryPropertyStore::new());

    let err = pipeline(&api)
        .with_publish(PublishTarget {
            project: "payments".to_string(),
            store: store.clone(),
        })
        .run(&ProvisioningPlan::new("checkout").with_entitlement(EMAIL))
        .await
        .unwrap_err();

    assert!(matches!(err, ProvisionError::Api { .. }));
    assert!(!api
        .calls()
        .iter()
        .any(|c| matches!(c, ApiCall::ListTargetGroups { .. } | ApiCall::GetUser { .. })));
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn application_listing_failure_is_fatal() {
    let api = Arc::new(
        InMemoryFeatureManagementApi::new()
            .failing(ApiOperation::ListApplications, ApiError::network("connection refused")),
    );

    let err = pipeline(&api)
        .run(&ProvisioningPlan::new("checkout"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to list applications: [network_error] connection refused"
    );
}
