//! In-memory feature-management API for testing.
//!
//! Simulates the remote service's state and records every call so tests can
//! assert exactly which reads and writes a run issued.
//!
//! # Features
//!
//! - Seeded applications, environments, target groups and users
//! - Error injection per operation
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let api = InMemoryFeatureManagementApi::new()
//!     .with_application("a1", "checkout")
//!     .failing(ApiOperation::GetUser, ApiError::not_found("user"));
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::domain::application::Application;
use crate::domain::environment::{Environment, NewEnvironment};
use crate::domain::foundation::{ApplicationId, EnvironmentKey};
use crate::domain::targeting::{TargetGroup, TargetGroupSummary};
use crate::domain::user::AdminUser;
use crate::ports::{ApiError, FeatureManagementApi};

/// API operations, used for error injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    ListApplications,
    CreateApplication,
    ListEnvironments,
    UpsertEnvironment,
    ListTargetGroups,
    UpsertTargetGroup,
    GetUser,
    UpsertUser,
}

/// A recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListApplications,
    CreateApplication { name: String },
    ListEnvironments { application_id: ApplicationId },
    UpsertEnvironment { application_id: ApplicationId, name: String },
    ListTargetGroups { application_id: ApplicationId },
    UpsertTargetGroup { application_id: ApplicationId, name: String },
    GetUser { email: String },
    UpsertUser { email: String },
}

impl ApiCall {
    /// True for create/upsert calls.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ApiCall::CreateApplication { .. }
                | ApiCall::UpsertEnvironment { .. }
                | ApiCall::UpsertTargetGroup { .. }
                | ApiCall::UpsertUser { .. }
        )
    }
}

#[derive(Debug, Default)]
struct RemoteState {
    applications: Vec<Application>,
    environments: HashMap<ApplicationId, Vec<Environment>>,
    target_groups: HashMap<ApplicationId, Vec<TargetGroup>>,
    users: HashMap<String, AdminUser>,
}

/// In-memory stand-in for the remote API.
#[derive(Debug, Default)]
pub struct InMemoryFeatureManagementApi {
    state: Mutex<RemoteState>,
    failures: Mutex<HashMap<ApiOperation, ApiError>>,
    calls: Mutex<Vec<ApiCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn generated_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl InMemoryFeatureManagementApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an application.
    pub fn with_application(self, id: &str, name: &str) -> Self {
        lock(&self.state)
            .applications
            .push(Application::new(id, name));
        self
    }

    /// Seeds an environment under an application.
    pub fn with_environment(self, application_id: &str, key: &str, name: &str) -> Self {
        lock(&self.state)
            .environments
            .entry(ApplicationId::new(application_id))
            .or_default()
            .push(Environment {
                key: EnvironmentKey::new(key),
                name: name.to_string(),
                description: String::new(),
            });
        self
    }

    /// Seeds a target group under an application.
    pub fn with_target_group(self, application_id: &str, group: TargetGroup) -> Self {
        lock(&self.state)
            .target_groups
            .entry(ApplicationId::new(application_id))
            .or_default()
            .push(group);
        self
    }

    /// Seeds a user.
    pub fn with_user(self, user: AdminUser) -> Self {
        lock(&self.state).users.insert(user.email.clone(), user);
        self
    }

    /// Makes every call of `operation` fail with `error`.
    pub fn failing(self, operation: ApiOperation, error: ApiError) -> Self {
        lock(&self.failures).insert(operation, error);
        self
    }

    /// Returns all recorded calls, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        lock(&self.calls).clone()
    }

    /// Number of create/upsert calls issued.
    pub fn mutation_count(&self) -> usize {
        lock(&self.calls).iter().filter(|c| c.is_mutation()).count()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    pub fn applications(&self) -> Vec<Application> {
        lock(&self.state).applications.clone()
    }

    pub fn environments(&self, application_id: &ApplicationId) -> Vec<Environment> {
        lock(&self.state)
            .environments
            .get(application_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn target_groups(&self, application_id: &ApplicationId) -> Vec<TargetGroup> {
        lock(&self.state)
            .target_groups
            .get(application_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn user(&self, email: &str) -> Option<AdminUser> {
        lock(&self.state).users.get(email).cloned()
    }

    fn record(&self, call: ApiCall, operation: ApiOperation) -> Result<(), ApiError> {
        lock(&self.calls).push(call);
        match lock(&self.failures).get(&operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FeatureManagementApi for InMemoryFeatureManagementApi {
    async fn list_applications(&self) -> Result<Vec<Application>, ApiError> {
        self.record(ApiCall::ListApplications, ApiOperation::ListApplications)?;
        Ok(self.applications())
    }

    async fn create_application(&self, name: &str) -> Result<Application, ApiError> {
        self.record(
            ApiCall::CreateApplication {
                name: name.to_string(),
            },
            ApiOperation::CreateApplication,
        )?;
        let application = Application::new(generated_id(), name);
        lock(&self.state).applications.push(application.clone());
        Ok(application)
    }

    async fn list_environments(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<Environment>, ApiError> {
        self.record(
            ApiCall::ListEnvironments {
                application_id: application_id.clone(),
            },
            ApiOperation::ListEnvironments,
        )?;
        Ok(self.environments(application_id))
    }

    async fn upsert_environment(
        &self,
        application_id: &ApplicationId,
        environment: &NewEnvironment,
    ) -> Result<Environment, ApiError> {
        self.record(
            ApiCall::UpsertEnvironment {
                application_id: application_id.clone(),
                name: environment.name.clone(),
            },
            ApiOperation::UpsertEnvironment,
        )?;

        let mut state = lock(&self.state);
        let environments = state.environments.entry(application_id.clone()).or_default();
        if let Some(existing) = environments.iter_mut().find(|e| e.name == environment.name) {
            existing.description = environment.description.clone();
            return Ok(existing.clone());
        }

        let created = Environment {
            key: EnvironmentKey::new(generated_id()),
            name: environment.name.clone(),
            description: environment.description.clone(),
        };
        environments.push(created.clone());
        Ok(created)
    }

    async fn list_target_groups(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<TargetGroupSummary>, ApiError> {
        self.record(
            ApiCall::ListTargetGroups {
                application_id: application_id.clone(),
            },
            ApiOperation::ListTargetGroups,
        )?;
        Ok(self
            .target_groups(application_id)
            .into_iter()
            .map(|group| TargetGroupSummary { name: group.name })
            .collect())
    }

    async fn upsert_target_group(
        &self,
        application_id: &ApplicationId,
        group: &TargetGroup,
    ) -> Result<(), ApiError> {
        self.record(
            ApiCall::UpsertTargetGroup {
                application_id: application_id.clone(),
                name: group.name.clone(),
            },
            ApiOperation::UpsertTargetGroup,
        )?;

        let mut state = lock(&self.state);
        let groups = state.target_groups.entry(application_id.clone()).or_default();
        match groups.iter_mut().find(|g| g.name == group.name) {
            Some(existing) => *existing = group.clone(),
            None => groups.push(group.clone()),
        }
        Ok(())
    }

    async fn get_user(&self, email: &str) -> Result<AdminUser, ApiError> {
        self.record(
            ApiCall::GetUser {
                email: email.to_string(),
            },
            ApiOperation::GetUser,
        )?;
        self.user(email)
            .ok_or_else(|| ApiError::not_found(format!("user {}", email)))
    }

    async fn upsert_user(&self, user: &AdminUser) -> Result<(), ApiError> {
        self.record(
            ApiCall::UpsertUser {
                email: user.email.clone(),
            },
            ApiOperation::UpsertUser,
        )?;
        lock(&self.state)
            .users
            .insert(user.email.clone(), user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_application_is_listed() {
        let api = InMemoryFeatureManagementApi::new();
        let created = api.create_application("checkout").await.unwrap();

        let listed = api.list_applications().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn upsert_environment_is_idempotent_by_name() {
        let api = InMemoryFeatureManagementApi::new();
        let app = ApplicationId::new("a1");
        let body = NewEnvironment {
            name: "QA".to_string(),
            description: "QA Environment".to_string(),
        };

        let first = api.upsert_environment(&app, &body).await.unwrap();
        let second = api.upsert_environment(&app, &body).await.unwrap();

        assert_eq!(first.key, second.key);
        assert_eq!(api.environments(&app).len(), 1);
    }

    #[tokio::test]
    async fn injected_failure_is_returned_and_call_recorded() {
        let api = InMemoryFeatureManagementApi::new()
            .failing(ApiOperation::ListApplications, ApiError::status(503, "down"));

        assert!(api.list_applications().await.is_err());
        assert_eq!(api.calls(), vec![ApiCall::ListApplications]);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let api = InMemoryFeatureManagementApi::new();
        assert!(api.get_user("nobody@example.com").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn mutation_count_ignores_reads() {
        let api = InMemoryFeatureManagementApi::new();
        api.list_applications().await.unwrap();
        api.create_application("x").await.unwrap();
        assert_eq!(api.mutation_count(), 1);
    }
}
