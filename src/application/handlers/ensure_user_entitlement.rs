//! EnsureUserEntitlementHandler - grants a user write access to the
//! Production environment of the application.
//!
//! Existing users keep every other entitlement; only the entry for this
//! application is replaced. A failed lookup is treated as "user does not
//! exist"; a user that was fetched but could not be decoded is an error, so
//! it is never overwritten.

use std::fmt;
use std::sync::Arc;

use crate::application::ProvisionError;
use crate::domain::foundation::ApplicationId;
use crate::domain::user::{AdminUser, ApplicationEntitlement};
use crate::ports::{ApiErrorCode, FeatureManagementApi, PaceTier, Pacer};

/// Command to grant the entitlement.
#[derive(Debug, Clone)]
pub struct EnsureUserEntitlementCommand {
    pub email: String,
    pub application_id: ApplicationId,
}

/// Whether the user was created or an existing user was updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitlementOutcome {
    Created,
    Updated,
}

impl fmt::Display for EntitlementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntitlementOutcome::Created => write!(f, "created"),
            EntitlementOutcome::Updated => write!(f, "updated"),
        }
    }
}

/// Handler for user entitlement.
pub struct EnsureUserEntitlementHandler {
    api: Arc<dyn FeatureManagementApi>,
    pacer: Arc<dyn Pacer>,
}

impl EnsureUserEntitlementHandler {
    pub fn new(api: Arc<dyn FeatureManagementApi>, pacer: Arc<dyn Pacer>) -> Self {
        Self { api, pacer }
    }

    pub async fn handle(
        &self,
        cmd: EnsureUserEntitlementCommand,
    ) -> Result<EntitlementOutcome, ProvisionError> {
        self.pacer.wait(PaceTier::Short).await;
        let existing = match self.api.get_user(&cmd.email).await {
            Ok(user) => Some(user),
            Err(error) if error.code == ApiErrorCode::Decode => {
                return Err(ProvisionError::api("fetch user")(error));
            }
            Err(error) => {
                tracing::debug!(email = %cmd.email, error = %error, "User lookup failed, treating as absent");
                None
            }
        };

        let entitlement = ApplicationEntitlement::production_write();
        let (user, outcome) = match existing {
            Some(user) => (
                user.with_entitlement(&cmd.application_id, entitlement),
                EntitlementOutcome::Updated,
            ),
            None => (
                AdminUser::new(cmd.email.clone(), &cmd.application_id, entitlement),
                EntitlementOutcome::Created,
            ),
        };

        self.pacer.wait(PaceTier::Short).await;
        let operation = match outcome {
            EntitlementOutcome::Created => "create user",
            EntitlementOutcome::Updated => "update user",
        };
        self.api
            .upsert_user(&user)
            .await
            .map_err(ProvisionError::api(operation))?;

        tracing::info!(email = %cmd.email, application_id = %cmd.application_id, outcome = %outcome, "User entitled to Production");
        Ok(outcome)
    }
}
