//! Run-level errors and per-stage error policies.
//!
//! Application, environment, target-group and publish failures end the run
//! (`ErrorPolicy::Fatal`). Entitlement failures are logged and recorded in
//! the report while the run continues (`ErrorPolicy::BestEffort`).

use std::fmt;
use thiserror::Error;

use crate::domain::environment::EnvironmentRole;
use crate::domain::foundation::CatalogError;
use crate::ports::{ApiError, PropertyStoreError};

/// Error that ends (or, for best-effort stages, degrades) a run.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Failed to {operation}: {source}")]
    Api {
        operation: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("Environment '{0}' has no key after reconciliation")]
    UnresolvedEnvironmentKey(EnvironmentRole),

    #[error("Failed to publish property: {0}")]
    PropertyStore(#[from] PropertyStoreError),

    #[error("Invalid target-group catalog: {0}")]
    Catalog(#[from] CatalogError),
}

impl ProvisionError {
    /// Wraps an API error with the operation that produced it.
    ///
    /// ```ignore
    /// api.list_applications().await.map_err(ProvisionError::api("list applications"))?;
    /// ```
    pub fn api(operation: &'static str) -> impl FnOnce(ApiError) -> Self {
        move |source| ProvisionError::Api { operation, source }
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Application,
    Environments,
    TargetGroups,
    Entitlement,
    Publish,
}

impl Stage {
    /// How failures of this stage are treated.
    pub fn error_policy(&self) -> ErrorPolicy {
        match self {
            Stage::Entitlement => ErrorPolicy::BestEffort,
            Stage::Application | Stage::Environments | Stage::TargetGroups | Stage::Publish => {
                ErrorPolicy::Fatal
            }
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Application => "application",
            Stage::Environments => "environments",
            Stage::TargetGroups => "target_groups",
            Stage::Entitlement => "entitlement",
            Stage::Publish => "publish",
        };
        write!(f, "{}", s)
    }
}

/// What happens when a stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// The error propagates and ends the run.
    Fatal,
    /// The error is logged and recorded; the run continues.
    BestEffort,
}

impl ErrorPolicy {
    /// Applies the policy to a stage result.
    pub fn apply<T>(
        &self,
        stage: Stage,
        result: Result<T, ProvisionError>,
    ) -> Result<StageStatus<T>, ProvisionError> {
        match (self, result) {
            (_, Ok(value)) => Ok(StageStatus::Completed(value)),
            (ErrorPolicy::Fatal, Err(error)) => Err(error),
            (ErrorPolicy::BestEffort, Err(error)) => {
                tracing::warn!(stage = %stage, error = %error, "Stage failed, continuing");
                Ok(StageStatus::Failed {
                    error: error.to_string(),
                })
            }
        }
    }
}

/// Result of an optional or best-effort stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus<T> {
    /// The stage was not enabled for this run.
    Skipped,
    Completed(T),
    /// Best-effort failure, already logged.
    Failed { error: String },
}

impl<T> StageStatus<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, StageStatus::Skipped)
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            StageStatus::Completed(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_entitlement_is_best_effort() {
        assert_eq!(Stage::Entitlement.error_policy(), ErrorPolicy::BestEffort);
        for stage in [
            Stage::Application,
            Stage::Environments,
            Stage::TargetGroups,
            Stage::Publish,
        ] {
            assert_eq!(stage.error_policy(), ErrorPolicy::Fatal);
        }
    }

    #[test]
    fn fatal_policy_propagates() {
        let result: Result<(), _> = Err(ProvisionError::UnresolvedEnvironmentKey(EnvironmentRole::Qa));
        assert!(ErrorPolicy::Fatal.apply(Stage::Environments, result).is_err());
    }

    #[test]
    fn best_effort_policy_records_failure() {
        let result: Result<(), _> = Err(ProvisionError::api("update user")(ApiError::status(500, "boom")));
        let status = ErrorPolicy::BestEffort
            .apply(Stage::Entitlement, result)
            .unwrap();

        assert_eq!(
            status,
            StageStatus::Failed {
                error: "Failed to update user: [http_500] boom".to_string()
            }
        );
    }

    #[test]
    fn success_is_completed_under_either_policy() {
        let status = ErrorPolicy::Fatal.apply(Stage::Publish, Ok(5)).unwrap();
        assert_eq!(status.completed(), Some(&5));
    }
}
