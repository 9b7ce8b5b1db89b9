//! Feature-management API port.
//!
//! Defines the contract for the remote administrative API that owns
//! applications, environments, target groups and users. Implementations
//! perform one remote call per method and never retry.

use async_trait::async_trait;
use std::fmt;

use crate::domain::application::Application;
use crate::domain::environment::{Environment, NewEnvironment};
use crate::domain::foundation::ApplicationId;
use crate::domain::targeting::{TargetGroup, TargetGroupSummary};
use crate::domain::user::AdminUser;

/// Port for the feature-management administrative API.
#[async_trait]
pub trait FeatureManagementApi: Send + Sync {
    /// Lists every application visible to the credential, in service order.
    async fn list_applications(&self) -> Result<Vec<Application>, ApiError>;

    /// Creates an application and returns it with its new id.
    async fn create_application(&self, name: &str) -> Result<Application, ApiError>;

    /// Lists the environments of an application.
    async fn list_environments(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<Environment>, ApiError>;

    /// Creates or updates an environment by name and returns it with its key.
    async fn upsert_environment(
        &self,
        application_id: &ApplicationId,
        environment: &NewEnvironment,
    ) -> Result<Environment, ApiError>;

    /// Lists the target groups of an application.
    async fn list_target_groups(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<TargetGroupSummary>, ApiError>;

    /// Creates or updates a target group with the full definition.
    async fn upsert_target_group(
        &self,
        application_id: &ApplicationId,
        group: &TargetGroup,
    ) -> Result<(), ApiError>;

    /// Fetches a user by email.
    ///
    /// Absent users surface as an error (typically `NotFound`).
    async fn get_user(&self, email: &str) -> Result<AdminUser, ApiError>;

    /// Creates or replaces a user with the full object.
    async fn upsert_user(&self, user: &AdminUser) -> Result<(), ApiError>;
}

/// Errors from feature-management API calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Error code for categorization.
    pub code: ApiErrorCode,

    /// Human-readable message, usually the response body.
    pub message: String,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Transport failure before any response arrived.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Network, message)
    }

    /// Non-2xx response.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        if status == 404 {
            return Self::new(ApiErrorCode::NotFound, body);
        }
        Self::new(ApiErrorCode::Status(status), body)
    }

    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::new(ApiErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Response body could not be decoded.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Decode, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.code == ApiErrorCode::NotFound
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Categories of API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    Network,
    NotFound,
    Status(u16),
    Decode,
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorCode::Network => write!(f, "network_error"),
            ApiErrorCode::NotFound => write!(f, "not_found"),
            ApiErrorCode::Status(status) => write!(f, "http_{}", status),
            ApiErrorCode::Decode => write!(f, "decode_error"),
        }
    }
}
