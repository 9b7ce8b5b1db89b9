//! HTTP adapter for the feature-management public API.
//!
//! Implements the `FeatureManagementApi` port over reqwest. Every request
//! carries `Authorization: Bearer <token>` and `Accept: application/json`;
//! mutating requests send a JSON body.
//!
//! # Configuration
//!
//! ```ignore
//! let config = FeatureManagementHttpConfig::new(api_token)
//!     .with_base_url("https://x-api.rollout.io/public-api");
//! let api = HttpFeatureManagementApi::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::application::Application;
use crate::domain::environment::{Environment, NewEnvironment};
use crate::domain::foundation::{ApplicationId, EnvironmentKey};
use crate::domain::targeting::{TargetGroup, TargetGroupSummary};
use crate::domain::user::AdminUser;
use crate::ports::{ApiError, FeatureManagementApi};

/// Default public API root.
pub const DEFAULT_BASE_URL: &str = "https://x-api.rollout.io/public-api";

/// HTTP client configuration.
#[derive(Clone)]
pub struct FeatureManagementHttpConfig {
    /// Bearer token of the API user.
    api_token: SecretString,

    /// API root, without trailing slash.
    base_url: String,

    /// Per-request timeout enforced by the HTTP client.
    request_timeout: Duration,
}

impl FeatureManagementHttpConfig {
    pub fn new(api_token: SecretString) -> Self {
        Self {
            api_token,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom API root (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Feature-management API adapter.
pub struct HttpFeatureManagementApi {
    config: FeatureManagementHttpConfig,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateApplicationBody<'a> {
    application_name: &'a str,
}

#[derive(Deserialize)]
struct CreatedApplication {
    id: ApplicationId,
}

#[derive(Deserialize)]
struct UpsertedEnvironment {
    key: EnvironmentKey,
}

impl HttpFeatureManagementApi {
    /// Create a new adapter with the given configuration.
    pub fn new(config: FeatureManagementHttpConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, self.url(path))
            .bearer_auth(self.config.api_token.expose_secret())
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "Feature management API error");
            return Err(ApiError::status(status.as_u16(), body));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::decode(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl FeatureManagementApi for HttpFeatureManagementApi {
    async fn list_applications(&self) -> Result<Vec<Application>, ApiError> {
        self.send_json(self.request(Method::GET, "applications"))
            .await
    }

    async fn create_application(&self, name: &str) -> Result<Application, ApiError> {
        let request = self
            .request(Method::POST, "applications")
            .json(&CreateApplicationBody {
                application_name: name,
            });

        let created: CreatedApplication = self.send_json(request).await?;
        Ok(Application {
            id: created.id,
            name: name.to_string(),
        })
    }

    async fn list_environments(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<Environment>, ApiError> {
        let path = format!("applications/{}/environments", application_id);
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn upsert_environment(
        &self,
        application_id: &ApplicationId,
        environment: &NewEnvironment,
    ) -> Result<Environment, ApiError> {
        let path = format!("applications/{}/environments/key", application_id);
        let request = self.request(Method::PUT, &path).json(environment);

        let upserted: UpsertedEnvironment = self.send_json(request).await?;
        Ok(Environment {
            key: upserted.key,
            name: environment.name.clone(),
            description: environment.description.clone(),
        })
    }

    async fn list_target_groups(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<TargetGroupSummary>, ApiError> {
        let path = format!("applications/{}/target-groups", application_id);
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn upsert_target_group(
        &self,
        application_id: &ApplicationId,
        group: &TargetGroup,
    ) -> Result<(), ApiError> {
        let path = format!("applications/{}/target-groups", application_id);
        self.send(self.request(Method::PUT, &path).json(group))
            .await?;
        Ok(())
    }

    async fn get_user(&self, email: &str) -> Result<AdminUser, ApiError> {
        let path = format!("users/{}", email);
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn upsert_user(&self, user: &AdminUser) -> Result<(), ApiError> {
        self.send(self.request(Method::PUT, "users").json(user))
            .await?;
        Ok(())
    }
}
