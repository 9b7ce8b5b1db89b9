//! Feature-management API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::{is_http_url, ValidationError};
use crate::adapters::feature_management::DEFAULT_BASE_URL;
use crate::adapters::FeatureManagementHttpConfig;

/// Remote API connection and the application to provision
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Display name of the application to reconcile
    #[serde(default)]
    pub app_name: String,

    /// Bearer token of the API user
    pub api_token: Option<SecretString>,

    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Get timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn has_token(&self) -> bool {
        self.api_token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().trim().is_empty())
    }

    /// HTTP client settings, or `None` when no token is configured
    pub fn http_config(&self) -> Option<FeatureManagementHttpConfig> {
        let token = self.api_token.clone().filter(|_| self.has_token())?;
        Some(
            FeatureManagementHttpConfig::new(token)
                .with_base_url(&self.base_url)
                .with_request_timeout(self.request_timeout()),
        )
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.app_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("FM_PROVISIONER__API__APP_NAME"));
        }
        if !self.has_token() {
            return Err(ValidationError::MissingRequired("FM_PROVISIONER__API__API_TOKEN"));
        }
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl("api.base_url"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            api_token: None,
            base_url: default_base_url(),
            request_timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}
