//! Downstream property store configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::{is_http_url, ValidationError};
use crate::adapters::PropertyStoreSettings;

/// Connection to the downstream property store.
///
/// Publishing is enabled only when all four values are set. A partial
/// configuration disables it as well.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownstreamConfig {
    /// Project that receives the properties
    pub project: Option<String>,

    /// Store root
    pub base_url: Option<String>,

    /// Basic-auth user
    pub user: Option<String>,

    /// Basic-auth token
    pub token: Option<SecretString>,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl DownstreamConfig {
    /// Store settings when every value is present
    pub fn settings(&self) -> Option<PropertyStoreSettings> {
        let token = self
            .token
            .clone()
            .filter(|t| !t.expose_secret().trim().is_empty())?;
        Some(PropertyStoreSettings {
            project: present(&self.project)?,
            base_url: present(&self.base_url)?,
            user: present(&self.user)?,
            token,
        })
    }

    /// True when some, but not all, values are set
    pub fn is_partial(&self) -> bool {
        let any = self.project.is_some()
            || self.base_url.is_some()
            || self.user.is_some()
            || self.token.is_some();
        any && self.settings().is_none()
    }

    /// Validate downstream configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(settings) = self.settings() {
            if !is_http_url(&settings.base_url) {
                return Err(ValidationError::InvalidUrl("downstream.base_url"));
            }
        }
        Ok(())
    }
}
