//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FM_PROVISIONER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use fm_provisioner::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Provisioning {}", config.api.app_name);
//! ```

mod api;
mod catalog;
mod downstream;
mod entitlement;
mod error;
mod logging;
mod pacing;

pub use api::ApiConfig;
pub use catalog::CatalogConfig;
pub use downstream::DownstreamConfig;
pub use entitlement::EntitlementConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use pacing::PacingConfig;

use serde::Deserialize;

/// Root configuration of a provisioning run
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Remote API connection and application name
    #[serde(default)]
    pub api: ApiConfig,

    /// Downstream property store (publish stage)
    #[serde(default)]
    pub downstream: DownstreamConfig,

    /// User to entitle (entitlement stage)
    #[serde(default)]
    pub entitlement: EntitlementConfig,

    /// Rate-limit pacing
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Desired target groups
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FM_PROVISIONER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FM_PROVISIONER__API__APP_NAME=checkout` -> `api.app_name = checkout`
    /// - `FM_PROVISIONER__PACING__SHORT_MS=500` -> `pacing.short_ms = 500`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    /// Missing required values are reported by [`AppConfig::validate()`].
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FM_PROVISIONER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Runs before any network call so that a missing application name or
    /// token fails the run immediately.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.downstream.validate()?;
        self.entitlement.validate()?;
        self.pacing.validate()?;
        Ok(())
    }
}
