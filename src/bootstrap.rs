//! Process wiring: tracing setup and assembly of the production adapters.

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::adapters::{HttpFeatureManagementApi, HttpPropertyStore};
use crate::application::{
    ProvisionError, ProvisioningPipeline, ProvisioningPlan, ProvisioningReport, PublishTarget,
};
use crate::config::{AppConfig, LogFormat, LoggingConfig, ValidationError};
use crate::domain::foundation::CatalogError;
use crate::ports::ApiError;

/// Errors that prevent a run from starting or completing.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    InvalidConfig(#[from] ValidationError),

    #[error("Failed to load target-group catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to build API client: {0}")]
    Client(#[source] ApiError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once keeps the first subscriber.
pub fn init_tracing(logging: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let result = match logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Builds the plan described by the configuration.
pub fn plan_from_config(config: &AppConfig) -> Result<ProvisioningPlan, BootstrapError> {
    let catalog = config.catalog.load()?;
    let mut plan = ProvisioningPlan::new(config.api.app_name.trim()).with_catalog(catalog);
    if let Some(email) = config.entitlement.email() {
        plan = plan.with_entitlement(email);
    }
    Ok(plan)
}

/// Validates the configuration, wires the HTTP adapters and runs once.
pub async fn run(config: &AppConfig) -> Result<ProvisioningReport, BootstrapError> {
    config.validate()?;
    let plan = plan_from_config(config)?;

    let http_config = config
        .api
        .http_config()
        .ok_or(ValidationError::MissingRequired("FM_PROVISIONER__API__API_TOKEN"))?;
    let api = HttpFeatureManagementApi::new(http_config).map_err(BootstrapError::Client)?;

    let mut pipeline = ProvisioningPipeline::new(Arc::new(api), Arc::new(config.pacing.pacer()));

    match config.downstream.settings() {
        Some(settings) => {
            pipeline = pipeline.with_publish(PublishTarget {
                project: settings.project.clone(),
                store: Arc::new(HttpPropertyStore::new(&settings)),
            });
        }
        None if config.downstream.is_partial() => {
            tracing::warn!("Downstream store partially configured, publish disabled");
        }
        None => {}
    }

    tracing::info!(
        application = %plan.app_name,
        target_groups = plan.catalog.len(),
        entitlement = plan.entitlement_email.is_some(),
        "Starting provisioning run"
    );
    Ok(pipeline.run(&plan).await?)
}
