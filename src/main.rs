//! fm-provisioner - one-shot provisioning run.

use std::process::ExitCode;

use fm_provisioner::bootstrap;
use fm_provisioner::config::{AppConfig, LoggingConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            bootstrap::init_tracing(&LoggingConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    bootstrap::init_tracing(&config.logging);

    match bootstrap::run(&config).await {
        Ok(report) => {
            tracing::info!(
                application_id = %report.application.id,
                created = report.created_count(),
                "Provisioning succeeded"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Provisioning failed");
            ExitCode::FAILURE
        }
    }
}
