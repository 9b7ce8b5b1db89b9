//! PublishPropertiesHandler - writes the application id and each
//! environment key to the downstream property store.

use std::sync::Arc;

use crate::application::ProvisionError;
use crate::domain::environment::{EnvironmentKeys, EnvironmentRole};
use crate::domain::foundation::ApplicationId;
use crate::ports::{PropertyPath, PropertyStore};

/// Property holding the application id.
pub const APPLICATION_KEY_PROPERTY: &str = "FMAppKey";

/// Property holding the key of the environment with `role`.
pub fn environment_key_property(role: EnvironmentRole) -> String {
    format!("{}-FMKey", role.display_name())
}

/// Command to publish derived keys.
#[derive(Debug, Clone)]
pub struct PublishPropertiesCommand {
    pub project: String,
    pub application_id: ApplicationId,
    pub keys: EnvironmentKeys,
}

/// Handler for downstream publishing. Writes are sequential and unpaced.
pub struct PublishPropertiesHandler {
    store: Arc<dyn PropertyStore>,
}

impl PublishPropertiesHandler {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }

    /// Returns the number of properties written.
    pub async fn handle(&self, cmd: PublishPropertiesCommand) -> Result<usize, ProvisionError> {
        let mut written = 0;

        for (role, key) in cmd.keys.iter() {
            let path = PropertyPath::new(&cmd.project, environment_key_property(role));
            self.store.put(&path, key.as_str()).await?;
            tracing::debug!(property = %path, "Published environment key");
            written += 1;
        }

        let path = PropertyPath::new(&cmd.project, APPLICATION_KEY_PROPERTY);
        self.store.put(&path, cmd.application_id.as_str()).await?;
        written += 1;

        tracing::info!(project = %cmd.project, properties = written, "Published feature-management keys");
        Ok(written)
    }
}
