//! Target-group catalog configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::foundation::CatalogError;
use crate::domain::targeting::TargetGroupCatalog;

/// Where the desired target groups come from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// YAML file listing target groups; the built-in catalog when unset
    pub target_groups_path: Option<PathBuf>,
}

impl CatalogConfig {
    /// Load the configured catalog
    pub fn load(&self) -> Result<TargetGroupCatalog, CatalogError> {
        match &self.target_groups_path {
            Some(path) => TargetGroupCatalog::load(path),
            None => Ok(TargetGroupCatalog::builtin()),
        }
    }
}
