//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the provisioning handlers and the outside world. Adapters implement them.
//!
//! - `FeatureManagementApi` - Remote administrative API (apps, environments,
//!   target groups, users)
//! - `PropertyStore` - Downstream configuration store for derived keys
//! - `Pacer` - Fixed-delay pacing under the remote rate ceiling

mod feature_management;
mod pacer;
mod property_store;

pub use feature_management::{ApiError, ApiErrorCode, FeatureManagementApi};
pub use pacer::{PaceTier, Pacer};
pub use property_store::{PropertyPath, PropertyStore, PropertyStoreError};
