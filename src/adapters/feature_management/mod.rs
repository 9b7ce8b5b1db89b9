//! Feature-management API adapters.
//!
//! ## Available Adapters
//!
//! - `HttpFeatureManagementApi` - reqwest client for the public API
//! - `InMemoryFeatureManagementApi` - simulated remote state for tests

mod http_api;
mod in_memory;

pub use http_api::{FeatureManagementHttpConfig, HttpFeatureManagementApi, DEFAULT_BASE_URL};
pub use in_memory::{ApiCall, ApiOperation, InMemoryFeatureManagementApi};
