//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the provisioning handlers to external systems:
//! - `feature_management` - Remote administrative API (HTTP, in-memory)
//! - `property_store` - Downstream configuration store (HTTP, in-memory)
//! - `pacing` - Fixed-delay and recording pacers

pub mod feature_management;
pub mod pacing;
pub mod property_store;

pub use feature_management::{
    ApiCall, ApiOperation, FeatureManagementHttpConfig, HttpFeatureManagementApi,
    InMemoryFeatureManagementApi,
};
pub use pacing::{FixedDelayPacer, RecordingPacer};
pub use property_store::{HttpPropertyStore, InMemoryPropertyStore, PropertyStoreSettings};
