//! Downstream property store adapters.

mod http_store;
mod in_memory;

pub use http_store::{HttpPropertyStore, PropertyStoreSettings};
pub use in_memory::InMemoryPropertyStore;
