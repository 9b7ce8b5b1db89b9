//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the name matcher, reconciliation outcomes and
//! error types that form the vocabulary of the provisioning domain.

mod errors;
mod ids;
mod matcher;
mod outcome;

pub use errors::CatalogError;
pub use ids::{ApplicationId, EnvironmentKey};
pub use matcher::{find_by_name, NameMatch, Named};
pub use outcome::ReconcileOutcome;
