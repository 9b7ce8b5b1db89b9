//! Domain layer containing provisioning types and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Identifiers, the name matcher, outcomes and errors
//! - `application` - Feature-management application record
//! - `environment` - Environment roles, records and the resolved key map
//! - `targeting` - Target groups, the desired catalog and custom properties
//! - `user` - Admin users and entitlement merge

pub mod application;
pub mod environment;
pub mod foundation;
pub mod targeting;
pub mod user;
