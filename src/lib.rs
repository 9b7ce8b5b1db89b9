//! Feature-management provisioner
//!
//! Idempotently reconciles an application on a remote feature-management
//! service: the application itself, its environments, a catalog of target
//! groups, and optionally a user entitlement and a downstream publish of the
//! derived keys. Safe to run repeatedly; a second run issues no writes.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
