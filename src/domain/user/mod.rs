//! Users of the feature-management service.

mod admin_user;

pub use admin_user::{AccessLevel, AdminUser, ApplicationEntitlement, Applications};
