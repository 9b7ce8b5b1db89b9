//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Carries the full environment variable name to set.
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid URL for {0}: must start with http:// or https://")]
    InvalidUrl(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid entitlement email address")]
    InvalidEmail,

    #[error("Long pace must not be shorter than short pace")]
    InvalidPacing,
}

/// True when `url` uses an HTTP scheme and has a host part.
pub(crate) fn is_http_url(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_names_full_variable() {
        let err = ValidationError::MissingRequired("FM_PROVISIONER__API__APP_NAME");
        assert_eq!(
            err.to_string(),
            "Required configuration missing: FM_PROVISIONER__API__APP_NAME"
        );
    }

    #[test]
    fn test_http_url_detection() {
        assert!(is_http_url("https://x-api.rollout.io/public-api"));
        assert!(is_http_url("http://localhost:8080"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("example.com"));
    }
}
