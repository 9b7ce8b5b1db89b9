//! User entitlement configuration

use serde::Deserialize;

use super::error::ValidationError;

/// User to grant Production write access to. Unset disables the stage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntitlementConfig {
    pub email: Option<String>,
}

impl EntitlementConfig {
    /// The configured email, ignoring blank values
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }

    /// Validate entitlement configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.email() {
            Some(email) if !looks_like_email(email) => Err(ValidationError::InvalidEmail),
            _ => Ok(()),
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_email_disables_stage() {
        let config = EntitlementConfig::default();
        assert!(config.email().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_email_disables_stage() {
        let config = EntitlementConfig {
            email: Some(" ".to_string()),
        };
        assert!(config.email().is_none());
    }

    #[test]
    fn test_validation_invalid_email() {
        for bad in ["ops", "@example.com", "ops@", "a@b@c"] {
            let config = EntitlementConfig {
                email: Some(bad.to_string()),
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidEmail), "{}", bad);
        }
    }

    #[test]
    fn test_validation_valid_email() {
        let config = EntitlementConfig {
            email: Some("ops@example.com".to_string()),
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.email(), Some("ops@example.com"));
    }
}
