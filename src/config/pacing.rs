//! Request pacing configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::FixedDelayPacer;

/// Fixed delays that keep the run under the remote rate ceiling
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Delay before ordinary calls, in milliseconds
    #[serde(default = "default_short_ms")]
    pub short_ms: u64,

    /// Settling delay after application creation, in milliseconds
    #[serde(default = "default_long_ms")]
    pub long_ms: u64,
}

impl PacingConfig {
    pub fn short(&self) -> Duration {
        Duration::from_millis(self.short_ms)
    }

    pub fn long(&self) -> Duration {
        Duration::from_millis(self.long_ms)
    }

    /// Pacer with the configured delays
    pub fn pacer(&self) -> FixedDelayPacer {
        FixedDelayPacer::new(self.short(), self.long())
    }

    /// Validate pacing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.long_ms < self.short_ms {
            return Err(ValidationError::InvalidPacing);
        }
        Ok(())
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            short_ms: default_short_ms(),
            long_ms: default_long_ms(),
        }
    }
}

fn default_short_ms() -> u64 {
    1500
}

fn default_long_ms() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PaceTier;

    #[test]
    fn test_pacing_defaults() {
        let config = PacingConfig::default();
        assert_eq!(config.short(), Duration::from_millis(1500));
        assert_eq!(config.long(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pacer_uses_configured_delays() {
        let config = PacingConfig {
            short_ms: 10,
            long_ms: 20,
        };
        let pacer = config.pacer();
        assert_eq!(pacer.delay_for(PaceTier::Short), Duration::from_millis(10));
        assert_eq!(pacer.delay_for(PaceTier::Long), Duration::from_millis(20));
    }

    #[test]
    fn test_validation_long_shorter_than_short() {
        let config = PacingConfig {
            short_ms: 2000,
            long_ms: 1000,
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPacing));
    }
}
