//! Request pacing port.
//!
//! The remote API enforces a fixed request-rate ceiling (about one request
//! per second). Handlers call [`Pacer::wait`] before paced calls instead of
//! sleeping directly, so tests can substitute a zero-delay pacer.

use async_trait::async_trait;
use std::fmt;

/// Which fixed delay to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaceTier {
    /// Ordinary spacing between calls.
    Short,
    /// Extra settling time after application creation.
    Long,
}

impl fmt::Display for PaceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaceTier::Short => write!(f, "short"),
            PaceTier::Long => write!(f, "long"),
        }
    }
}

/// Port for the fixed-delay pacing policy.
///
/// No batching, backoff or jitter; a wait always completes.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Suspends for at least the delay configured for `tier`.
    async fn wait(&self, tier: PaceTier);
}
