//! Fixed-delay pacer backed by `tokio::time::sleep`.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{PaceTier, Pacer};

/// Default spacing between ordinary calls.
pub const DEFAULT_SHORT_PACE: Duration = Duration::from_millis(1500);

/// Default settling time after application creation.
pub const DEFAULT_LONG_PACE: Duration = Duration::from_millis(5000);

/// Sleeps a fixed duration per tier.
#[derive(Debug, Clone)]
pub struct FixedDelayPacer {
    short: Duration,
    long: Duration,
}

impl FixedDelayPacer {
    pub fn new(short: Duration, long: Duration) -> Self {
        Self { short, long }
    }

    /// Delay applied for `tier`.
    pub fn delay_for(&self, tier: PaceTier) -> Duration {
        match tier {
            PaceTier::Short => self.short,
            PaceTier::Long => self.long,
        }
    }
}

impl Default for FixedDelayPacer {
    fn default() -> Self {
        Self::new(DEFAULT_SHORT_PACE, DEFAULT_LONG_PACE)
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn wait(&self, tier: PaceTier) {
        let delay = self.delay_for(tier);
        tracing::debug!(tier = %tier, delay_ms = delay.as_millis() as u64, "Pacing request");
        sleep(delay).await;
    }
}
