//! Zero-delay pacer that records the tiers it was asked to wait for.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

use crate::ports::{PaceTier, Pacer};

/// Returns immediately; keeps the sequence of requested tiers.
#[derive(Debug, Default)]
pub struct RecordingPacer {
    waits: Mutex<Vec<PaceTier>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiers waited for, in order.
    pub fn waits(&self) -> Vec<PaceTier> {
        self.waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, tier: PaceTier) -> usize {
        self.waits().into_iter().filter(|t| *t == tier).count()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn wait(&self, tier: PaceTier) {
        self.waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tier);
    }
}
