//! Pacer adapters.
//!
//! - `FixedDelayPacer` - real sleeps, used by the binary
//! - `RecordingPacer` - no delay, records tiers for tests

mod fixed_delay;
mod recording;

pub use fixed_delay::{FixedDelayPacer, DEFAULT_LONG_PACE, DEFAULT_SHORT_PACE};
pub use recording::RecordingPacer;
