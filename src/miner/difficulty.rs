//! Difficulty controller
//!
//! A coarse, nibble-granular control loop over the current target. Every
//! `adjustment_interval` completed cycles it compares the average block time
//! of the window against the configured target block time and shifts the
//! target one nibble tighter or looser. The shift rule is deliberately not a
//! smoother formula; reproducibility of the target sequence depends on it.

use crate::core::Target;
use std::time::{Duration, Instant};
use tracing::info;

/// Owns the current target and the adjustment window
#[derive(Debug)]
pub struct DifficultyController {
    target: Target,
    target_block_time: Duration,
    adjustment_interval: u64,
    blocks_since_adjustment: u64,
    last_adjustment: Instant,
}

impl DifficultyController {
    /// Create a controller with an initial target. The adjustment window
    /// opens at construction time.
    pub fn new(initial: Target, target_block_time: Duration, adjustment_interval: u64) -> Self {
        Self {
            target: initial,
            target_block_time,
            adjustment_interval,
            blocks_since_adjustment: 0,
            last_adjustment: Instant::now(),
        }
    }

    /// Snapshot of the current target
    pub fn target(&self) -> Target {
        self.target
    }

    /// Record one completed mining cycle. Mutates the target at most once
    /// per call, and only on an interval boundary.
    pub fn observe(&mut self) {
        self.observe_at(Instant::now());
    }

    fn observe_at(&mut self, now: Instant) {
        self.blocks_since_adjustment += 1;
        if self.blocks_since_adjustment < self.adjustment_interval {
            return;
        }

        let elapsed = now.duration_since(self.last_adjustment);
        let average = elapsed / self.blocks_since_adjustment as u32;

        if average < self.target_block_time {
            // Mining too fast, tighten
            self.target = self.target.tightened();
            info!(
                "average block time {:?} below {:?}, tightening target to {}",
                average, self.target_block_time, self.target
            );
        } else {
            // Mining too slow, loosen
            self.target = self.target.loosened();
            info!(
                "average block time {:?} at or above {:?}, loosening target to {}",
                average, self.target_block_time, self.target
            );
        }

        self.last_adjustment = now;
        self.blocks_since_adjustment = 0;
    }
}
