//! Accrual windows for time-vested rewards.
//!
//! A windowed reward vests linearly between `start` and `end` instead of
//! being split by voting weight. The window is captured at deposit time
//! and is immutable afterward.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// The `[start, end]` interval over which a reward vests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualWindow {
    /// Unix timestamp at which vesting begins.
    pub start: Timestamp,
    /// Unix timestamp at which the full amount is vested.
    pub end: Timestamp,
}

impl AccrualWindow {
    /// A window is valid only when it has positive duration.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Window duration in seconds. Zero for degenerate windows.
    pub fn duration(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}
