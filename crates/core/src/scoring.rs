//! Scoring module - row points and drop-speed progression
//!
//! A lock-in that completes `n` rows is worth `n` points for a single row and
//! `n * n` for several at once. The drop interval starts at
//! `INITIAL_DROP_MS` and shrinks by `SPEEDUP_STEP_MS` whenever the score has
//! grown by more than `SPEEDUP_SCORE_DELTA` since the previous speed-up.

use crate::types::{
    INITIAL_DROP_MS, SPEEDUP_MIN_INTERVAL_MS, SPEEDUP_SCORE_DELTA, SPEEDUP_STEP_MS,
};

/// Points for completing `rows` rows in one lock-in
///
/// # Examples
///
/// ```
/// use falling_blocks_core::line_clear_points;
///
/// assert_eq!(line_clear_points(0), 0);
/// assert_eq!(line_clear_points(1), 1);
/// assert_eq!(line_clear_points(2), 4);
/// assert_eq!(line_clear_points(4), 16);
/// ```
pub fn line_clear_points(rows: u32) -> u32 {
    if rows > 1 {
        rows.saturating_mul(rows)
    } else {
        rows
    }
}

/// Drop interval bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedSchedule {
    interval_ms: u32,
    /// Score at the last speed-up; 0 until the first one.
    baseline: u32,
}

impl SpeedSchedule {
    pub fn new() -> Self {
        Self {
            interval_ms: INITIAL_DROP_MS,
            baseline: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn baseline(&self) -> u32 {
        self.baseline
    }

    /// Re-evaluate after the score changed; returns true on a speed-up.
    ///
    /// The first speed-up fires once the total passes the delta from a zero
    /// baseline. Later ones also need the interval to still be at least
    /// `SPEEDUP_MIN_INTERVAL_MS`, so the last step can dip below it once.
    pub fn on_score(&mut self, total: u32) -> bool {
        let first = self.baseline == 0 && total > SPEEDUP_SCORE_DELTA;
        let later = total.saturating_sub(self.baseline) > SPEEDUP_SCORE_DELTA
            && self.interval_ms >= SPEEDUP_MIN_INTERVAL_MS;
        if !(first || later) {
            return false;
        }
        self.interval_ms = self.interval_ms.saturating_sub(SPEEDUP_STEP_MS);
        self.baseline = total;
        true
    }
}

impl Default for SpeedSchedule {
    fn default() -> Self {
        Self::new()
    }
}
