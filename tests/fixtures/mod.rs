//! Test fixtures and utilities for uptime-tracker testing.
//!
//! Provides:
//! - `ScriptedTicks`: Tick source that replays a fixed sequence of readings
//! - `GatedTicks`: Tick source that can hold one read open, to interleave contexts
//! - `HookRecorder`: Reset hooks that record what they were called with
//! - Helpers for polling a tracker across simulated runtime

#![allow(dead_code)]

use std::cell::Cell;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use uptime_tracker::{ManualTicks, TickSource, UptimeTracker};

/// Milliseconds in one raw tick period.
pub const PERIOD_MS: u64 = 1 << 32;

/// Whole seconds in one raw tick period.
pub const PERIOD_SECS: u32 = 4_294_967;

// ============================================================================
// ScriptedTicks - Replayed Tick Source
// ============================================================================

/// Tick source returning a fixed sequence of readings, then repeating the last.
#[derive(Debug)]
pub struct ScriptedTicks {
    readings: Vec<u32>,
    next: Cell<usize>,
}

impl ScriptedTicks {
    /// Create a source replaying `readings` in order.
    pub fn new(readings: &[u32]) -> Self {
        assert!(!readings.is_empty(), "script needs at least one reading");
        Self {
            readings: readings.to_vec(),
            next: Cell::new(0),
        }
    }

    /// Number of readings consumed so far.
    pub fn consumed(&self) -> usize {
        self.next.get()
    }
}

impl TickSource for ScriptedTicks {
    fn now(&self) -> u32 {
        let i = self.next.get();
        self.next.set(i + 1);
        self.readings[i.min(self.readings.len() - 1)]
    }
}

// ============================================================================
// GatedTicks - Interleaving Tick Source
// ============================================================================

/// Tick source shared between threads that can stall a single read.
///
/// After `arm()`, the next `now()` samples the counter, flags `is_reading()`
/// and then sleeps for `hold` before returning the sampled value. Another
/// thread can move the counter and call `update` inside that window, the way
/// an interrupt lands between the main loop's read and its write.
#[derive(Debug)]
pub struct GatedTicks {
    raw: AtomicU32,
    armed: AtomicBool,
    reading: AtomicBool,
    hold: Duration,
}

impl GatedTicks {
    /// Create a source reading `start`, stalling armed reads for `hold`.
    pub fn new(start: u32, hold: Duration) -> Self {
        Self {
            raw: AtomicU32::new(start),
            armed: AtomicBool::new(false),
            reading: AtomicBool::new(false),
            hold,
        }
    }

    /// Overwrite the raw tick.
    pub fn set(&self, raw_tick: u32) {
        self.raw.store(raw_tick, Ordering::SeqCst);
    }

    /// Stall the next read.
    pub fn arm(&self) {
        self.reading.store(false, Ordering::SeqCst);
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Whether the armed read has sampled the counter.
    pub fn is_reading(&self) -> bool {
        self.reading.load(Ordering::SeqCst)
    }
}

impl TickSource for GatedTicks {
    fn now(&self) -> u32 {
        let raw = self.raw.load(Ordering::SeqCst);
        if self.armed.swap(false, Ordering::SeqCst) {
            self.reading.store(true, Ordering::SeqCst);
            thread::sleep(self.hold);
        }
        raw
    }
}

// ============================================================================
// HookRecorder - Reset Hook Capture
// ============================================================================

/// Values passed to `record_reset`, in call order.
///
/// Shared by every test in a binary; tests filter by the values they use.
pub static RESET_CALLS: Mutex<Vec<u32>> = Mutex::new(Vec::new());

/// Reset hook that records its argument.
pub fn record_reset(new_raw_tick: u32) {
    RESET_CALLS
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .push(new_raw_tick);
}

/// Whether `record_reset` has seen `value`.
pub fn reset_recorded(value: u32) -> bool {
    RESET_CALLS
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .contains(&value)
}

// ============================================================================
// Polling Helpers
// ============================================================================

/// Create a tracker over a manual counter starting at `start`.
pub fn manual_tracker(start: u32) -> UptimeTracker<ManualTicks> {
    UptimeTracker::new(ManualTicks::new(start))
}

/// Advance the counter by `step_ms` `steps` times, updating after each step.
///
/// Returns every value `update` produced.
pub fn poll_every(tracker: &UptimeTracker<ManualTicks>, step_ms: u32, steps: usize) -> Vec<u32> {
    (0..steps)
        .map(|_| {
            tracker.source().advance(step_ms);
            tracker.update()
        })
        .collect()
}

/// Expected seconds counter after `elapsed_ms` of real time from raw tick 0,
/// assuming compliant polling.
pub fn expected_seconds(elapsed_ms: u64) -> u64 {
    let periods = elapsed_ms / PERIOD_MS;
    let raw = elapsed_ms % PERIOD_MS;
    periods * PERIOD_MS / 1000 + raw / 1000
}

/// Assert a sequence never decreases.
pub fn assert_non_decreasing(values: &[u32]) {
    for pair in values.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "uptime went backwards: {} -> {}",
            pair[0],
            pair[1]
        );
    }
}
