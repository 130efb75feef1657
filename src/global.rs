//! Process-wide default tracker for hosted targets.
//!
//! One tracker per process, driven by [`StdTicks`] and created on first use.
//! Embedded targets declare their own `static` tracker instead (see
//! [`UptimeTracker`]).

use std::sync::OnceLock;

use crate::format::UptimeString;
use crate::tick::StdTicks;
use crate::tracker::UptimeTracker;

static TRACKER: OnceLock<UptimeTracker<StdTicks>> = OnceLock::new();

/// The process-wide tracker. Its clock starts at zero on first access.
pub fn tracker() -> &'static UptimeTracker<StdTicks> {
    TRACKER.get_or_init(|| UptimeTracker::new(StdTicks::new()))
}

/// Update the process-wide tracker and return the seconds counter.
pub fn update() -> u32 {
    tracker().update()
}

/// Update the process-wide tracker and render its uptime.
pub fn uptime() -> UptimeString {
    tracker().uptime()
}

/// Rebase the process-wide clock to `new_raw_tick` and zero its counters.
pub fn reset(new_raw_tick: u32) {
    tracker().reset(new_raw_tick)
}
