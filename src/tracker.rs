//! Wraparound-aware uptime tracker.
//!
//! Derives a monotonically increasing seconds counter from a 32-bit
//! millisecond counter that wraps every 2^32 ms (49 days, 17:02:47.296).
//! Wraps are not signalled by the tick source; they are inferred when a
//! reading would move the total backwards.
//!
//! # Calling contract
//!
//! [`UptimeTracker::update`] must run at least once per wrap period. If two
//! consecutive updates are more than one period apart, a whole period goes
//! unnoticed and the reported uptime falls short of the real runtime. The
//! tracker cannot detect this.

use core::cell::Cell;
use core::fmt;

use critical_section::{CriticalSection, Mutex};

use crate::config::{MILLIS_PER_SECOND, PERIOD_MILLIS};
use crate::error::UptimeError;
use crate::format::{UptimeString, format, format_into};
use crate::tick::TickSource;

/// Hook that rewrites the platform tick counter on reset.
pub type ResetHook = fn(u32);

/// Tracker state, always read and written as one unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Counters {
    /// Tick wraps observed since the last reset
    pub periods: u32,

    /// Seconds since start, wrapping after `u32::MAX` (about 136 years)
    pub elapsed_seconds: u32,
}

impl Counters {
    /// Counters at start or right after a reset.
    pub const ZERO: Self = Self {
        periods: 0,
        elapsed_seconds: 0,
    };
}

/// Uptime tracker over a raw millisecond tick source.
///
/// All methods take `&self`, and construction is `const`, so a tracker can
/// live in a `static` and be shared between the main loop and interrupt
/// handlers:
///
/// ```ignore
/// static UPTIME: UptimeTracker<fn() -> u32> = UptimeTracker::new(millis as fn() -> u32);
///
/// let seconds = UPTIME.update();
/// let text = UPTIME.uptime(); // "1d 02:03:04"
/// ```
pub struct UptimeTracker<S> {
    source: S,
    counters: Mutex<Cell<Counters>>,
    reset_hook: Mutex<Cell<Option<ResetHook>>>,
}

impl<S> UptimeTracker<S> {
    /// Create a tracker with zeroed counters and no reset hook.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            counters: Mutex::new(Cell::new(Counters::ZERO)),
            reset_hook: Mutex::new(Cell::new(None)),
        }
    }

    /// Create a tracker whose `reset` calls `hook` instead of rebasing the source.
    pub const fn with_reset_hook(source: S, hook: ResetHook) -> Self {
        Self {
            source,
            counters: Mutex::new(Cell::new(Counters::ZERO)),
            reset_hook: Mutex::new(Cell::new(Some(hook))),
        }
    }

    /// Install or remove the reset hook.
    pub fn set_reset_hook(&self, hook: Option<ResetHook>) {
        critical_section::with(|cs| self.reset_hook.borrow(cs).set(hook));
    }

    /// Underlying tick source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consistent copy of both counters.
    ///
    /// Safe to call from an interrupt handler while the main loop updates.
    pub fn snapshot(&self) -> Counters {
        critical_section::with(|cs| self.counters.borrow(cs).get())
    }

    /// Seconds counter as of the last update, without reading the source.
    pub fn elapsed_seconds(&self) -> u32 {
        self.snapshot().elapsed_seconds
    }

    /// Wraps observed since the last reset.
    pub fn periods(&self) -> u32 {
        self.snapshot().periods
    }

    /// Reconcile the counters with an explicit raw tick reading.
    ///
    /// Returns the updated seconds counter. Every `u32` is a valid reading.
    /// The reading must be the latest one: if another context updates the
    /// tracker between sampling `raw_tick` and this call, a stale pre-wrap
    /// reading counts an extra period. [`update`](Self::update) samples the
    /// source inside the critical section and has no such window.
    pub fn update_from(&self, raw_tick: u32) -> u32 {
        let (counters, wrapped) = critical_section::with(|cs| self.reconcile(cs, raw_tick));
        self.log_wrap(counters, wrapped, raw_tick);
        counters.elapsed_seconds
    }

    fn reconcile(&self, cs: CriticalSection<'_>, raw_tick: u32) -> (Counters, bool) {
        let current_seconds = u64::from(raw_tick / MILLIS_PER_SECOND);

        let cell = self.counters.borrow(cs);
        let mut counters = cell.get();

        let candidate = period_seconds(counters.periods) + current_seconds;
        let wrapped = u64::from(counters.elapsed_seconds) > candidate;
        if wrapped {
            counters.periods = counters.periods.wrapping_add(1);
        }

        // Truncation to 32 bits is the documented rollover after ~136 years.
        counters.elapsed_seconds = (period_seconds(counters.periods) + current_seconds) as u32;
        cell.set(counters);

        (counters, wrapped)
    }

    #[cfg_attr(not(feature = "log"), allow(unused_variables))]
    fn log_wrap(&self, counters: Counters, wrapped: bool, raw_tick: u32) {
        if wrapped {
            log_debug!(
                "tick counter wrapped, period {} (raw tick {})",
                counters.periods,
                raw_tick
            );
        }
    }

    /// Render the current seconds counter without updating it.
    pub fn to_uptime_string(&self) -> UptimeString {
        format(self.elapsed_seconds())
    }
}

impl<S: TickSource> UptimeTracker<S> {
    /// Read the tick source and update the counters.
    ///
    /// The source is read inside the critical section, so `now()` must not
    /// block for long. Must be called at least once per wrap period (see module docs).
    pub fn update(&self) -> u32 {
        // Sample and reconcile as one unit so an interrupt cannot update the
        // counters between the read and the write.
        let (raw_tick, counters, wrapped) = critical_section::with(|cs| {
            let raw_tick = self.source.now();
            let (counters, wrapped) = self.reconcile(cs, raw_tick);
            (raw_tick, counters, wrapped)
        });
        self.log_wrap(counters, wrapped, raw_tick);
        counters.elapsed_seconds
    }

    /// Update, then render as `"HH:MM:SS"` or `"{days}d HH:MM:SS"`.
    pub fn uptime(&self) -> UptimeString {
        format(self.update())
    }

    /// Update, then render into a caller-supplied buffer.
    pub fn uptime_into<'a, const N: usize>(
        &self,
        buf: &'a mut heapless::String<N>,
    ) -> Result<&'a str, UptimeError> {
        format_into(self.update(), buf)
    }

    /// Rebase the tick source to `new_raw_tick` and zero both counters.
    ///
    /// Uses the reset hook when one is installed, otherwise the source's own
    /// rebase mechanism. If neither is available only the counters are reset.
    pub fn reset(&self, new_raw_tick: u32) {
        let hook = critical_section::with(|cs| self.reset_hook.borrow(cs).get());

        let rebased = match hook {
            Some(hook) => {
                hook(new_raw_tick);
                true
            }
            None => self.source.rebase(new_raw_tick),
        };

        if !rebased {
            log_warn!("tick source cannot be rebased, resetting counters only");
        }

        critical_section::with(|cs| self.counters.borrow(cs).set(Counters::ZERO));

        log_debug!("uptime reset, raw tick rebased to {}", new_raw_tick);
    }
}

impl<S: Default> Default for UptimeTracker<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: fmt::Debug> fmt::Debug for UptimeTracker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let has_hook = critical_section::with(|cs| self.reset_hook.borrow(cs).get().is_some());
        f.debug_struct("UptimeTracker")
            .field("source", &self.source)
            .field("counters", &self.snapshot())
            .field("reset_hook", &has_hook)
            .finish()
    }
}

/// Whole seconds covered by `periods` complete wraps.
const fn period_seconds(periods: u32) -> u64 {
    periods as u64 * PERIOD_MILLIS / MILLIS_PER_SECOND as u64
}
