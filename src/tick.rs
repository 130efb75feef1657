//! Raw millisecond tick sources.
//!
//! The `TickSource` trait abstracts the platform's free-running millisecond
//! counter (Arduino `millis()`, a SysTick interrupt counter, a host clock).
//! The counter must increment once per millisecond and wrap modulo 2^32.

use core::cell::Cell;
use core::fmt;

use critical_section::Mutex;

/// Platform-agnostic millisecond counter.
pub trait TickSource {
    /// Current raw tick in milliseconds, wrapping modulo 2^32.
    fn now(&self) -> u32;

    /// Make the counter behave as though its current reading is `new_raw_tick`.
    ///
    /// This is the platform's low-level rebase mechanism. Returns `false` when
    /// the source cannot be rewritten (the default), in which case the
    /// request is a no-op.
    fn rebase(&self, new_raw_tick: u32) -> bool {
        let _ = new_raw_tick;
        false
    }
}

/// Plain `millis`-style functions are tick sources without rebase support.
impl TickSource for fn() -> u32 {
    fn now(&self) -> u32 {
        self()
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now(&self) -> u32 {
        (**self).now()
    }

    fn rebase(&self, new_raw_tick: u32) -> bool {
        (**self).rebase(new_raw_tick)
    }
}

/// Manually driven millisecond counter.
///
/// Holds the raw tick behind a critical section so it can be advanced from an
/// interrupt handler and read from the main loop, including on cores without
/// atomic read-modify-write instructions. Also used to simulate long runtimes
/// in tests.
pub struct ManualTicks {
    ticks: Mutex<Cell<u32>>,
}

impl ManualTicks {
    /// Create a counter starting at `start`.
    pub const fn new(start: u32) -> Self {
        Self {
            ticks: Mutex::new(Cell::new(start)),
        }
    }

    /// Overwrite the raw tick.
    pub fn set(&self, raw_tick: u32) {
        critical_section::with(|cs| self.ticks.borrow(cs).set(raw_tick));
    }

    /// Advance by `ms` milliseconds, wrapping at 2^32.
    pub fn advance(&self, ms: u32) -> u32 {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            let next = ticks.get().wrapping_add(ms);
            ticks.set(next);
            next
        })
    }

    /// Advance by an arbitrary span, possibly several periods long.
    pub fn advance_long(&self, ms: u64) -> u32 {
        // Only the span modulo 2^32 is visible on the counter.
        self.advance(ms as u32)
    }
}

impl Default for ManualTicks {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for ManualTicks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTicks").field("ticks", &self.now()).finish()
    }
}

impl TickSource for ManualTicks {
    fn now(&self) -> u32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    fn rebase(&self, new_raw_tick: u32) -> bool {
        self.set(new_raw_tick);
        true
    }
}

#[cfg(feature = "std")]
pub use self::host::StdTicks;

#[cfg(feature = "std")]
mod host {
    use super::TickSource;
    use std::sync::{Mutex, PoisonError};
    use std::time::Instant;

    /// Host millisecond counter backed by the monotonic clock.
    ///
    /// Reads `relative_start + elapsed` truncated to 32 bits, so it wraps
    /// exactly like a microcontroller `millis()` counter. Rebasing restarts
    /// the elapsed measurement from the given value.
    #[derive(Debug)]
    pub struct StdTicks {
        origin: Mutex<(Instant, u32)>,
    }

    impl StdTicks {
        /// Start counting from zero now.
        pub fn new() -> Self {
            Self::starting_at(0)
        }

        /// Start counting from `raw_tick` now.
        pub fn starting_at(raw_tick: u32) -> Self {
            Self {
                origin: Mutex::new((Instant::now(), raw_tick)),
            }
        }
    }

    impl Default for StdTicks {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TickSource for StdTicks {
        fn now(&self) -> u32 {
            let (started, relative_start) =
                *self.origin.lock().unwrap_or_else(PoisonError::into_inner);
            let elapsed = started.elapsed().as_millis() as u32;
            relative_start.wrapping_add(elapsed)
        }

        fn rebase(&self, new_raw_tick: u32) -> bool {
            *self.origin.lock().unwrap_or_else(PoisonError::into_inner) =
                (Instant::now(), new_raw_tick);
            true
        }
    }
}
