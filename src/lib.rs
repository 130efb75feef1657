//! # uptime-tracker
//!
//! Device uptime for embedded systems that only expose a free-running 32-bit
//! millisecond counter.
//!
//! **Key features:**
//! - **Wraparound aware** - Keeps counting across the 49.7-day `millis()` rollover
//! - **Static allocation** - Const constructors, fixed-capacity strings, zero heap usage
//! - **Interrupt safe** - Counters are updated inside a critical section
//! - **Pluggable ticks** - Any `fn() -> u32`, a manual counter, or the host clock
//! - **Test seams** - Rebase the tick counter through the source or an injected hook
//!
//! ```ignore
//! use uptime_tracker::UptimeTracker;
//!
//! static UPTIME: UptimeTracker<fn() -> u32> = UptimeTracker::new(millis as fn() -> u32);
//!
//! // Main loop, at least once every 49.7 days:
//! let text = UPTIME.uptime(); // "00:00:00" ... "49710d 06:28:15"
//! ```
//!
//! ## Optional Features
//!
//! - `std` - Host tick source (`StdTicks`), process-wide tracker (`global`)
//!   and a `critical-section` implementation
//! - `log` - Debug/warn events through the `log` facade
//! - `demo` - The `uptime-demo` binary
//!
//! Without `std` this library is `no_std` and needs a `critical-section`
//! implementation from the platform HAL.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

extern crate heapless;

// ============================================================================
// Logging
// ============================================================================

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod format;
pub mod tick;
pub mod tracker;

#[cfg(feature = "std")]
pub mod global;

// ============================================================================
// Re-exports - Public API
// ============================================================================

pub use config::{MILLIS_PER_SECOND, PERIOD_MILLIS, PERIOD_SECONDS, UPTIME_BUFFER_SIZE};
pub use error::UptimeError;
pub use format::{UptimeParts, UptimeString, format, format_into};
pub use tick::{ManualTicks, TickSource};
pub use tracker::{Counters, ResetHook, UptimeTracker};

#[cfg(feature = "std")]
pub use tick::StdTicks;

#[cfg(feature = "demo")]
pub use config::DemoConfig;

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
