//! Configuration constants and demo settings.
//!
//! The tracker itself has no runtime configuration: the tick rate, the wrap
//! period and the output buffer capacity are fixed by the platform contract
//! (a free-running 32-bit millisecond counter). `DemoConfig` carries the
//! runtime settings of the `uptime-demo` binary.

/// Capacity of the fixed output string.
///
/// The longest rendering is `"49710d 06:28:15"` (15 bytes).
pub const UPTIME_BUFFER_SIZE: usize = 16;

/// Raw ticks per second.
pub const MILLIS_PER_SECOND: u32 = 1000;

/// Length of one raw tick period in milliseconds (2^32).
pub const PERIOD_MILLIS: u64 = 1 << 32;

/// Nominal seconds per period (49 days, 17:02:47.295).
///
/// Informational only. The tracker computes with [`PERIOD_MILLIS`] so that
/// every call truncates identically, with no floating point involved.
pub const PERIOD_SECONDS: f32 = 4_294_967.295;

/// Runtime settings for the demo binary.
///
/// Loaded from TOML, every key optional:
///
/// ```toml
/// start_millis = 4294962295   # five seconds before the first wrap
/// poll_interval_ms = 1000
/// polls = 10
/// ```
#[cfg(feature = "demo")]
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Raw tick value the clock is rebased to before polling
    pub start_millis: u32,

    /// Delay between two polls
    pub poll_interval_ms: u64,

    /// Number of polls before exiting
    pub polls: u32,
}

#[cfg(feature = "demo")]
impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            start_millis: 0,
            poll_interval_ms: 1000,
            polls: 10,
        }
    }
}

#[cfg(feature = "demo")]
impl DemoConfig {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, crate::error::UptimeError> {
        toml::from_str(s).map_err(|e| crate::error::UptimeError::invalid_config(e.message()))
    }
}
