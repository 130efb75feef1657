//! Error types for uptime operations.
//!
//! Tracking and rendering are infallible for every 32-bit input. The only
//! failures come from caller-supplied resources: a rendering buffer that is
//! too small, or (demo only) a malformed configuration file.

use core::fmt;

/// Uptime error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UptimeError {
    /// Caller-supplied buffer cannot hold the rendered string
    BufferFull {
        /// Capacity of the buffer that overflowed
        capacity: usize,
    },

    /// Demo configuration could not be parsed
    #[cfg(feature = "demo")]
    InvalidConfig(heapless::String<128>),
}

impl UptimeError {
    /// Build an `InvalidConfig` error, truncating the message to fit.
    #[cfg(feature = "demo")]
    pub fn invalid_config(message: &str) -> Self {
        let mut msg = heapless::String::new();
        for c in message.chars() {
            if msg.push(c).is_err() {
                break;
            }
        }
        UptimeError::InvalidConfig(msg)
    }
}

impl fmt::Display for UptimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UptimeError::BufferFull { capacity } => {
                write!(f, "Buffer full (capacity {} bytes)", capacity)
            }
            #[cfg(feature = "demo")]
            UptimeError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UptimeError {}
