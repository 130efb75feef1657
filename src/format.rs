//! Human-readable uptime rendering.
//!
//! A seconds count renders as `"HH:MM:SS"` below one day and as
//! `"{days}d HH:MM:SS"` from one day on, up to `"49710d 06:28:15"` for
//! `u32::MAX`.

use core::fmt::{self, Write};

use crate::config::UPTIME_BUFFER_SIZE;
use crate::error::UptimeError;

/// Fixed-capacity uptime string, large enough for any `u32` rendering.
pub type UptimeString = heapless::String<UPTIME_BUFFER_SIZE>;

const SECONDS_PER_MINUTE: u32 = 60;
const MINUTES_PER_HOUR: u32 = 60;
const HOURS_PER_DAY: u32 = 24;

/// A seconds count split into days, hours, minutes and seconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UptimeParts {
    /// Whole days (at most 49710 for a `u32` input)
    pub days: u16,
    /// Hours of the day, `0..24`
    pub hours: u8,
    /// Minutes of the hour, `0..60`
    pub minutes: u8,
    /// Seconds of the minute, `0..60`
    pub seconds: u8,
}

impl UptimeParts {
    /// Decompose a seconds count.
    pub const fn from_seconds(total: u32) -> Self {
        let seconds = total % SECONDS_PER_MINUTE;
        let total = total / SECONDS_PER_MINUTE;

        let minutes = total % MINUTES_PER_HOUR;
        let total = total / MINUTES_PER_HOUR;

        let hours = total % HOURS_PER_DAY;
        let days = total / HOURS_PER_DAY;

        Self {
            days: days as u16,
            hours: hours as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
        }
    }

    /// Recombine into a seconds count.
    ///
    /// Returns `u64` so hand-built values beyond the `u32` range don't wrap.
    pub const fn total_seconds(&self) -> u64 {
        ((self.days as u64 * HOURS_PER_DAY as u64 + self.hours as u64)
            * MINUTES_PER_HOUR as u64
            + self.minutes as u64)
            * SECONDS_PER_MINUTE as u64
            + self.seconds as u64
    }
}

impl From<u32> for UptimeParts {
    fn from(total: u32) -> Self {
        Self::from_seconds(total)
    }
}

impl fmt::Display for UptimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{}d ", self.days)?;
        }
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Render a seconds count into an owned, fixed-capacity string.
///
/// Pure and allocation-free.
pub fn format(total_seconds: u32) -> UptimeString {
    let mut out = UptimeString::new();
    // Cannot overflow: the longest rendering is 15 bytes.
    let _ = write!(out, "{}", UptimeParts::from_seconds(total_seconds));
    out
}

/// Render a seconds count into a caller-supplied buffer.
///
/// The buffer is cleared first, so a single buffer can be reused across
/// calls. Returns `BufferFull` if the rendering doesn't fit; the buffer
/// contents are unspecified in that case.
pub fn format_into<const N: usize>(
    total_seconds: u32,
    buf: &mut heapless::String<N>,
) -> Result<&str, UptimeError> {
    buf.clear();
    write!(buf, "{}", UptimeParts::from_seconds(total_seconds))
        .map_err(|_| UptimeError::BufferFull { capacity: N })?;
    Ok(buf.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_below_one_day() {
        assert_eq!(format(0).as_str(), "00:00:00");
        assert_eq!(format(59).as_str(), "00:00:59");
        assert_eq!(format(60).as_str(), "00:01:00");
        assert_eq!(format(3599).as_str(), "00:59:59");
        assert_eq!(format(3600).as_str(), "01:00:00");
        assert_eq!(format(86_399).as_str(), "23:59:59");
    }

    #[test]
    fn test_format_with_days() {
        assert_eq!(format(86_400).as_str(), "1d 00:00:00");
        assert_eq!(format(90_061).as_str(), "1d 01:01:01");
        assert_eq!(format(4_294_967).as_str(), "49d 17:02:47");
    }

    #[test]
    fn test_format_maximum() {
        let s = format(u32::MAX);
        assert_eq!(s.as_str(), "49710d 06:28:15");
        assert_eq!(s.len(), 15);
    }

    #[test]
    fn test_parts_of_maximum() {
        let parts = UptimeParts::from_seconds(u32::MAX);
        assert_eq!(
            parts,
            UptimeParts {
                days: 49_710,
                hours: 6,
                minutes: 28,
                seconds: 15,
            }
        );
        assert_eq!(parts.total_seconds(), u32::MAX as u64);
    }

    #[test]
    fn test_format_into_reuses_buffer() {
        let mut buf: heapless::String<16> = heapless::String::new();
        assert_eq!(format_into(86_400, &mut buf).unwrap(), "1d 00:00:00");
        assert_eq!(format_into(5, &mut buf).unwrap(), "00:00:05");
        assert_eq!(buf.as_str(), "00:00:05");
    }

    #[test]
    fn test_format_into_small_buffer() {
        let mut buf: heapless::String<8> = heapless::String::new();
        assert_eq!(format_into(3600, &mut buf).unwrap(), "01:00:00");
        assert_eq!(
            format_into(86_400, &mut buf),
            Err(UptimeError::BufferFull { capacity: 8 })
        );
    }
}
