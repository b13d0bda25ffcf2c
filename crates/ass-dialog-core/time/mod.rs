//! Timestamp codec for ASS `H:MM:SS.CC` times
//!
//! ASS stores event times with centisecond precision. A [`Timestamp`] keeps the
//! four components as scanned from a dialogue line; [`Timestamp::to_centis`]
//! folds them into a single count and [`Timestamp::from_centis`] splits a count
//! back into normalized components.
//!
//! # Example
//!
//! ```rust
//! use ass_dialog_core::time::Timestamp;
//!
//! let ts = Timestamp::new(0, 1, 30, 50);
//! assert_eq!(ts.to_centis(), 9050);
//! assert_eq!(Timestamp::from_centis(9050).to_string(), "0:01:30.50");
//! ```

use core::{fmt, str::FromStr};

use crate::utils::CoreError;

pub mod rescale;

pub use rescale::FrameRateRatio;

/// Centiseconds per hour
pub const CENTIS_PER_HOUR: u64 = 360_000;
/// Centiseconds per minute
pub const CENTIS_PER_MINUTE: u64 = 6_000;
/// Centiseconds per second
pub const CENTIS_PER_SECOND: u64 = 100;

/// Time value split into hours, minutes, seconds and centiseconds
///
/// Components are stored as parsed. Minutes and seconds may exceed 59 until
/// the value passes through [`Timestamp::normalized`] or a rescale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Timestamp {
    /// Hours, unbounded
    pub hours: u64,
    /// Minutes
    pub minutes: u32,
    /// Seconds
    pub seconds: u32,
    /// Hundredths of a second
    pub centiseconds: u32,
}

impl Timestamp {
    /// Create a timestamp from raw components
    #[must_use]
    pub const fn new(hours: u64, minutes: u32, seconds: u32, centiseconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            centiseconds,
        }
    }

    /// Total number of centiseconds represented by the components
    ///
    /// Saturates at `u64::MAX` for hour counts no clock could reach.
    #[must_use]
    pub const fn to_centis(self) -> u64 {
        self.hours
            .saturating_mul(CENTIS_PER_HOUR)
            .saturating_add(self.minutes as u64 * CENTIS_PER_MINUTE)
            .saturating_add(self.seconds as u64 * CENTIS_PER_SECOND)
            .saturating_add(self.centiseconds as u64)
    }

    /// Split a centisecond count into normalized components
    ///
    /// Minutes and seconds end up in `0..60`, centiseconds in `0..100`. Hours
    /// take whatever is left and are never capped.
    #[must_use]
    pub fn from_centis(total: u64) -> Self {
        let hours = total / CENTIS_PER_HOUR;
        let remainder = total - hours * CENTIS_PER_HOUR;
        let minutes = remainder / CENTIS_PER_MINUTE;
        let remainder = remainder - minutes * CENTIS_PER_MINUTE;
        let seconds = remainder / CENTIS_PER_SECOND;
        let centiseconds = remainder - seconds * CENTIS_PER_SECOND;

        // minutes < 60, seconds < 60, centiseconds < 100 by construction
        #[allow(clippy::cast_possible_truncation)]
        Self {
            hours,
            minutes: minutes as u32,
            seconds: seconds as u32,
            centiseconds: centiseconds as u32,
        }
    }

    /// Same instant with minutes and seconds folded into range
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::from_centis(self.to_centis())
    }

    /// Apply a frame-rate ratio and return the normalized result
    #[must_use]
    pub fn rescaled(self, ratio: FrameRateRatio) -> Self {
        Self::from_centis(ratio.rescale(self.to_centis()))
    }
}

impl fmt::Display for Timestamp {
    /// Render as `H:MM:SS.CC`; hours are not padded
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}.{:02}",
            self.hours, self.minutes, self.seconds, self.centiseconds
        )
    }
}

impl FromStr for Timestamp {
    type Err = CoreError;

    /// Parse the strict `H:MM:SS.CC` form
    ///
    /// A single fractional digit counts as tenths (`0:00:01.5` is 150
    /// centiseconds). Minutes and seconds must be below 60.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, ':');
        let (Some(hours), Some(minutes), Some(rest)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(CoreError::invalid_time(s, "expected H:MM:SS.CC"));
        };

        let (seconds, fraction) = rest.split_once('.').unwrap_or((rest, ""));

        let hours = parse_digits::<u64>(s, hours, "hours")?;
        let parse = |field: &str, name: &str| parse_digits::<u32>(s, field, name);

        let minutes = parse(minutes, "minutes")?;
        let seconds = parse(seconds, "seconds")?;
        let centiseconds = match fraction.len() {
            0 => 0,
            1 => parse(fraction, "centiseconds")? * 10,
            2 => parse(fraction, "centiseconds")?,
            _ => return Err(CoreError::invalid_time(s, "too many decimal places")),
        };

        if minutes >= 60 {
            return Err(CoreError::invalid_time(s, "minutes must be < 60"));
        }
        if seconds >= 60 {
            return Err(CoreError::invalid_time(s, "seconds must be < 60"));
        }

        Ok(Self::new(hours, minutes, seconds, centiseconds))
    }
}

/// Parse an all-digit component of `time`
fn parse_digits<T: FromStr>(time: &str, field: &str, name: &str) -> Result<T, CoreError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid_time(time, &format!("invalid {name}")));
    }
    field
        .parse()
        .map_err(|_| CoreError::invalid_time(time, &format!("{name} out of range")))
}
