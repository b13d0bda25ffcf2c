//! Frame-rate rescaling of centisecond totals
//!
//! Retiming a script authored against one frame rate for playback at another
//! multiplies every time by `old_fps / new_fps`. The ratio keeps both rates so
//! the product is computed as `total * old / new`, and truncates toward zero.

use core::fmt;

use crate::utils::CoreError;

/// Multiplier applied to every timestamp, `old_fps / new_fps`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRateRatio {
    /// Numerator, the frame rate the script was timed against
    numerator: f64,
    /// Denominator, the target frame rate
    denominator: f64,
}

impl FrameRateRatio {
    /// Ratio that leaves every time unchanged
    pub const IDENTITY: Self = Self {
        numerator: 1.0,
        denominator: 1.0,
    };

    /// Build a ratio from two optional frame rates
    ///
    /// Falls back to [`FrameRateRatio::IDENTITY`] when either rate is missing,
    /// non-positive or not finite.
    #[must_use]
    pub fn from_fps(old_fps: Option<f64>, new_fps: Option<f64>) -> Self {
        match (old_fps, new_fps) {
            (Some(old), Some(new)) if is_valid_rate(old) && is_valid_rate(new) => Self {
                numerator: old,
                denominator: new,
            },
            _ => Self::IDENTITY,
        }
    }

    /// Build a ratio from two frame rates, rejecting unusable values
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if either rate is non-positive or not finite.
    pub fn try_new(old_fps: f64, new_fps: f64) -> Result<Self, CoreError> {
        for (name, rate) in [("old", old_fps), ("new", new_fps)] {
            if !is_valid_rate(rate) {
                return Err(CoreError::config(format!(
                    "{name} frame rate must be a positive number, got {rate}"
                )));
            }
        }
        Ok(Self {
            numerator: old_fps,
            denominator: new_fps,
        })
    }

    /// Ratio from a plain multiplier
    ///
    /// Non-finite or negative multipliers fall back to identity. A zero
    /// multiplier is kept and collapses every time to `0:00:00.00`.
    #[must_use]
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier.is_finite() && multiplier >= 0.0 {
            Self {
                numerator: multiplier,
                denominator: 1.0,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// The multiplier as a single floating-point value
    #[must_use]
    pub fn value(self) -> f64 {
        self.numerator / self.denominator
    }

    /// Whether applying this ratio changes nothing
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_identity(self) -> bool {
        self.numerator == self.denominator
    }

    /// Compose two ratios: applying the result equals applying `self`, then
    /// `next`, without the intermediate truncation
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        Self {
            numerator: self.numerator * next.numerator,
            denominator: self.denominator * next.denominator,
        }
    }

    /// Rescale a centisecond total, dropping any fractional centisecond
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn rescale(self, total: u64) -> u64 {
        if self.is_identity() {
            return total;
        }
        // `as` truncates toward zero and saturates
        (total as f64 * self.numerator / self.denominator) as u64
    }
}

impl Default for FrameRateRatio {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for FrameRateRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}
