//! Timestamp tag conversion.
//!
//! LRC timestamps are bracketed, colon-separated numeric groups where the
//! rightmost group holds seconds (optionally fractional) and every group to
//! its left multiplies by 60. `[01:02.50]` and `[00:01:02.50]` both mean 62.5
//! seconds.

use crate::error::{CoreError, Result};

/// Convert a bracketed timestamp tag into seconds.
///
/// Components are folded left to right with `r = r * 60 + component`, so any
/// number of groups is accepted.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimestamp`] if the tag is not bracketed or any
/// component is empty or non-numeric.
pub fn parse_timestamp(tag: &str) -> Result<f64> {
    let invalid = || CoreError::InvalidTimestamp {
        tag: tag.to_string(),
    };

    let inner = tag
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(invalid)?;

    inner.split(':').try_fold(0.0_f64, |acc, component| {
        if component.is_empty() {
            return Err(invalid());
        }
        let value: f64 = component.parse().map_err(|_| invalid())?;
        Ok(acc * 60.0 + value)
    })
}

/// Format seconds as an LRC timestamp tag: `[mm:ss.xx]`.
///
/// The value is rounded to hundredths before splitting into fields so a
/// fraction never rounds up to `.100`. Negative and non-finite input clamps
/// to zero. Minutes are zero-padded to two digits and grow past 99 as needed.
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };

    // Non-negative and finite after the clamp above
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let centis = (seconds * 100.0).round() as u64;

    let minutes = centis / 6000;
    let secs = (centis / 100) % 60;
    let hundredths = centis % 100;

    format!("[{minutes:02}:{secs:02}.{hundredths:02}]")
}
