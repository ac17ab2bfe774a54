use serde::{Deserialize, Serialize};

/// A single line of lyrics with timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Seconds at which this line becomes active
    pub time: f64,
    /// Primary lyric text, empty for a deliberate pause
    pub text: String,
    /// Aligned translation, if one matched this line's time
    pub translation: Option<String>,
    /// Zero-based position within the document
    pub index: usize,
    /// Seconds until the next line starts, zero for the last line
    pub duration: f64,
}

impl LyricLine {
    #[must_use]
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
            translation: None,
            index: 0,
            duration: 0.0,
        }
    }

    /// Time at which the next line takes over
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.time + self.duration
    }

    /// Progress through this line (0.0 to 1.0) at an offset-adjusted lyric time.
    ///
    /// A line without a known duration (the last one) counts as complete as
    /// soon as it is reached.
    #[must_use]
    pub fn progress(&self, lyric_time: f64) -> f64 {
        if lyric_time.is_nan() || lyric_time < self.time {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }

        ((lyric_time - self.time) / self.duration).clamp(0.0, 1.0)
    }
}
