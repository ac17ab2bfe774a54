//! Splits raw LRC text into timestamp tags and the text between them.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything bracketed that starts with an ASCII digit and holds only ASCII
/// digits, colons and dots is treated as a timestamp tag. Numeric validity is
/// checked later, per tag.
#[allow(clippy::expect_used)]
static TIMESTAMP_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[0-9][0-9:.]*\]").expect("timestamp tag regex must compile"));

/// Timestamp tags and text segments of one raw lyric text.
///
/// `segments` always holds exactly one more entry than `timestamps`: the
/// first segment precedes the first tag, and `segments[i + 1]` follows
/// `timestamps[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a> {
    pub timestamps: Vec<&'a str>,
    pub segments: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    /// Text before the first timestamp tag (where metadata tags live)
    #[must_use]
    pub fn preamble(&self) -> &'a str {
        self.segments.first().copied().unwrap_or_default()
    }

    /// Each timestamp tag paired with the raw segment that follows it
    pub fn tagged_segments(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.segments.iter().skip(1).copied())
    }

    #[must_use]
    pub fn is_untimed(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Tokenize raw lyric text.
#[must_use]
pub fn tokenize(raw: &str) -> Tokens<'_> {
    let timestamps: Vec<&str> = TIMESTAMP_TAG_REGEX
        .find_iter(raw)
        .map(|m| m.as_str())
        .collect();
    let segments: Vec<&str> = TIMESTAMP_TAG_REGEX.split(raw).collect();

    Tokens {
        timestamps,
        segments,
    }
}
