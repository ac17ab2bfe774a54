//! Document metadata from ID tags such as `[ti:Title]` or `[offset:-500]`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Reserved key whose value is a signed millisecond offset
pub const OFFSET_KEY: &str = "offset";

#[allow(clippy::expect_used)]
static META_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([A-Za-z]+):([^\[\]\r\n]*)\]").expect("meta tag regex must compile")
});

/// LRC metadata found before the first timestamp tag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyricMeta {
    /// Embedded offset in seconds (`[offset:]` is written in milliseconds)
    pub offset: Option<f64>,
    /// Every other tag, keyed by lowercase tag name
    pub tags: BTreeMap<String, String>,
}

impl LyricMeta {
    /// Embedded offset in seconds, zero when absent
    #[must_use]
    pub fn offset_secs(&self) -> f64 {
        self.offset.unwrap_or(0.0)
    }

    /// Look up a non-offset tag such as `ti`, `ar`, `al` or `by`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(&key.to_lowercase()).map(String::as_str)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get("ti")
    }

    #[must_use]
    pub fn artist(&self) -> Option<&str> {
        self.get("ar")
    }

    #[must_use]
    pub fn album(&self) -> Option<&str> {
        self.get("al")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offset.is_none() && self.tags.is_empty()
    }
}

/// Collect `[key:value]` tags from the text preceding the first timestamp.
///
/// Anything that is not a well-formed tag is ignored. An `offset` value that
/// is not a number is skipped rather than stored.
#[must_use]
pub fn parse_meta(preamble: &str) -> LyricMeta {
    let mut meta = LyricMeta::default();

    for caps in META_TAG_REGEX.captures_iter(preamble) {
        let key = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
        let value = caps.get(2).map_or("", |m| m.as_str()).trim();
        if value.is_empty() {
            debug!(key = %key, "Skipping empty meta tag");
            continue;
        }

        if key == OFFSET_KEY {
            match value.parse::<f64>() {
                Ok(millis) if millis.is_finite() => meta.offset = Some(millis / 1000.0),
                _ => debug!(value, "Ignoring non-numeric offset tag"),
            }
        } else {
            meta.tags.insert(key, value.to_string());
        }
    }

    meta
}
