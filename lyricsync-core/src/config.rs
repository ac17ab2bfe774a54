use crate::document::ParseOptions;
use crate::error::{CoreError, Result};
use crate::render::{LineEnding, RenderField, RenderOptions};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lyrics: LyricsConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsConfig {
    /// User offset in milliseconds, added to the lyric's own `[offset:]` tag.
    /// Positive values delay the lyrics.
    #[serde(default)]
    pub offset_ms: i64,
    /// Flag lyrics that repeat each timestamp for an inline translation
    #[serde(default = "default_true")]
    pub auto_detect_inline_translation: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            offset_ms: 0,
            auto_detect_inline_translation: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_true")]
    pub include_timestamp: bool,
    #[serde(default)]
    pub field: RenderField,
    #[serde(default)]
    pub line_ending: LineEnding,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            include_timestamp: true,
            field: RenderField::default(),
            line_ending: LineEnding::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Buffered events per subscriber before slow receivers start lagging
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

const fn default_event_capacity() -> usize {
    64
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            event_capacity: default_event_capacity(),
        }
    }
}

impl Config {
    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this structure or a
    /// value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;

        if config.sync.event_capacity == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "sync.event_capacity must be greater than zero".to_string(),
            });
        }

        Ok(config)
    }

    /// User offset in seconds
    #[must_use]
    pub fn offset_secs(&self) -> f64 {
        // Millisecond offsets are far below 2^52, so the conversion is exact
        #[allow(clippy::cast_precision_loss)]
        let millis = self.lyrics.offset_ms as f64;
        millis / 1000.0
    }

    /// Parse options carrying the configured offset and detection setting
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions<'static> {
        ParseOptions::new()
            .with_offset(self.offset_secs())
            .with_inline_translation_detection(self.lyrics.auto_detect_inline_translation)
    }

    #[must_use]
    pub const fn render_options(&self) -> RenderOptions {
        RenderOptions {
            field: self.render.field,
            include_timestamp: self.render.include_timestamp,
            line_ending: self.render.line_ending,
        }
    }
}

/// Documented configuration with every key at its default value
pub const CONFIG_TEMPLATE: &str = r#"# Lyric sync configuration

[lyrics]
# Offset in milliseconds added to the lyric's own [offset:] tag.
# Positive values delay the lyrics, negative values show them earlier.
offset_ms = 0
# Flag lyrics where most timestamps appear twice (original + translation)
auto_detect_inline_translation = true

[render]
# Prefix each exported row with its [mm:ss.xx] timestamp
include_timestamp = true
# Which text to export: "primary" or "translation"
field = "primary"
# Row separator: "crlf" or "lf"
line_ending = "crlf"

[sync]
# Events buffered per subscriber
event_capacity = 64
"#;
