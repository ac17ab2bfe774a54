//! Renders lyric lines back to LRC text for export and caching.

use crate::line::LyricLine;
use crate::time::format_timestamp;
use serde::{Deserialize, Serialize};

/// Which text of each line to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderField {
    #[default]
    Primary,
    Translation,
}

impl RenderField {
    /// Text of `line` for this field, empty when the line has none
    #[must_use]
    pub fn text_of(self, line: &LyricLine) -> &str {
        match self {
            Self::Primary => &line.text,
            Self::Translation => line.translation.as_deref().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl LineEnding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub field: RenderField,
    pub include_timestamp: bool,
    pub line_ending: LineEnding,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            field: RenderField::Primary,
            include_timestamp: true,
            line_ending: LineEnding::Crlf,
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub const fn with_field(mut self, field: RenderField) -> Self {
        self.field = field;
        self
    }

    #[must_use]
    pub const fn with_timestamps(mut self, include_timestamp: bool) -> Self {
        self.include_timestamp = include_timestamp;
        self
    }

    #[must_use]
    pub const fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

/// Render one row per line as `[mm:ss.xx] text`, or bare text without
/// timestamps.
///
/// Lines with nothing in the selected field still produce a row, so the
/// output always has exactly one row per line.
#[must_use]
pub fn render_lines(lines: &[LyricLine], options: RenderOptions) -> String {
    lines
        .iter()
        .map(|line| {
            let text = options.field.text_of(line);
            if !options.include_timestamp {
                text.to_string()
            } else if text.is_empty() {
                format_timestamp(line.time)
            } else {
                format!("{} {text}", format_timestamp(line.time))
            }
        })
        .collect::<Vec<_>>()
        .join(options.line_ending.as_str())
}
