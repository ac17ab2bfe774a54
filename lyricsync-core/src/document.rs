use crate::align::align_translation;
use crate::builder::build_lines;
use crate::index::PositionIndex;
use crate::line::LyricLine;
use crate::meta::{parse_meta, LyricMeta};
use crate::render::{render_lines, RenderOptions};
use crate::tokenizer::tokenize;
use tracing::debug;

/// Inputs besides the primary lyric text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions<'a> {
    /// Separately sourced translation lyric (LRC text)
    pub translation: Option<&'a str>,
    /// Added on top of the embedded `[offset:]` tag, in seconds
    pub offset_secs: f64,
    /// Flag documents that repeat every timestamp for an inline translation
    pub detect_inline_translation: bool,
}

impl Default for ParseOptions<'_> {
    fn default() -> Self {
        Self {
            translation: None,
            offset_secs: 0.0,
            detect_inline_translation: true,
        }
    }
}

impl<'a> ParseOptions<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_translation(mut self, translation: &'a str) -> Self {
        self.translation = Some(translation);
        self
    }

    #[must_use]
    pub const fn with_offset(mut self, offset_secs: f64) -> Self {
        self.offset_secs = offset_secs;
        self
    }

    #[must_use]
    pub const fn with_inline_translation_detection(mut self, enabled: bool) -> Self {
        self.detect_inline_translation = enabled;
        self
    }
}

/// Parsed lyric for one track.
///
/// Built once from raw text and read-only afterwards, apart from the offset
/// and the lookup cursor. Load a new document for a new track.
#[derive(Debug, Clone, Default)]
pub struct LyricDocument {
    meta: LyricMeta,
    index: PositionIndex,
    has_translation: bool,
    inline_translation: bool,
}

impl LyricDocument {
    /// Parse LRC text, optionally aligning a translation onto it.
    ///
    /// Never fails: malformed tags are dropped, and empty input produces an
    /// empty document. When the primary text is empty but a translation is
    /// given, the translation is used as the primary text.
    #[must_use]
    pub fn parse(raw: &str, options: &ParseOptions<'_>) -> Self {
        let mut raw = raw.trim();
        let mut translation = options.translation.map(str::trim).filter(|t| !t.is_empty());
        if raw.is_empty() {
            if let Some(text) = translation.take() {
                raw = text;
            }
        }

        let tokens = tokenize(raw);
        let meta = parse_meta(tokens.preamble());
        let built = build_lines(
            raw,
            &tokens,
            options.detect_inline_translation && translation.is_none(),
        );

        let mut lines = built.lines;
        let mut has_translation = built.inline_translation;

        if let Some(text) = translation {
            let translated_tokens = tokenize(text);
            let translated = build_lines(text, &translated_tokens, false);
            let attached = align_translation(&mut lines, &translated.lines);
            debug!(
                attached,
                translation_lines = translated.lines.len(),
                "Aligned translation"
            );
            has_translation = attached > 0;
        }

        let offset = meta.offset_secs() + options.offset_secs;
        debug!(
            lines = lines.len(),
            has_translation,
            offset,
            "Parsed lyric document"
        );

        Self {
            meta,
            index: PositionIndex::new(lines, offset),
            has_translation,
            inline_translation: built.inline_translation,
        }
    }

    /// Parse LRC text with default options
    #[must_use]
    pub fn from_lrc(raw: &str) -> Self {
        Self::parse(raw, &ParseOptions::default())
    }

    #[must_use]
    pub fn lines(&self) -> &[LyricLine] {
        self.index.lines()
    }

    #[must_use]
    pub const fn meta(&self) -> &LyricMeta {
        &self.meta
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines().len()
    }

    /// No lyric available (as opposed to "before the first line")
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    /// At least one line carries a translation, or the document looked like
    /// it embeds one inline
    #[must_use]
    pub const fn has_translation(&self) -> bool {
        self.has_translation
    }

    /// Most timestamps appear exactly twice, suggesting original and
    /// translation share each timestamp. The pair is not split.
    #[must_use]
    pub const fn inline_translation_detected(&self) -> bool {
        self.inline_translation
    }

    /// Embedded offset plus any external offset, in seconds
    #[must_use]
    pub const fn effective_offset(&self) -> f64 {
        self.index.offset()
    }

    /// Override the effective offset (seconds). Resets the lookup cursor.
    pub fn set_offset(&mut self, seconds: f64) {
        self.index.set_offset(seconds);
    }

    /// Nudge the effective offset by `delta` seconds. Resets the lookup cursor.
    pub fn adjust_offset(&mut self, delta: f64) {
        self.index.adjust_offset(delta);
    }

    /// Playback position converted to lyric time
    #[must_use]
    pub fn lyric_time(&self, position: f64) -> f64 {
        self.index.lyric_time(position)
    }

    /// Line active at playback `position` (seconds)
    pub fn locate(&mut self, position: f64) -> Option<&LyricLine> {
        self.index.locate(position)
    }

    /// Index of the line active at playback `position` (seconds)
    pub fn locate_index(&mut self, position: f64) -> Option<usize> {
        self.index.locate_index(position)
    }

    /// Active line plus up to `before`/`after` neighbours
    pub fn visible_lines(&mut self, position: f64, before: usize, after: usize) -> &[LyricLine] {
        self.index.visible_lines(position, before, after)
    }

    /// Render back to LRC text
    #[must_use]
    pub fn render(&self, options: RenderOptions) -> String {
        render_lines(self.lines(), options)
    }
}
