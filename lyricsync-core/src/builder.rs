//! Turns tokenized lyric text into one time-ordered line per distinct timestamp.

use crate::line::LyricLine;
use crate::time::parse_timestamp;
use crate::tokenizer::Tokens;
use std::collections::HashMap;
use tracing::debug;

/// Lines produced from one raw lyric text
#[derive(Debug, Clone, Default)]
pub struct BuiltLines {
    pub lines: Vec<LyricLine>,
    /// More than half of the distinct timestamps carried exactly two lines,
    /// which is how dual-language LRC files embed their translation.
    pub inline_translation: bool,
}

/// Consecutive timestamp tags that share one text segment
#[derive(Debug, PartialEq)]
struct TagRun<'a> {
    tags: Vec<&'a str>,
    text: &'a str,
}

/// All entries that landed on one time value, in document order
struct Bucket {
    first: LyricLine,
    count: usize,
}

/// Build the line sequence for `raw`, which must be the trimmed text that
/// `tokens` was produced from.
#[must_use]
pub fn build_lines(raw: &str, tokens: &Tokens<'_>, detect_inline_translation: bool) -> BuiltLines {
    let buckets = bucket_by_time(&group_runs(tokens));
    if buckets.is_empty() {
        // No tag parsed as a timestamp: keep the text as an untimed block
        return BuiltLines {
            lines: untimed_lines(raw),
            inline_translation: false,
        };
    }

    let doubled = buckets.iter().filter(|b| b.count == 2).count();
    let inline_translation = detect_inline_translation && doubled * 2 > buckets.len();
    if inline_translation {
        debug!(
            doubled,
            distinct = buckets.len(),
            "Lyric appears to embed its translation inline"
        );
    }

    let mut lines: Vec<LyricLine> = buckets.into_iter().map(|b| b.first).collect();
    // Stable: buckets are already in document order
    lines.sort_by(|a, b| a.time.total_cmp(&b.time));
    finalize_lines(&mut lines);

    BuiltLines {
        lines,
        inline_translation,
    }
}

/// Assign indices and durations to a time-ordered line sequence
pub(crate) fn finalize_lines(lines: &mut [LyricLine]) {
    let next_times: Vec<f64> = lines.iter().skip(1).map(|l| l.time).collect();
    for (index, line) in lines.iter_mut().enumerate() {
        line.index = index;
        line.duration = next_times
            .get(index)
            .map_or(0.0, |next| next - line.time);
    }
}

/// A tag followed directly by another tag (empty segment) repeats the text
/// of the next non-empty segment, so `[00:01][00:30]Chorus` yields two
/// entries reading "Chorus".
fn group_runs<'a>(tokens: &Tokens<'a>) -> Vec<TagRun<'a>> {
    let mut runs = Vec::new();
    let mut pending = Vec::new();

    for (tag, segment) in tokens.tagged_segments() {
        pending.push(tag);
        if !segment.is_empty() {
            runs.push(TagRun {
                tags: std::mem::take(&mut pending),
                text: segment.trim(),
            });
        }
    }
    if !pending.is_empty() {
        runs.push(TagRun {
            tags: pending,
            text: "",
        });
    }

    runs
}

fn bucket_by_time(runs: &[TagRun<'_>]) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut by_time: HashMap<u64, usize> = HashMap::new();

    for run in runs {
        for tag in &run.tags {
            let time = match parse_timestamp(tag) {
                Ok(time) => time,
                Err(e) => {
                    debug!(error = %e, "Dropping malformed timestamp tag");
                    continue;
                }
            };

            if let Some(&slot) = by_time.get(&time.to_bits()) {
                buckets[slot].count += 1;
            } else {
                by_time.insert(time.to_bits(), buckets.len());
                buckets.push(Bucket {
                    first: LyricLine::new(time, run.text),
                    count: 1,
                });
            }
        }
    }

    buckets
}

/// Text without any timestamp becomes a flat block of lines at time zero
fn untimed_lines(raw: &str) -> Vec<LyricLine> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut lines: Vec<LyricLine> = raw.lines().map(|row| LyricLine::new(0.0, row)).collect();
    finalize_lines(&mut lines);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn build(raw: &str) -> BuiltLines {
        let raw = raw.trim();
        build_lines(raw, &tokenize(raw), true)
    }

    fn texts(built: &BuiltLines) -> Vec<(f64, &str)> {
        built
            .lines
            .iter()
            .map(|l| (l.time, l.text.as_str()))
            .collect()
    }

    #[test]
    fn test_simple_lines() {
        let built = build("[00:05.00]First\n[00:10.00]Second\n[00:15.00]Third\n");
        assert_eq!(
            texts(&built),
            vec![(5.0, "First"), (10.0, "Second"), (15.0, "Third")]
        );
        assert!(!built.inline_translation);
    }

    #[test]
    fn test_grouped_timestamps_share_text() {
        let built = build("[00:05.00][00:15.00]Repeated lyric\n[00:10.00]Verse");
        assert_eq!(
            texts(&built),
            vec![(5.0, "Repeated lyric"), (10.0, "Verse"), (15.0, "Repeated lyric")]
        );
    }

    #[test]
    fn test_whitespace_segment_is_blank_line() {
        let built = build("[00:01.00]\n[00:02.00]After pause");
        assert_eq!(texts(&built), vec![(1.0, ""), (2.0, "After pause")]);
    }

    #[test]
    fn test_trailing_tag_has_empty_text() {
        let built = build("[00:01.00]One\n[00:09.00]");
        assert_eq!(texts(&built), vec![(1.0, "One"), (9.0, "")]);
    }

    #[test]
    fn test_sorted_and_indexed() {
        let built = build("[00:20.00]Late\n[00:02.00]Early\n[00:10.00]Middle");
        assert_eq!(
            texts(&built),
            vec![(2.0, "Early"), (10.0, "Middle"), (20.0, "Late")]
        );
        let indices: Vec<usize> = built.lines.iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_time_keeps_first() {
        let built = build("[00:03.00]Original\n[00:03.00]Duplicate\n[00:06.00]Next");
        assert_eq!(texts(&built), vec![(3.0, "Original"), (6.0, "Next")]);
    }

    #[test]
    fn test_equal_times_in_different_formats_merge() {
        let built = build("[00:03.5]A\n[00:03.50]B");
        assert_eq!(texts(&built), vec![(3.5, "A")]);
    }

    #[test]
    fn test_durations() {
        let built = build("[00:01.00]a\n[00:04.00]b\n[00:10.00]c");
        let durations: Vec<f64> = built.lines.iter().map(|l| l.duration).collect();
        assert_eq!(durations, vec![3.0, 6.0, 0.0]);
    }

    #[test]
    fn test_malformed_tag_dropped() {
        let built = build("[00:01.00]Good\n[00:1.2.3]Bad\n[00:05.00]Also good");
        assert_eq!(texts(&built), vec![(1.0, "Good"), (5.0, "Also good")]);
    }

    #[test]
    fn test_malformed_tag_in_group_keeps_siblings() {
        let built = build("[00:01.00][1:2.3.4]Shared");
        assert_eq!(texts(&built), vec![(1.0, "Shared")]);
    }

    #[test]
    fn test_inline_translation_detected() {
        let built = build(
            "[00:01.00]Hello\n[00:01.00]Hola\n[00:02.00]World\n[00:02.00]Mundo\n[00:03.00]!",
        );
        assert!(built.inline_translation);
        assert_eq!(
            texts(&built),
            vec![(1.0, "Hello"), (2.0, "World"), (3.0, "!")]
        );
    }

    #[test]
    fn test_inline_translation_needs_majority() {
        let built = build("[00:01.00]Hello\n[00:01.00]Hola\n[00:02.00]World");
        assert!(!built.inline_translation);
    }

    #[test]
    fn test_inline_translation_detection_disabled() {
        let raw = "[00:01.00]Hello\n[00:01.00]Hola";
        assert!(!build_lines(raw, &tokenize(raw), false).inline_translation);
    }

    #[test]
    fn test_untimed_fallback() {
        let built = build("line one\nline two");
        assert_eq!(texts(&built), vec![(0.0, "line one"), (0.0, "line two")]);
        assert_eq!(built.lines[0].index, 0);
        assert_eq!(built.lines[1].index, 1);
        assert!(built.lines.iter().all(|l| l.duration == 0.0));
    }

    #[test]
    fn test_bracketed_text_in_timed_lyric_kept() {
        let built = build("[00:01.00]Chapter [١٢] begins\n[00:05.00]I said [...] it");
        assert_eq!(
            texts(&built),
            vec![(1.0, "Chapter [١٢] begins"), (5.0, "I said [...] it")]
        );
    }

    #[test]
    fn test_bracketed_text_in_untimed_lyric_falls_back() {
        let built = build("I said [...] nothing\nsecond row");
        assert_eq!(texts(&built), vec![(0.0, "I said [...] nothing"), (0.0, "second row")]);

        let built = build("Verse [१]\nplain row two");
        assert_eq!(built.lines.len(), 2);
    }

    #[test]
    fn test_only_malformed_tags_fall_back() {
        let built = build("[1:2.3.4]odd\nrow");
        assert_eq!(texts(&built), vec![(0.0, "[1:2.3.4]odd"), (0.0, "row")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(build("").lines.is_empty());
        assert!(build("   \n ").lines.is_empty());
    }

    #[test]
    fn test_group_runs() {
        let tokens = tokenize("[1:0][2:0]x[3:0] y [4:0]");
        assert_eq!(
            group_runs(&tokens),
            vec![
                TagRun { tags: vec!["[1:0]", "[2:0]"], text: "x" },
                TagRun { tags: vec!["[3:0]"], text: "y" },
                TagRun { tags: vec!["[4:0]"], text: "" },
            ]
        );
    }
}
