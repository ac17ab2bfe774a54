//! Merges a separately sourced translation into primary lyric lines.

use crate::line::LyricLine;

/// Attach translations to `primary` by exact time match.
///
/// Both sequences must be sorted by time. A single forward-only cursor walks
/// the translation lines, so the merge is linear. A translation is attached
/// only when its text is non-empty and differs from the primary text.
/// Translation lines with no matching primary time are dropped.
///
/// Returns the number of lines that received a translation.
pub fn align_translation(primary: &mut [LyricLine], translation: &[LyricLine]) -> usize {
    let Some(last) = translation.len().checked_sub(1) else {
        return 0;
    };

    let mut cursor = 0;
    let mut attached = 0;

    for line in primary.iter_mut() {
        while cursor < last && translation[cursor].time < line.time {
            cursor += 1;
        }

        let candidate = &translation[cursor];
        if candidate.time.total_cmp(&line.time).is_eq()
            && !candidate.text.is_empty()
            && candidate.text != line.text
        {
            line.translation = Some(candidate.text.clone());
            attached += 1;
        }
    }

    attached
}
