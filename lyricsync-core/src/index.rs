//! Playback-position lookup over a time-ordered line sequence.
//!
//! Queries arrive once per UI tick, almost always a little later than the
//! previous one. The index remembers the last matched line and scans forward
//! from it, wrapping around to the start when a seek moved playback
//! backwards, so steady playback costs O(1) per query.

use crate::line::LyricLine;

/// Owns the lines, the effective offset, and the search cursor.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    lines: Vec<LyricLine>,
    offset: f64,
    cursor: usize,
}

impl PositionIndex {
    /// `lines` must be sorted by time with indices already assigned.
    #[must_use]
    pub fn new(lines: Vec<LyricLine>, offset: f64) -> Self {
        Self {
            lines,
            offset,
            cursor: 0,
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    /// Effective offset in seconds. Positive values delay the lyrics.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Replace the effective offset
    pub fn set_offset(&mut self, seconds: f64) {
        self.offset = seconds;
        self.cursor = 0;
    }

    /// Shift the effective offset by `delta` seconds
    pub fn adjust_offset(&mut self, delta: f64) {
        self.set_offset(self.offset + delta);
    }

    /// Convert a playback position into lyric time
    #[must_use]
    pub fn lyric_time(&self, position: f64) -> f64 {
        position - self.offset
    }

    /// Index of the line active at `position` (seconds of playback).
    ///
    /// Returns `None` when there are no lines or playback has not reached
    /// the first line yet.
    pub fn locate_index(&mut self, position: f64) -> Option<usize> {
        let time = self.lyric_time(position);

        let Some(first) = self.lines.first() else {
            self.cursor = 0;
            return None;
        };
        if time.is_nan() || time < first.time {
            self.cursor = 0;
            return None;
        }

        let last = self.lines.len() - 1;
        let found = (self.cursor..self.lines.len())
            .chain(0..self.cursor)
            .find(|&i| self.is_active(i, time))
            .unwrap_or(last);

        self.cursor = found;
        Some(found)
    }

    /// Line active at `position` (seconds of playback)
    pub fn locate(&mut self, position: f64) -> Option<&LyricLine> {
        let index = self.locate_index(position)?;
        self.lines.get(index)
    }

    /// Lines around the one active at `position`, for display.
    ///
    /// Before the first line the window is anchored at the start.
    pub fn visible_lines(&mut self, position: f64, before: usize, after: usize) -> &[LyricLine] {
        let current = self.locate_index(position).unwrap_or(0);

        let start = current.saturating_sub(before);
        let end = current.saturating_add(after).saturating_add(1).min(self.lines.len());

        self.lines.get(start..end).unwrap_or_default()
    }

    fn is_active(&self, index: usize, time: f64) -> bool {
        self.lines[index].time <= time
            && self
                .lines
                .get(index + 1)
                .map_or(true, |next| time < next.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::finalize_lines;

    fn index(times: &[f64]) -> PositionIndex {
        let mut lines: Vec<LyricLine> = times
            .iter()
            .map(|&t| LyricLine::new(t, format!("line at {t}")))
            .collect();
        finalize_lines(&mut lines);
        PositionIndex::new(lines, 0.0)
    }

    fn linear_scan(lines: &[LyricLine], time: f64) -> Option<usize> {
        lines.iter().rposition(|l| l.time <= time)
    }

    #[test]
    fn test_empty_index() {
        let mut idx = index(&[]);
        assert!(idx.locate(0.0).is_none());
        assert!(idx.locate(100.0).is_none());
        assert!(idx.visible_lines(3.0, 1, 1).is_empty());
    }

    #[test]
    fn test_before_first_line() {
        let mut idx = index(&[5.0, 10.0]);
        assert!(idx.locate(0.0).is_none());
        assert!(idx.locate(4.999).is_none());
    }

    #[test]
    fn test_exact_and_within_line() {
        let mut idx = index(&[5.0, 10.0, 15.0]);
        let lines = idx.lines().to_vec();

        for line in &lines {
            assert_eq!(idx.locate(line.time), Some(line));
            if line.duration > 0.0 {
                assert_eq!(idx.locate(line.time + line.duration / 2.0), Some(line));
            }
        }
    }

    #[test]
    fn test_last_line_matches_everything_after() {
        let mut idx = index(&[5.0, 10.0, 15.0]);
        assert_eq!(idx.locate_index(15.0), Some(2));
        assert_eq!(idx.locate_index(9_999.0), Some(2));
    }

    #[test]
    fn test_backward_seek_wraps() {
        let mut idx = index(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(idx.locate_index(4.5), Some(3));
        assert_eq!(idx.locate_index(1.5), Some(0));
        assert_eq!(idx.locate_index(2.0), Some(1));
    }

    #[test]
    fn test_before_first_resets_cursor() {
        let mut idx = index(&[1.0, 2.0, 3.0]);
        assert_eq!(idx.locate_index(2.5), Some(1));
        assert_eq!(idx.locate_index(0.5), None);
        assert_eq!(idx.cursor, 0);
    }

    #[test]
    fn test_scrubbing_matches_linear_scan() {
        let times: Vec<f64> = (0..60).map(|i| f64::from(i) * 2.5 + 1.0).collect();
        let mut idx = index(&times);
        let lines = idx.lines().to_vec();

        // Deterministic pseudo-random jumps in both directions
        let mut state: u32 = 0x2545_f491;
        for _ in 0..2_000 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let position = f64::from(state % 16_000) / 100.0;
            assert_eq!(
                idx.locate_index(position),
                linear_scan(&lines, position),
                "position {position}"
            );
        }
    }

    #[test]
    fn test_offset_applied() {
        let mut idx = index(&[5.0, 10.0]);
        idx.set_offset(-0.5);
        assert_eq!(idx.locate_index(4.5), Some(0));
        assert_eq!(idx.locate_index(4.4), None);

        idx.set_offset(1.0);
        assert_eq!(idx.locate_index(5.5), None);
        assert_eq!(idx.locate_index(6.0), Some(0));
    }

    #[test]
    fn test_offset_change_resets_cursor() {
        let mut idx = index(&[1.0, 2.0, 3.0]);
        assert_eq!(idx.locate_index(3.5), Some(2));
        idx.adjust_offset(0.25);
        assert_eq!(idx.cursor, 0);
        assert_eq!(idx.offset(), 0.25);
    }

    #[test]
    fn test_nan_position() {
        let mut idx = index(&[1.0]);
        assert!(idx.locate(f64::NAN).is_none());
    }

    #[test]
    fn test_all_zero_lines_resolve_to_last() {
        let mut idx = index(&[0.0, 0.0, 0.0]);
        assert_eq!(idx.locate_index(0.0), Some(2));
        assert_eq!(idx.locate_index(30.0), Some(2));
    }

    #[test]
    fn test_visible_lines() {
        let mut idx = index(&[5.0, 10.0, 15.0, 20.0, 25.0]);

        let visible: Vec<f64> = idx.visible_lines(12.0, 1, 1).iter().map(|l| l.time).collect();
        assert_eq!(visible, vec![5.0, 10.0, 15.0]);

        let visible: Vec<f64> = idx.visible_lines(0.0, 2, 1).iter().map(|l| l.time).collect();
        assert_eq!(visible, vec![5.0, 10.0]);

        let visible: Vec<f64> = idx.visible_lines(30.0, 1, 3).iter().map(|l| l.time).collect();
        assert_eq!(visible, vec![20.0, 25.0]);
    }
}
