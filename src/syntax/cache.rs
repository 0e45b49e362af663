//! Per-document highlighting cache
//!
//! The engine keeps no state between lines; the document does. This cache
//! stores each line's exit state and spans, and re-highlights in document
//! order after edits, stopping once a recomputed exit state matches the
//! cached one and the following line is still valid.

use tracing::trace;

use super::engine::HighlightEngine;
use super::rules::LineState;
use super::style::Span;

/// Cached highlighting for one document
#[derive(Debug, Default)]
pub struct HighlightCache {
    /// Per-line exit state (None = never highlighted, e.g. just inserted)
    line_states: Vec<Option<LineState>>,
    /// Cached spans per line (None = needs recomputation)
    line_spans: Vec<Option<Vec<Span>>>,
    /// First line that needs recomputation
    invalid_from: usize,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines tracked
    pub fn len(&self) -> usize {
        self.line_spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_spans.is_empty()
    }

    /// Mark one line as edited
    pub fn invalidate_line(&mut self, line: usize) {
        if let Some(spans) = self.line_spans.get_mut(line) {
            *spans = None;
        }
        self.invalid_from = self.invalid_from.min(line);
    }

    /// Invalidate cache from a specific line onwards
    pub fn invalidate_from(&mut self, line: usize) {
        for spans in self.line_spans.iter_mut().skip(line) {
            *spans = None;
        }
        self.invalid_from = self.invalid_from.min(line);
    }

    /// Invalidate entire cache
    pub fn invalidate_all(&mut self) {
        self.invalid_from = 0;
        self.line_states.clear();
        self.line_spans.clear();
    }

    /// Record `count` new lines inserted before `at`
    pub fn insert_lines(&mut self, at: usize, count: usize) {
        let at = at.min(self.len());
        self.line_states
            .splice(at..at, std::iter::repeat(None).take(count));
        self.line_spans.splice(at..at, std::iter::repeat(None).take(count));
        self.invalid_from = self.invalid_from.min(at);
    }

    /// Record `count` lines removed starting at `at`
    pub fn remove_lines(&mut self, at: usize, count: usize) {
        let at = at.min(self.len());
        let end = (at + count).min(self.len());
        self.line_states.drain(at..end);
        self.line_spans.drain(at..end);
        // The line now at `at` may start in a different state
        self.invalidate_line(at);
    }

    /// State the given line starts in
    pub fn entry_state(&self, line: usize) -> LineState {
        match line {
            0 => LineState::default(),
            _ => self
                .line_states
                .get(line - 1)
                .copied()
                .flatten()
                .unwrap_or_default(),
        }
    }

    /// State the given line ends in
    pub fn exit_state(&self, line: usize) -> Option<LineState> {
        self.line_states.get(line).copied().flatten()
    }

    /// Cached spans for a line, if valid
    pub fn spans(&self, line: usize) -> Option<&[Span]> {
        self.line_spans.get(line)?.as_deref()
    }

    /// Bring the cache up to date with `lines`
    ///
    /// Returns the number of lines that were re-highlighted.
    pub fn relex<S: AsRef<str>>(&mut self, engine: &HighlightEngine, lines: &[S]) -> usize {
        let count = lines.len();
        self.line_states.resize(count, None);
        self.line_spans.resize(count, None);

        let mut line = self.invalid_from.min(count);
        let mut carry_changed = false;
        let mut relexed = 0;

        while line < count {
            if self.line_spans[line].is_some() && !carry_changed {
                // Fixed point: skip ahead to the next edited line, if any
                match self.line_spans[line..].iter().position(Option::is_none) {
                    Some(offset) => line += offset,
                    None => break,
                }
                continue;
            }

            let result = engine.highlight(lines[line].as_ref(), self.entry_state(line));
            // A line with no previous exit state always hands a change on
            carry_changed = self.line_states[line] != Some(result.exit_state);
            self.line_states[line] = Some(result.exit_state);
            self.line_spans[line] = Some(result.spans);
            relexed += 1;
            line += 1;
        }

        self.invalid_from = count;
        trace!(lines = count, relexed, "relexed document");
        relexed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::RuleTable;
    use crate::syntax::tokens::StyleId;

    fn engine() -> HighlightEngine {
        let table = RuleTable::from_patterns(
            &[(r"\bif\b", 0, StyleId::Keyword)],
            &[("'''", 1, StyleId::String2)],
        )
        .unwrap();
        HighlightEngine::new(table)
    }

    #[test]
    fn test_initial_relex() {
        let engine = engine();
        let lines = ["if a", "b '''c", "d", "e''' if"];
        let mut cache = HighlightCache::new();

        assert_eq!(cache.relex(&engine, &lines), 4);
        assert_eq!(cache.exit_state(0), Some(LineState::default()));
        assert_eq!(cache.exit_state(1), Some(LineState::inside(1)));
        assert_eq!(cache.exit_state(2), Some(LineState::inside(1)));
        assert_eq!(cache.exit_state(3), Some(LineState::default()));
        assert_eq!(cache.spans(2), Some(&[Span::new(0, 1, StyleId::String2)][..]));

        // Nothing changed: nothing to do
        assert_eq!(cache.relex(&engine, &lines), 0);
    }

    #[test]
    fn test_edit_stops_at_fixed_point() {
        let engine = engine();
        let mut lines = vec!["if a", "b", "c", "d"];
        let mut cache = HighlightCache::new();
        cache.relex(&engine, &lines);

        lines[1] = "if b";
        cache.invalidate_line(1);
        // Exit state of line 1 is unchanged, so only line 1 is redone
        assert_eq!(cache.relex(&engine, &lines), 1);
        assert_eq!(cache.spans(1), Some(&[Span::new(0, 2, StyleId::Keyword)][..]));
    }

    #[test]
    fn test_edit_propagates_state() {
        let engine = engine();
        let mut lines = vec!["a", "b", "c", "d'''", "e"];
        let mut cache = HighlightCache::new();
        cache.relex(&engine, &lines);
        assert_eq!(cache.exit_state(3), Some(LineState::inside(1)));

        lines[1] = "'''b";
        cache.invalidate_line(1);
        // The region now closes on line 3, so every line from 1 on changes state
        assert_eq!(cache.relex(&engine, &lines), 4);
        assert_eq!(cache.exit_state(1), Some(LineState::inside(1)));
        assert_eq!(cache.exit_state(2), Some(LineState::inside(1)));
        assert_eq!(cache.exit_state(3), Some(LineState::default()));
        assert_eq!(cache.spans(4), Some(&[][..]));
    }

    #[test]
    fn test_insert_and_remove_lines() {
        let engine = engine();
        let mut lines = vec!["a", "b"];
        let mut cache = HighlightCache::new();
        cache.relex(&engine, &lines);

        lines.insert(1, "'''x");
        cache.insert_lines(1, 1);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.relex(&engine, &lines), 2);
        assert_eq!(cache.exit_state(2), Some(LineState::inside(1)));

        lines.remove(1);
        cache.remove_lines(1, 1);
        assert_eq!(cache.relex(&engine, &lines), 1);
        assert_eq!(cache.exit_state(1), Some(LineState::default()));
    }

    fn assert_matches_fresh(cache: &HighlightCache, engine: &HighlightEngine, lines: &[&str]) {
        let mut fresh = HighlightCache::new();
        fresh.relex(engine, lines);
        assert_eq!(cache.len(), fresh.len());
        for line in 0..lines.len() {
            assert_eq!(cache.entry_state(line), fresh.entry_state(line), "entry of line {}", line);
            assert_eq!(cache.exit_state(line), fresh.exit_state(line), "exit of line {}", line);
            assert_eq!(cache.spans(line), fresh.spans(line), "spans of line {}", line);
        }
    }

    #[test]
    fn test_inserted_line_closing_region() {
        let engine = engine();
        let mut lines = vec!["'''a", "b", "c"];
        let mut cache = HighlightCache::new();
        cache.relex(&engine, &lines);
        assert_eq!(cache.exit_state(2), Some(LineState::inside(1)));

        // The new line closes the region and exits normal, same as a blank state
        lines.insert(1, "x'''");
        cache.insert_lines(1, 1);
        assert_eq!(cache.exit_state(1), None);
        assert_eq!(cache.relex(&engine, &lines), 3);
        assert_eq!(cache.exit_state(3), Some(LineState::default()));
        assert_eq!(cache.spans(2), Some(&[][..]));
        assert_matches_fresh(&cache, &engine, &lines);

        lines.remove(1);
        cache.remove_lines(1, 1);
        assert_eq!(cache.relex(&engine, &lines), 2);
        assert_matches_fresh(&cache, &engine, &lines);
    }

    #[test]
    fn test_inserted_lines_at_end() {
        let engine = engine();
        let mut lines = vec!["if", "'''"];
        let mut cache = HighlightCache::new();
        cache.relex(&engine, &lines);

        lines.extend(["'''", "if"]);
        cache.insert_lines(2, 2);
        cache.relex(&engine, &lines);
        assert_eq!(cache.exit_state(2), Some(LineState::default()));
        assert_matches_fresh(&cache, &engine, &lines);
    }

    #[test]
    fn test_invalidate_all() {
        let engine = engine();
        let lines = ["if", "if"];
        let mut cache = HighlightCache::new();
        cache.relex(&engine, &lines);
        cache.invalidate_all();
        assert!(cache.is_empty());
        assert_eq!(cache.relex(&engine, &lines), 2);
    }
}
