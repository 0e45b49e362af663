//! Per-line highlighting engine
//!
//! [`HighlightEngine::highlight`] is a pure function of the line text and
//! the entry state: rule spans first, then multi-line region spans, so
//! regions win wherever they overlap a rule match.

use tracing::trace;

use super::multiline;
use super::rules::{HighlightResult, LineState, RuleTable};
use super::scanner::{self, LineIndex};

/// Stateless highlighter over an immutable [`RuleTable`]
#[derive(Debug, Clone, Default)]
pub struct HighlightEngine {
    table: RuleTable,
}

impl HighlightEngine {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Highlight a single line of text
    ///
    /// Takes the line text and the exit state of the previous line.
    /// Returns spans and the state for the next line.
    pub fn highlight(&self, text: &str, entry: LineState) -> HighlightResult {
        let index = LineIndex::new(text);
        let mut spans = scanner::scan_indexed(text, &index, self.table.rules());
        let rule_spans = spans.len();
        let (regions, exit_state) =
            multiline::track_indexed(text, &index, entry, self.table.delimiters());
        spans.extend(regions);

        trace!(
            entry = entry.region,
            exit = exit_state.region,
            rule_spans,
            region_spans = spans.len() - rule_spans,
            "highlighted line"
        );
        HighlightResult { spans, exit_state }
    }
}
