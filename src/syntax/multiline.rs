//! Multi-line region tracking
//!
//! Regions open and close on the same delimiter pattern. A line that ends
//! inside a region reports that delimiter's state id so the next line can
//! start inside it. The first delimiter (in declared order) that matches
//! anything on a line claims the line; other delimiters are not consulted.

use super::rules::{DelimiterSpec, LineState};
use super::scanner::LineIndex;
use super::style::Span;

enum Outcome {
    /// Last region on the line closed at this byte offset
    Closed(usize),
    /// A region runs past the end of the line
    Open,
}

/// Compute region spans and the exit state for one line
pub fn track(text: &str, entry: LineState, delimiters: &[DelimiterSpec]) -> (Vec<Span>, LineState) {
    track_indexed(text, &LineIndex::new(text), entry, delimiters)
}

pub(crate) fn track_indexed(
    text: &str,
    index: &LineIndex<'_>,
    entry: LineState,
    delimiters: &[DelimiterSpec],
) -> (Vec<Span>, LineState) {
    let mut spans = Vec::new();
    // Unknown ids are treated as normal state
    let entered = if entry.is_inside_region() {
        delimiters.iter().position(|d| d.state_id() == entry.region)
    } else {
        None
    };

    let mut from = 0;
    if let Some(i) = entered {
        let spec = &delimiters[i];
        match regions(text, index, spec, 0, 0, &mut spans) {
            Outcome::Open => return (spans, LineState::inside(spec.state_id())),
            Outcome::Closed(end) => from = end,
        }
    }

    for (i, spec) in delimiters.iter().enumerate() {
        if Some(i) == entered {
            continue;
        }
        let Some((start, end)) = spec.find_at(text, from) else {
            continue;
        };
        let exit = match regions(text, index, spec, start, end - start, &mut spans) {
            Outcome::Open => LineState::inside(spec.state_id()),
            Outcome::Closed(_) => LineState::default(),
        };
        return (spans, exit);
    }

    (spans, LineState::default())
}

/// Tag regions of one delimiter, starting with an opening at `begin`
fn regions(
    text: &str,
    index: &LineIndex<'_>,
    spec: &DelimiterSpec,
    mut begin: usize,
    mut open_len: usize,
    spans: &mut Vec<Span>,
) -> Outcome {
    loop {
        let Some((_, close_end)) = spec.find_at(text, begin + open_len) else {
            if begin < text.len() {
                spans.push(index.span(begin, text.len(), spec.style()));
            }
            return Outcome::Open;
        };
        spans.push(index.span(begin, close_end, spec.style()));

        match spec.find_at(text, close_end) {
            Some((start, end)) => {
                begin = start;
                open_len = end - start;
            }
            None => return Outcome::Closed(close_end),
        }
    }
}
