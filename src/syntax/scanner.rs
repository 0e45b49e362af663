//! Single-line rule scanning

use super::rules::Rule;
use super::style::Span;
use super::tokens::StyleId;

/// Byte-to-character offset mapping for one line
pub(crate) struct LineIndex<'a> {
    text: &'a str,
    /// Byte offset of every character; empty for ASCII lines
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let starts = if text.is_ascii() {
            Vec::new()
        } else {
            text.char_indices().map(|(i, _)| i).collect()
        };
        Self { text, starts }
    }

    /// Character offset of a byte offset on a char boundary
    pub(crate) fn char_offset(&self, byte: usize) -> usize {
        if self.starts.is_empty() {
            return byte.min(self.text.len());
        }
        match self.starts.binary_search(&byte) {
            Ok(i) | Err(i) => i,
        }
    }

    /// Byte offset one character past `byte`, or past the end of the line
    pub(crate) fn step(&self, byte: usize) -> usize {
        match self.text.get(byte..).and_then(|rest| rest.chars().next()) {
            Some(ch) => byte + ch.len_utf8(),
            None => self.text.len() + 1,
        }
    }

    /// Build a span from a byte range
    pub(crate) fn span(&self, start: usize, end: usize, style: StyleId) -> Span {
        let offset = self.char_offset(start);
        Span::new(offset, self.char_offset(end) - offset, style)
    }
}

/// Tag every match of every rule, in rule order
///
/// Spans from later rules come later in the result and win on overlap.
pub fn scan(text: &str, rules: &[Rule]) -> Vec<Span> {
    scan_indexed(text, &LineIndex::new(text), rules)
}

pub(crate) fn scan_indexed(text: &str, index: &LineIndex<'_>, rules: &[Rule]) -> Vec<Span> {
    let mut spans = Vec::new();
    for rule in rules {
        scan_rule(text, index, rule, &mut spans);
    }
    spans
}

fn scan_rule(text: &str, index: &LineIndex<'_>, rule: &Rule, spans: &mut Vec<Span>) {
    let mut pos = 0;
    while pos <= text.len() {
        let Some(caps) = rule.pattern().captures_at(text, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        if let Some(m) = caps.get(rule.group()) {
            if !m.is_empty() {
                spans.push(index.span(m.start(), m.end(), rule.style()));
            }
        }
        // An empty match must still move the search forward
        pos = if whole.is_empty() {
            index.step(whole.end())
        } else {
            whole.end()
        };
    }
}
