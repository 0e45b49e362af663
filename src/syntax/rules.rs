//! Pattern rules for syntax highlighting
//!
//! This module defines the rule types used to match and tag source text,
//! and the immutable [`RuleTable`] that holds them in declaration order.

use regex::Regex;
use tracing::debug;

use super::style::Span;
use super::tokens::StyleId;
use crate::error::{ConfigError, Result};

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A single-line pattern rule
///
/// Every occurrence of `pattern` in a line tags capture `group` with `style`.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    group: usize,
    style: StyleId,
}

impl Rule {
    /// Create a new pattern rule; `group` 0 is the whole match
    pub fn new(pattern: &str, group: usize, style: StyleId) -> Result<Self> {
        let regex = compile(pattern)?;
        let available = regex.captures_len();
        if group >= available {
            return Err(ConfigError::InvalidGroup {
                pattern: pattern.to_string(),
                group,
                available,
            });
        }
        Ok(Self {
            pattern: regex,
            group,
            style,
        })
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn group(&self) -> usize {
        self.group
    }

    pub fn style(&self) -> StyleId {
        self.style
    }
}

/// A multi-line region delimiter (triple-quoted strings and the like)
///
/// The same pattern both opens and closes the region.
#[derive(Debug, Clone)]
pub struct DelimiterSpec {
    pattern: Regex,
    state_id: u8,
    style: StyleId,
}

impl DelimiterSpec {
    /// Create a delimiter; `state_id` marks lines that end inside the region
    pub fn new(pattern: &str, state_id: u8, style: StyleId) -> Result<Self> {
        if state_id == 0 {
            return Err(ConfigError::InvalidStateId(pattern.to_string()));
        }
        let regex = compile(pattern)?;
        if regex.is_match("") {
            return Err(ConfigError::EmptyDelimiter(pattern.to_string()));
        }
        Ok(Self {
            pattern: regex,
            state_id,
            style,
        })
    }

    pub fn state_id(&self) -> u8 {
        self.state_id
    }

    pub fn style(&self) -> StyleId {
        self.style
    }

    /// Find the next non-empty delimiter at or after byte `start`
    ///
    /// Returns the byte range of the match.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        let mut pos = start;
        while pos <= text.len() {
            let m = self.pattern.find_at(text, pos)?;
            if !m.is_empty() {
                return Some((m.start(), m.end()));
            }
            // Zero-width hit (lookaround-only patterns): step one character
            pos = m.start() + text[m.start()..].chars().next()?.len_utf8();
        }
        None
    }
}

/// Line state for tracking multi-line constructs
///
/// This is stored per line by the caller to track whether the next line
/// starts inside a multi-line region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LineState {
    /// 0 = normal, non-zero = inside the delimiter with this state id
    pub region: u8,
}

impl LineState {
    /// Create state for being inside a region
    pub fn inside(state_id: u8) -> Self {
        Self { region: state_id }
    }

    /// Check if we're inside a multi-line region
    pub fn is_inside_region(&self) -> bool {
        self.region != 0
    }

    /// Check if we're in normal (no region) state
    pub fn is_normal(&self) -> bool {
        self.region == 0
    }
}

impl From<u8> for LineState {
    fn from(region: u8) -> Self {
        Self { region }
    }
}

/// Ordered, immutable set of rules and delimiters
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
    delimiters: Vec<DelimiterSpec>,
}

impl RuleTable {
    /// Build a table; delimiter state ids must be unique
    pub fn new(rules: Vec<Rule>, delimiters: Vec<DelimiterSpec>) -> Result<Self> {
        for (i, spec) in delimiters.iter().enumerate() {
            if delimiters[..i].iter().any(|d| d.state_id == spec.state_id) {
                return Err(ConfigError::DuplicateStateId(spec.state_id));
            }
        }
        debug!(
            rules = rules.len(),
            delimiters = delimiters.len(),
            "built rule table"
        );
        Ok(Self { rules, delimiters })
    }

    /// Compile a table from `(pattern, group, style)` and
    /// `(pattern, state_id, style)` triples
    pub fn from_patterns(
        rules: &[(&str, usize, StyleId)],
        delimiters: &[(&str, u8, StyleId)],
    ) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|&(pattern, group, style)| Rule::new(pattern, group, style))
            .collect::<Result<Vec<_>>>()?;
        let delimiters = delimiters
            .iter()
            .map(|&(pattern, state_id, style)| DelimiterSpec::new(pattern, state_id, style))
            .collect::<Result<Vec<_>>>()?;
        Self::new(rules, delimiters)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn delimiters(&self) -> &[DelimiterSpec] {
        &self.delimiters
    }

    /// Get delimiter by state id
    pub fn delimiter(&self, state_id: u8) -> Option<&DelimiterSpec> {
        self.delimiters.iter().find(|d| d.state_id == state_id)
    }
}

/// Result of highlighting a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResult {
    /// Spans in application order; later spans win on overlap
    pub spans: Vec<Span>,
    /// State at end of line (for next line)
    pub exit_state: LineState,
}

impl HighlightResult {
    /// Style observed at character `pos` after layering all spans
    pub fn style_at(&self, pos: usize) -> Option<StyleId> {
        self.spans
            .iter()
            .rev()
            .find(|span| span.contains(pos))
            .map(|span| span.style)
    }

    /// Resolve overlaps into sorted, non-overlapping spans
    pub fn flatten(&self) -> Vec<Span> {
        flatten_spans(&self.spans)
    }
}

/// Apply spans in order, later ones winning, and return the visible result
/// as sorted, non-overlapping spans
pub fn flatten_spans(spans: &[Span]) -> Vec<Span> {
    let width = spans.iter().map(Span::end).max().unwrap_or(0);
    let mut layer: Vec<Option<StyleId>> = vec![None; width];
    for span in spans {
        for slot in &mut layer[span.offset..span.end()] {
            *slot = Some(span.style);
        }
    }

    let mut flat: Vec<Span> = Vec::new();
    for (pos, style) in layer.into_iter().enumerate() {
        let Some(style) = style else { continue };
        match flat.last_mut() {
            Some(last) if last.end() == pos && last.style == style => last.length += 1,
            _ => flat.push(Span::new(pos, 1, style)),
        }
    }
    flat
}
