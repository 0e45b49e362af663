//! Syntax highlighting
//!
//! This module provides the line-oriented highlighting engine and the
//! collaborators around it:
//! - Rule tables and per-line scanning
//! - Multi-line region tracking through a per-line state
//! - Language definitions, built-in and loaded from TOML
//! - Themes and a per-document state cache

mod style;
mod tokens;
mod rules;
mod scanner;
mod multiline;
mod engine;
mod language;
mod manager;
mod cache;
mod builtin;

pub use style::{Color, Span, Style, Theme};
pub use tokens::StyleId;
pub use rules::{flatten_spans, DelimiterSpec, HighlightResult, LineState, Rule, RuleTable};
pub use scanner::scan;
pub use multiline::track;
pub use engine::HighlightEngine;
pub use language::{LanguageBuilder, LanguageDefinition};
pub use manager::SyntaxManager;
pub use cache::HighlightCache;
pub use builtin::{all_languages, csharp_language, python_language};
