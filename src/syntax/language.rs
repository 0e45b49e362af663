//! Language definitions for syntax highlighting
//!
//! A [`LanguageDefinition`] pairs a name and file extensions with a
//! compiled [`HighlightEngine`]. Definitions come from the built-in tables
//! or from TOML files:
//!
//! ```toml
//! name = "Lua"
//! extensions = ["lua"]
//!
//! [[words]]
//! style = "keyword"
//! list = ["if", "then", "end"]
//!
//! [[rules]]
//! pattern = '--[^\n]*'
//! style = "comment"
//!
//! [[delimiters]]
//! pattern = '\[\['
//! state = 1
//! style = "string2"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::engine::HighlightEngine;
use super::rules::{DelimiterSpec, HighlightResult, LineState, Rule, RuleTable};
use super::tokens::StyleId;
use crate::error::{ConfigError, Result};

/// A complete language definition for syntax highlighting
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    /// Language name (e.g., "CSharp", "Python")
    pub name: String,
    /// File extensions (e.g., ["cs"], ["py", "pyw"])
    pub extensions: Vec<String>,
    engine: HighlightEngine,
}

impl LanguageDefinition {
    pub fn new(name: &str, extensions: &[&str], table: RuleTable) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
            engine: HighlightEngine::new(table),
        }
    }

    pub fn engine(&self) -> &HighlightEngine {
        &self.engine
    }

    /// Highlight a single line of text
    pub fn highlight_line(&self, text: &str, prev_state: LineState) -> HighlightResult {
        self.engine.highlight(text, prev_state)
    }

    /// Parse a language file
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: LanguageFile = toml::from_str(contents)?;
        file.build()
    }

    /// Load a language file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let lang = Self::from_toml(&contents)?;
        debug!(language = %lang.name, path = %path.display(), "loaded language");
        Ok(lang)
    }
}

/// Builder collecting rules in declaration order
///
/// Word lists are literal: each word is regex-escaped, and wrapped in
/// `\b...\b` when `whole_word` is set.
pub struct LanguageBuilder {
    name: String,
    extensions: Vec<String>,
    rules: Vec<Rule>,
    delimiters: Vec<DelimiterSpec>,
}

impl LanguageBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            rules: Vec::new(),
            delimiters: Vec::new(),
        }
    }

    /// Add a file extension
    pub fn extension(mut self, ext: &str) -> Self {
        self.extensions.push(ext.to_string());
        self
    }

    /// Add one rule per word
    pub fn words(mut self, style: StyleId, whole_word: bool, words: &[&str]) -> Result<Self> {
        for word in words {
            let escaped = regex::escape(word);
            let pattern = if whole_word {
                format!(r"\b{escaped}\b")
            } else {
                escaped
            };
            self.rules.push(Rule::new(&pattern, 0, style)?);
        }
        Ok(self)
    }

    /// Add a pattern rule
    pub fn rule(mut self, pattern: &str, group: usize, style: StyleId) -> Result<Self> {
        self.rules.push(Rule::new(pattern, group, style)?);
        Ok(self)
    }

    /// Add a multi-line delimiter; earlier delimiters take priority
    pub fn delimiter(mut self, pattern: &str, state_id: u8, style: StyleId) -> Result<Self> {
        self.delimiters.push(DelimiterSpec::new(pattern, state_id, style)?);
        Ok(self)
    }

    pub fn build(self) -> Result<LanguageDefinition> {
        let table = RuleTable::new(self.rules, self.delimiters)?;
        Ok(LanguageDefinition {
            name: self.name,
            extensions: self.extensions,
            engine: HighlightEngine::new(table),
        })
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LanguageFile {
    name: String,
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default)]
    words: Vec<WordsEntry>,
    #[serde(default)]
    rules: Vec<RuleEntry>,
    #[serde(default)]
    delimiters: Vec<DelimiterEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WordsEntry {
    style: String,
    #[serde(default = "default_whole_word")]
    whole_word: bool,
    list: Vec<String>,
}

fn default_whole_word() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    pattern: String,
    #[serde(default)]
    group: usize,
    style: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DelimiterEntry {
    pattern: String,
    state: u8,
    style: String,
}

fn style(name: &str) -> Result<StyleId> {
    StyleId::from_name(name).ok_or_else(|| ConfigError::UnknownStyle(name.to_string()))
}

impl LanguageFile {
    fn build(self) -> Result<LanguageDefinition> {
        let mut builder = LanguageBuilder::new(&self.name);
        for ext in &self.extensions {
            builder = builder.extension(ext);
        }
        for entry in &self.words {
            let list: Vec<&str> = entry.list.iter().map(String::as_str).collect();
            builder = builder.words(style(&entry.style)?, entry.whole_word, &list)?;
        }
        for entry in &self.rules {
            builder = builder.rule(&entry.pattern, entry.group, style(&entry.style)?)?;
        }
        for entry in &self.delimiters {
            builder = builder.delimiter(&entry.pattern, entry.state, style(&entry.style)?)?;
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::Span;

    const LUA: &str = r#"
name = "Lua"
extensions = ["lua"]

[[words]]
style = "keyword"
list = ["if", "then", "end"]

[[words]]
style = "operator"
whole_word = false
list = ["==", ".."]

[[rules]]
pattern = '--[^\n]*'
style = "comment"

[[rules]]
pattern = 'function\s+(\w+)'
group = 1
style = "defclass"

[[delimiters]]
pattern = '\]\]|\[\['
state = 1
style = "string2"
"#;

    #[test]
    fn test_from_toml() {
        let lang = LanguageDefinition::from_toml(LUA).unwrap();
        assert_eq!(lang.name, "Lua");
        assert_eq!(lang.extensions, vec!["lua".to_string()]);
        assert_eq!(lang.engine().table().rules().len(), 7);
        assert_eq!(lang.engine().table().delimiters().len(), 1);

        let result = lang.highlight_line("if a == b then -- done", LineState::default());
        assert_eq!(result.style_at(0), Some(StyleId::Keyword));
        assert_eq!(result.style_at(5), Some(StyleId::Operator));
        assert_eq!(result.style_at(10), Some(StyleId::Keyword));
        assert_eq!(result.style_at(16), Some(StyleId::Comment));
        assert_eq!(result.style_at(21), Some(StyleId::Comment));
        assert_eq!(result.style_at(22), None);
    }

    #[test]
    fn test_capture_group_from_toml() {
        let lang = LanguageDefinition::from_toml(LUA).unwrap();
        let result = lang.highlight_line("function greet()", LineState::default());
        assert_eq!(result.spans, vec![Span::new(9, 5, StyleId::DefClass)]);
    }

    #[test]
    fn test_words_are_literal() {
        let lang = LanguageBuilder::new("T")
            .words(StyleId::Operator, false, &["+", "*="])
            .unwrap()
            .build()
            .unwrap();
        let result = lang.highlight_line("a *= b + c", LineState::default());
        assert_eq!(
            result.spans,
            vec![
                Span::new(7, 1, StyleId::Operator),
                Span::new(2, 2, StyleId::Operator),
            ]
        );
    }

    #[test]
    fn test_unknown_style() {
        let contents = "name = \"X\"\n[[rules]]\npattern = 'x'\nstyle = \"sparkly\"\n";
        assert!(matches!(
            LanguageDefinition::from_toml(contents),
            Err(ConfigError::UnknownStyle(name)) if name == "sparkly"
        ));
    }

    #[test]
    fn test_invalid_group_rejected() {
        let contents = "name = \"X\"\n[[rules]]\npattern = 'a(b)'\ngroup = 2\nstyle = \"keyword\"\n";
        assert!(matches!(
            LanguageDefinition::from_toml(contents),
            Err(ConfigError::InvalidGroup { .. })
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            LanguageDefinition::from_toml("name = "),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            LanguageDefinition::from_toml("name = \"X\"\ncolour = 1\n"),
            Err(ConfigError::Toml(_))
        ));
    }
}
