//! Style types for text rendering
//!
//! Spans carry a [`StyleId`]; a [`Theme`] resolves that id to concrete
//! attributes when a line is drawn.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::tokens::StyleId;
use crate::error::{ConfigError, Result};

/// Terminal colors (ANSI 16-color palette plus true color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a named color, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "brightblack" => Color::BrightBlack,
            "brightred" => Color::BrightRed,
            "brightgreen" => Color::BrightGreen,
            "brightyellow" => Color::BrightYellow,
            "brightblue" => Color::BrightBlue,
            "brightmagenta" => Color::BrightMagenta,
            "brightcyan" => Color::BrightCyan,
            "brightwhite" => Color::BrightWhite,
            "darkgray" | "darkgrey" => Color::Rgb(128, 128, 128),
            "gray" | "grey" => Color::Rgb(160, 160, 164),
            "lightgray" | "lightgrey" => Color::Rgb(192, 192, 192),
            _ => return None,
        };
        Some(color)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Create a true-color style
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::fg(Color::Rgb(r, g, b))
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A styled span of text within a line
///
/// Offsets and lengths count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Character offset where this span starts
    pub offset: usize,
    /// Number of characters covered
    pub length: usize,
    /// Style to apply to this span
    pub style: StyleId,
}

impl Span {
    /// Create a new span
    pub fn new(offset: usize, length: usize, style: StyleId) -> Self {
        Self {
            offset,
            length,
            style,
        }
    }

    /// One past the last character covered
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Check if this span contains a character position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.offset && pos < self.end()
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Mapping from style ids to display attributes.
///
/// Owned by whoever draws text; the engine only ever hands out ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    styles: HashMap<StyleId, Style>,
}

impl Default for Theme {
    fn default() -> Self {
        let styles = HashMap::from([
            (StyleId::Keyword, Style::rgb(200, 120, 50).with_bold()),
            (StyleId::Operator, Style::rgb(150, 150, 150)),
            (StyleId::Brace, Style::rgb(128, 128, 128)),
            (StyleId::DefClass, Style::rgb(220, 220, 255).with_bold()),
            (StyleId::String, Style::rgb(20, 110, 100)),
            (StyleId::String2, Style::rgb(30, 120, 110)),
            (StyleId::Comment, Style::rgb(128, 128, 128)),
            (StyleId::SelfRef, Style::rgb(150, 85, 140).with_italic()),
            (StyleId::Number, Style::rgb(100, 150, 190)),
            (StyleId::Default, Style::default()),
        ]);
        Self { styles }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
    #[serde(default)]
    styles: HashMap<String, StyleEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleEntry {
    fg: Option<ColorValue>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underline: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Rgb([u8; 3]),
    Named(String),
}

impl StyleEntry {
    fn to_style(&self) -> Result<Style> {
        let fg = match &self.fg {
            None => Color::Default,
            Some(ColorValue::Rgb([r, g, b])) => Color::Rgb(*r, *g, *b),
            Some(ColorValue::Named(name)) => {
                Color::from_name(name).ok_or_else(|| ConfigError::UnknownColor(name.clone()))?
            }
        };
        Ok(Style {
            fg,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
        })
    }
}

impl Theme {
    /// Resolve a style id; ids missing from the theme render unstyled
    pub fn resolve(&self, id: StyleId) -> Style {
        self.styles.get(&id).copied().unwrap_or_default()
    }

    /// Replace the attributes for one style id
    pub fn set(&mut self, id: StyleId, style: Style) {
        self.styles.insert(id, style);
    }

    /// Parse a theme file; styles it does not mention keep their defaults
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ThemeFile = toml::from_str(contents)?;
        let mut theme = Theme::default();
        for (name, entry) in &file.styles {
            let id = StyleId::from_name(name)
                .ok_or_else(|| ConfigError::UnknownStyle(name.clone()))?;
            theme.set(id, entry.to_style()?);
        }
        Ok(theme)
    }

    /// Load a theme file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let theme = Self::from_toml(&contents)?;
        debug!(path = %path.display(), "loaded theme");
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold().with_italic();
        assert_eq!(style.fg, Color::Red);
        assert!(style.bold);
        assert!(style.italic);
        assert!(!style.underline);
        assert!(!style.is_default());
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(5, 5, StyleId::Keyword);
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.end(), 10);
    }

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        let keyword = theme.resolve(StyleId::Keyword);
        assert_eq!(keyword.fg, Color::Rgb(200, 120, 50));
        assert!(keyword.bold);
        assert!(theme.resolve(StyleId::SelfRef).italic);
        assert!(theme.resolve(StyleId::Default).is_default());
    }

    #[test]
    fn test_theme_from_toml() {
        let theme = Theme::from_toml(
            r#"
[styles.keyword]
fg = "darkGray"
underline = true

[styles.numbers]
fg = [1, 2, 3]
"#,
        )
        .unwrap();
        assert_eq!(
            theme.resolve(StyleId::Keyword),
            Style::fg(Color::Rgb(128, 128, 128)).with_underline()
        );
        assert_eq!(theme.resolve(StyleId::Number), Style::rgb(1, 2, 3));
        // Untouched entries keep their defaults
        assert_eq!(theme.resolve(StyleId::String), Style::rgb(20, 110, 100));
    }

    #[test]
    fn test_theme_rejects_unknown_names() {
        assert!(matches!(
            Theme::from_toml("[styles.bogus]\nbold = true\n"),
            Err(ConfigError::UnknownStyle(name)) if name == "bogus"
        ));
        assert!(matches!(
            Theme::from_toml("[styles.keyword]\nfg = \"mauve\"\n"),
            Err(ConfigError::UnknownColor(_))
        ));
    }
}
