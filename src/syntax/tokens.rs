//! Style identifiers
//!
//! The engine tags text with a `StyleId`; what a style looks like is
//! decided by a [`Theme`](super::Theme), never by the engine itself.

/// Opaque style identifiers attached to spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleId {
    /// Language keywords (if, return, class, ...)
    Keyword,
    /// Operators (+, ==, <<=, ...)
    Operator,
    /// Braces, brackets and parentheses
    Brace,
    /// Names introduced by `def` / `class`
    DefClass,
    /// Single-line string literals
    String,
    /// Multi-line string regions
    String2,
    /// Comments
    Comment,
    /// `self` / `this`
    SelfRef,
    /// Numeric literals
    Number,
    /// Plain text
    Default,
}

impl StyleId {
    /// All style identifiers, in declaration order
    pub const ALL: [StyleId; 10] = [
        StyleId::Keyword,
        StyleId::Operator,
        StyleId::Brace,
        StyleId::DefClass,
        StyleId::String,
        StyleId::String2,
        StyleId::Comment,
        StyleId::SelfRef,
        StyleId::Number,
        StyleId::Default,
    ];

    /// Name used in language and theme files
    pub fn name(&self) -> &'static str {
        match self {
            StyleId::Keyword => "keyword",
            StyleId::Operator => "operator",
            StyleId::Brace => "brace",
            StyleId::DefClass => "defclass",
            StyleId::String => "string",
            StyleId::String2 => "string2",
            StyleId::Comment => "comment",
            StyleId::SelfRef => "self",
            StyleId::Number => "numbers",
            StyleId::Default => "default",
        }
    }

    /// Parse a style from its file name
    pub fn from_name(name: &str) -> Option<Self> {
        StyleId::ALL.into_iter().find(|id| id.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_roundtrip() {
        for id in StyleId::ALL {
            assert_eq!(StyleId::from_name(id.name()), Some(id));
        }
    }

    #[test]
    fn test_from_name_invalid() {
        assert_eq!(StyleId::from_name("Keyword"), None);
        assert_eq!(StyleId::from_name("number"), None);
        assert_eq!(StyleId::from_name(""), None);
    }
}
