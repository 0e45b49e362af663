//! Python language definition

use crate::error::Result;
use crate::syntax::language::{LanguageBuilder, LanguageDefinition};
use crate::syntax::tokens::StyleId;

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Create Python language definition
pub fn python_language() -> Result<LanguageDefinition> {
    LanguageBuilder::new("Python")
        .extension("py")
        .extension("pyw")
        .extension("pyi")
        .words(StyleId::Keyword, true, KEYWORDS)?
        .rule(r"[+\-*/%&|^!<>=@~]+", 0, StyleId::Operator)?
        .rule(r"[{}()\[\]]", 0, StyleId::Brace)?
        .rule(r"\bself\b", 0, StyleId::SelfRef)?
        .rule(r"\bdef\s+(\w+)", 1, StyleId::DefClass)?
        .rule(r"\bclass\s+(\w+)", 1, StyleId::DefClass)?
        .rule(r"\b0[xX][0-9a-fA-F_]+\b", 0, StyleId::Number)?
        .rule(r"\b\d[\d_]*(?:\.\d[\d_]*)?(?:[eE][+-]?\d+)?j?\b", 0, StyleId::Number)?
        .rule(r#""[^"\\]*(\\.[^"\\]*)*""#, 0, StyleId::String)?
        .rule(r"'[^'\\]*(\\.[^'\\]*)*'", 0, StyleId::String)?
        .rule(r"#[^\n]*", 0, StyleId::Comment)?
        .delimiter("\"\"\"", 1, StyleId::String2)?
        .delimiter("'''", 2, StyleId::String2)?
        .build()
}
