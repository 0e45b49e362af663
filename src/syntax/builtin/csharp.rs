//! C# language definition

use crate::error::Result;
use crate::syntax::language::{LanguageBuilder, LanguageDefinition};
use crate::syntax::tokens::StyleId;

const KEYWORDS: &[&str] = &[
    "abstract", "add", "alias", "as", "ascending", "async", "await", "base", "bool", "break",
    "byte", "case", "catch", "char", "checked", "class", "const", "continue", "decimal",
    "default", "delegate", "descending", "do", "double", "dynamic", "else", "enum", "event",
    "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "from", "get",
    "global", "goto", "group", "if", "implicit", "in", "int", "interface", "internal", "into",
    "is", "join", "let", "lock", "long", "nameof", "namespace", "new", "null", "object",
    "operator", "orderby", "out", "override", "params", "partial", "private", "protected",
    "public", "readonly", "ref", "remove", "return", "sbyte", "sealed", "select", "set", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "value", "var",
    "virtual", "void", "volatile", "when", "where", "while", "yield",
];

const OPERATORS: &[&str] = &[
    "=", "!", "?", ":", "==", "!=", "<", "<=", ">", ">=", "+", "-", "*", "/", "%", "++", "--",
    "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", "&=", "^=", "|=", "^", "|", "&", "~", ">>", "<<",
];

const BRACES: &[&str] = &["{", "}", "(", ")", "[", "]"];

/// Create C# language definition
///
/// Numbers come before strings and comments so that digits inside a
/// literal or a comment keep the literal's style.
pub fn csharp_language() -> Result<LanguageDefinition> {
    LanguageBuilder::new("CSharp")
        .extension("cs")
        .extension("csx")
        .words(StyleId::Keyword, true, KEYWORDS)?
        .words(StyleId::Operator, false, OPERATORS)?
        .words(StyleId::Brace, false, BRACES)?
        .rule(r"\bthis\b", 0, StyleId::SelfRef)?
        .rule(r"\b(?:class|struct|interface|enum)\s+(\w+)", 1, StyleId::DefClass)?
        .rule(r"\b[+-]?[0-9]+[lL]?\b", 0, StyleId::Number)?
        .rule(r"\b[+-]?0[xX][0-9A-Fa-f]+[lL]?\b", 0, StyleId::Number)?
        .rule(r"\b[+-]?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?\b", 0, StyleId::Number)?
        .rule(r#""[^"\\]*(\\.[^"\\]*)*""#, 0, StyleId::String)?
        .rule(r"'[^'\\]*(\\.[^'\\]*)*'", 0, StyleId::String)?
        .rule(r"//[^\n]*", 0, StyleId::Comment)?
        .delimiter("'''", 1, StyleId::String2)?
        .delimiter("\"\"\"", 2, StyleId::String2)?
        .build()
}
