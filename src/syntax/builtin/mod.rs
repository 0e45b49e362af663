//! Built-in language definitions

mod csharp;
mod python;

use super::language::LanguageDefinition;
use crate::error::Result;

pub use csharp::csharp_language;
pub use python::python_language;

/// Get all built-in language definitions
pub fn all_languages() -> Result<Vec<LanguageDefinition>> {
    Ok(vec![csharp_language()?, python_language()?])
}
