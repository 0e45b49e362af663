//! linetint - line-oriented syntax highlighting
//!
//! The engine tags one line at a time. Each call takes the line text and
//! the state left by the previous line, and returns styled spans plus the
//! state for the next line:
//!
//! ```
//! use linetint::syntax::{HighlightEngine, LineState, RuleTable, StyleId};
//!
//! let table = RuleTable::from_patterns(
//!     &[(r"\bif\b", 0, StyleId::Keyword)],
//!     &[("'''", 1, StyleId::String2)],
//! )?;
//! let engine = HighlightEngine::new(table);
//!
//! let first = engine.highlight("if x: '''doc", LineState::default());
//! assert_eq!(first.exit_state, LineState::inside(1));
//! let second = engine.highlight("more'''", first.exit_state);
//! assert!(second.exit_state.is_normal());
//! # Ok::<(), linetint::ConfigError>(())
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod syntax;

pub use error::{ConfigError, Result};
