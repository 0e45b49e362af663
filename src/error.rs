//! Error types for linetint

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for configuration-time operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while building rule tables, languages and themes.
///
/// Highlighting itself never fails; everything here is reported before an
/// engine exists.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("capture group {group} out of range for `{pattern}` ({available} groups available)")]
    InvalidGroup {
        pattern: String,
        group: usize,
        available: usize,
    },

    #[error("delimiter `{0}` can match the empty string")]
    EmptyDelimiter(String),

    #[error("delimiter `{0}` needs a non-zero state id")]
    InvalidStateId(String),

    #[error("state id {0} is used by more than one delimiter")]
    DuplicateStateId(u8),

    #[error("unknown style: {0}")]
    UnknownStyle(String),

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConfigError::InvalidGroup {
            pattern: "a(b)".to_string(),
            group: 3,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "capture group 3 out of range for `a(b)` (2 groups available)"
        );
        assert_eq!(
            ConfigError::DuplicateStateId(1).to_string(),
            "state id 1 is used by more than one delimiter"
        );
    }
}
