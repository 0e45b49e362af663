//! Configuration file support
//!
//! Loads settings from ~/.linetint.conf (or %USERPROFILE%\.linetint.conf on Windows)
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # linetint configuration
//! theme = /home/me/.config/linetint/dusk.toml
//! language-dir = /home/me/.config/linetint/languages
//! line-numbers = true
//! tab-width = 4
//! width = 100
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Theme file overriding the built-in styles
    pub theme: Option<PathBuf>,
    /// Directory of extra TOML language definitions
    pub language_dir: Option<PathBuf>,
    /// Whether to show line numbers
    pub line_numbers: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// Maximum display columns per line (0 = unlimited)
    pub width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: None,
            language_dir: None,
            line_numbers: false,
            tab_width: 8,
            width: 0,
        }
    }
}

impl Settings {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".linetint.conf"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".linetint.conf"))
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Settings::default(),
        }
    }

    /// Load configuration from a file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Self {
        let mut settings = Settings::default();
        match fs::read_to_string(path) {
            Ok(contents) => {
                settings.apply(&Self::parse(&contents));
                debug!(path = %path.display(), ?settings, "loaded settings");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "cannot read settings"),
        }
        settings
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key = value
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.insert(key, value);
            }
        }

        settings
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        for (key, value) in settings {
            match key.as_str() {
                "theme" => self.theme = non_empty_path(value),
                "language-dir" => self.language_dir = non_empty_path(value),
                "line-numbers" => self.line_numbers = parse_bool(value),
                "tab-width" => {
                    if let Ok(n) = value.parse::<usize>() {
                        self.tab_width = n.clamp(1, 16); // Between 1 and 16
                    }
                }
                "width" => {
                    if let Ok(n) = value.parse::<usize>() {
                        self.width = n;
                    }
                }
                _ => warn!(key = %key, "unknown setting"),
            }
        }
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    (!value.is_empty()).then(|| PathBuf::from(value))
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
theme = /tmp/dusk.toml
line-numbers = true
tab-width = 4
        "#;

        let settings = Settings::parse(contents);
        assert_eq!(settings.get("theme"), Some(&"/tmp/dusk.toml".to_string()));
        assert_eq!(settings.get("line-numbers"), Some(&"true".to_string()));
        assert_eq!(settings.get("tab-width"), Some(&"4".to_string()));
        assert_eq!(settings.len(), 3);
    }

    #[test]
    fn test_apply_settings() {
        let mut config = Settings::default();
        let mut settings = HashMap::new();
        settings.insert("language-dir".to_string(), "langs".to_string());
        settings.insert("line-numbers".to_string(), "yes".to_string());
        settings.insert("tab-width".to_string(), "40".to_string());
        settings.insert("width".to_string(), "80".to_string());
        settings.insert("theme".to_string(), "".to_string());

        config.apply(&settings);

        assert_eq!(config.language_dir, Some(PathBuf::from("langs")));
        assert_eq!(config.theme, None);
        assert!(config.line_numbers);
        assert_eq!(config.tab_width, 16);
        assert_eq!(config.width, 80);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/.linetint.conf"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("True"));
        assert!(parse_bool("on"));
        assert!(parse_bool("1"));

        assert!(!parse_bool("false"));
        assert!(!parse_bool("off"));
        assert!(!parse_bool("anything"));
    }
}
