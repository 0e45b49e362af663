//! Syntax highlighting manager
//!
//! This module provides the SyntaxManager that owns language definitions
//! and maps file names to them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::builtin;
use super::language::LanguageDefinition;
use crate::error::{ConfigError, Result};

/// Registry of languages keyed by name and file extension
#[derive(Debug, Default)]
pub struct SyntaxManager {
    /// Loaded language definitions
    languages: HashMap<String, LanguageDefinition>,
    /// Extension to language name mapping
    extension_map: HashMap<String, String>,
}

impl SyntaxManager {
    /// Create a new syntax manager with built-in languages
    pub fn new() -> Result<Self> {
        let mut manager = Self::default();
        for lang in builtin::all_languages()? {
            manager.add_language(lang);
        }
        Ok(manager)
    }

    /// Add a language definition, replacing one with the same name
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        let name = lang.name.clone();
        for ext in &lang.extensions {
            self.extension_map.insert(ext.to_lowercase(), name.clone());
        }
        debug!(language = %name, extensions = ?lang.extensions, "registered language");
        self.languages.insert(name, lang);
    }

    /// Load every `*.toml` language file in a directory
    ///
    /// Returns the number of languages loaded. A file that fails to parse
    /// aborts the load with its error.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let entries = fs::read_dir(dir).map_err(|e| ConfigError::io(dir, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ConfigError::io(dir, e))?.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            } else {
                warn!(path = %path.display(), "skipping non-TOML file in language directory");
            }
        }
        paths.sort();

        for path in &paths {
            self.add_language(LanguageDefinition::load(path)?);
        }
        Ok(paths.len())
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// Get a language definition by name, ignoring case
    pub fn get_language(&self, name: &str) -> Option<&LanguageDefinition> {
        self.languages.get(name).or_else(|| {
            self.languages
                .values()
                .find(|lang| lang.name.eq_ignore_ascii_case(name))
        })
    }

    /// Language for a file, by extension
    pub fn language_for(&self, filename: &Path) -> Option<&LanguageDefinition> {
        self.detect_language(filename)
            .and_then(|name| self.languages.get(name))
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("linetint-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_detect_language() {
        let manager = SyntaxManager::new().unwrap();

        assert_eq!(manager.detect_language(Path::new("Program.cs")), Some("CSharp"));
        assert_eq!(manager.detect_language(Path::new("test.py")), Some("Python"));
        assert_eq!(manager.detect_language(Path::new("TEST.PY")), Some("Python"));
        assert_eq!(manager.detect_language(Path::new("main.c")), None);
        assert_eq!(manager.detect_language(Path::new("no_extension")), None);
    }

    #[test]
    fn test_get_language() {
        let manager = SyntaxManager::new().unwrap();
        assert!(manager.get_language("Python").is_some());
        assert!(manager.get_language("csharp").is_some());
        assert!(manager.get_language("Cobol").is_none());
        assert_eq!(manager.list_languages(), vec!["CSharp", "Python"]);
    }

    #[test]
    fn test_load_dir() {
        let dir = temp_dir("load");
        fs::write(
            dir.join("ini.toml"),
            "name = \"INI\"\nextensions = [\"ini\"]\n[[rules]]\npattern = ';.*'\nstyle = \"comment\"\n",
        )
        .unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let mut manager = SyntaxManager::new().unwrap();
        assert_eq!(manager.load_dir(&dir).unwrap(), 1);
        assert_eq!(manager.detect_language(Path::new("setup.ini")), Some("INI"));
        assert!(manager.language_for(Path::new("setup.ini")).is_some());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_dir_reports_bad_file() {
        let dir = temp_dir("bad");
        fs::write(dir.join("broken.toml"), "name = \"B\"\n[[rules]]\npattern = '('\nstyle = \"comment\"\n")
            .unwrap();

        let mut manager = SyntaxManager::default();
        assert!(matches!(
            manager.load_dir(&dir),
            Err(ConfigError::InvalidPattern { .. })
        ));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_dir() {
        let mut manager = SyntaxManager::default();
        assert!(matches!(
            manager.load_dir(Path::new("/nonexistent/linetint/languages")),
            Err(ConfigError::Io { .. })
        ));
    }
}
