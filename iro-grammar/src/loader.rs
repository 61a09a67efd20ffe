//! Grammar loading utilities
//!
//! This module provides `GrammarLoader` - a utility for reading an already-parsed grammar model
//! from a file or a string. Both JSON and YAML are accepted; for files the format is picked from
//! the extension.
//!
//! # Example
//!
//! ```rust
//! use iro_grammar::loader::{GrammarLoader, SourceFormat};
//!
//! // From file
//! let grammar = GrammarLoader::from_path("demo.iro.json").unwrap().load().unwrap();
//!
//! // From string
//! let grammar = GrammarLoader::from_string("name: demo\n", SourceFormat::Yaml)
//!     .load()
//!     .unwrap();
//! ```

use crate::model::GrammarSpec;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Error that can occur when loading grammars
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderError {
    /// IO error when reading file
    Io(String),
    Json(String),
    Yaml(String),
    /// The file extension does not name a known source format
    UnknownFormat(String),
    DuplicateStyle(String),
    DuplicateContext(String),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::Io(msg) => write!(f, "IO error: {}", msg),
            LoaderError::Json(msg) => write!(f, "Invalid JSON grammar: {}", msg),
            LoaderError::Yaml(msg) => write!(f, "Invalid YAML grammar: {}", msg),
            LoaderError::UnknownFormat(path) => write!(
                f,
                "Cannot tell the grammar format of '{}', expected a .json, .yaml or .yml file",
                path
            ),
            LoaderError::DuplicateStyle(name) => {
                write!(f, "Style '{}' is defined more than once", name)
            }
            LoaderError::DuplicateContext(name) => {
                write!(f, "Context '{}' is defined more than once", name)
            }
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LoaderError {
    fn from(err: serde_json::Error) -> Self {
        LoaderError::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for LoaderError {
    fn from(err: serde_yaml::Error) -> Self {
        LoaderError::Yaml(err.to_string())
    }
}

/// Serialization format of a stored grammar model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            _ => None,
        }
    }
}

/// Grammar loader
///
/// Holds the raw source until [GrammarLoader::load] deserializes it and checks that style and
/// context names are unique.
pub struct GrammarLoader {
    source: String,
    format: SourceFormat,
}

impl GrammarLoader {
    /// Load from a file path, detecting the format from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path)
            .ok_or_else(|| LoaderError::UnknownFormat(path.display().to_string()))?;
        let source = fs::read_to_string(path)?;
        Ok(GrammarLoader { source, format })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S, format: SourceFormat) -> Self {
        GrammarLoader {
            source: source.into(),
            format,
        }
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Deserialize the grammar and check name uniqueness
    pub fn load(&self) -> Result<GrammarSpec, LoaderError> {
        let grammar: GrammarSpec = match self.format {
            SourceFormat::Json => serde_json::from_str(&self.source)?,
            SourceFormat::Yaml => serde_yaml::from_str(&self.source)?,
        };
        check_unique_names(&grammar)?;
        Ok(grammar)
    }
}

fn check_unique_names(grammar: &GrammarSpec) -> Result<(), LoaderError> {
    let mut seen = HashSet::new();
    for style in &grammar.styles {
        if !seen.insert(style.name.as_str()) {
            return Err(LoaderError::DuplicateStyle(style.name.clone()));
        }
    }

    let mut seen = HashSet::new();
    for context in &grammar.contexts {
        if !seen.insert(context.name.as_str()) {
            return Err(LoaderError::DuplicateContext(context.name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RuleMember, Style};
    use std::io::Write;

    const DEMO_YAML: &str = r#"
name: demo
file_extensions: [demo]
uuid: u1
styles:
  - name: kw
    textmate_scope: keyword.demo
contexts:
  - name: main
    members:
      - type: pattern
        regex: '\bif\b'
        styles: [kw]
"#;

    #[test]
    fn test_load_yaml() {
        let grammar = GrammarLoader::from_string(DEMO_YAML, SourceFormat::Yaml)
            .load()
            .unwrap();

        assert_eq!(grammar.name, "demo");
        assert_eq!(grammar.file_extensions, vec!["demo".to_string()]);
        assert_eq!(
            grammar.styles,
            vec![Style::new("kw").with_textmate_scope("keyword.demo")]
        );
        assert_eq!(
            grammar.contexts[0].members,
            vec![RuleMember::pattern(r"\bif\b", &["kw"])]
        );
    }

    #[test]
    fn test_load_json_defaults() {
        let grammar = GrammarLoader::from_string(r#"{"name": "bare"}"#, SourceFormat::Json)
            .load()
            .unwrap();

        assert_eq!(grammar.name, "bare");
        assert!(grammar.file_extensions.is_empty());
        assert!(grammar.contexts.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let result = GrammarLoader::from_string("{", SourceFormat::Json).load();
        assert!(matches!(result, Err(LoaderError::Json(_))));
    }

    #[test]
    fn test_duplicate_style() {
        let json = r#"{"name": "d", "styles": [{"name": "kw"}, {"name": "kw"}]}"#;
        let result = GrammarLoader::from_string(json, SourceFormat::Json).load();
        assert_eq!(result, Err(LoaderError::DuplicateStyle("kw".to_string())));
    }

    #[test]
    fn test_duplicate_context() {
        let json = r#"{"name": "d", "contexts": [{"name": "main"}, {"name": "main"}]}"#;
        let result = GrammarLoader::from_string(json, SourceFormat::Json).load();
        assert_eq!(
            result,
            Err(LoaderError::DuplicateContext("main".to_string()))
        );
    }

    #[test]
    fn test_from_path_detects_format() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(DEMO_YAML.as_bytes()).unwrap();

        let loader = GrammarLoader::from_path(file.path()).unwrap();
        assert_eq!(loader.format(), SourceFormat::Yaml);
        assert_eq!(loader.load().unwrap().uuid, "u1");
    }

    #[test]
    fn test_from_path_unknown_extension() {
        let result = GrammarLoader::from_path("grammar.iro");
        assert!(matches!(result, Err(LoaderError::UnknownFormat(_))));
    }
}
