//! Shared configuration loader for the iro toolchain.
//!
//! `defaults/iro.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`IroConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use iro_targets::TextmateOptions;
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/iro.default.toml");

/// Top-level configuration consumed by iro applications.
#[derive(Debug, Clone, Deserialize)]
pub struct IroConfig {
    pub compile: CompileConfig,
    pub textmate: TextmateConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompileConfig {
    pub target: String,
}

/// Mirrors the knobs exposed by the textmate target.
#[derive(Debug, Clone, Deserialize)]
pub struct TextmateConfig {
    pub helper_prefix: String,
    pub indent_width: usize,
    pub generator_comment: String,
}

impl TextmateConfig {
    pub fn to_options(&self) -> TextmateOptions {
        TextmateOptions {
            helper_prefix: self.helper_prefix.clone(),
            indent_width: self.indent_width,
            generator_comment: Some(self.generator_comment.clone()).filter(|c| !c.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<IroConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<IroConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.compile.target, "textmate");
        assert_eq!(config.textmate.indent_width, 2);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.textmate.to_options(), TextmateOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("textmate.indent_width", 4)
            .expect("override to apply")
            .set_override("textmate.generator_comment", "")
            .expect("override to apply")
            .build()
            .expect("config to build");

        let options = config.textmate.to_options();
        assert_eq!(options.indent_width, 4);
        assert_eq!(options.generator_comment, None);
        assert_eq!(options.helper_prefix, "helper_");
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[textmate]\nhelper_prefix = \"nested_\"").unwrap();

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.textmate.helper_prefix, "nested_");
        assert_eq!(config.textmate.indent_width, 2);
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/iro.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.compile.target, "textmate");
    }

    #[test]
    fn required_file_must_exist() {
        let result = Loader::new().with_file("/nonexistent/iro.toml").build();
        assert!(result.is_err());
    }
}
