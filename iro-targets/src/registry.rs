//! Target registry for target discovery and selection
//!
//! This module provides a centralized registry for all available compile targets.
//! Targets can be registered and retrieved by name.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::CompileError;
use crate::target::{CompileResult, Target};
use iro_grammar::GrammarSpec;
use std::collections::HashMap;

/// Registry of compile targets
///
/// # Examples
///
/// ```ignore
/// let mut registry = TargetRegistry::new();
/// registry.register(MyTarget);
///
/// let target = registry.get("my-target")?;
/// let result = target.compile(&grammar, &mut LogSink)?;
/// ```
pub struct TargetRegistry {
    targets: HashMap<String, Box<dyn Target>>,
}

impl TargetRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        TargetRegistry {
            targets: HashMap::new(),
        }
    }

    /// Register a target
    ///
    /// If a target with the same name already exists, it will be replaced.
    pub fn register<T: Target + 'static>(&mut self, target: T) {
        self.targets
            .insert(target.name().to_string(), Box::new(target));
    }

    /// Get a target by name
    pub fn get(&self, name: &str) -> Result<&dyn Target, CompileError> {
        self.targets
            .get(name)
            .map(|t| t.as_ref())
            .ok_or_else(|| CompileError::TargetNotFound(name.to_string()))
    }

    /// Check if a target exists
    pub fn has(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// List all available target names (sorted)
    pub fn list_targets(&self) -> Vec<String> {
        let mut names: Vec<_> = self.targets.keys().cloned().collect();
        names.sort();
        names
    }

    /// Compile a grammar with the named target
    ///
    /// An unknown target name is reported to the sink like any other fatal problem.
    pub fn compile(
        &self,
        grammar: &GrammarSpec,
        target: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<CompileResult, CompileError> {
        let target = match self.get(target) {
            Ok(target) => target,
            Err(err) => {
                sink.report(Diagnostic::from(&err));
                return Err(err);
            }
        };
        target.compile(grammar, sink)
    }

    /// Create a registry with default targets
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Register built-in targets
        registry.register(crate::targets::textmate::TextmateTarget::new());

        registry
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
