//! Target trait definition
//!
//! This module defines the core Target trait that all compile targets must implement.

use crate::diagnostics::DiagnosticSink;
use crate::error::CompileError;
use iro_grammar::GrammarSpec;

/// The artifact of a successful compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    /// The generated grammar file, ready to be written out
    pub generated: String,
    /// Name of the target that produced it
    pub target: String,
}

/// Trait for compile targets
///
/// A target turns a grammar model into the grammar file of one editor or highlighter. Targets
/// are stateless values; all per-compile state lives inside a single `compile` call, so one
/// target may be shared between threads.
///
/// # Examples
///
/// ```ignore
/// struct MyTarget;
///
/// impl Target for MyTarget {
///     fn name(&self) -> &str {
///         "my-target"
///     }
///
///     fn file_extension(&self) -> &str {
///         "my"
///     }
///
///     fn compile(
///         &self,
///         grammar: &GrammarSpec,
///         sink: &mut dyn DiagnosticSink,
///     ) -> Result<CompileResult, CompileError> {
///         todo!()
///     }
/// }
/// ```
pub trait Target: Send + Sync {
    /// The name of this target (e.g., "textmate")
    fn name(&self) -> &str;

    /// Optional description of this target
    fn description(&self) -> &str {
        ""
    }

    /// Extension of the files this target generates, without the leading dot
    fn file_extension(&self) -> &str;

    /// Compile a grammar
    ///
    /// On failure the error has already been reported to `sink` as a fatal diagnostic, and no
    /// artifact is produced.
    fn compile(
        &self,
        grammar: &GrammarSpec,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<CompileResult, CompileError>;
}
