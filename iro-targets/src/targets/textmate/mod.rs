//! TextMate compile target
//!
//!     Emits a `.tmLanguage` property list, the grammar format read by TextMate, Sublime Text and
//!     VS Code. The iro model maps onto it as follows:
//!
//!     - every context becomes a repository entry holding its rules as `patterns`
//!     - the grammar's `patterns` is a single include of `#main`
//!     - every style scope is suffixed with the grammar name, `keyword` → `keyword.<name>`
//!     - `scopeName` is `source.<name>`
//!
//!     TextMate cannot nest a rule set inside a rule, so the nested rules of an inline push are
//!     lifted into helper contexts, see [helpers].
//!
//! Pipeline
//!
//!     emitter (styles, groups, helpers) → plist tree → serializer
//!
//!     The emitter builds the whole document tree before anything is written, so a failing
//!     compile never leaves partial output behind.

pub mod emitter;
pub mod groups;
pub mod helpers;
pub mod serializer;
pub mod styles;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::CompileError;
use crate::plist::Dict;
use crate::target::{CompileResult, Target};
use iro_grammar::GrammarSpec;

/// Knobs for the TextMate output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextmateOptions {
    /// Prefix of synthesized helper context names
    pub helper_prefix: String,
    /// Spaces per nesting level in the generated xml
    pub indent_width: usize,
    /// Comment written at the top of the plist, if any
    pub generator_comment: Option<String>,
}

impl Default for TextmateOptions {
    fn default() -> Self {
        Self {
            helper_prefix: "helper_".to_string(),
            indent_width: 2,
            generator_comment: Some("Generated by iro".to_string()),
        }
    }
}

/// Target implementation for TextMate grammars
#[derive(Debug, Clone, Default)]
pub struct TextmateTarget {
    options: TextmateOptions,
}

impl TextmateTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TextmateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TextmateOptions {
        &self.options
    }

    /// Build the document tree without rendering it
    ///
    /// Failures are reported to `sink` the same way [Target::compile] reports them.
    pub fn build(
        &self,
        grammar: &GrammarSpec,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Dict, CompileError> {
        emitter::emit_document(grammar, &self.options, sink).map_err(|err| report(sink, err))
    }
}

impl Target for TextmateTarget {
    fn name(&self) -> &str {
        "textmate"
    }

    fn description(&self) -> &str {
        "TextMate property-list grammar (TextMate, Sublime Text, VS Code)"
    }

    fn file_extension(&self) -> &str {
        "tmLanguage"
    }

    fn compile(
        &self,
        grammar: &GrammarSpec,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<CompileResult, CompileError> {
        log::debug!("compiling grammar '{}' to textmate", grammar.name);

        let root = self.build(grammar, sink)?;
        let generated =
            serializer::render(&root, &self.options).map_err(|err| report(sink, err))?;

        Ok(CompileResult {
            generated,
            target: self.name().to_string(),
        })
    }
}

fn report(sink: &mut dyn DiagnosticSink, err: CompileError) -> CompileError {
    sink.report(Diagnostic::from(&err).with_source("textmate"));
    err
}
