//! Diagnostic reporting
//!
//! Targets never print. They hand [Diagnostic]s to a [DiagnosticSink] owned by the caller:
//!
//! - [LogSink] forwards everything to the `log` facade, which is what the cli uses.
//! - [CollectingSink] keeps diagnostics in memory, for tests and for embedders that render
//!   diagnostics themselves.
//!
//! Severities
//!
//!     `Fatal` diagnostics accompany a failed compile; there is exactly one per failure.
//!     `Warning` diagnostics describe something that was skipped while the compile went on.

use crate::error::CompileError;
use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single reported problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub code: Option<String>,
    pub source: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            code: None,
            source: "iro".to_string(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl From<&CompileError> for Diagnostic {
    fn from(err: &CompileError) -> Self {
        Diagnostic::fatal(err.to_string()).with_code(err.code())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.source, self.message)
    }
}

/// Destination for diagnostics produced during a compile
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink forwarding to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Fatal => log::error!("{}", diagnostic),
            Severity::Warning => log::warn!("{}", diagnostic),
        }
    }
}

/// Sink that stores every diagnostic in order
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn fatal(&self) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_fatal()).collect()
    }

    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_fatal()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
