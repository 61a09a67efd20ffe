//! Compile errors

use std::fmt;

/// Everything that can stop a compile.
///
/// Each variant carries the offending identifier or regex so the message alone tells the
/// grammar author what to fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The grammar is structurally incomplete (no file extensions, no `main`, a rule without
    /// styles, a style without a scope for the target)
    Configuration(String),
    /// A rule references a style name that is not defined
    Lookup(String),
    /// The heuristic group count of a regex differs from the number of declared styles
    GroupMismatch {
        rule: &'static str,
        regex: String,
        styles: usize,
        groups: usize,
    },
    /// A rule kind the target does not support yet
    Unimplemented(String),
    /// The finished document could not be written out
    Format(String),
    TargetNotFound(String),
}

impl CompileError {
    /// Stable kebab-case code, used on diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::Configuration(_) => "configuration",
            CompileError::Lookup(_) => "lookup",
            CompileError::GroupMismatch { .. } => "group-mismatch",
            CompileError::Unimplemented(_) => "unimplemented",
            CompileError::Format(_) => "format",
            CompileError::TargetNotFound(_) => "target-not-found",
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Configuration(msg) => write!(f, "{}", msg),
            CompileError::Lookup(style) => write!(
                f,
                "A style '{}' is referenced in a pattern, but it is not defined in the style map.",
                style
            ),
            CompileError::GroupMismatch {
                rule,
                regex,
                styles,
                groups,
            } => write!(
                f,
                "Mismatch between capture groups and number of styles for {} with regex '{}' ({} styles, {} groups).",
                rule, regex, styles, groups
            ),
            CompileError::Unimplemented(msg) => write!(f, "Not implemented: {}", msg),
            CompileError::Format(msg) => write!(f, "Failed to generate a valid document: {}", msg),
            CompileError::TargetNotFound(name) => write!(f, "Compile target '{}' not found", name),
        }
    }
}

impl std::error::Error for CompileError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = CompileError::Lookup("kw".to_string());
        assert!(err.to_string().contains("'kw'"));

        let err = CompileError::GroupMismatch {
            rule: "pattern",
            regex: "(a)(b)".to_string(),
            styles: 2,
            groups: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("pattern with regex '(a)(b)'"));
        assert!(msg.contains("2 styles, 1 groups"));
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            CompileError::Configuration(String::new()).code(),
            "configuration"
        );
        assert_eq!(CompileError::Format(String::new()).code(), "format");
        assert_eq!(
            CompileError::TargetNotFound("ace".to_string()).code(),
            "target-not-found"
        );
    }
}
