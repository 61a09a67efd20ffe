//! Contexts and rule members → TextMate repository
//!
//! The emitter walks the declared contexts in order and turns each into a repository entry
//! `{ patterns: [...] }`. Rule members map as follows:
//!
//! - include      → `{ include: "#<context>" }`
//! - pattern      → `{ match, name }` for one style, `{ match, captures }` for several
//! - inline push  → `{ begin, beginCaptures, patterns, end, endCaptures }`, with any nested
//!   rules lifted into a helper context (see [helpers](super::helpers))
//! - push / pop   → unsupported, fails the compile
//! - unrecognized → skipped with a warning
//!
//! Helpers queued while emitting a declared context are emitted right after it, so each
//! declared context is followed by the helpers it needed.

use super::groups;
use super::helpers::HelperQueue;
use super::styles::{self, ResolvedStyle, StyleError};
use super::TextmateOptions;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::CompileError;
use crate::plist::{Dict, Value};
use iro_grammar::{GrammarSpec, InlinePush, Pattern, RuleMember, MAIN_CONTEXT};

/// Build the complete TextMate document tree for `grammar`
pub fn emit_document(
    grammar: &GrammarSpec,
    options: &TextmateOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<Dict, CompileError> {
    if grammar.file_extensions.is_empty() {
        return Err(CompileError::Configuration(
            "No file extensions provided to map grammar against. Use 'file_extensions' to define them."
                .to_string(),
        ));
    }
    if !grammar.has_context(MAIN_CONTEXT) {
        return Err(CompileError::Configuration(format!(
            "No entrypoint context named '{}' exists. You need to make a context named '{}' to start the grammar state at.",
            MAIN_CONTEXT, MAIN_CONTEXT
        )));
    }

    let mut emitter = Emitter::new(grammar, options, sink);
    for context in &grammar.contexts {
        emitter.emit_context(&context.name, &context.members)?;
        emitter.drain_helpers()?;
    }

    let file_types: Vec<Value> = grammar
        .file_extensions
        .iter()
        .map(|ext| Value::from(ext.as_str()))
        .collect();

    Ok(Dict::new()
        .with("fileTypes", file_types)
        .with("name", grammar.name.as_str())
        .with("patterns", vec![include(MAIN_CONTEXT)])
        .with("scopeName", format!("source.{}", grammar.name))
        .with("uuid", grammar.uuid.as_str())
        .with("repository", emitter.repository))
}

struct Emitter<'g, 's> {
    grammar: &'g GrammarSpec,
    helpers: HelperQueue<'g>,
    repository: Dict,
    sink: &'s mut dyn DiagnosticSink,
}

impl<'g, 's> Emitter<'g, 's> {
    fn new(
        grammar: &'g GrammarSpec,
        options: &TextmateOptions,
        sink: &'s mut dyn DiagnosticSink,
    ) -> Self {
        Emitter {
            grammar,
            helpers: HelperQueue::new(options.helper_prefix.as_str(), grammar),
            repository: Dict::new(),
            sink,
        }
    }

    fn emit_context(&mut self, name: &str, members: &'g [RuleMember]) -> Result<(), CompileError> {
        log::trace!("emitting context '{}' ({} members)", name, members.len());

        let mut patterns = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            if let Some(pattern) = self.emit_member(name, index, member)? {
                patterns.push(pattern);
            }
        }

        self.repository
            .insert(name, Dict::new().with("patterns", patterns));
        Ok(())
    }

    /// Emit queued helpers until none are left, including helpers queued by helpers
    fn drain_helpers(&mut self) -> Result<(), CompileError> {
        while let Some(helper) = self.helpers.pop() {
            self.emit_context(&helper.name, helper.members)?;
        }
        Ok(())
    }

    fn emit_member(
        &mut self,
        context_name: &str,
        index: usize,
        member: &'g RuleMember,
    ) -> Result<Option<Value>, CompileError> {
        match member {
            RuleMember::Include { context } => Ok(Some(include(context))),
            RuleMember::Pattern(pattern) => self.emit_pattern(pattern).map(Some),
            RuleMember::InlinePush(push) => self.emit_inline_push(push).map(Some),
            RuleMember::Push { regex, .. } | RuleMember::Pop { regex, .. } => {
                Err(CompileError::Unimplemented(format!(
                    "{} rules are not supported by the textmate target (regex '{}' in context '{}')",
                    member.kind(),
                    regex,
                    context_name
                )))
            }
            RuleMember::Unrecognized { kind } => {
                self.sink.report(
                    Diagnostic::warning(format!(
                        "Failed to add pattern {} of context '{}', unrecognized context member type '{}'.",
                        index, context_name, kind
                    ))
                    .with_code("unrecognized-member")
                    .with_source("textmate"),
                );
                Ok(None)
            }
        }
    }

    fn emit_pattern(&self, pattern: &Pattern) -> Result<Value, CompileError> {
        let styles = self.checked_styles("pattern", &pattern.regex, &pattern.styles)?;

        let mut rule = Dict::new().with("match", pattern.regex.as_str());
        match styles.as_slice() {
            [style] => rule.insert("name", style.scope_name(&self.grammar.name)),
            _ => rule.insert("captures", self.captures(&styles)),
        }
        Ok(rule.into())
    }

    fn emit_inline_push(&mut self, push: &'g InlinePush) -> Result<Value, CompileError> {
        let begin_styles = self.checked_styles("inline push", &push.begin, &push.begin_styles)?;

        let mut rule = Dict::new()
            .with("begin", push.begin.as_str())
            .with("beginCaptures", self.captures(&begin_styles));

        let mut patterns = Vec::new();
        if !push.members.is_empty() {
            let helper = self.helpers.enqueue(&push.members);
            patterns.push(include(&helper));
        }
        rule.insert("patterns", patterns);

        let end_styles = self.checked_styles("pop", &push.end, &push.end_styles)?;
        rule.insert("end", push.end.as_str());
        rule.insert("endCaptures", self.captures(&end_styles));

        Ok(rule.into())
    }

    /// Resolve the styles of one regex and check them against its group count
    fn checked_styles(
        &self,
        rule: &'static str,
        regex: &str,
        names: &[String],
    ) -> Result<Vec<ResolvedStyle<'g>>, CompileError> {
        let styles = styles::resolve(names, self.grammar).map_err(|err| match err {
            StyleError::NoStyles => CompileError::Configuration(format!(
                "No style was defined for a {} with regex '{}'. All patterns must have styles.",
                rule, regex
            )),
            StyleError::Unknown(name) => CompileError::Lookup(name),
            StyleError::MissingScope(name) => CompileError::Configuration(format!(
                "The style '{}' used by the {} with regex '{}' does not have a textmate scope defined.",
                name, rule, regex
            )),
        })?;

        if !groups::groups_match(styles.len(), regex) {
            return Err(CompileError::GroupMismatch {
                rule,
                regex: regex.to_string(),
                styles: styles.len(),
                groups: groups::count_groups(regex),
            });
        }
        Ok(styles)
    }

    /// `{ "1": { name }, "2": { name }, ... }` in style order
    fn captures(&self, styles: &[ResolvedStyle<'_>]) -> Dict {
        styles
            .iter()
            .enumerate()
            .fold(Dict::new(), |captures, (i, style)| {
                captures.with(
                    (i + 1).to_string(),
                    Dict::new().with("name", style.scope_name(&self.grammar.name)),
                )
            })
    }
}

fn include(context: &str) -> Value {
    Dict::new().with("include", format!("#{}", context)).into()
}
