//! Compile targets for iro grammars
//!
//!     This crate turns an in-memory [GrammarSpec](iro_grammar::GrammarSpec) into the grammar
//!     file of a concrete editor. Every target implements the [Target] trait and is discovered
//!     through the [TargetRegistry].
//!
//!     This is a pure lib: it powers the iro cli but is shell agnostic. No code here reads
//!     files, env vars or prints; problems go to a [DiagnosticSink] supplied by the caller.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # CompileError
//!     ├── diagnostics.rs          # Diagnostic, DiagnosticSink and the stock sinks
//!     ├── target.rs               # Target trait definition
//!     ├── registry.rs             # TargetRegistry for discovery and selection
//!     ├── plist.rs                # property-list document tree
//!     ├── targets
//!     │   └── textmate
//!     │       ├── styles.rs       # style resolution
//!     │       ├── groups.rs       # capture-group heuristic
//!     │       ├── helpers.rs      # helper context naming and queueing
//!     │       ├── emitter.rs      # contexts and rule members → repository
//!     │       ├── serializer.rs   # document tree → xml text
//!     │       └── mod.rs
//!     └── lib.rs
//!
//! Failure Policy
//!
//!     A compile either produces a complete artifact or nothing. The first fatal problem stops
//!     the compile, is reported to the sink once and returned as the error. Warnings are
//!     reported and the compile carries on.

pub mod diagnostics;
pub mod error;
pub mod plist;
pub mod registry;
pub mod target;
pub mod targets;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, LogSink, Severity};
pub use error::CompileError;
pub use registry::TargetRegistry;
pub use target::{CompileResult, Target};
pub use targets::textmate::{TextmateOptions, TextmateTarget};
