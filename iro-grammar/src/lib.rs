//! # iro-grammar
//!
//! The in-memory grammar model shared by every iro compile target.
//!
//! File Layout
//!
//!     The front end that turns iro source into this model lives elsewhere; this crate only holds
//!     the model itself and a loader that can read an already-parsed model back from JSON or
//!     YAML. Compile targets (see the `iro-targets` crate) take a [GrammarSpec] by reference and
//!     never mutate it.
//!
//!     .
//!     ├── model.rs     # GrammarSpec, Style, Context, RuleMember
//!     ├── loader.rs    # GrammarLoader and LoaderError
//!     └── lib.rs
//!
//! The Model
//!
//!     A grammar is a set of named styles plus a set of named contexts. A context is a state of
//!     the tokenizer holding an ordered list of rule members, the first matching member wins.
//!     Every grammar has an entry context named `main`.

pub mod loader;
pub mod model;

pub use loader::{GrammarLoader, LoaderError, SourceFormat};
pub use model::{Context, GrammarSpec, InlinePush, Pattern, RuleMember, Style, MAIN_CONTEXT};
