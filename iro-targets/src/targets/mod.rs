//! Target implementations
//!
//! This module contains all compile targets that turn an iro grammar into an editor grammar.

pub mod textmate;

pub use textmate::TextmateTarget;
