//! # symem-smtlib
//!
//! SMT-LIB2 abstract syntax used by the symem memory model: sorts, terms,
//! commands and scripts, with `Display` implementations producing solver
//! input text and builder helpers for composing terms.

pub mod builder;
pub mod command;
pub mod formatter;
pub mod script;
pub mod sort;
pub mod term;

pub use command::Command;
pub use script::Script;
pub use sort::Sort;
pub use term::Term;
