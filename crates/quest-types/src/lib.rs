//! Foundation types shared by every terminal-quest crate.
//!
//! Keeps the leaf of the dependency graph free of any game logic: just the
//! error enum and the output-line records that flow between the interpreter
//! and its caller.

pub mod error;
pub mod output;

pub use error::{QuestError, Result};
pub use output::{OutputKind, OutputLine};
