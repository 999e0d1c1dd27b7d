//! Command interpreter for terminal-quest.
//!
//! One raw input line in, a [`CommandResult`] out: output lines plus a
//! [`StatePatch`] the caller merges into its authoritative
//! [`TerminalState`]. Handlers are pure functions of
//! `(args, state, mission)` -- the input state is never mutated, filesystem
//! changes happen on a clone carried back in the patch. Nothing in here can
//! fail outward: every malformed input becomes an `Error`-kind output line.

pub mod complete;
pub mod doc_commands;
pub mod fs_commands;
pub mod interpreter;
pub mod pkg_commands;
pub mod state;
pub mod system_commands;

pub use complete::Completer;
pub use fs_commands::save_file;
pub use interpreter::{COMMAND_NAMES, CommandKind, MissionContext, execute_command};
pub use state::{CommandResult, EditBuffer, StatePatch, TerminalState, apply_patch};
