//! Mission and ticket collaborator contract.
//!
//! The interpreter core evaluates commands; this crate owns everything
//! around a play session: the filesystem templates missions start from,
//! win-condition predicates, hint and scoring data, and the [`MissionRun`]
//! driver that feeds input lines through the interpreter and merges the
//! resulting patches into the session state.

pub mod base_fs;
pub mod catalog;
pub mod mission;
pub mod run;

pub use base_fs::{base_file_system, filesystem_from_json};
pub use mission::Mission;
pub use run::{MissionRun, Submission};
