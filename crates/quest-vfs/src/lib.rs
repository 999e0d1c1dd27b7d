//! Virtual filesystem for terminal-quest.
//!
//! The simulated disk is a plain tree of [`FsNode`] values: no inodes, no
//! links, no handles. Each mission clones a template tree, the interpreter
//! clones again before every mutation, and the whole thing is discarded when
//! the mission ends. Path strings are resolved by the pure functions in
//! [`path`].

pub mod node;
pub mod path;

pub use node::{DIR_SIZE, FsNode};
pub use path::{HOME, basename, lookup, lookup_mut, normalize, parent_of, resolve};
