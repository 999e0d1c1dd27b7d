//! Session state, state patches, and the command result contract.

use std::collections::BTreeMap;

use quest_types::OutputLine;
use quest_vfs::FsNode;

/// An open modal editor: the absolute path being edited and the in-progress
/// buffer. The editor UI owns the buffer between open and save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub path: String,
    pub content: String,
}

/// The authoritative snapshot passed into and returned from every command
/// evaluation. Owned by exactly one session; handlers never mutate it.
#[derive(Debug, Clone)]
pub struct TerminalState {
    /// Canonical absolute working directory.
    pub current_directory: String,
    /// Root of the simulated disk.
    pub file_system: FsNode,
    /// Raw command strings submitted so far (append-only; the caller
    /// appends, not the interpreter).
    pub command_history: Vec<String>,
    /// Output lines produced so far (cleared only by `clear`).
    pub output_history: Vec<OutputLine>,
    /// Fake package manager's installed set, insertion-ordered.
    pub installed_packages: Vec<String>,
    /// Reserved for extension; no built-in reads or writes it yet.
    pub environment: BTreeMap<String, String>,
    /// Set while a modal editor is open.
    pub editing: Option<EditBuffer>,
}

impl TerminalState {
    /// Fresh session over a mission filesystem.
    pub fn new(file_system: FsNode, current_directory: impl Into<String>) -> Self {
        Self {
            current_directory: current_directory.into(),
            file_system,
            command_history: Vec::new(),
            output_history: Vec::new(),
            installed_packages: Vec::new(),
            environment: BTreeMap::new(),
            editing: None,
        }
    }
}

/// Partial state produced by a command handler. Each populated field
/// replaces the corresponding state field wholesale when applied; absent
/// fields leave the state untouched.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub current_directory: Option<String>,
    pub file_system: Option<FsNode>,
    pub output_history: Option<Vec<OutputLine>>,
    pub installed_packages: Option<Vec<String>>,
    /// `Some(Some(_))` opens the editor, `Some(None)` closes it.
    pub editing: Option<Option<EditBuffer>>,
}

impl StatePatch {
    pub fn is_empty(&self) -> bool {
        self.current_directory.is_none()
            && self.file_system.is_none()
            && self.output_history.is_none()
            && self.installed_packages.is_none()
            && self.editing.is_none()
    }

    /// Patch carrying only a replacement filesystem.
    pub fn fs(file_system: FsNode) -> Self {
        Self {
            file_system: Some(file_system),
            ..Self::default()
        }
    }
}

/// Merge a patch into a state snapshot, field-by-field replace-if-present.
pub fn apply_patch(state: &TerminalState, patch: StatePatch) -> TerminalState {
    let mut next = state.clone();
    if let Some(cwd) = patch.current_directory {
        next.current_directory = cwd;
    }
    if let Some(fs) = patch.file_system {
        next.file_system = fs;
    }
    if let Some(out) = patch.output_history {
        next.output_history = out;
    }
    if let Some(pkgs) = patch.installed_packages {
        next.installed_packages = pkgs;
    }
    if let Some(editing) = patch.editing {
        next.editing = editing;
    }
    next
}

/// The interpreter's return contract: output lines plus a state patch.
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    pub output: Vec<OutputLine>,
    pub patch: StatePatch,
}

impl CommandResult {
    /// No output, no state change.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn lines(output: Vec<OutputLine>) -> Self {
        Self {
            output,
            patch: StatePatch::default(),
        }
    }

    /// A single `Error`-kind line, no state change.
    pub fn error(text: impl Into<String>) -> Self {
        Self::lines(vec![OutputLine::error(text)])
    }
}
