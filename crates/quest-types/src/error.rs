//! Error types for terminal-quest.

/// Errors produced by the terminal-quest core.
///
/// These never escape `execute_command`: command handlers convert them into
/// `Error`-kind output lines at the boundary. They exist so the VFS and
/// template layers can report failures the usual way internally.
#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    #[error("vfs error: {0}")]
    Vfs(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("template error: {0}")]
    Template(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, QuestError>;
