//! Terminal output records.

use serde::{Deserialize, Serialize};

/// How an output line should be presented. Drives colors in the UI only;
/// no interpreter logic branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// An echoed prompt + command line.
    Input,
    /// Normal command output.
    Output,
    /// A recoverable command failure.
    Error,
    /// Celebratory output (e.g. package installed).
    Success,
    /// Informational side-channel output.
    Info,
}

/// One line of terminal output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    pub text: String,
    pub kind: OutputKind,
}

impl OutputLine {
    pub fn new(text: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn input(text: impl Into<String>) -> Self {
        Self::new(text, OutputKind::Input)
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self::new(text, OutputKind::Output)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, OutputKind::Error)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, OutputKind::Success)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, OutputKind::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        assert_eq!(OutputLine::output("hi").kind, OutputKind::Output);
        assert_eq!(OutputLine::error("no").kind, OutputKind::Error);
        assert_eq!(OutputLine::info("fyi").kind, OutputKind::Info);
        assert_eq!(OutputLine::success("yay").kind, OutputKind::Success);
        assert_eq!(OutputLine::input("$ ls").kind, OutputKind::Input);
    }

    #[test]
    fn serde_roundtrip() {
        let line = OutputLine::error("cat: x: No such file or directory");
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"error\""));
        let back: OutputLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }
}
