//! Filesystem tree nodes.
//!
//! A node is either a file (textual content plus execute bit) or a directory
//! (named children). The serde representation is internally tagged on
//! `"type"` so mission templates written as JSON deserialize directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use quest_types::{QuestError, Result};

/// Nominal size reported for directories (`ls -l`, `du` base cost).
pub const DIR_SIZE: u64 = 4096;

fn default_permissions() -> String {
    "rw-r--r--".to_string()
}

/// A node in the simulated filesystem tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FsNode {
    File {
        name: String,
        #[serde(default)]
        content: String,
        #[serde(default)]
        executable: bool,
        /// Nine-character symbolic permission string. Cosmetic, except that
        /// `chmod` keeps it in sync with `executable`.
        #[serde(default = "default_permissions")]
        permissions: String,
    },
    Directory {
        name: String,
        #[serde(default)]
        children: BTreeMap<String, FsNode>,
    },
}

impl FsNode {
    /// A regular, non-executable file.
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        FsNode::File {
            name: name.into(),
            content: content.into(),
            executable: false,
            permissions: default_permissions(),
        }
    }

    /// An executable file (`rwxr-xr-x`).
    pub fn script(name: impl Into<String>, content: impl Into<String>) -> Self {
        FsNode::File {
            name: name.into(),
            content: content.into(),
            executable: true,
            permissions: "rwxr-xr-x".to_string(),
        }
    }

    /// An empty directory.
    pub fn dir(name: impl Into<String>) -> Self {
        FsNode::Directory {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    /// A directory populated from child nodes, keyed by their own names.
    pub fn dir_with(name: impl Into<String>, nodes: Vec<FsNode>) -> Self {
        let mut children = BTreeMap::new();
        for node in nodes {
            children.insert(node.name().to_string(), node);
        }
        FsNode::Directory {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FsNode::File { name, .. } | FsNode::Directory { name, .. } => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, FsNode::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self, FsNode::File { .. })
    }

    /// File content; `None` for directories.
    pub fn content(&self) -> Option<&str> {
        match self {
            FsNode::File { content, .. } => Some(content),
            FsNode::Directory { .. } => None,
        }
    }

    pub fn is_executable(&self) -> bool {
        matches!(self, FsNode::File { executable: true, .. })
    }

    /// Stored permission string (directories report the fixed `rwxr-xr-x`).
    pub fn permissions(&self) -> &str {
        match self {
            FsNode::File { permissions, .. } => permissions,
            FsNode::Directory { .. } => "rwxr-xr-x",
        }
    }

    /// Size of this node alone: content length for files, the nominal
    /// directory size for directories (children not included).
    pub fn size(&self) -> u64 {
        match self {
            FsNode::File { content, .. } => content.len() as u64,
            FsNode::Directory { .. } => DIR_SIZE,
        }
    }

    /// Children of a directory; `None` for files.
    pub fn children(&self) -> Option<&BTreeMap<String, FsNode>> {
        match self {
            FsNode::Directory { children, .. } => Some(children),
            FsNode::File { .. } => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut BTreeMap<String, FsNode>> {
        match self {
            FsNode::Directory { children, .. } => Some(children),
            FsNode::File { .. } => None,
        }
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&FsNode> {
        self.children().and_then(|c| c.get(name))
    }

    /// Insert (or replace) a child, keyed by the node's own name.
    pub fn insert_child(&mut self, node: FsNode) -> Result<()> {
        match self.children_mut() {
            Some(children) => {
                children.insert(node.name().to_string(), node);
                Ok(())
            },
            None => Err(QuestError::Vfs(format!(
                "not a directory: {}",
                self.name()
            ))),
        }
    }

    /// Remove a child by name, returning it if present.
    pub fn remove_child(&mut self, name: &str) -> Option<FsNode> {
        self.children_mut().and_then(|c| c.remove(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_defaults() {
        let f = FsNode::file("notes.txt", "hello");
        assert!(f.is_file());
        assert!(!f.is_executable());
        assert_eq!(f.permissions(), "rw-r--r--");
        assert_eq!(f.size(), 5);
        assert_eq!(f.content(), Some("hello"));
    }

    #[test]
    fn script_is_executable() {
        let s = FsNode::script("run.sh", "echo hi");
        assert!(s.is_executable());
        assert_eq!(s.permissions(), "rwxr-xr-x");
    }

    #[test]
    fn dir_size_is_nominal() {
        let d = FsNode::dir("etc");
        assert!(d.is_dir());
        assert_eq!(d.size(), DIR_SIZE);
        assert_eq!(d.content(), None);
    }

    #[test]
    fn dir_with_keys_by_name() {
        let d = FsNode::dir_with("home", vec![FsNode::dir("user"), FsNode::file("a", "")]);
        assert!(d.child("user").is_some_and(FsNode::is_dir));
        assert!(d.child("a").is_some_and(FsNode::is_file));
        assert!(d.child("missing").is_none());
    }

    #[test]
    fn insert_and_remove_child() {
        let mut d = FsNode::dir("tmp");
        d.insert_child(FsNode::file("x", "1")).unwrap();
        assert!(d.child("x").is_some());
        let removed = d.remove_child("x").unwrap();
        assert_eq!(removed.name(), "x");
        assert!(d.child("x").is_none());
    }

    #[test]
    fn insert_into_file_fails() {
        let mut f = FsNode::file("a", "");
        assert!(f.insert_child(FsNode::file("b", "")).is_err());
    }

    #[test]
    fn serde_matches_template_shape() {
        let json = r#"{
            "type": "directory",
            "name": "docs",
            "children": {
                "secret.txt": {
                    "type": "file",
                    "name": "secret.txt",
                    "content": "the password is: LEVEL1COMPLETE"
                }
            }
        }"#;
        let node: FsNode = serde_json::from_str(json).unwrap();
        assert!(node.is_dir());
        let file = node.child("secret.txt").unwrap();
        assert!(file.content().unwrap().contains("LEVEL1COMPLETE"));
        assert!(!file.is_executable());
        assert_eq!(file.permissions(), "rw-r--r--");
    }

    #[test]
    fn serde_roundtrip() {
        let tree = FsNode::dir_with(
            "/",
            vec![FsNode::dir_with(
                "bin",
                vec![FsNode::script("cleanup.sh", "#!/bin/bash\necho done")],
            )],
        );
        let json = serde_json::to_string(&tree).unwrap();
        let back: FsNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
