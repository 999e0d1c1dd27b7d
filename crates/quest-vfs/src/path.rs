//! Pure path resolution.
//!
//! Every function here is total: no panics, no errors, no tree mutation.
//! Absence is an `Option`, malformed input is normalized away.

use crate::node::FsNode;

/// Fixed home directory of the simulated user.
pub const HOME: &str = "/home/user";

/// Canonicalize a path string: split on `/`, drop empty segments and `.`,
/// pop a segment for each `..` (silently ignored at the root), rejoin with
/// a leading `/`.
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

/// Resolve a user-typed path expression against the current directory into
/// a canonical absolute path. Handles `/`-absolute, `~`, `~/...`, and
/// relative forms.
pub fn resolve(path: &str, cwd: &str) -> String {
    if path.starts_with('/') {
        return normalize(path);
    }
    if path == "~" {
        return HOME.to_string();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return normalize(&format!("{HOME}/{rest}"));
    }
    normalize(&format!("{cwd}/{path}"))
}

/// Parent of a canonical path (`/a/b` -> `/a`, `/a` -> `/`, `/` -> `/`).
pub fn parent_of(path: &str) -> String {
    let mut parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    parts.pop();
    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

/// Final segment of a canonical path; empty for the root.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or("")
}

/// Walk the tree from `root` along a canonical absolute path. Fails the
/// moment a segment is missing or an intermediate node is a file.
pub fn lookup<'a>(root: &'a FsNode, path: &str) -> Option<&'a FsNode> {
    let mut node = root;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        node = node.child(segment)?;
    }
    Some(node)
}

/// Mutable variant of [`lookup`].
pub fn lookup_mut<'a>(root: &'a mut FsNode, path: &str) -> Option<&'a mut FsNode> {
    let mut node = root;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        node = node.children_mut()?.get_mut(segment)?;
    }
    Some(node)
}
