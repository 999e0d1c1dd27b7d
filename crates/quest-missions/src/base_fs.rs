//! Filesystem templates.
//!
//! Every mission starts from the same skeleton tree and grafts its own
//! files onto it. Templates can also be loaded from JSON, which uses the
//! same tagged shape the tree serializes to.

use quest_types::Result;
use quest_vfs::FsNode;

/// The skeleton every mission filesystem is built on: an empty home,
/// `/etc`, `/var/log`, `/tmp`, `/bin`, and `/usr/bin`.
pub fn base_file_system() -> FsNode {
    FsNode::dir_with(
        "/",
        vec![
            FsNode::dir_with("home", vec![FsNode::dir("user")]),
            FsNode::dir("etc"),
            FsNode::dir_with("var", vec![FsNode::dir("log")]),
            FsNode::dir("tmp"),
            FsNode::dir("bin"),
            FsNode::dir_with("usr", vec![FsNode::dir("bin")]),
        ],
    )
}

/// Parse a filesystem template from its JSON form
/// (`{"type": "directory", "name": "/", "children": {...}}`).
pub fn filesystem_from_json(json: &str) -> Result<FsNode> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_vfs::lookup;

    #[test]
    fn base_tree_has_the_standard_directories() {
        let fs = base_file_system();
        for path in ["/home/user", "/etc", "/var/log", "/tmp", "/bin", "/usr/bin"] {
            assert!(
                lookup(&fs, path).is_some_and(FsNode::is_dir),
                "{path} should be a directory"
            );
        }
        assert!(
            lookup(&fs, "/home/user")
                .and_then(FsNode::children)
                .is_some_and(|c| c.is_empty())
        );
    }

    #[test]
    fn template_round_trips_through_json() {
        let json = r#"{
            "type": "directory",
            "name": "/",
            "children": {
                "home": {
                    "type": "directory",
                    "name": "home",
                    "children": {
                        "flag.txt": {
                            "type": "file",
                            "name": "flag.txt",
                            "content": "hi",
                            "executable": false
                        }
                    }
                }
            }
        }"#;
        let fs = filesystem_from_json(json).unwrap();
        let flag = lookup(&fs, "/home/flag.txt").unwrap();
        assert_eq!(flag.content(), Some("hi"));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let json = r#"{"type": "file", "name": "empty.txt"}"#;
        let node = filesystem_from_json(json).unwrap();
        assert_eq!(node.content(), Some(""));
        assert!(!node.is_executable());
        assert_eq!(node.permissions(), "rw-r--r--");
    }

    #[test]
    fn malformed_json_is_a_template_error() {
        assert!(filesystem_from_json("{\"type\": \"socket\"}").is_err());
        assert!(filesystem_from_json("not json").is_err());
    }
}
