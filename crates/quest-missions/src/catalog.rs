//! A small built-in catalog of missions and tickets.
//!
//! These are the puzzles the integration tests drive; a game front end
//! would carry many more, all built the same way: graft files onto the
//! base tree and close over the win condition.

use quest_vfs::{FsNode, lookup, lookup_mut};

use crate::base_fs::base_file_system;
use crate::mission::Mission;

/// The introductory mission: find and read the secret message.
pub fn first_steps() -> Mission {
    let mut fs = base_file_system();
    let home = lookup_mut(&mut fs, "/home/user").expect("/home/user should exist");
    let _ = home.insert_child(FsNode::dir_with(
        "documents",
        vec![
            FsNode::file(
                "secret.txt",
                "CONGRATULATIONS! You found the secret message!\nThe password is: LEVEL1COMPLETE",
            ),
            FsNode::file(
                "readme.txt",
                "Welcome to your documents folder.\nThere might be something interesting here...",
            ),
        ],
    ));
    let _ = home.insert_child(FsNode::file(
        ".bashrc",
        "# Bash configuration\nexport PATH=$PATH:/usr/local/bin",
    ));

    Mission {
        id: 1,
        title: "First Steps".to_string(),
        description: "Welcome to Terminal Quest! Learn the basics of navigating the Linux filesystem.".to_string(),
        objective: "Find and read the secret message hidden in the system. Use ls to list files and cat to read them.".to_string(),
        hints: vec![
            "Try using \"ls\" to see what files are in the current directory".to_string(),
            "Navigate directories with \"cd <dirname>\"".to_string(),
            "The secret is in /home/user/documents/secret.txt - use \"cat\" to read it".to_string(),
        ],
        max_hints: 3,
        base_score: 100,
        time_bonus: 50,
        time_limit_seconds: 300,
        file_system: fs,
        initial_directory: "/home/user".to_string(),
        check_win: Box::new(|state| {
            state.output_history.iter().any(|l| l.text.contains("LEVEL1COMPLETE"))
        }),
        packages: None,
        installed_packages: Vec::new(),
    }
}

/// Ticket: `/tmp` is littered with `.tmp` files; remove them all.
pub fn cleanup_tmp() -> Mission {
    let mut fs = base_file_system();
    let tmp = lookup_mut(&mut fs, "/tmp").expect("/tmp should exist");
    for name in ["build-0413.tmp", "cache-991a.tmp", "upload-7c2f.tmp"] {
        let _ = tmp.insert_child(FsNode::file(name, "scratch data"));
    }
    let _ = tmp.insert_child(FsNode::file("keepme.conf", "retention=30d"));

    Mission {
        id: 101,
        title: "Disk cleanup".to_string(),
        description: "The /tmp partition is filling up with stale temp files.".to_string(),
        objective: "Delete every .tmp file under /tmp without touching anything else.".to_string(),
        hints: vec![
            "List /tmp to see what is there".to_string(),
            "rm takes several arguments at once".to_string(),
        ],
        max_hints: 2,
        base_score: 150,
        time_bonus: 50,
        time_limit_seconds: 240,
        file_system: fs,
        initial_directory: "/home/user".to_string(),
        check_win: Box::new(|state| {
            lookup(&state.file_system, "/tmp")
                .and_then(FsNode::children)
                .is_some_and(|children| {
                    !children.is_empty() && children.keys().all(|name| !name.ends_with(".tmp"))
                })
        }),
        packages: None,
        installed_packages: Vec::new(),
    }
}

/// Ticket: get nginx onto the box and prove it answers a version query.
pub fn install_nginx() -> Mission {
    Mission {
        id: 102,
        title: "Web server rollout".to_string(),
        description: "A new site needs nginx on this host.".to_string(),
        objective: "Install nginx and verify it with a version check.".to_string(),
        hints: vec![
            "The package manager is apt".to_string(),
            "Installed binaries answer -v".to_string(),
        ],
        max_hints: 2,
        base_score: 200,
        time_bonus: 75,
        time_limit_seconds: 300,
        file_system: base_file_system(),
        initial_directory: "/home/user".to_string(),
        check_win: Box::new(|state| {
            let installed = state.installed_packages.iter().any(|p| p == "nginx");
            let verified = state.command_history.iter().any(|cmd| {
                cmd.contains("nginx") && (cmd.contains("-v") || cmd.contains("--version"))
            });
            installed && verified
        }),
        packages: None,
        installed_packages: Vec::new(),
    }
}

/// Ticket: archive the documents directory before a risky migration.
pub fn backup_routine() -> Mission {
    let mut fs = base_file_system();
    let home = lookup_mut(&mut fs, "/home/user").expect("/home/user should exist");
    let _ = home.insert_child(FsNode::dir_with(
        "documents",
        vec![FsNode::file("contract.txt", "signed 2023-11-02")],
    ));

    Mission {
        id: 103,
        title: "Backup before migration".to_string(),
        description: "Ops policy requires an archive before any migration.".to_string(),
        objective: "Create backup.tar in your home directory from the documents folder.".to_string(),
        hints: vec!["tar -cf <archive> <source>".to_string()],
        max_hints: 1,
        base_score: 150,
        time_bonus: 50,
        time_limit_seconds: 240,
        file_system: fs,
        initial_directory: "/home/user".to_string(),
        check_win: Box::new(|state| {
            lookup(&state.file_system, "/home/user/backup.tar")
                .is_some_and(FsNode::is_file)
        }),
        packages: None,
        installed_packages: Vec::new(),
    }
}

/// Every built-in mission and ticket.
pub fn all() -> Vec<Mission> {
    vec![first_steps(), cleanup_tmp(), install_nginx(), backup_routine()]
}
