//! Filesystem-affecting commands: ls, cd, cat, echo, mkdir, touch, rm,
//! chmod, grep, find, du, tar, the editor handoff, and script execution.
//!
//! Every handler resolves paths through `quest_vfs::path`, reads the
//! snapshot tree, and carries mutations back on a clone in the patch.

use quest_types::OutputLine;
use quest_vfs::{DIR_SIZE, FsNode, basename, lookup, lookup_mut, parent_of, resolve};

use crate::state::{CommandResult, EditBuffer, StatePatch, TerminalState};

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

pub fn ls(args: &[&str], state: &TerminalState) -> CommandResult {
    let show_all = args.contains(&"-a") || args.contains(&"-la") || args.contains(&"-al");
    let show_long = args.contains(&"-l") || args.contains(&"-la") || args.contains(&"-al");
    let target = args
        .iter()
        .find(|a| !a.starts_with('-'))
        .copied()
        .unwrap_or(&state.current_directory);
    let path = resolve(target, &state.current_directory);

    let Some(node) = lookup(&state.file_system, &path) else {
        return CommandResult::error(format!(
            "ls: cannot access '{target}': No such file or directory"
        ));
    };

    if node.is_file() {
        let line = if show_long {
            format!(
                "-{} 1 user user {} {}",
                node.permissions(),
                node.size(),
                node.name()
            )
        } else {
            node.name().to_string()
        };
        return CommandResult::lines(vec![OutputLine::output(line)]);
    }

    // Directory: BTreeMap iteration is already name-sorted.
    let children = node.children().expect("directory node has children");
    let mut entries: Vec<&str> = children
        .keys()
        .filter(|name| show_all || !name.starts_with('.'))
        .map(String::as_str)
        .collect();
    if show_all {
        entries.splice(0..0, [".", ".."]);
    }
    if entries.is_empty() {
        return CommandResult::none();
    }

    if show_long {
        let lines = entries
            .iter()
            .map(|name| {
                if *name == "." || *name == ".." {
                    return OutputLine::output(format!("drwxr-xr-x 2 user user {DIR_SIZE} {name}"));
                }
                let child = &children[*name];
                let prefix = if child.is_dir() { 'd' } else { '-' };
                OutputLine::output(format!(
                    "{prefix}{} 1 user user {} {name}",
                    child.permissions(),
                    child.size()
                ))
            })
            .collect();
        return CommandResult::lines(lines);
    }

    CommandResult::lines(vec![OutputLine::output(entries.join("  "))])
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

pub fn cd(args: &[&str], state: &TerminalState) -> CommandResult {
    let target = args.first().copied().unwrap_or(quest_vfs::HOME);
    let path = resolve(target, &state.current_directory);

    match lookup(&state.file_system, &path) {
        None => CommandResult::error(format!("cd: {target}: No such file or directory")),
        Some(node) if !node.is_dir() => {
            CommandResult::error(format!("cd: {target}: Not a directory"))
        },
        Some(_) => CommandResult {
            output: Vec::new(),
            patch: StatePatch {
                current_directory: Some(path),
                ..StatePatch::default()
            },
        },
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

pub fn cat(args: &[&str], state: &TerminalState) -> CommandResult {
    if args.is_empty() {
        return CommandResult::error("cat: missing operand");
    }

    let mut output = Vec::new();
    for arg in args {
        let path = resolve(arg, &state.current_directory);
        match lookup(&state.file_system, &path) {
            None => output.push(OutputLine::error(format!(
                "cat: {arg}: No such file or directory"
            ))),
            Some(node) if node.is_dir() => {
                output.push(OutputLine::error(format!("cat: {arg}: Is a directory")));
            },
            Some(node) => {
                let content = node.content().unwrap_or_default();
                if !content.is_empty() {
                    output.extend(content.split('\n').map(OutputLine::output));
                }
            },
        }
    }
    CommandResult::lines(output)
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

pub fn echo(args: &[&str], state: &TerminalState) -> CommandResult {
    let redirect = args.iter().position(|a| *a == ">" || *a == ">>");

    let Some(idx) = redirect else {
        let text = strip_quotes(&args.join(" ")).to_string();
        return CommandResult::lines(vec![OutputLine::output(text)]);
    };

    let append = args[idx] == ">>";
    let content = strip_quotes(&args[..idx].join(" ")).to_string();
    let Some(target) = args.get(idx + 1) else {
        return CommandResult::error("syntax error near unexpected token `newline'");
    };

    let path = resolve(target, &state.current_directory);
    let parent = parent_of(&path);
    let name = basename(&path).to_string();

    match lookup(&state.file_system, &parent) {
        Some(node) if node.is_dir() => {},
        _ => {
            return CommandResult::error(format!(
                "cannot create '{target}': No such file or directory"
            ));
        },
    }

    let mut fs = state.file_system.clone();
    let Some(parent_node) = lookup_mut(&mut fs, &parent) else {
        return CommandResult::error(format!(
            "cannot create '{target}': No such file or directory"
        ));
    };

    let existing = match parent_node.child(&name) {
        Some(node) if node.is_dir() => {
            return CommandResult::error(format!("cannot overwrite directory '{target}'"));
        },
        Some(node) => node.content().unwrap_or_default().to_string(),
        None => String::new(),
    };

    let new_content = if append {
        format!("{existing}{content}\n")
    } else {
        format!("{content}\n")
    };
    // The file record is rebuilt, so a redirect resets the execute bit;
    // only the editor save path preserves it.
    if parent_node.insert_child(FsNode::file(name, new_content)).is_err() {
        return CommandResult::error(format!(
            "cannot create '{target}': No such file or directory"
        ));
    }

    CommandResult {
        output: Vec::new(),
        patch: StatePatch::fs(fs),
    }
}

// ---------------------------------------------------------------------------
// mkdir
// ---------------------------------------------------------------------------

pub fn mkdir(args: &[&str], state: &TerminalState) -> CommandResult {
    if args.is_empty() {
        return CommandResult::error("mkdir: missing operand");
    }

    let mut fs = state.file_system.clone();
    let mut output = Vec::new();

    for arg in args.iter().filter(|a| !a.starts_with('-')) {
        let path = resolve(arg, &state.current_directory);
        let parent = parent_of(&path);
        let name = basename(&path).to_string();

        let parent_node = match lookup_mut(&mut fs, &parent) {
            Some(node) if node.is_dir() => node,
            _ => {
                output.push(OutputLine::error(format!(
                    "mkdir: cannot create directory '{arg}': No such file or directory"
                )));
                continue;
            },
        };
        if parent_node.child(&name).is_some() {
            output.push(OutputLine::error(format!(
                "mkdir: cannot create directory '{arg}': File exists"
            )));
            continue;
        }
        let _ = parent_node.insert_child(FsNode::dir(name));
    }

    CommandResult {
        output,
        patch: StatePatch::fs(fs),
    }
}

// ---------------------------------------------------------------------------
// touch
// ---------------------------------------------------------------------------

/// Unlike the other multi-argument commands, `touch` aborts on the first bad
/// argument and discards everything the command had created so far.
pub fn touch(args: &[&str], state: &TerminalState) -> CommandResult {
    if args.is_empty() {
        return CommandResult::error("touch: missing file operand");
    }

    let mut fs = state.file_system.clone();
    for arg in args {
        let path = resolve(arg, &state.current_directory);
        let parent = parent_of(&path);
        let name = basename(&path).to_string();

        let parent_node = match lookup_mut(&mut fs, &parent) {
            Some(node) if node.is_dir() => node,
            _ => {
                return CommandResult::error(format!(
                    "touch: cannot touch '{arg}': No such file or directory"
                ));
            },
        };
        // Existing files are left alone (no truncation).
        if parent_node.child(&name).is_none() {
            let _ = parent_node.insert_child(FsNode::file(name, ""));
        }
    }

    CommandResult {
        output: Vec::new(),
        patch: StatePatch::fs(fs),
    }
}

// ---------------------------------------------------------------------------
// rm
// ---------------------------------------------------------------------------

pub fn rm(args: &[&str], state: &TerminalState) -> CommandResult {
    if args.is_empty() {
        return CommandResult::error("rm: missing operand");
    }

    let recursive = args.contains(&"-r") || args.contains(&"-rf") || args.contains(&"-fr");
    let mut fs = state.file_system.clone();
    let mut output = Vec::new();

    for arg in args.iter().filter(|a| !a.starts_with('-')) {
        let path = resolve(arg, &state.current_directory);
        let parent = parent_of(&path);
        let name = basename(&path).to_string();

        match lookup(&fs, &path) {
            None => {
                output.push(OutputLine::error(format!(
                    "rm: cannot remove '{arg}': No such file or directory"
                )));
                continue;
            },
            Some(node) if node.is_dir() && !recursive => {
                output.push(OutputLine::error(format!(
                    "rm: cannot remove '{arg}': Is a directory"
                )));
                continue;
            },
            Some(_) => {},
        }
        if let Some(parent_node) = lookup_mut(&mut fs, &parent) {
            let _ = parent_node.remove_child(&name);
        }
    }

    CommandResult {
        output,
        patch: StatePatch::fs(fs),
    }
}

// ---------------------------------------------------------------------------
// chmod
// ---------------------------------------------------------------------------

pub fn chmod(args: &[&str], state: &TerminalState) -> CommandResult {
    if args.len() < 2 {
        return CommandResult::error("chmod: missing operand");
    }

    let mode = args[0];
    let target = args[1];
    let path = resolve(target, &state.current_directory);

    if lookup(&state.file_system, &path).is_none() {
        return CommandResult::error(format!(
            "chmod: cannot access '{target}': No such file or directory"
        ));
    }

    let mut fs = state.file_system.clone();
    if let Some(FsNode::File {
        executable,
        permissions,
        ..
    }) = lookup_mut(&mut fs, &path)
    {
        match mode {
            "+x" | "755" | "777" => {
                *executable = true;
                *permissions = "rwxr-xr-x".to_string();
            },
            "-x" | "644" => {
                *executable = false;
                *permissions = "rw-r--r--".to_string();
            },
            // Unrecognized modes are accepted with no effect (mission parity).
            _ => {},
        }
    }

    CommandResult {
        output: Vec::new(),
        patch: StatePatch::fs(fs),
    }
}

// ---------------------------------------------------------------------------
// grep
// ---------------------------------------------------------------------------

pub fn grep(args: &[&str], state: &TerminalState) -> CommandResult {
    if args.len() < 2 {
        return CommandResult::error("grep: missing operand");
    }

    let pattern = strip_quotes(args[0]).to_lowercase();
    let files = &args[1..];
    let mut output = Vec::new();

    for file in files {
        let path = resolve(file, &state.current_directory);
        match lookup(&state.file_system, &path) {
            None => output.push(OutputLine::error(format!(
                "grep: {file}: No such file or directory"
            ))),
            Some(node) if node.is_dir() => {
                output.push(OutputLine::error(format!("grep: {file}: Is a directory")));
            },
            Some(node) => {
                let content = node.content().unwrap_or_default();
                for line in content.split('\n') {
                    if line.to_lowercase().contains(&pattern) {
                        let text = if files.len() > 1 {
                            format!("{file}:{line}")
                        } else {
                            line.to_string()
                        };
                        output.push(OutputLine::output(text));
                    }
                }
            },
        }
    }
    CommandResult::lines(output)
}

// ---------------------------------------------------------------------------
// find
// ---------------------------------------------------------------------------

pub fn find(args: &[&str], state: &TerminalState) -> CommandResult {
    let usage = "usage: find <path> -name <pattern>";
    let Some((target, rest)) = args.split_first() else {
        return CommandResult::error(usage);
    };
    if target.starts_with('-') {
        return CommandResult::error(usage);
    }
    let pattern = match rest {
        ["-name", pattern, ..] => pattern,
        _ => return CommandResult::error("find: missing argument to '-name'"),
    };
    // `*` is stripped, not expanded: matching is plain substring.
    let pattern = strip_quotes(pattern).replace('*', "");

    let path = resolve(target, &state.current_directory);
    let Some(root) = lookup(&state.file_system, &path) else {
        return CommandResult::error(format!("find: '{target}': No such file or directory"));
    };

    let mut output = Vec::new();
    find_recursive(root, &path, &pattern, &mut output);
    CommandResult::lines(output)
}

/// Pre-order walk: a node is reported before its children.
fn find_recursive(node: &FsNode, path: &str, pattern: &str, output: &mut Vec<OutputLine>) {
    if node.name().contains(pattern) {
        output.push(OutputLine::output(path.to_string()));
    }
    if let Some(children) = node.children() {
        for (name, child) in children {
            let child_path = join_path(path, name);
            find_recursive(child, &child_path, pattern, output);
        }
    }
}

// ---------------------------------------------------------------------------
// du
// ---------------------------------------------------------------------------

pub fn du(args: &[&str], state: &TerminalState) -> CommandResult {
    let human = args.contains(&"-h");
    let summary = args.contains(&"-s");
    let target = args
        .iter()
        .find(|a| !a.starts_with('-'))
        .copied()
        .unwrap_or(&state.current_directory);
    let path = resolve(target, &state.current_directory);

    let Some(node) = lookup(&state.file_system, &path) else {
        return CommandResult::error(format!(
            "du: cannot access '{target}': No such file or directory"
        ));
    };

    let mut output = Vec::new();
    if !summary && let Some(children) = node.children() {
        for (name, child) in children {
            let child_path = join_path(&path, name);
            output.push(OutputLine::output(format!(
                "{}\t{child_path}",
                render_size(subtree_size(child), human)
            )));
        }
    }
    output.push(OutputLine::output(format!(
        "{}\t{path}",
        render_size(subtree_size(node), human)
    )));
    CommandResult::lines(output)
}

/// Synthetic disk usage: file = content length, directory = nominal base
/// plus the recursive sum of its children.
fn subtree_size(node: &FsNode) -> u64 {
    match node.children() {
        None => node.size(),
        Some(children) => DIR_SIZE + children.values().map(subtree_size).sum::<u64>(),
    }
}

/// Plain mode rounds bytes up to whole KB; `-h` uses B/K/M/G at a 1024
/// threshold with one decimal place.
fn render_size(bytes: u64, human: bool) -> String {
    if !human {
        return bytes.div_ceil(1024).to_string();
    }
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if bytes < 1024 {
        format!("{bytes}B")
    } else if b < KIB * KIB {
        format!("{:.1}K", b / KIB)
    } else if b < KIB * KIB * KIB {
        format!("{:.1}M", b / (KIB * KIB))
    } else {
        format!("{:.1}G", b / (KIB * KIB * KIB))
    }
}

// ---------------------------------------------------------------------------
// tar
// ---------------------------------------------------------------------------

pub fn tar(args: &[&str], state: &TerminalState) -> CommandResult {
    let (archive, source) = match args {
        ["-cf", archive, source, ..] => (*archive, *source),
        _ => return CommandResult::error("tar: usage: tar -cf <archive> <source>"),
    };

    let source_path = resolve(source, &state.current_directory);
    if lookup(&state.file_system, &source_path).is_none() {
        return CommandResult::error(format!(
            "tar: {source}: Cannot stat: No such file or directory"
        ));
    }

    let archive_path = resolve(archive, &state.current_directory);
    let parent = parent_of(&archive_path);
    let name = basename(&archive_path).to_string();
    let cannot_create = || {
        CommandResult::error(format!(
            "tar: {archive}: Cannot create archive: No such file or directory"
        ))
    };
    match lookup(&state.file_system, &parent) {
        Some(node) if node.is_dir() => {},
        _ => return cannot_create(),
    }

    let mut fs = state.file_system.clone();
    let Some(parent_node) = lookup_mut(&mut fs, &parent) else {
        return cannot_create();
    };
    if parent_node.child(&name).is_some_and(FsNode::is_dir) {
        return cannot_create();
    }
    // No real byte packing: the archive is a placeholder naming its source.
    let content = format!("tar archive of {source_path}\n");
    let _ = parent_node.insert_child(FsNode::file(name, content));

    CommandResult {
        output: Vec::new(),
        patch: StatePatch::fs(fs),
    }
}

// ---------------------------------------------------------------------------
// editor (nano / vim / vi)
// ---------------------------------------------------------------------------

/// Opens the modal editor by handing the caller an edit buffer; the editor
/// UI owns the buffer until it saves through [`save_file`].
pub fn editor(editor_name: &str, args: &[&str], state: &TerminalState) -> CommandResult {
    let Some(target) = args.first() else {
        return CommandResult::error(format!("{editor_name}: no file specified"));
    };

    let path = resolve(target, &state.current_directory);
    let content = match lookup(&state.file_system, &path) {
        Some(node) if node.is_file() => node.content().unwrap_or_default().to_string(),
        _ => String::new(),
    };

    CommandResult {
        output: vec![OutputLine::info(format!("Opening {target} in editor..."))],
        patch: StatePatch {
            editing: Some(Some(EditBuffer { path, content })),
            ..StatePatch::default()
        },
    }
}

/// Editor write-back: same path resolution and parent lookup as
/// `touch`/`echo`, but preserves an existing file's permission bits.
/// Also closes the editor in the returned patch.
pub fn save_file(state: &TerminalState, path: &str, content: &str) -> CommandResult {
    let resolved = resolve(path, &state.current_directory);
    let parent = parent_of(&resolved);
    let name = basename(&resolved).to_string();

    let mut fs = state.file_system.clone();
    let parent_node = match lookup_mut(&mut fs, &parent) {
        Some(node) if node.is_dir() => node,
        _ => {
            return CommandResult::error(format!(
                "cannot create '{path}': No such file or directory"
            ));
        },
    };

    let (executable, permissions) = match parent_node.child(&name) {
        Some(node) if node.is_dir() => {
            return CommandResult::error(format!("cannot overwrite directory '{path}'"));
        },
        Some(node) => (node.is_executable(), node.permissions().to_string()),
        None => (false, "rw-r--r--".to_string()),
    };
    let _ = parent_node.insert_child(FsNode::File {
        name,
        content: content.to_string(),
        executable,
        permissions,
    });

    CommandResult {
        output: Vec::new(),
        patch: StatePatch {
            file_system: Some(fs),
            editing: Some(None),
            ..StatePatch::default()
        },
    }
}

// ---------------------------------------------------------------------------
// ./script
// ---------------------------------------------------------------------------

/// Execute a fake shell script. Only `echo` lines produce output; blank
/// lines and `#` comments are skipped; nothing else is interpreted.
pub fn run_script(script: &str, state: &TerminalState) -> CommandResult {
    let path = resolve(script, &state.current_directory);
    let node = match lookup(&state.file_system, &path) {
        None => {
            return CommandResult::error(format!("./{script}: No such file or directory"));
        },
        Some(node) if node.is_dir() => {
            return CommandResult::error(format!("./{script}: Is a directory"));
        },
        Some(node) => node,
    };
    if !node.is_executable() {
        return CommandResult::error(format!("./{script}: Permission denied"));
    }

    let mut output = Vec::new();
    for line in node.content().unwrap_or_default().split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("echo ") {
            output.push(OutputLine::output(strip_quotes(rest).to_string()));
        }
    }
    CommandResult::lines(output)
}

// ---------------------------------------------------------------------------
// shared helpers
// ---------------------------------------------------------------------------

/// Strip one leading and one trailing quote character (`"` or `'`), each
/// independently of the other.
pub(crate) fn strip_quotes(s: &str) -> &str {
    let s = s
        .strip_prefix('"')
        .or_else(|| s.strip_prefix('\''))
        .unwrap_or(s);
    s.strip_suffix('"')
        .or_else(|| s.strip_suffix('\''))
        .unwrap_or(s)
}

fn join_path(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}
