//! Command parsing and dispatch.
//!
//! The command set is closed: the first whitespace-delimited token is
//! resolved once into a [`CommandKind`], then a single `match` dispatches to
//! the handler modules. Unknown names fall through to script execution
//! (`./path`), fake installed-binary version queries, and finally the
//! command-not-found error.

use log::debug;
use quest_types::OutputLine;

use crate::state::{CommandResult, TerminalState};
use crate::{doc_commands, fs_commands, pkg_commands, system_commands};

/// Every name the interpreter recognizes, for completion and help.
pub const COMMAND_NAMES: &[&str] = &[
    "apt", "apt-get", "cat", "cd", "chmod", "clear", "date", "df", "du", "echo", "find", "free",
    "grep", "help", "history", "htop", "ifconfig", "ls", "man", "mkdir", "nano", "ping", "ps",
    "pwd", "rm", "tar", "top", "touch", "uname", "vi", "vim", "whoami",
];

/// Per-mission context the interpreter consults but does not own.
#[derive(Debug, Clone, Default)]
pub struct MissionContext {
    /// Overrides the default package catalog when set.
    pub packages: Option<Vec<String>>,
}

/// The closed set of built-in commands, resolved once at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Ls,
    Cd,
    Cat,
    Pwd,
    Echo,
    Mkdir,
    Touch,
    Rm,
    Chmod,
    Grep,
    Find,
    Du,
    Tar,
    Apt,
    /// `nano`, `vim`, `vi` -- the invoked name is kept for error messages.
    Editor,
    Clear,
    Help,
    Whoami,
    Date,
    Uname,
    Man,
    History,
    Ps,
    Free,
    Df,
    Top,
    Ifconfig,
    Ping,
}

impl CommandKind {
    /// Resolve a command name. `None` means the fallthrough rules apply.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ls" => Some(Self::Ls),
            "cd" => Some(Self::Cd),
            "cat" => Some(Self::Cat),
            "pwd" => Some(Self::Pwd),
            "echo" => Some(Self::Echo),
            "mkdir" => Some(Self::Mkdir),
            "touch" => Some(Self::Touch),
            "rm" => Some(Self::Rm),
            "chmod" => Some(Self::Chmod),
            "grep" => Some(Self::Grep),
            "find" => Some(Self::Find),
            "du" => Some(Self::Du),
            "tar" => Some(Self::Tar),
            "apt" | "apt-get" => Some(Self::Apt),
            "nano" | "vim" | "vi" => Some(Self::Editor),
            "clear" => Some(Self::Clear),
            "help" => Some(Self::Help),
            "whoami" => Some(Self::Whoami),
            "date" => Some(Self::Date),
            "uname" => Some(Self::Uname),
            "man" => Some(Self::Man),
            "history" => Some(Self::History),
            "ps" => Some(Self::Ps),
            "free" => Some(Self::Free),
            "df" => Some(Self::Df),
            "top" | "htop" => Some(Self::Top),
            "ifconfig" => Some(Self::Ifconfig),
            "ping" => Some(Self::Ping),
            _ => None,
        }
    }
}

/// Evaluate one raw input line against a state snapshot.
///
/// Pure: the state is only read; all changes come back in the result's
/// patch. An empty (or all-whitespace) line yields no output and no patch.
/// History bookkeeping is the caller's job.
pub fn execute_command(
    input: &str,
    state: &TerminalState,
    mission: &MissionContext,
) -> CommandResult {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return CommandResult::none();
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let command = parts[0];
    let args = &parts[1..];
    debug!("dispatching '{command}' with {} arg(s)", args.len());

    match CommandKind::parse(command) {
        Some(kind) => dispatch(kind, command, args, state, mission),
        None => {
            if let Some(script) = trimmed.strip_prefix("./") {
                return fs_commands::run_script(script, state);
            }
            if state.installed_packages.iter().any(|p| p == command)
                && args.iter().any(|a| *a == "-v" || *a == "--version")
            {
                return CommandResult::lines(vec![OutputLine::output(
                    pkg_commands::version_string(command),
                )]);
            }
            CommandResult::error(format!(
                "{command}: command not found. Type 'help' for available commands."
            ))
        },
    }
}

fn dispatch(
    kind: CommandKind,
    command: &str,
    args: &[&str],
    state: &TerminalState,
    mission: &MissionContext,
) -> CommandResult {
    match kind {
        CommandKind::Ls => fs_commands::ls(args, state),
        CommandKind::Cd => fs_commands::cd(args, state),
        CommandKind::Cat => fs_commands::cat(args, state),
        CommandKind::Pwd => system_commands::pwd(state),
        CommandKind::Echo => fs_commands::echo(args, state),
        CommandKind::Mkdir => fs_commands::mkdir(args, state),
        CommandKind::Touch => fs_commands::touch(args, state),
        CommandKind::Rm => fs_commands::rm(args, state),
        CommandKind::Chmod => fs_commands::chmod(args, state),
        CommandKind::Grep => fs_commands::grep(args, state),
        CommandKind::Find => fs_commands::find(args, state),
        CommandKind::Du => fs_commands::du(args, state),
        CommandKind::Tar => fs_commands::tar(args, state),
        CommandKind::Apt => pkg_commands::apt(args, state, mission),
        CommandKind::Editor => fs_commands::editor(command, args, state),
        CommandKind::Clear => system_commands::clear(),
        CommandKind::Help => doc_commands::help(args),
        CommandKind::Whoami => system_commands::whoami(),
        CommandKind::Date => system_commands::date(),
        CommandKind::Uname => system_commands::uname(args),
        CommandKind::Man => doc_commands::man(args),
        CommandKind::History => system_commands::history(state),
        CommandKind::Ps => system_commands::ps(args),
        CommandKind::Free => system_commands::free(args),
        CommandKind::Df => system_commands::df(args),
        CommandKind::Top => system_commands::top(),
        CommandKind::Ifconfig => system_commands::ifconfig(),
        CommandKind::Ping => system_commands::ping(args),
    }
}
