//! In-terminal documentation: `help` and `man`.
//!
//! All text is fixed data. `man` deliberately covers only three pages so
//! players lean on `help <command>` for the rest.

use quest_types::OutputLine;

use crate::state::CommandResult;

const GENERAL_HELP: &[&str] = &[
    "Available commands:",
    "",
    "  ls [options] [path]    - List directory contents (-a, -l)",
    "  cd <path>              - Change directory",
    "  pwd                    - Print working directory",
    "  cat <file>             - Display file contents",
    "  echo <text> [> file]   - Print text or write to file",
    "  mkdir <dir>            - Create directory",
    "  touch <file>           - Create empty file",
    "  rm [-r] <file>         - Remove file or directory",
    "  chmod <mode> <file>    - Change file permissions",
    "  grep <pattern> <file>  - Search for pattern in file",
    "  find <path> -name <p>  - Find files by name",
    "  du [-s] [-h] [path]    - Show disk usage",
    "  tar -cf <out> <src>    - Create archive",
    "  nano/vim <file>        - Edit file",
    "  apt <command>          - Package manager (install, remove, list, search)",
    "  ./<script>             - Execute script",
    "  ps / free / df / top   - Inspect processes, memory, disk",
    "  ifconfig / ping <host> - Inspect the network",
    "  clear                  - Clear terminal",
    "  whoami                 - Display current user",
    "  date                   - Display current date/time",
    "  uname [-a]             - Display system information",
    "  man <command>          - Show a manual page",
    "  history                - Show command history",
    "  hint                   - Get a hint (costs points)",
    "",
];

pub fn help(args: &[&str]) -> CommandResult {
    let Some(topic) = args.first() else {
        return CommandResult::lines(
            GENERAL_HELP.iter().copied().map(OutputLine::output).collect(),
        );
    };
    match help_page(topic) {
        Some(page) => {
            CommandResult::lines(page.iter().copied().map(OutputLine::output).collect())
        },
        None => CommandResult::error(format!(
            "help: no help topic for '{topic}'. Type 'help' for the command list."
        )),
    }
}

pub fn man(args: &[&str]) -> CommandResult {
    let Some(topic) = args.first() else {
        return CommandResult::error("What manual page do you want?");
    };
    match man_page(topic) {
        Some(page) => {
            CommandResult::lines(page.iter().copied().map(OutputLine::output).collect())
        },
        None => CommandResult::error(format!("No manual entry for {topic}")),
    }
}

fn man_page(topic: &str) -> Option<&'static [&'static str]> {
    let page: &[&str] = match topic {
        "ls" => &[
            "LS(1)",
            "",
            "NAME",
            "       ls - list directory contents",
            "",
            "SYNOPSIS",
            "       ls [OPTION]... [FILE]...",
            "",
            "OPTIONS",
            "       -a     do not ignore entries starting with .",
            "       -l     use a long listing format",
        ],
        "cd" => &[
            "CD(1)",
            "",
            "NAME",
            "       cd - change directory",
            "",
            "SYNOPSIS",
            "       cd [DIR]",
            "",
            "DESCRIPTION",
            "       Change the current directory to DIR.",
        ],
        "cat" => &[
            "CAT(1)",
            "",
            "NAME",
            "       cat - concatenate files and print",
            "",
            "SYNOPSIS",
            "       cat [FILE]...",
        ],
        _ => return None,
    };
    Some(page)
}

/// Per-command help with SYNOPSIS, DESCRIPTION, and EXAMPLES.
fn help_page(topic: &str) -> Option<&'static [&'static str]> {
    let page: &[&str] = match topic {
        "ls" => &[
            "ls - list directory contents",
            "",
            "SYNOPSIS",
            "  ls [-a] [-l] [path]",
            "",
            "DESCRIPTION",
            "  List the entries of a directory, or describe a single file.",
            "  -a includes hidden entries; -l shows permissions and sizes.",
            "",
            "EXAMPLES",
            "  ls",
            "  ls -la /home/user",
        ],
        "cd" => &[
            "cd - change directory",
            "",
            "SYNOPSIS",
            "  cd [path]",
            "",
            "DESCRIPTION",
            "  Change the working directory. With no argument, go home.",
            "  Understands '.', '..', '~', absolute and relative paths.",
            "",
            "EXAMPLES",
            "  cd documents",
            "  cd ..",
            "  cd ~",
        ],
        "pwd" => &[
            "pwd - print working directory",
            "",
            "SYNOPSIS",
            "  pwd",
            "",
            "DESCRIPTION",
            "  Print the absolute path of the current directory.",
            "",
            "EXAMPLES",
            "  pwd",
        ],
        "cat" => &[
            "cat - display file contents",
            "",
            "SYNOPSIS",
            "  cat <file>...",
            "",
            "DESCRIPTION",
            "  Print each file's content. Multiple files are concatenated",
            "  in argument order.",
            "",
            "EXAMPLES",
            "  cat readme.txt",
            "  cat a.txt b.txt",
        ],
        "echo" => &[
            "echo - print text or write to a file",
            "",
            "SYNOPSIS",
            "  echo <text>",
            "  echo <text> > <file>",
            "  echo <text> >> <file>",
            "",
            "DESCRIPTION",
            "  Print text to the terminal. With '>' the text replaces the",
            "  file's content; with '>>' it is appended.",
            "",
            "EXAMPLES",
            "  echo \"hello\"",
            "  echo \"line\" >> notes.txt",
        ],
        "mkdir" => &[
            "mkdir - create directories",
            "",
            "SYNOPSIS",
            "  mkdir <dir>...",
            "",
            "DESCRIPTION",
            "  Create each named directory. The parent must already exist.",
            "",
            "EXAMPLES",
            "  mkdir projects",
            "  mkdir a b c",
        ],
        "touch" => &[
            "touch - create empty files",
            "",
            "SYNOPSIS",
            "  touch <file>...",
            "",
            "DESCRIPTION",
            "  Create each named file empty. Existing files are unchanged.",
            "",
            "EXAMPLES",
            "  touch notes.txt",
        ],
        "rm" => &[
            "rm - remove files or directories",
            "",
            "SYNOPSIS",
            "  rm [-r] <target>...",
            "",
            "DESCRIPTION",
            "  Remove each target. Directories need -r (or -rf).",
            "",
            "EXAMPLES",
            "  rm old.txt",
            "  rm -rf build",
        ],
        "chmod" => &[
            "chmod - change file permissions",
            "",
            "SYNOPSIS",
            "  chmod <mode> <file>",
            "",
            "DESCRIPTION",
            "  '+x', 755 and 777 make the file executable; '-x' and 644",
            "  remove the execute bit.",
            "",
            "EXAMPLES",
            "  chmod +x deploy.sh",
            "  chmod 644 notes.txt",
        ],
        "grep" => &[
            "grep - search inside files",
            "",
            "SYNOPSIS",
            "  grep <pattern> <file>...",
            "",
            "DESCRIPTION",
            "  Print lines containing the pattern (case-insensitive).",
            "  With several files, matches are prefixed with the file name.",
            "",
            "EXAMPLES",
            "  grep error /var/log/syslog",
            "  grep todo a.txt b.txt",
        ],
        "find" => &[
            "find - find files by name",
            "",
            "SYNOPSIS",
            "  find <path> -name <pattern>",
            "",
            "DESCRIPTION",
            "  Walk the tree under path and print every entry whose name",
            "  contains the pattern. '*' in the pattern is ignored.",
            "",
            "EXAMPLES",
            "  find / -name *.txt",
            "  find /home -name backup",
        ],
        "du" => &[
            "du - show disk usage",
            "",
            "SYNOPSIS",
            "  du [-s] [-h] [path]",
            "",
            "DESCRIPTION",
            "  Report the size of a directory tree in kilobytes. -s prints",
            "  the total only; -h uses human-readable units.",
            "",
            "EXAMPLES",
            "  du -sh /home/user",
        ],
        "tar" => &[
            "tar - create an archive",
            "",
            "SYNOPSIS",
            "  tar -cf <archive> <source>",
            "",
            "DESCRIPTION",
            "  Pack source into archive. Only creation is supported.",
            "",
            "EXAMPLES",
            "  tar -cf backup.tar documents",
        ],
        "apt" | "apt-get" => &[
            "apt - package manager",
            "",
            "SYNOPSIS",
            "  apt install <pkg>...",
            "  apt remove <pkg>...",
            "  apt list [--installed]",
            "  apt search <query>",
            "  apt update",
            "",
            "DESCRIPTION",
            "  Install and remove packages from the catalog. Installed",
            "  binaries answer -v/--version queries.",
            "",
            "EXAMPLES",
            "  apt install nginx",
            "  apt list --installed",
        ],
        "nano" | "vim" | "vi" => &[
            "nano/vim/vi - edit a file",
            "",
            "SYNOPSIS",
            "  nano <file>",
            "",
            "DESCRIPTION",
            "  Open the file in the editor. Saving writes the buffer back;",
            "  a new name creates the file on save.",
            "",
            "EXAMPLES",
            "  nano notes.txt",
        ],
        "clear" => &[
            "clear - clear the terminal",
            "",
            "SYNOPSIS",
            "  clear",
            "",
            "DESCRIPTION",
            "  Empty the scrollback. History is kept.",
        ],
        "whoami" => &[
            "whoami - display the current user",
            "",
            "SYNOPSIS",
            "  whoami",
        ],
        "date" => &[
            "date - display the date and time",
            "",
            "SYNOPSIS",
            "  date",
        ],
        "uname" => &[
            "uname - display system information",
            "",
            "SYNOPSIS",
            "  uname [-a]",
            "",
            "DESCRIPTION",
            "  Print the kernel name; -a prints the full identification.",
        ],
        "man" => &[
            "man - show a manual page",
            "",
            "SYNOPSIS",
            "  man <command>",
        ],
        "history" => &[
            "history - show command history",
            "",
            "SYNOPSIS",
            "  history",
            "",
            "DESCRIPTION",
            "  Print every command entered this session, numbered from 1.",
        ],
        "help" => &[
            "help - show command help",
            "",
            "SYNOPSIS",
            "  help [command]",
        ],
        "ps" => &[
            "ps - list processes",
            "",
            "SYNOPSIS",
            "  ps [aux]",
        ],
        "free" => &[
            "free - show memory usage",
            "",
            "SYNOPSIS",
            "  free [-h]",
        ],
        "df" => &[
            "df - show filesystem usage",
            "",
            "SYNOPSIS",
            "  df [-h]",
        ],
        "top" | "htop" => &[
            "top - show a process snapshot",
            "",
            "SYNOPSIS",
            "  top",
        ],
        "ifconfig" => &[
            "ifconfig - show network interfaces",
            "",
            "SYNOPSIS",
            "  ifconfig",
        ],
        "ping" => &[
            "ping - probe a host",
            "",
            "SYNOPSIS",
            "  ping <host>",
        ],
        _ => return None,
    };
    Some(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::COMMAND_NAMES;
    use quest_types::OutputKind;

    #[test]
    fn general_help_lists_commands() {
        let out = help(&[]).output;
        assert_eq!(out[0].text, "Available commands:");
        assert!(out.iter().any(|l| l.text.contains("apt <command>")));
        assert!(out.iter().any(|l| l.text.contains("hint")));
    }

    #[test]
    fn every_known_command_has_a_help_page() {
        for name in COMMAND_NAMES {
            assert!(
                help_page(name).is_some(),
                "help {name} should have a page"
            );
        }
    }

    #[test]
    fn help_page_has_synopsis() {
        let out = help(&["grep"]).output;
        assert_eq!(out[0].text, "grep - search inside files");
        assert!(out.iter().any(|l| l.text == "SYNOPSIS"));
    }

    #[test]
    fn help_unknown_topic_errors() {
        let out = help(&["frobnicate"]).output;
        assert_eq!(out[0].kind, OutputKind::Error);
        assert_eq!(
            out[0].text,
            "help: no help topic for 'frobnicate'. Type 'help' for the command list."
        );
    }

    #[test]
    fn man_covers_exactly_three_pages() {
        assert_eq!(man(&["ls"]).output[0].text, "LS(1)");
        assert_eq!(man(&["cd"]).output[0].text, "CD(1)");
        assert_eq!(man(&["cat"]).output[0].text, "CAT(1)");
        let missing = man(&["grep"]).output;
        assert_eq!(missing[0].kind, OutputKind::Error);
        assert_eq!(missing[0].text, "No manual entry for grep");
    }

    #[test]
    fn man_without_topic() {
        assert_eq!(man(&[]).output[0].text, "What manual page do you want?");
    }
}
