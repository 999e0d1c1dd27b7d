//! The fake `apt` package manager.
//!
//! No real archives: "installing" appends the name to the state's installed
//! set, which missions inspect for win conditions and which lets the
//! installed name answer `-v`/`--version` queries at the dispatch layer.

use quest_types::OutputLine;

use crate::interpreter::MissionContext;
use crate::state::{CommandResult, StatePatch, TerminalState};

/// Catalog used when the mission does not supply its own.
pub const DEFAULT_PACKAGES: &[&str] = &[
    "nginx",
    "apache2",
    "mysql",
    "postgresql",
    "nodejs",
    "python3",
    "git",
    "vim",
    "curl",
    "wget",
];

fn catalog(mission: &MissionContext) -> Vec<String> {
    mission.packages.clone().unwrap_or_else(|| {
        DEFAULT_PACKAGES.iter().map(ToString::to_string).collect()
    })
}

pub fn apt(args: &[&str], state: &TerminalState, mission: &MissionContext) -> CommandResult {
    let sub = args.first().copied().unwrap_or("");
    match sub {
        "install" => install(&args[1..], state, mission),
        "remove" | "uninstall" => remove(&args[1..], state),
        "list" => list(&args[1..], state, mission),
        "search" => search(&args[1..], mission),
        "update" => CommandResult::lines(vec![
            OutputLine::output("Hit:1 http://archive.ubuntu.com/ubuntu focal InRelease"),
            OutputLine::output("Reading package lists... Done"),
        ]),
        _ => CommandResult::error(format!("apt: unknown command '{sub}'")),
    }
}

fn install(args: &[&str], state: &TerminalState, mission: &MissionContext) -> CommandResult {
    let packages: Vec<&str> = args.iter().filter(|a| !a.starts_with('-')).copied().collect();
    if packages.is_empty() {
        return CommandResult::error("apt: need at least one package name");
    }

    let available = catalog(mission);
    let mut output = Vec::new();
    let mut installed = state.installed_packages.clone();

    for pkg in packages {
        if !available.iter().any(|p| p == pkg) {
            output.push(OutputLine::error(format!("E: Unable to locate package {pkg}")));
            continue;
        }
        if installed.iter().any(|p| p == pkg) {
            output.push(OutputLine::info(format!("{pkg} is already installed.")));
            continue;
        }
        output.push(OutputLine::output("Reading package lists... Done"));
        output.push(OutputLine::output(format!("Setting up {pkg}...")));
        output.push(OutputLine::success(format!(
            "{pkg} has been successfully installed."
        )));
        installed.push(pkg.to_string());
    }

    CommandResult {
        output,
        patch: StatePatch {
            installed_packages: Some(installed),
            ..StatePatch::default()
        },
    }
}

fn remove(args: &[&str], state: &TerminalState) -> CommandResult {
    let packages: Vec<&str> = args.iter().filter(|a| !a.starts_with('-')).copied().collect();
    let mut output = Vec::new();
    let installed: Vec<String> = state
        .installed_packages
        .iter()
        .filter(|p| !packages.contains(&p.as_str()))
        .cloned()
        .collect();

    for pkg in &packages {
        if state.installed_packages.iter().any(|p| p == pkg) {
            output.push(OutputLine::output(format!("Removing {pkg}...")));
            output.push(OutputLine::success(format!("{pkg} has been removed.")));
        } else {
            output.push(OutputLine::info(format!("Package '{pkg}' is not installed.")));
        }
    }

    CommandResult {
        output,
        patch: StatePatch {
            installed_packages: Some(installed),
            ..StatePatch::default()
        },
    }
}

fn list(args: &[&str], state: &TerminalState, mission: &MissionContext) -> CommandResult {
    if args.contains(&"--installed") {
        if state.installed_packages.is_empty() {
            return CommandResult::lines(vec![OutputLine::info("No packages installed.")]);
        }
        return CommandResult::lines(
            state
                .installed_packages
                .iter()
                .map(|pkg| OutputLine::output(format!("{pkg}/stable installed")))
                .collect(),
        );
    }

    CommandResult::lines(
        catalog(mission)
            .iter()
            .map(|pkg| {
                // Uninstalled entries keep the trailing space.
                let tag = if state.installed_packages.contains(pkg) {
                    "[installed]"
                } else {
                    ""
                };
                OutputLine::output(format!("{pkg}/stable {tag}"))
            })
            .collect(),
    )
}

fn search(args: &[&str], mission: &MissionContext) -> CommandResult {
    let query = args.first().map(|q| q.to_lowercase()).unwrap_or_default();
    let matches: Vec<OutputLine> = catalog(mission)
        .iter()
        .filter(|p| p.contains(&query))
        .map(OutputLine::output)
        .collect();

    if matches.is_empty() {
        return CommandResult::lines(vec![OutputLine::info("No packages found.")]);
    }
    CommandResult::lines(matches)
}

/// Canned answer an installed binary gives to `-v`/`--version`.
pub fn version_string(pkg: &str) -> String {
    format!("{pkg} version 1.0.0 (Linux x86_64)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::execute_command;
    use crate::state::apply_patch;
    use quest_types::OutputKind;
    use quest_vfs::FsNode;

    fn setup() -> TerminalState {
        TerminalState::new(FsNode::dir("/"), "/")
    }

    fn exec(state: &TerminalState, line: &str) -> CommandResult {
        execute_command(line, state, &MissionContext::default())
    }

    fn texts(result: &CommandResult) -> Vec<&str> {
        result.output.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn install_known_package() {
        let mut state = setup();
        let result = exec(&state, "apt install nginx");
        assert_eq!(
            texts(&result),
            vec![
                "Reading package lists... Done",
                "Setting up nginx...",
                "nginx has been successfully installed.",
            ]
        );
        assert_eq!(result.output[2].kind, OutputKind::Success);
        state = apply_patch(&state, result.patch);
        assert_eq!(state.installed_packages, vec!["nginx"]);
    }

    #[test]
    fn install_unknown_package() {
        let state = setup();
        let result = exec(&state, "apt install leftpad");
        assert_eq!(texts(&result), vec!["E: Unable to locate package leftpad"]);
        assert_eq!(result.output[0].kind, OutputKind::Error);
    }

    #[test]
    fn install_twice_is_informational() {
        let mut state = setup();
        state.installed_packages.push("git".to_string());
        let result = exec(&state, "apt install git");
        assert_eq!(texts(&result), vec!["git is already installed."]);
        assert_eq!(result.output[0].kind, OutputKind::Info);
    }

    #[test]
    fn install_without_packages() {
        let state = setup();
        let result = exec(&state, "apt install -y");
        assert_eq!(texts(&result), vec!["apt: need at least one package name"]);
    }

    #[test]
    fn install_mixed_batch_continues() {
        let mut state = setup();
        let result = exec(&state, "apt install nope curl");
        state = apply_patch(&state, result.patch);
        assert_eq!(state.installed_packages, vec!["curl"]);
    }

    #[test]
    fn remove_installed_package() {
        let mut state = setup();
        state.installed_packages = vec!["nginx".to_string(), "git".to_string()];
        let result = exec(&state, "apt remove nginx");
        assert_eq!(
            texts(&result),
            vec!["Removing nginx...", "nginx has been removed."]
        );
        state = apply_patch(&state, result.patch);
        assert_eq!(state.installed_packages, vec!["git"]);
    }

    #[test]
    fn remove_missing_package() {
        let state = setup();
        let result = exec(&state, "apt remove nginx");
        assert_eq!(texts(&result), vec!["Package 'nginx' is not installed."]);
        assert_eq!(result.output[0].kind, OutputKind::Info);
    }

    #[test]
    fn uninstall_is_an_alias_for_remove() {
        let mut state = setup();
        state.installed_packages = vec!["wget".to_string()];
        let result = exec(&state, "apt-get uninstall wget");
        state = apply_patch(&state, result.patch);
        assert!(state.installed_packages.is_empty());
    }

    #[test]
    fn list_marks_installed_and_keeps_trailing_space() {
        let mut state = setup();
        state.installed_packages.push("nginx".to_string());
        let result = exec(&state, "apt list");
        let lines = texts(&result);
        assert_eq!(lines.len(), DEFAULT_PACKAGES.len());
        assert_eq!(lines[0], "nginx/stable [installed]");
        assert!(lines.iter().any(|l| *l == "git/stable "));
    }

    #[test]
    fn list_installed_only() {
        let mut state = setup();
        state.installed_packages = vec!["curl".to_string()];
        let result = exec(&state, "apt list --installed");
        assert_eq!(texts(&result), vec!["curl/stable installed"]);

        let empty = exec(&setup(), "apt list --installed");
        assert_eq!(texts(&empty), vec!["No packages installed."]);
        assert_eq!(empty.output[0].kind, OutputKind::Info);
    }

    #[test]
    fn search_substring_and_no_match() {
        let state = setup();
        let result = exec(&state, "apt search sql");
        assert_eq!(texts(&result), vec!["mysql", "postgresql"]);

        let none = exec(&state, "apt search zzz");
        assert_eq!(texts(&none), vec!["No packages found."]);
    }

    #[test]
    fn update_prints_canned_lines() {
        let state = setup();
        let result = exec(&state, "apt update");
        assert_eq!(
            texts(&result),
            vec![
                "Hit:1 http://archive.ubuntu.com/ubuntu focal InRelease",
                "Reading package lists... Done",
            ]
        );
    }

    #[test]
    fn missing_subcommand_is_unknown() {
        let state = setup();
        let result = exec(&state, "apt");
        assert_eq!(texts(&result), vec!["apt: unknown command ''"]);
    }

    #[test]
    fn mission_catalog_overrides_default() {
        let state = setup();
        let mission = MissionContext {
            packages: Some(vec!["docker".to_string()]),
        };
        let result = execute_command("apt install nginx", &state, &mission);
        assert_eq!(texts(&result), vec!["E: Unable to locate package nginx"]);
        let ok = execute_command("apt install docker", &state, &mission);
        assert_eq!(ok.output.last().unwrap().text, "docker has been successfully installed.");
    }
}
