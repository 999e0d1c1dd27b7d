//! Tab completion.
//!
//! [`candidates`] is pure: given the raw input and a state snapshot it
//! returns the completed input lines, alphabetically ordered. The
//! [`Completer`] wraps it with cycling so repeated presses walk the
//! candidate list instead of recomputing against the completed text.

use log::trace;
use quest_vfs::{lookup, resolve};

use crate::interpreter::COMMAND_NAMES;
use crate::state::TerminalState;

/// All completions of `input`, each a full replacement input line.
///
/// A single word completes against the command list; otherwise the last
/// whitespace-delimited token is treated as a path fragment and completed
/// against its base directory's children, keeping the fragment's prefix
/// style (`/`, `~/`, `./`, or bare) and appending `/` to directories.
pub fn candidates(input: &str, state: &TerminalState) -> Vec<String> {
    let first_token = !input.contains(char::is_whitespace);
    if first_token {
        return COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(input))
            .map(ToString::to_string)
            .collect();
    }

    let fragment = input.rsplit(char::is_whitespace).next().unwrap_or("");
    let head = &input[..input.len() - fragment.len()];

    let (stem, partial) = match fragment.rfind('/') {
        Some(pos) => (&fragment[..=pos], &fragment[pos + 1..]),
        None => ("", fragment),
    };
    let base = if stem.is_empty() {
        state.current_directory.clone()
    } else if stem == "/" {
        "/".to_string()
    } else {
        resolve(stem.trim_end_matches('/'), &state.current_directory)
    };

    let Some(dir) = lookup(&state.file_system, &base) else {
        return Vec::new();
    };
    let Some(children) = dir.children() else {
        return Vec::new();
    };

    children
        .iter()
        .filter(|(name, _)| name.starts_with(partial))
        .map(|(name, child)| {
            let slash = if child.is_dir() { "/" } else { "" };
            format!("{head}{stem}{name}{slash}")
        })
        .collect()
}

/// Cycling wrapper around [`candidates`].
///
/// The first call computes the candidate list for the typed input; while
/// the input stays equal to the seed or to the suggestion just handed out,
/// further calls advance through the same list. Any other input reseeds.
#[derive(Debug, Default)]
pub struct Completer {
    seed: String,
    matches: Vec<String>,
    next_index: usize,
    last_emitted: Option<String>,
}

impl Completer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, input: &str, state: &TerminalState) -> Option<String> {
        let cycling =
            input == self.seed || self.last_emitted.as_deref() == Some(input);
        if !cycling {
            self.seed = input.to_string();
            self.matches = candidates(input, state);
            self.next_index = 0;
            trace!("completion reseeded: {} candidate(s) for '{input}'", self.matches.len());
        }
        if self.matches.is_empty() {
            self.last_emitted = None;
            return None;
        }
        let suggestion = self.matches[self.next_index % self.matches.len()].clone();
        self.next_index += 1;
        self.last_emitted = Some(suggestion.clone());
        Some(suggestion)
    }
}
