//! The mission contract: everything a puzzle supplies to drive one
//! session of the interpreter.

use quest_terminal::{MissionContext, TerminalState};
use quest_vfs::FsNode;

/// Predicate over session state deciding puzzle completion. Evaluated by
/// the driver after every command; it must be pure over the state.
pub type WinCondition = Box<dyn Fn(&TerminalState) -> bool + Send + Sync>;

/// One puzzle: objective text, a filesystem template cloned fresh per
/// attempt, an initial working directory, hints, and scoring parameters.
/// Tickets share this shape; only the surrounding progression differs.
pub struct Mission {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub objective: String,
    pub hints: Vec<String>,
    pub max_hints: u32,
    pub base_score: u32,
    pub time_bonus: u32,
    pub time_limit_seconds: u32,
    /// Template tree; [`Mission::start_state`] clones it per attempt.
    pub file_system: FsNode,
    pub initial_directory: String,
    pub check_win: WinCondition,
    /// Replaces the default package catalog when set.
    pub packages: Option<Vec<String>>,
    /// Packages already present when the session starts.
    pub installed_packages: Vec<String>,
}

impl Mission {
    /// Fresh session state: the template is cloned, so a restart always
    /// begins from the pristine tree.
    pub fn start_state(&self) -> TerminalState {
        let mut state = TerminalState::new(self.file_system.clone(), &*self.initial_directory);
        state.installed_packages = self.installed_packages.clone();
        state
    }

    pub fn context(&self) -> MissionContext {
        MissionContext {
            packages: self.packages.clone(),
        }
    }

    /// Final score: base, plus a time bonus scaled by how much of the
    /// limit was left, minus 25 per hint and 5 per failed attempt,
    /// floored at zero.
    pub fn score(&self, elapsed_seconds: u32, hints_used: u32, attempts: u32) -> u32 {
        let mut score = i64::from(self.base_score);
        if elapsed_seconds <= self.time_limit_seconds && self.time_limit_seconds > 0 {
            let ratio = 1.0 - f64::from(elapsed_seconds) / f64::from(self.time_limit_seconds);
            score += (f64::from(self.time_bonus) * ratio).floor() as i64;
        }
        score -= i64::from(hints_used) * 25;
        score -= i64::from(attempts) * 5;
        score.max(0) as u32
    }
}

impl std::fmt::Debug for Mission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mission")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("initial_directory", &self.initial_directory)
            .field("hints", &self.hints.len())
            .finish_non_exhaustive()
    }
}
