//! Session driver: feeds input lines through the interpreter and merges
//! results into the authoritative state.

use log::debug;
use quest_terminal::system_commands::{HOST, USER};
use quest_terminal::{MissionContext, TerminalState, apply_patch, execute_command};
use quest_types::OutputLine;

use crate::mission::Mission;

/// What a submitted line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A normal command; output and state change are already merged.
    Executed,
    /// The player asked for a hint. Carries the next hint text, or `None`
    /// when the mission's hint budget is exhausted.
    HintRequested(Option<String>),
}

/// One attempt at a mission: owns the session state, records history,
/// intercepts `hint`, and evaluates the win condition after every line.
pub struct MissionRun {
    mission: Mission,
    context: MissionContext,
    state: TerminalState,
    hints_used: u32,
    won: bool,
}

impl MissionRun {
    pub fn new(mission: Mission) -> Self {
        let context = mission.context();
        let state = mission.start_state();
        Self {
            mission,
            context,
            state,
            hints_used: 0,
            won: false,
        }
    }

    pub fn state(&self) -> &TerminalState {
        &self.state
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn prompt(&self) -> String {
        format!("{USER}@{HOST}:{}$ ", self.state.current_directory)
    }

    /// Submit one input line.
    ///
    /// The echoed prompt line and the raw command are recorded before the
    /// patch is merged, so `clear` wipes them along with the scrollback.
    /// `hint` never reaches the interpreter: it is answered from the
    /// mission's hint list but still lands in both histories, since win
    /// conditions may count it.
    pub fn submit(&mut self, input: &str) -> Submission {
        let trimmed = input.trim().to_string();
        let prompt_line = OutputLine::input(format!("{}{trimmed}", self.prompt()));

        if trimmed == "hint" {
            self.state.output_history.push(prompt_line);
            self.state.command_history.push(trimmed);
            let hint = self.next_hint();
            self.won = self.won || (self.mission.check_win)(&self.state);
            return Submission::HintRequested(hint);
        }

        // Executed against the pre-append snapshot: `history` does not
        // list the command that invoked it.
        let result = execute_command(&trimmed, &self.state, &self.context);
        self.state.output_history.push(prompt_line);
        if !trimmed.is_empty() {
            self.state.command_history.push(trimmed);
        }
        self.state = apply_patch(&self.state, result.patch);
        self.state.output_history.extend(result.output);

        if !self.won && (self.mission.check_win)(&self.state) {
            debug!("mission {} won after {} commands", self.mission.id, self.state.command_history.len());
            self.won = true;
        }
        Submission::Executed
    }

    fn next_hint(&mut self) -> Option<String> {
        if self.hints_used >= self.mission.max_hints {
            return None;
        }
        let hint = self.mission.hints.get(self.hints_used as usize).cloned();
        if hint.is_some() {
            self.hints_used += 1;
        }
        hint
    }
}
