use serde::{Deserialize, Serialize};

use crate::domain::{MatchState, Team};

/// Inbound commands accepted by a match controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum MatchCommand {
    IncrementScore { team: Team },
    DecrementScore { team: Team },
    StartTimer,
    StopTimer,
    Reset,
    Tick,
}

impl MatchCommand {
    pub fn name(&self) -> &'static str {
        match self {
            MatchCommand::IncrementScore { .. } => "increment_score",
            MatchCommand::DecrementScore { .. } => "decrement_score",
            MatchCommand::StartTimer => "start_timer",
            MatchCommand::StopTimer => "stop_timer",
            MatchCommand::Reset => "reset",
            MatchCommand::Tick => "tick",
        }
    }
}

/// Outbound notifications. Informational only; none of them are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum MatchEvent {
    MatchWon { team: Team },
    TimeExpired,
}

/// What a JSON-speaking presentation layer receives after each change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum MatchUpdate {
    State(MatchState),
    Event(MatchEvent),
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
