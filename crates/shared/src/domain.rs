use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Length of one match. Fixed; not configurable.
pub const MATCH_DURATION_SECS: u32 = 20 * 60;

/// Score at which a team is announced as the winner.
pub const WINNING_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    pub fn label(self) -> &'static str {
        match self {
            Team::A => "Team A",
            Team::B => "Team B",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Team {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed
            .strip_prefix("team")
            .or_else(|| trimmed.strip_prefix("Team"))
            .unwrap_or(trimmed)
            .trim();
        if name.eq_ignore_ascii_case("a") {
            Ok(Team::A)
        } else if name.eq_ignore_ascii_case("b") {
            Ok(Team::B)
        } else {
            Err(ParseError::UnknownTeam(trimmed.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Stopped,
    Running,
}

/// Observable match state handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub score_a: u32,
    pub score_b: u32,
    pub time_remaining_secs: u32,
    pub timer_running: bool,
}

impl MatchState {
    pub fn score(&self, team: Team) -> u32 {
        match team {
            Team::A => self.score_a,
            Team::B => self.score_b,
        }
    }

    pub fn timer_phase(&self) -> TimerPhase {
        if self.timer_running {
            TimerPhase::Running
        } else {
            TimerPhase::Stopped
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            score_a: 0,
            score_b: 0,
            time_remaining_secs: MATCH_DURATION_SECS,
            timer_running: false,
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
