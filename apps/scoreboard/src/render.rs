use std::io::{self, Write};

use shared::{
    domain::{MatchState, Team},
    protocol::{MatchEvent, MatchUpdate},
};

/// Formats remaining seconds as zero-padded `MM:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn alert_text(event: &MatchEvent) -> String {
    match event {
        MatchEvent::MatchWon { team } => format!("Game Over: {team} wins!"),
        MatchEvent::TimeExpired => "Time Over: The match has ended!".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

/// Draws match state and alerts for a terminal.
///
/// In text mode a change that only moved the clock prints a single clock line; any
/// other change redraws the whole board.
pub struct Renderer {
    mode: OutputMode,
    last: Option<MatchState>,
}

impl Renderer {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode, last: None }
    }

    pub fn state(&mut self, out: &mut impl Write, state: &MatchState) -> io::Result<()> {
        let clock_only = self.last.is_some_and(|last| {
            last.score_a == state.score_a
                && last.score_b == state.score_b
                && last.timer_running == state.timer_running
                && last.time_remaining_secs != state.time_remaining_secs
        });
        self.last = Some(*state);

        match self.mode {
            OutputMode::Json => write_json(out, &MatchUpdate::State(*state)),
            OutputMode::Text if clock_only => {
                writeln!(out, "Time Left: {}", format_clock(state.time_remaining_secs))
            }
            OutputMode::Text => self.board(out, state),
        }
    }

    /// Unconditional full redraw.
    pub fn board(&mut self, out: &mut impl Write, state: &MatchState) -> io::Result<()> {
        self.last = Some(*state);
        if self.mode == OutputMode::Json {
            return write_json(out, &MatchUpdate::State(*state));
        }

        let control = if state.timer_running { "stop" } else { "start" };
        writeln!(out, "Futsal Score")?;
        writeln!(
            out,
            "Time Left: {}  [{control}]",
            format_clock(state.time_remaining_secs)
        )?;
        for team in Team::ALL {
            writeln!(out, "{team}: {}", state.score(team))?;
        }
        Ok(())
    }

    pub fn event(&mut self, out: &mut impl Write, event: &MatchEvent) -> io::Result<()> {
        match self.mode {
            OutputMode::Json => write_json(out, &MatchUpdate::Event(*event)),
            OutputMode::Text => writeln!(out, "*** {} ***", alert_text(event)),
        }
    }

    pub fn message(&mut self, out: &mut impl Write, text: &str) -> io::Result<()> {
        match self.mode {
            OutputMode::Json => {
                let line = serde_json::json!({ "type": "message", "payload": text });
                writeln!(out, "{line}")
            }
            OutputMode::Text => writeln!(out, "{text}"),
        }
    }
}

fn write_json(out: &mut impl Write, update: &MatchUpdate) -> io::Result<()> {
    let line = serde_json::to_string(update).map_err(io::Error::other)?;
    writeln!(out, "{line}")
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
