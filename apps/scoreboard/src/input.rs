//! Line-oriented console input.

use shared::{domain::Team, error::ParseError, protocol::MatchCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(MatchCommand),
    State,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  a+ | b+          add a goal (also: +a, inc a, add a)
  a- | b-          remove a goal (also: -a, dec a, sub a)
  start | stop     run or pause the match clock
  reset            clear scores and restore 20:00
  tick             advance the clock by one second
  state            show the board
  help             show this text
  quit             leave";

pub fn parse_input(line: &str) -> Result<ConsoleInput, ParseError> {
    let line = line.trim().to_ascii_lowercase();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();

    let input = match (head, rest.as_slice()) {
        ("start", []) => ConsoleInput::Command(MatchCommand::StartTimer),
        ("stop", []) => ConsoleInput::Command(MatchCommand::StopTimer),
        ("reset", []) => ConsoleInput::Command(MatchCommand::Reset),
        ("tick", []) => ConsoleInput::Command(MatchCommand::Tick),
        ("state" | "show", []) => ConsoleInput::State,
        ("help" | "?", []) => ConsoleInput::Help,
        ("quit" | "exit" | "q", []) => ConsoleInput::Quit,
        ("inc" | "add", [team]) => ConsoleInput::Command(MatchCommand::IncrementScore {
            team: team.parse()?,
        }),
        ("dec" | "sub", [team]) => ConsoleInput::Command(MatchCommand::DecrementScore {
            team: team.parse()?,
        }),
        (word, []) => parse_score_shorthand(word)?,
        _ => return Err(ParseError::UnknownCommand(line.clone())),
    };
    Ok(input)
}

/// `a+`, `+a`, `b-`, `-b`.
fn parse_score_shorthand(word: &str) -> Result<ConsoleInput, ParseError> {
    let (team, increment) = if let Some(team) = word.strip_suffix('+') {
        (team, true)
    } else if let Some(team) = word.strip_prefix('+') {
        (team, true)
    } else if let Some(team) = word.strip_suffix('-') {
        (team, false)
    } else if let Some(team) = word.strip_prefix('-') {
        (team, false)
    } else {
        return Err(ParseError::UnknownCommand(word.to_string()));
    };

    let team: Team = team.parse()?;
    let command = if increment {
        MatchCommand::IncrementScore { team }
    } else {
        MatchCommand::DecrementScore { team }
    };
    Ok(ConsoleInput::Command(command))
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
