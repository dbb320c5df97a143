use thiserror::Error;

/// Failure talking to a match session whose task has already ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("match session is closed")]
    Closed,
}

/// Failure turning user text into a team or a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown team '{0}' (expected A or B)")]
    UnknownTeam(String),
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}
