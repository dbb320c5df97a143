//! Match rules for a timed two-team game and the runtime that drives them.
//!
//! [`MatchController`] is the synchronous rule engine. [`MatchSession`] owns one
//! controller on a dedicated task, drives its countdown with a [`TickTimer`] and
//! hands out [`MatchHandle`]s to the presentation layer.

mod controller;
pub mod session;
mod timer;

pub use controller::MatchController;
pub use session::{MatchHandle, MatchSession, SessionOptions};
pub use timer::TickTimer;

pub use shared::{
    domain::{MatchState, Team, TimerPhase, MATCH_DURATION_SECS, WINNING_SCORE},
    error::SessionError,
    protocol::{MatchCommand, MatchEvent},
};
