use shared::{
    domain::{MatchState, Team, TimerPhase, WINNING_SCORE},
    protocol::{MatchCommand, MatchEvent},
};

/// Owns the state of one match and enforces its rules.
///
/// Every command is infallible. Out-of-range requests (decrementing a zero score,
/// ticking with no time left, starting an expired clock) are clamps or no-ops.
/// Commands that produce a notification return it; the caller decides how to
/// deliver it.
#[derive(Debug, Clone)]
pub struct MatchController {
    state: MatchState,
}

impl MatchController {
    pub fn new() -> Self {
        Self {
            state: MatchState::default(),
        }
    }

    pub fn increment_score(&mut self, team: Team) -> Option<MatchEvent> {
        let score = self.score_mut(team);
        *score = score.saturating_add(1);
        (*score == WINNING_SCORE).then_some(MatchEvent::MatchWon { team })
    }

    pub fn decrement_score(&mut self, team: Team) {
        let score = self.score_mut(team);
        *score = score.saturating_sub(1);
    }

    /// Returns whether the timer is running afterwards.
    pub fn start_timer(&mut self) -> bool {
        if self.state.time_remaining_secs > 0 {
            self.state.timer_running = true;
        }
        self.state.timer_running
    }

    pub fn stop_timer(&mut self) {
        self.state.timer_running = false;
    }

    /// Advances the countdown by one second.
    ///
    /// `TimeExpired` is returned only on the tick that reaches zero.
    pub fn tick(&mut self) -> Option<MatchEvent> {
        if self.state.time_remaining_secs == 0 {
            return None;
        }
        self.state.time_remaining_secs -= 1;
        if self.state.time_remaining_secs == 0 {
            self.state.timer_running = false;
            return Some(MatchEvent::TimeExpired);
        }
        None
    }

    pub fn reset(&mut self) {
        self.state = MatchState::default();
    }

    /// Applies a protocol command and returns the notification it produced, if any.
    pub fn apply(&mut self, command: MatchCommand) -> Option<MatchEvent> {
        match command {
            MatchCommand::IncrementScore { team } => self.increment_score(team),
            MatchCommand::DecrementScore { team } => {
                self.decrement_score(team);
                None
            }
            MatchCommand::StartTimer => {
                self.start_timer();
                None
            }
            MatchCommand::StopTimer => {
                self.stop_timer();
                None
            }
            MatchCommand::Reset => {
                self.reset();
                None
            }
            MatchCommand::Tick => self.tick(),
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn score_a(&self) -> u32 {
        self.state.score_a
    }

    pub fn score_b(&self) -> u32 {
        self.state.score_b
    }

    pub fn score(&self, team: Team) -> u32 {
        self.state.score(team)
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.state.time_remaining_secs
    }

    pub fn timer_running(&self) -> bool {
        self.state.timer_running
    }

    pub fn timer_phase(&self) -> TimerPhase {
        self.state.timer_phase()
    }

    fn score_mut(&mut self, team: Team) -> &mut u32 {
        match team {
            Team::A => &mut self.state.score_a,
            Team::B => &mut self.state.score_b,
        }
    }
}

impl Default for MatchController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
