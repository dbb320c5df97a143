//! Runtime driver for a [`MatchController`].
//!
//! One spawned task owns the controller and applies every command in arrival order,
//! which keeps all mutation on a single logical thread without locks. The countdown
//! is a [`TickTimer`] held only while the controller reports the clock as running.

use std::time::Duration;

use shared::{
    domain::{MatchState, Team},
    error::SessionError,
    protocol::{MatchCommand, MatchEvent},
};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, info, trace};

use crate::{controller::MatchController, timer::TickTimer};

const TICK_QUEUE_CAPACITY: usize = 4;
const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Wall-clock time between two countdown ticks.
    pub tick_period: Duration,
    pub command_capacity: usize,
    pub event_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            command_capacity: 64,
            event_capacity: 64,
        }
    }
}

enum SessionRequest {
    Command {
        command: MatchCommand,
        reply: oneshot::Sender<MatchState>,
    },
    Shutdown,
}

pub struct MatchSession {
    controller: MatchController,
    options: SessionOptions,
    timer: Option<TickTimer>,
    next_generation: u64,
    tick_tx: mpsc::Sender<u64>,
    events: broadcast::Sender<MatchEvent>,
    state: watch::Sender<MatchState>,
}

impl MatchSession {
    /// Starts a fresh match on the current Tokio runtime.
    ///
    /// The session runs until [`MatchHandle::shutdown`] is called or every handle has
    /// been dropped; either way the tick timer is released before the task exits.
    pub fn spawn(options: SessionOptions) -> MatchHandle {
        let options = SessionOptions {
            tick_period: options.tick_period.max(MIN_TICK_PERIOD),
            command_capacity: options.command_capacity.max(1),
            event_capacity: options.event_capacity.max(1),
        };
        let controller = MatchController::new();
        let (request_tx, request_rx) = mpsc::channel(options.command_capacity);
        let (tick_tx, tick_rx) = mpsc::channel(TICK_QUEUE_CAPACITY);
        let (events, _) = broadcast::channel(options.event_capacity);
        let (state_tx, state_rx) = watch::channel(controller.state());

        let session = MatchSession {
            controller,
            options,
            timer: None,
            next_generation: 0,
            tick_tx,
            events: events.clone(),
            state: state_tx,
        };
        tokio::spawn(session.run(request_rx, tick_rx));

        MatchHandle {
            requests: request_tx,
            events,
            state: state_rx,
        }
    }

    async fn run(
        mut self,
        mut requests: mpsc::Receiver<SessionRequest>,
        mut ticks: mpsc::Receiver<u64>,
    ) {
        debug!("match session started");
        loop {
            tokio::select! {
                request = requests.recv() => match request {
                    Some(SessionRequest::Command { command, reply }) => {
                        let state = self.apply(command);
                        let _ = reply.send(state);
                    }
                    Some(SessionRequest::Shutdown) | None => break,
                },
                Some(generation) = ticks.recv() => self.on_timer_tick(generation),
            }
        }
        self.release_timer("shutdown");
        debug!("match session stopped");
    }

    fn apply(&mut self, command: MatchCommand) -> MatchState {
        let event = self.controller.apply(command);
        debug!(command = command.name(), "applied match command");
        self.sync_timer();

        if let Some(event) = event {
            info!(?event, "match notification");
            let _ = self.events.send(event);
        }

        let state = self.controller.state();
        self.state.send_replace(state);
        state
    }

    fn on_timer_tick(&mut self, generation: u64) {
        let current = self.timer.as_ref().map(TickTimer::generation);
        if current != Some(generation) {
            trace!(generation, ?current, "dropping stale tick");
            return;
        }
        self.apply(MatchCommand::Tick);
    }

    /// Keeps exactly one tick timer alive while the clock runs and none otherwise.
    fn sync_timer(&mut self) {
        match (self.controller.timer_running(), self.timer.is_some()) {
            (true, false) => {
                self.next_generation += 1;
                self.timer = Some(TickTimer::spawn(
                    self.next_generation,
                    self.options.tick_period,
                    self.tick_tx.clone(),
                ));
            }
            (false, true) => {
                let reason = if self.controller.time_remaining_secs() == 0 {
                    "expired"
                } else {
                    "stopped"
                };
                self.release_timer(reason);
            }
            _ => {}
        }
    }

    fn release_timer(&mut self, reason: &'static str) {
        if let Some(timer) = self.timer.take() {
            timer.release(reason);
        }
    }
}

/// Cloneable handle the presentation layer uses to drive and observe a session.
#[derive(Clone)]
pub struct MatchHandle {
    requests: mpsc::Sender<SessionRequest>,
    events: broadcast::Sender<MatchEvent>,
    state: watch::Receiver<MatchState>,
}

impl MatchHandle {
    /// Queues a command and waits until it has been applied.
    ///
    /// Returns the match state right after the command.
    pub async fn send(&self, command: MatchCommand) -> Result<MatchState, SessionError> {
        let (reply, applied) = oneshot::channel();
        self.requests
            .send(SessionRequest::Command { command, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        applied.await.map_err(|_| SessionError::Closed)
    }

    pub async fn increment_score(&self, team: Team) -> Result<MatchState, SessionError> {
        self.send(MatchCommand::IncrementScore { team }).await
    }

    pub async fn decrement_score(&self, team: Team) -> Result<MatchState, SessionError> {
        self.send(MatchCommand::DecrementScore { team }).await
    }

    pub async fn start_timer(&self) -> Result<MatchState, SessionError> {
        self.send(MatchCommand::StartTimer).await
    }

    pub async fn stop_timer(&self) -> Result<MatchState, SessionError> {
        self.send(MatchCommand::StopTimer).await
    }

    pub async fn reset(&self) -> Result<MatchState, SessionError> {
        self.send(MatchCommand::Reset).await
    }

    /// Advances the clock by one second outside of the timer.
    pub async fn tick(&self) -> Result<MatchState, SessionError> {
        self.send(MatchCommand::Tick).await
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<MatchEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> MatchState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<MatchState> {
        self.state.clone()
    }

    /// Asks the session to stop. The tick timer is released before the task exits.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.requests
            .send(SessionRequest::Shutdown)
            .await
            .map_err(|_| SessionError::Closed)
    }

    /// Resolves once the session task has exited.
    pub async fn closed(&self) {
        self.requests.closed().await
    }

    pub fn is_closed(&self) -> bool {
        self.requests.is_closed()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
