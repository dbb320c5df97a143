use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Periodic tick source for one running stretch of the match clock.
///
/// Each acquisition gets a fresh generation number which is attached to every tick
/// it emits. The task is aborted on [`TickTimer::release`] or on drop, so a timer
/// can never outlive the handle that owns it.
pub struct TickTimer {
    generation: u64,
    task: JoinHandle<()>,
}

impl TickTimer {
    /// Spawns the ticking task. The first tick fires one `period` after the call.
    ///
    /// A zero `period` is raised to one millisecond.
    pub fn spawn(generation: u64, period: Duration, ticks: mpsc::Sender<u64>) -> Self {
        let period = period.max(Duration::from_millis(1));
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(generation).await.is_err() {
                    break;
                }
            }
        });
        debug!(generation, ?period, "acquired tick timer");
        Self { generation, task }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn release(self, reason: &'static str) {
        debug!(generation = self.generation, reason, "released tick timer");
        drop(self);
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "tests/timer_tests.rs"]
mod tests;
