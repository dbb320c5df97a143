//! Interactive loop connecting stdin-style input to a match session.

use std::{
    io::{self, BufRead, Write},
    thread,
};

use anyhow::{Context, Result};
use match_core::MatchHandle;
use shared::protocol::MatchEvent;
use tokio::sync::{
    broadcast::{self, error::RecvError, error::TryRecvError},
    mpsc,
};
use tracing::{debug, warn};

use crate::{
    input::{parse_input, ConsoleInput, HELP},
    render::Renderer,
};

const INPUT_QUEUE_CAPACITY: usize = 16;

/// Reads lines on a dedicated OS thread and forwards them over a channel.
///
/// The thread is detached: a read blocked on a terminal never holds up runtime
/// shutdown, and the thread ends at end of input or once the receiver is gone.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<mpsc::Receiver<io::Result<String>>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(INPUT_QUEUE_CAPACITY);
    thread::Builder::new()
        .name("console-input".into())
        .spawn(move || {
            for line in reader.lines() {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Runs until `quit`, end of input, or `shutdown` resolves, then shuts the session
/// down so its tick timer is released. The session is shut down on errors too.
pub async fn run_console<W, S>(
    handle: MatchHandle,
    lines: mpsc::Receiver<io::Result<String>>,
    out: &mut W,
    renderer: &mut Renderer,
    shutdown: S,
) -> Result<()>
where
    W: Write,
    S: std::future::Future<Output = ()>,
{
    let outcome = console_loop(&handle, lines, out, renderer, shutdown).await;

    // A session that is already gone needs no shutdown.
    let _ = handle.shutdown().await;
    handle.closed().await;
    outcome?;
    out.flush()?;
    Ok(())
}

async fn console_loop<W, S>(
    handle: &MatchHandle,
    mut lines: mpsc::Receiver<io::Result<String>>,
    out: &mut W,
    renderer: &mut Renderer,
    shutdown: S,
) -> Result<()>
where
    W: Write,
    S: std::future::Future<Output = ()>,
{
    let mut events = handle.subscribe_events();
    let mut state = handle.watch_state();
    tokio::pin!(shutdown);

    renderer.board(out, &state.borrow_and_update())?;
    out.flush()?;

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    debug!("console input closed");
                    break;
                };
                let line = line.context("failed to read console input")?;
                match parse_input(&line) {
                    Ok(ConsoleInput::Command(command)) => {
                        let applied = handle.send(command).await?;
                        state.borrow_and_update();
                        renderer.state(out, &applied)?;
                        drain_events(&mut events, out, renderer)?;
                    }
                    Ok(ConsoleInput::State) => renderer.board(out, &handle.snapshot())?,
                    Ok(ConsoleInput::Help) => renderer.message(out, HELP)?,
                    Ok(ConsoleInput::Quit) => break,
                    Err(err) => renderer.message(out, &format!("error: {err}"))?,
                }
            }
            changed = state.changed() => {
                if changed.is_err() {
                    warn!("match session ended unexpectedly");
                    break;
                }
                let current = *state.borrow_and_update();
                renderer.state(out, &current)?;
            }
            event = events.recv() => match event {
                Ok(event) => renderer.event(out, &event)?,
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "console fell behind match events"),
                Err(RecvError::Closed) => break,
            },
            _ = &mut shutdown => {
                debug!("console shutdown requested");
                break;
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn drain_events(
    events: &mut broadcast::Receiver<MatchEvent>,
    out: &mut impl Write,
    renderer: &mut Renderer,
) -> Result<()> {
    loop {
        match events.try_recv() {
            Ok(event) => renderer.event(out, &event)?,
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "console fell behind match events")
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
