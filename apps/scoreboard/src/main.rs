use std::{
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use match_core::MatchSession;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod console;
mod input;
mod render;

use config::load_settings;
use console::{run_console, spawn_line_reader};
use render::{OutputMode, Renderer};

/// Terminal scoreboard for a 20 minute two-team match.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "scoreboard.toml")]
    config: PathBuf,
    /// Milliseconds between clock ticks; 1000 plays in real time.
    #[arg(long)]
    tick_millis: Option<u64>,
    /// Print state and notifications as JSON lines.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = load_settings(&args.config)?;
    let mut settings = loaded.settings;
    if let Some(tick_millis) = args.tick_millis.filter(|v| *v > 0) {
        settings.tick_millis = tick_millis;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(io::stderr)
        .init();
    for warning in &loaded.warnings {
        warn!("{warning}");
    }
    info!(tick_millis = settings.tick_millis, "starting scoreboard");

    let handle = MatchSession::spawn(settings.session_options());
    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };
    let mut renderer = Renderer::new(mode);
    let mut stdout = io::stdout().lock();

    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    let lines =
        spawn_line_reader(BufReader::new(io::stdin())).context("failed to start input reader")?;

    run_console(
        handle,
        lines,
        &mut stdout,
        &mut renderer,
        ctrl_c,
    )
    .await?;

    info!("scoreboard closed");
    Ok(())
}
