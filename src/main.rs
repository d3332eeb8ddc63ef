//! Tank Battle demo entry point
//!
//! Replays a list of navigation requests (stage names) through the session
//! host, feeds every emitted command to the demo producer, and prints the
//! resulting scenes as ASCII.
//!
//! Usage: tank-battle [--settings PATH] [STAGE_NAME...]

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

use anyhow::{Context, Result};
use clap::Parser;

use tank_battle::lifecycle::{Command, SessionHost};
use tank_battle::scene::{AsciiCanvas, compose};
use tank_battle::snapshot::Snapshot;
use tank_battle::{Settings, demo};

#[derive(Parser, Debug)]
#[command(version, about = "Replays stage navigation through the session host", long_about = None)]
struct Args {
    /// Settings file (defaults are used when it is missing)
    #[arg(long, default_value = Settings::FILE_NAME)]
    settings: PathBuf,
    /// Stage names to navigate to, in order
    #[arg(default_values = ["1", "bogus", "2", "2"])]
    stages: Vec<String>,
}

/// Upstream side: apply pending commands to produce the next snapshot
fn drain_commands(
    rx: &Receiver<Command>,
    settings: &Settings,
    host: &SessionHost,
    snapshot: &mut Snapshot,
) -> Result<()> {
    while let Ok(command) = rx.try_recv() {
        println!("-> {}", command.to_json()?);
        let Command::GameStart { stage_index } = command;
        *snapshot = demo::start_stage(settings.seed, host.catalog(), stage_index, snapshot.version + 1);
    }
    Ok(())
}

fn print_scene(snapshot: &Snapshot, settings: &Settings) {
    let mut canvas = AsciiCanvas::new(settings.show_restricted_areas);
    compose(snapshot).render(&mut canvas);
    println!(
        "[v{} {} stage={}]",
        snapshot.version,
        snapshot.status.as_str(),
        snapshot.current_stage().unwrap_or("-")
    );
    println!("{}", canvas);
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Tank Battle (native) starting...");

    let args = Args::parse();
    let settings = Settings::load(&args.settings);
    let catalog = settings
        .catalog()
        .with_context(|| format!("bad stage list in {}", args.settings.display()))?;

    let mut host = SessionHost::new(catalog);
    let (mut tx, rx) = mpsc::channel();
    let mut snapshot = Snapshot::default();

    for requested in &args.stages {
        println!("navigate: {:?}", requested);
        host.observe_snapshot(&snapshot, Some(requested.as_str()), &mut tx);
        drain_commands(&rx, &settings, &host, &mut snapshot)?;
        // The new snapshot is another update for the host
        host.observe_snapshot(&snapshot, Some(requested.as_str()), &mut tx);
        drain_commands(&rx, &settings, &host, &mut snapshot)?;
        print_scene(&snapshot, &settings);
    }

    // Lose the game, then let the host restart the last requested stage
    snapshot = demo::game_over(&snapshot);
    print_scene(&snapshot, &settings);
    let last = args.stages.last().map(String::as_str);
    host.observe_snapshot(&snapshot, last, &mut tx);
    drain_commands(&rx, &settings, &host, &mut snapshot)?;
    print_scene(&snapshot, &settings);

    Ok(())
}
