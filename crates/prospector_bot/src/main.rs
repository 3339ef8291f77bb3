//! Prospector bot binary.
//!
//! Speaks the Halite III protocol on stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! # Run under the engine
//! halite --replay-directory replays/ "target/release/prospector" "target/release/prospector"
//!
//! # Custom strategy tunables and verbose logs
//! prospector 42 --config strategy.ron --log-dir logs --verbose
//! ```
//!
//! # Output
//!
//! stdout: command lines for the engine
//! `<log-dir>/bot-<id>.log`: tracing output

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use prospector_bot::{logging, ProtocolError, Session};
use prospector_core::prelude::{GameError, StrategyConfig, TurnPlanner};

#[derive(Parser)]
#[command(name = "prospector")]
#[command(about = "Greedy halite collection bot")]
#[command(version)]
struct Cli {
    /// Run seed, logged as the run identifier (default: wall-clock seconds)
    seed: Option<u64>,

    /// Strategy tunables (RON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the per-player log file
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,

    /// Log per-ship decisions
    #[arg(short, long)]
    verbose: bool,

    /// Do not write a log file
    #[arg(long)]
    no_log: bool,

    /// Name announced to the engine
    #[arg(long, default_value = "Prospector")]
    name: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Bot stopped");
            eprintln!("prospector: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum BotError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Config(#[from] GameError),
    #[error("cannot open log file: {0}")]
    Log(#[source] io::Error),
}

fn run(cli: &Cli) -> Result<(), BotError> {
    let config = match &cli.config {
        Some(path) => StrategyConfig::load(path)?,
        None => StrategyConfig::default(),
    };
    let seed = cli.seed.unwrap_or_else(wall_clock_seed);

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    let mut session = Session::handshake(stdin, stdout)?;

    if !cli.no_log {
        logging::init_file_logging(&cli.log_dir, session.my_id(), cli.verbose)
            .map_err(BotError::Log)?;
    }

    let start = session.game_start();
    tracing::info!(
        player = %start.my_id,
        seed,
        width = start.map.width(),
        height = start.map.height(),
        players = start.shipyards.len(),
        max_turns = start.constants.max_turns,
        "Game started"
    );

    let mut planner = TurnPlanner::new(config);
    session.ready(&cli.name)?;

    let mut turns = 0u32;
    while let Some(snapshot) = session.receive_snapshot()? {
        let plan = planner.plan_turn(&snapshot);
        turns = snapshot.turn_number();
        if !session.submit(&plan.commands) {
            break;
        }
    }

    tracing::info!(turns, "Game over");
    Ok(())
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
