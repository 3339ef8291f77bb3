//! Prospector arena runner.
//!
//! Plays the planner against itself on generated maps.
//!
//! # Usage
//!
//! ```bash
//! # One game, metrics printed as JSON
//! cargo run -p prospector_arena -- run --seed 7 --players 2 --size 40
//!
//! # Batch over consecutive seeds
//! cargo run -p prospector_arena -- batch --count 500 --players 4 --output results/
//!
//! # Same seed several times, metrics must match
//! cargo run -p prospector_arena -- verify --seed 12345 --runs 5
//! ```
//!
//! Output (stdout): JSON metrics
//! Logs (stderr): progress and warnings

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prospector_arena::{
    run_batch, run_game, verify_determinism, BatchConfig, GameConfig, Result, Scenario,
};

#[derive(Parser)]
#[command(name = "prospector_arena")]
#[command(about = "Local arena for the Prospector planner")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Run {
        /// Map generation seed
        #[arg(long, default_value = "0")]
        seed: u64,

        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Write metrics to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Play a batch of games over consecutive seeds
    Batch {
        /// Number of games to run
        #[arg(short, long, default_value = "100")]
        count: u32,

        /// Starting seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Maximum parallel games (0 = auto)
        #[arg(short, long, default_value = "0")]
        parallel: u32,

        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,
    },

    /// Verify determinism by running the same seed multiple times
    Verify {
        /// Seed to verify
        #[arg(long, default_value = "12345")]
        seed: u64,

        /// Number of verification runs
        #[arg(short, long, default_value = "5")]
        runs: u32,

        #[command(flatten)]
        scenario: ScenarioArgs,
    },
}

/// Scenario selection shared by every subcommand.
#[derive(Args)]
struct ScenarioArgs {
    /// Scenario file (RON); the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of players (1, 2 or 4)
    #[arg(long)]
    players: Option<u32>,

    /// Square map size
    #[arg(long)]
    size: Option<i32>,

    /// Turns per game
    #[arg(long)]
    turns: Option<u32>,
}

impl ScenarioArgs {
    fn resolve(&self) -> Result<Scenario> {
        let mut scenario = match &self.config {
            Some(path) => Scenario::load(path)?,
            None => Scenario::default(),
        };
        if let Some(players) = self.players {
            scenario.players = players;
        }
        if let Some(size) = self.size {
            scenario.width = size;
            scenario.height = size;
        }
        if let Some(turns) = self.turns {
            scenario.max_turns = turns;
        }
        if self.config.is_none() && (self.players.is_some() || self.size.is_some()) {
            scenario.name = format!("{}p_{}", scenario.players, scenario.width);
        }
        scenario.validate()?;
        Ok(scenario)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr (stdout is for results)
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let outcome = match cli.command {
        Commands::Run {
            seed,
            scenario,
            output,
        } => cmd_run(seed, &scenario, output),
        Commands::Batch {
            count,
            seed,
            parallel,
            scenario,
            output,
        } => cmd_batch(count, seed, parallel, &scenario, output),
        Commands::Verify {
            seed,
            runs,
            scenario,
        } => cmd_verify(seed, runs, &scenario),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Play a single game.
fn cmd_run(seed: u64, args: &ScenarioArgs, output: Option<PathBuf>) -> Result<ExitCode> {
    let scenario = args.resolve()?;
    let metrics = run_game(GameConfig::new(scenario, seed))?;

    match output {
        Some(path) => {
            metrics.save(&path)?;
            tracing::info!("Metrics written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&metrics)?),
    }

    if metrics.total_claim_conflicts() > 0 {
        tracing::warn!(
            "{} turns with conflicting claims",
            metrics.total_claim_conflicts()
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Play a batch and save results.
fn cmd_batch(
    count: u32,
    seed: u64,
    parallel: u32,
    args: &ScenarioArgs,
    output: PathBuf,
) -> Result<ExitCode> {
    let scenario = args.resolve()?;
    let mut config = BatchConfig::new(scenario, count)
        .with_seed(seed)
        .with_output(output);
    config.parallel_games = parallel;

    let results = run_batch(config);
    let path = results.config.output_dir.join("batch_results.json");
    results.save(&path)?;

    let summary = &results.summary;
    eprintln!("\n=== Batch Summary ===");
    eprintln!("Games:            {}", summary.total_games);
    eprintln!("Errors:           {}", results.errors.len());
    for (player, avg) in summary.avg_final_halite.iter().enumerate() {
        let wins = summary.wins_by_player.get(player).copied().unwrap_or(0);
        eprintln!("Player {player}:         avg bank {avg:.0}, {wins} wins");
    }
    eprintln!("Draws:            {}", summary.draws);
    eprintln!("Ships built/lost: {:.1} / {:.1}", summary.avg_ships_built, summary.avg_ships_lost);
    eprintln!("Collection rate:  {:.1}%", summary.avg_collection_rate * 100.0);
    eprintln!("Claim conflicts:  {}", summary.total_claim_conflicts);
    eprintln!("Results:          {}", path.display());

    if results.errors.is_empty() && summary.total_claim_conflicts == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Replay one seed and compare metrics.
fn cmd_verify(seed: u64, runs: u32, args: &ScenarioArgs) -> Result<ExitCode> {
    let scenario = args.resolve()?;
    tracing::info!("Verifying determinism: seed {seed}, {runs} runs");

    if verify_determinism(&scenario, seed, runs)? {
        eprintln!("✓ Determinism verified: {runs} runs produced identical metrics");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("✗ Determinism FAILED: runs produced different metrics");
        Ok(ExitCode::FAILURE)
    }
}
