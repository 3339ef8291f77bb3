//! Batch game runner.
//!
//! Runs consecutive seeds of one scenario in parallel using rayon. Games
//! are independent; nothing is shared across threads except the progress
//! counter.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::game_runner::{run_game, GameConfig};
use crate::metrics::{save_json, BatchSummary, GameMetrics};
use crate::scenario::Scenario;

/// Configuration for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Scenario to run.
    pub scenario: Scenario,
    /// Number of games to run.
    pub game_count: u32,
    /// Maximum parallel games (0 = use rayon default).
    pub parallel_games: u32,
    /// First seed; game `i` uses `seed_start + i`.
    pub seed_start: u64,
    /// Output directory for results.
    pub output_dir: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::default(),
            game_count: 100,
            parallel_games: 0,
            seed_start: 0,
            output_dir: PathBuf::from("results"),
        }
    }
}

impl BatchConfig {
    /// Create config for a scenario.
    #[must_use]
    pub fn new(scenario: Scenario, game_count: u32) -> Self {
        Self {
            scenario,
            game_count,
            ..Default::default()
        }
    }

    /// Set output directory.
    #[must_use]
    pub fn with_output(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Set seed start.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed_start = seed;
        self
    }
}

/// Results from a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// Configuration used.
    pub config: BatchConfig,
    /// Individual game metrics, in seed order.
    pub games: Vec<GameMetrics>,
    /// Aggregate summary.
    pub summary: BatchSummary,
    /// Total runtime.
    pub duration_seconds: f64,
    /// Errors encountered.
    pub errors: Vec<BatchError>,
}

impl BatchResults {
    /// Save results to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Load results from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }
}

/// A game that failed to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    /// Game index.
    pub game_index: u32,
    /// Seed used.
    pub seed: u64,
    /// Error message.
    pub message: String,
}

/// Run a batch of games.
pub fn run_batch(config: BatchConfig) -> BatchResults {
    let start = Instant::now();
    let completed = AtomicU32::new(0);

    info!(
        "Starting batch run: {} games of '{}'",
        config.game_count, config.scenario.name
    );

    if config.parallel_games > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel_games as usize)
            .build_global()
            .ok(); // Ignore if already set
    }

    let results: Vec<std::result::Result<GameMetrics, BatchError>> = (0..config.game_count)
        .into_par_iter()
        .map(|i| {
            let seed = config.seed_start.wrapping_add(u64::from(i));
            match run_game(GameConfig::new(config.scenario.clone(), seed)) {
                Ok(metrics) => {
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % 10 == 0 {
                        debug!("Progress: {}/{}", done, config.game_count);
                    }
                    Ok(metrics)
                }
                Err(e) => {
                    warn!("Game {} failed: {}", i, e);
                    Err(BatchError {
                        game_index: i,
                        seed,
                        message: e.to_string(),
                    })
                }
            }
        })
        .collect();

    let mut games = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(metrics) => games.push(metrics),
            Err(e) => errors.push(e),
        }
    }

    let summary = BatchSummary::from_games(&games);
    let duration_seconds = start.elapsed().as_secs_f64();

    info!(
        "Batch complete: {} games in {:.1}s ({:.1} games/sec)",
        games.len(),
        duration_seconds,
        games.len() as f64 / duration_seconds.max(f64::EPSILON)
    );

    BatchResults {
        config,
        games,
        summary,
        duration_seconds,
        errors,
    }
}

/// Run the same seed several times and check the metrics match.
pub fn verify_determinism(scenario: &Scenario, seed: u64, runs: u32) -> Result<bool> {
    let mut first: Option<GameMetrics> = None;
    for _ in 0..runs {
        let metrics = run_game(GameConfig::new(scenario.clone(), seed))?;
        match &first {
            Some(expected) if *expected != metrics => return Ok(false),
            Some(_) => {}
            None => first = Some(metrics),
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> Scenario {
        Scenario {
            name: "quick".to_string(),
            width: 16,
            height: 16,
            max_turns: 120,
            ..Scenario::default()
        }
    }

    #[test]
    fn test_batch_config_builder() {
        let config = BatchConfig::new(quick(), 500)
            .with_output(PathBuf::from("/tmp/results"))
            .with_seed(12345);

        assert_eq!(config.scenario.name, "quick");
        assert_eq!(config.game_count, 500);
        assert_eq!(config.seed_start, 12345);
    }

    #[test]
    fn test_run_batch_small() {
        let results = run_batch(BatchConfig::new(quick(), 4).with_seed(10));
        assert_eq!(results.games.len(), 4);
        assert!(results.errors.is_empty());
        let seeds: Vec<u64> = results.games.iter().map(|g| g.seed).collect();
        assert_eq!(seeds, vec![10, 11, 12, 13]);
        assert_eq!(results.summary.total_games, 4);
    }

    #[test]
    fn test_invalid_scenario_reports_errors() {
        let mut scenario = quick();
        scenario.players = 3;
        let results = run_batch(BatchConfig::new(scenario, 2));
        assert!(results.games.is_empty());
        assert_eq!(results.errors.len(), 2);
    }

    #[test]
    fn test_verify_determinism() {
        assert!(verify_determinism(&quick(), 12345, 3).unwrap());
    }

    #[test]
    fn test_batch_results_save_load() {
        let results = run_batch(BatchConfig::new(quick(), 2));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        results.save(&path).unwrap();
        assert!(path.exists());

        let loaded = BatchResults::load(&path).unwrap();
        assert_eq!(loaded.games, results.games);
        assert_eq!(loaded.config.scenario, results.config.scenario);
    }
}
