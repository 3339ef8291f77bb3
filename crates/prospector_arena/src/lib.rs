//! Local arena for the Prospector planner.
//!
//! Plays complete games without the engine so strategy changes can be
//! measured over many seeds:
//!
//! - **Deterministic**: maps come from a seeded generator and the planner
//!   has no randomness, so a seed always replays the same game
//! - **Self-checking**: every turn the arena checks that no player's plan
//!   sends two ships to one cell
//! - **Parallel**: batches spread games across threads with rayon
//!
//! Logs go to stderr; stdout carries JSON results.
//!
//! # Example
//!
//! ```bash
//! # One duel, metrics on stdout
//! cargo run -p prospector_arena -- run --players 2 --size 40 --seed 7
//!
//! # 200 seeds of a scenario file
//! cargo run -p prospector_arena -- batch --config duel.ron --count 200 --output results/
//! ```

pub mod batch;
pub mod error;
pub mod game_runner;
pub mod mapgen;
pub mod metrics;
pub mod scenario;

pub use batch::{run_batch, verify_determinism, BatchConfig, BatchResults};
pub use error::{ArenaError, Result};
pub use game_runner::{run_game, GameConfig, GameRunner};
pub use mapgen::{generate_map, GeneratedMap, MapConfig};
pub use metrics::{BatchSummary, GameMetrics, PlayerMetrics};
pub use scenario::Scenario;
