//! Error types for the decision core.
//!
//! Planning itself never fails; these cover building a map or snapshot
//! from engine data and loading strategy configuration.

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for the decision core.
#[derive(Debug, Error)]
pub enum GameError {
    /// Map dimensions were zero or negative.
    #[error("Invalid map dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// Number of halite values did not match the map area.
    #[error("Map {width}x{height} needs {expected} cells, got {actual}")]
    CellCountMismatch {
        /// Map width.
        width: i32,
        /// Map height.
        height: i32,
        /// Cells required.
        expected: usize,
        /// Cells supplied.
        actual: usize,
    },

    /// A snapshot referenced a player that is not present.
    #[error("Unknown player: {0}")]
    UnknownPlayer(u32),

    /// A ship reported more cargo than a hold can carry.
    #[error("Ship {ship} carries {halite} halite, capacity is {capacity}")]
    CargoOverCapacity {
        /// Ship id.
        ship: u32,
        /// Reported cargo.
        halite: u32,
        /// Hold capacity.
        capacity: u32,
    },

    /// Failed to read a config file.
    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        /// Path to the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Config file was not valid RON.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// Config parsed but holds values the planner cannot use.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
