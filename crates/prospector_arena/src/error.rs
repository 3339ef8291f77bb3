//! Arena error types.

use std::path::PathBuf;

use prospector_core::prelude::GameError;

/// Errors raised while setting up or running arena games.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// The game model rejected the state (bad map size, unknown player).
    #[error("game state error: {0}")]
    Game(#[from] GameError),

    /// Scenario file not found.
    #[error("scenario file not found: {}", .0.display())]
    ScenarioNotFound(PathBuf),

    /// Scenario file could not be parsed.
    #[error("failed to parse scenario: {0}")]
    ScenarioParse(#[from] ron::error::SpannedError),

    /// Scenario values are out of range.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// Reading or writing results failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Results could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for arena operations.
pub type Result<T> = std::result::Result<T, ArenaError>;
