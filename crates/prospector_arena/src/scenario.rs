//! Arena scenario definitions.
//!
//! A scenario fixes everything about a game except the seed: map size,
//! player count, game length, and the strategy every player runs.
//! Scenarios load from RON files:
//!
//! ```ron
//! (
//!     name: "duel_40",
//!     width: 40,
//!     height: 40,
//!     players: 2,
//!     max_turns: 425,
//!     strategy: (endgame_turns: 25),
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use prospector_core::prelude::*;

use crate::error::{ArenaError, Result};

/// Player counts the map generator can place symmetrically.
pub const SUPPORTED_PLAYER_COUNTS: [u32; 3] = [1, 2, 4];

/// Fixed parameters for a family of games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Label copied into game metrics.
    pub name: String,
    /// Map width.
    pub width: i32,
    /// Map height.
    pub height: i32,
    /// Number of players: 1, 2 or 4.
    pub players: u32,
    /// Turns per game.
    pub max_turns: u32,
    /// Bank each player starts with.
    pub starting_halite: u32,
    /// Strategy run by every player.
    pub strategy: StrategyConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "solo_32".to_string(),
            width: 32,
            height: 32,
            players: 1,
            max_turns: 400,
            starting_halite: 5000,
            strategy: StrategyConfig::default(),
        }
    }
}

impl Scenario {
    /// Load from a RON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ArenaError::ScenarioNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let scenario: Self = ron::from_str(ron)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Standard two-player duel on a 40x40 map.
    #[must_use]
    pub fn duel() -> Self {
        Self {
            name: "duel_40".to_string(),
            width: 40,
            height: 40,
            players: 2,
            max_turns: 425,
            ..Self::default()
        }
    }

    /// Check that the scenario can be generated and played.
    pub fn validate(&self) -> Result<()> {
        if self.width < 8 || self.height < 8 {
            return Err(ArenaError::InvalidScenario(format!(
                "map must be at least 8x8, got {}x{}",
                self.width, self.height
            )));
        }
        if !SUPPORTED_PLAYER_COUNTS.contains(&self.players) {
            return Err(ArenaError::InvalidScenario(format!(
                "players must be one of {SUPPORTED_PLAYER_COUNTS:?}, got {}",
                self.players
            )));
        }
        if self.max_turns == 0 {
            return Err(ArenaError::InvalidScenario("max_turns must be positive".into()));
        }
        self.strategy.validate()?;
        Ok(())
    }

    /// Engine constants for this scenario.
    #[must_use]
    pub fn constants(&self) -> GameConstants {
        GameConstants::default().with_max_turns(self.max_turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        Scenario::default().validate().unwrap();
        Scenario::duel().validate().unwrap();
    }

    #[test]
    fn test_from_ron_with_defaults() {
        let scenario = Scenario::from_ron_str(
            "(name: \"quad\", width: 48, height: 48, players: 4, strategy: (endgame_turns: 20))",
        )
        .unwrap();
        assert_eq!(scenario.players, 4);
        assert_eq!(scenario.max_turns, 400);
        assert_eq!(scenario.strategy.endgame_turns, 20);
        assert_eq!(scenario.constants().max_turns, 400);
    }

    #[test]
    fn test_rejects_three_players() {
        let err = Scenario::from_ron_str("(players: 3)").unwrap_err();
        assert!(matches!(err, ArenaError::InvalidScenario(_)));
    }

    #[test]
    fn test_rejects_tiny_map() {
        let err = Scenario::from_ron_str("(width: 4, height: 4)").unwrap_err();
        assert!(matches!(err, ArenaError::InvalidScenario(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Scenario::load(Path::new("/nonexistent/scenario.ron")).unwrap_err();
        assert!(matches!(err, ArenaError::ScenarioNotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duel.ron");
        std::fs::write(&path, "(players: 2, width: 24, height: 24)").unwrap();
        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.width, 24);
        assert_eq!(scenario.players, 2);
    }
}
