//! Engine-provided game constants.
//!
//! The engine sends these as a JSON object on the first handshake line.
//! Keys the bot does not know are ignored; missing keys fall back to the
//! standard game values.

use serde::{Deserialize, Serialize};

/// Rules constants for one game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConstants {
    /// Cost of building a ship.
    #[serde(rename = "NEW_ENTITY_ENERGY_COST")]
    pub ship_cost: u32,
    /// Cost of building a dropoff.
    #[serde(rename = "DROPOFF_COST")]
    pub dropoff_cost: u32,
    /// Ship hold capacity.
    #[serde(rename = "MAX_ENERGY")]
    pub max_halite: u32,
    /// Last turn of the game.
    #[serde(rename = "MAX_TURNS")]
    pub max_turns: u32,
    /// A ship staying still mines `1 / extract_ratio` of its cell.
    #[serde(rename = "EXTRACT_RATIO")]
    pub extract_ratio: u32,
    /// Leaving a cell costs `1 / move_cost_ratio` of its halite.
    #[serde(rename = "MOVE_COST_RATIO")]
    pub move_cost_ratio: u32,
    /// Whether inspiration is active.
    #[serde(rename = "INSPIRATION_ENABLED")]
    pub inspiration_enabled: bool,
    /// Radius counted for inspiration.
    #[serde(rename = "INSPIRATION_RADIUS")]
    pub inspiration_radius: u32,
    /// Enemy ships needed within the radius to inspire.
    #[serde(rename = "INSPIRATION_SHIP_COUNT")]
    pub inspiration_ship_count: u32,
    /// Extract ratio while inspired.
    #[serde(rename = "INSPIRED_EXTRACT_RATIO")]
    pub inspired_extract_ratio: u32,
    /// Bonus multiplier while inspired.
    #[serde(rename = "INSPIRED_BONUS_MULTIPLIER")]
    pub inspired_bonus_multiplier: f64,
    /// Move cost ratio while inspired.
    #[serde(rename = "INSPIRED_MOVE_COST_RATIO")]
    pub inspired_move_cost_ratio: u32,
}

impl Default for GameConstants {
    fn default() -> Self {
        Self {
            ship_cost: 1000,
            dropoff_cost: 4000,
            max_halite: 1000,
            max_turns: 400,
            extract_ratio: 4,
            move_cost_ratio: 10,
            inspiration_enabled: true,
            inspiration_radius: 4,
            inspiration_ship_count: 2,
            inspired_extract_ratio: 4,
            inspired_bonus_multiplier: 2.0,
            inspired_move_cost_ratio: 10,
        }
    }
}

impl GameConstants {
    /// Parse the engine's constants line.
    pub fn from_json(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    /// Override the game length.
    #[must_use]
    pub const fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Override the ship cost.
    #[must_use]
    pub const fn with_ship_cost(mut self, ship_cost: u32) -> Self {
        self.ship_cost = ship_cost;
        self
    }
}
