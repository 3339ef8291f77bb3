//! Game metrics collection.
//!
//! Per-game numbers for comparing strategy configurations across many
//! seeds, and the batch summary built from them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Complete metrics for a single game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameMetrics {
    /// Unique game identifier.
    pub game_id: String,
    /// Scenario name.
    pub scenario: String,
    /// Seed used for map generation.
    pub seed: u64,
    /// Turns played.
    pub turns: u32,
    /// Halite on the map at the start.
    pub initial_map_halite: u64,
    /// Halite left on the map at the end.
    pub final_map_halite: u64,
    /// Player with the highest bank (None = tie).
    pub winner: Option<u32>,
    /// Per-player metrics, indexed by player id.
    pub players: Vec<PlayerMetrics>,
}

impl GameMetrics {
    /// Create metrics for a new game.
    #[must_use]
    pub fn new(game_id: impl Into<String>, scenario: impl Into<String>, seed: u64) -> Self {
        Self {
            game_id: game_id.into(),
            scenario: scenario.into(),
            seed,
            ..Default::default()
        }
    }

    /// Record the outcome: winner is the unique highest bank.
    pub fn finalize(&mut self, turns: u32, final_map_halite: u64) {
        self.turns = turns;
        self.final_map_halite = final_map_halite;

        let best = self.players.iter().map(|p| p.final_halite).max();
        let mut leaders = self
            .players
            .iter()
            .filter(|p| Some(p.final_halite) == best);
        self.winner = match (leaders.next(), leaders.next()) {
            (Some(leader), None) => Some(leader.player),
            _ => None,
        };
    }

    /// Claim conflicts over all players.
    #[must_use]
    pub fn total_claim_conflicts(&self) -> u32 {
        self.players.iter().map(|p| p.claim_conflicts).sum()
    }

    /// Save to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }
}

/// Metrics for one player in a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMetrics {
    /// Player id.
    pub player: u32,
    /// Bank at the end of the game.
    pub final_halite: u32,
    /// Ships spawned.
    pub ships_built: u32,
    /// Ships destroyed in collisions.
    pub ships_lost: u32,
    /// Most ships alive at once.
    pub peak_ships: u32,
    /// Halite extracted from the map.
    pub halite_mined: u64,
    /// Halite delivered to the shipyard.
    pub halite_deposited: u64,
    /// Halite burned paying move costs.
    pub halite_spent_moving: u64,
    /// Turns on which two of this player's ships planned the same cell.
    pub claim_conflicts: u32,
}

impl PlayerMetrics {
    /// Empty metrics for a player.
    #[must_use]
    pub fn new(player: u32) -> Self {
        Self {
            player,
            ..Default::default()
        }
    }
}

/// Summary statistics across multiple games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Total games played.
    pub total_games: u32,
    /// Games won by each player id.
    pub wins_by_player: Vec<u32>,
    /// Games without a unique winner.
    pub draws: u32,
    /// Average final bank per player id.
    pub avg_final_halite: Vec<f64>,
    /// Lowest final bank seen for any player.
    pub min_final_halite: u32,
    /// Highest final bank seen for any player.
    pub max_final_halite: u32,
    /// Average ships built per player per game.
    pub avg_ships_built: f64,
    /// Average ships lost per player per game.
    pub avg_ships_lost: f64,
    /// Average share of the initial map halite that was deposited.
    pub avg_collection_rate: f64,
    /// Claim conflicts across all games (should be zero).
    pub total_claim_conflicts: u32,
}

impl BatchSummary {
    /// Calculate summary from a list of game metrics.
    #[must_use]
    pub fn from_games(games: &[GameMetrics]) -> Self {
        if games.is_empty() {
            return Self::default();
        }

        let player_count = games.iter().map(|g| g.players.len()).max().unwrap_or(0);
        let mut summary = Self {
            total_games: games.len() as u32,
            wins_by_player: vec![0; player_count],
            min_final_halite: u32::MAX,
            ..Default::default()
        };

        let mut final_sums = vec![0u64; player_count];
        let mut final_counts = vec![0u32; player_count];
        let mut built = 0u64;
        let mut lost = 0u64;
        let mut player_games = 0u64;
        let mut collection_sum = 0.0;

        for game in games {
            match game.winner {
                Some(w) if (w as usize) < player_count => summary.wins_by_player[w as usize] += 1,
                _ => summary.draws += 1,
            }

            let mut deposited = 0u64;
            for (i, p) in game.players.iter().enumerate() {
                final_sums[i] += u64::from(p.final_halite);
                final_counts[i] += 1;
                summary.min_final_halite = summary.min_final_halite.min(p.final_halite);
                summary.max_final_halite = summary.max_final_halite.max(p.final_halite);
                built += u64::from(p.ships_built);
                lost += u64::from(p.ships_lost);
                player_games += 1;
                deposited += p.halite_deposited;
            }
            if game.initial_map_halite > 0 {
                collection_sum += deposited as f64 / game.initial_map_halite as f64;
            }
            summary.total_claim_conflicts += game.total_claim_conflicts();
        }

        summary.avg_final_halite = final_sums
            .iter()
            .zip(&final_counts)
            .map(|(&sum, &count)| sum as f64 / f64::from(count.max(1)))
            .collect();
        if player_games > 0 {
            summary.avg_ships_built = built as f64 / player_games as f64;
            summary.avg_ships_lost = lost as f64 / player_games as f64;
        } else {
            summary.min_final_halite = 0;
        }
        summary.avg_collection_rate = collection_sum / games.len() as f64;

        summary
    }
}

pub(crate) fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
