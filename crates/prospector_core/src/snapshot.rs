//! The per-turn view of the game handed to the planner.

use serde::{Deserialize, Serialize};

use crate::constants::GameConstants;
use crate::entities::{Player, PlayerId};
use crate::error::{GameError, Result};
use crate::grid::GameMap;

/// Full game state for one turn, from one player's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    turn_number: u32,
    my_id: PlayerId,
    me_index: usize,
    players: Vec<Player>,
    map: GameMap,
    constants: GameConstants,
}

impl Snapshot {
    /// Assemble a snapshot.
    ///
    /// Map occupancy is rebuilt from every player's ships, so callers only
    /// need to supply halite.
    pub fn new(
        turn_number: u32,
        my_id: PlayerId,
        players: Vec<Player>,
        mut map: GameMap,
        constants: GameConstants,
    ) -> Result<Self> {
        let me_index = players
            .iter()
            .position(|p| p.id == my_id)
            .ok_or(GameError::UnknownPlayer(my_id.0))?;

        map.clear_occupancy();
        for ship in players.iter().flat_map(|p| p.ships.iter()) {
            if ship.halite > constants.max_halite {
                return Err(GameError::CargoOverCapacity {
                    ship: ship.id.0,
                    halite: ship.halite,
                    capacity: constants.max_halite,
                });
            }
            map.mark_occupied(ship.position, ship.id);
        }

        Ok(Self {
            turn_number,
            my_id,
            me_index,
            players,
            map,
            constants,
        })
    }

    /// Current turn, starting at 1.
    #[must_use]
    pub const fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// The player this snapshot is for.
    #[must_use]
    pub const fn my_id(&self) -> PlayerId {
        self.my_id
    }

    /// The player this snapshot is for.
    #[must_use]
    pub fn me(&self) -> &Player {
        &self.players[self.me_index]
    }

    /// All players, including [`Self::me`].
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The map with this turn's occupancy.
    #[must_use]
    pub const fn map(&self) -> &GameMap {
        &self.map
    }

    /// Rules constants.
    #[must_use]
    pub const fn constants(&self) -> &GameConstants {
        &self.constants
    }
}
