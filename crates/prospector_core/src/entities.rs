//! Ships, shipyards, players, and the commands issued to them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, Position};

/// Engine-assigned player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Engine-assigned ship identifier, stable for the ship's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mobile collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    /// Identifier.
    pub id: ShipId,
    /// Owning player.
    pub owner: PlayerId,
    /// Current cell.
    pub position: Position,
    /// Halite in the hold.
    pub halite: u32,
}

impl Ship {
    /// Create a new ship.
    #[must_use]
    pub const fn new(id: ShipId, owner: PlayerId, position: Position, halite: u32) -> Self {
        Self {
            id,
            owner,
            position,
            halite,
        }
    }

    /// Command this ship to take one step.
    #[must_use]
    pub const fn move_to(&self, direction: Direction) -> Command {
        Command::Move {
            ship: self.id,
            direction,
        }
    }

    /// Command this ship to stay in place.
    #[must_use]
    pub const fn stay_still(&self) -> Command {
        self.move_to(Direction::Still)
    }
}

/// A player's base: deposit point and spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipyard {
    /// Owning player.
    pub owner: PlayerId,
    /// Fixed cell.
    pub position: Position,
}

/// A participant and everything it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Identifier.
    pub id: PlayerId,
    /// Banked halite available for spending.
    pub halite: u32,
    /// Base.
    pub shipyard: Shipyard,
    /// Ships alive this turn.
    pub ships: Vec<Ship>,
}

impl Player {
    /// Create a player with no ships.
    #[must_use]
    pub fn new(id: PlayerId, shipyard_position: Position, halite: u32) -> Self {
        Self {
            id,
            halite,
            shipyard: Shipyard {
                owner: id,
                position: shipyard_position,
            },
            ships: Vec::new(),
        }
    }
}

/// A single instruction sent back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Move (or stay, with [`Direction::Still`]).
    Move {
        /// Ship being moved.
        ship: ShipId,
        /// Step to take.
        direction: Direction,
    },
    /// Build a new ship at the shipyard.
    Spawn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_commands() {
        let ship = Ship::new(ShipId(4), PlayerId(0), Position::new(1, 2), 0);
        assert_eq!(
            ship.move_to(Direction::East),
            Command::Move {
                ship: ShipId(4),
                direction: Direction::East
            }
        );
        assert_eq!(
            ship.stay_still(),
            Command::Move {
                ship: ShipId(4),
                direction: Direction::Still
            }
        );
    }

    #[test]
    fn test_new_player_owns_its_shipyard() {
        let mut player = Player::new(PlayerId(1), Position::new(8, 8), 5000);
        player
            .ships
            .push(Ship::new(ShipId(7), PlayerId(1), Position::new(8, 9), 12));
        assert_eq!(player.shipyard.owner, PlayerId(1));
        assert_eq!(player.shipyard.position, Position::new(8, 8));
        assert_eq!(player.halite, 5000);
    }
}
