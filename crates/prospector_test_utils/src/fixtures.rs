//! Test fixtures and helpers.
//!
//! Builders for snapshots so tests can describe a board in a few lines.

use prospector_core::prelude::*;

/// Fluent builder for a [`Snapshot`].
///
/// Defaults: 32x32 empty map, turn 1, player 0 with its shipyard at the
/// map centre and 5000 halite, standard game constants.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    width: i32,
    height: i32,
    halite: Vec<(Position, u32)>,
    base_halite: u32,
    turn: u32,
    bank: u32,
    shipyard: Option<Position>,
    ships: Vec<(Position, u32)>,
    enemy_ships: Vec<Position>,
    constants: GameConstants,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            halite: Vec::new(),
            base_halite: 0,
            turn: 1,
            bank: 5000,
            shipyard: None,
            ships: Vec::new(),
            enemy_ships: Vec::new(),
            constants: GameConstants::default(),
        }
    }
}

impl SnapshotBuilder {
    /// Start from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map size.
    #[must_use]
    pub const fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Halite on every cell not set explicitly.
    #[must_use]
    pub const fn fill(mut self, halite: u32) -> Self {
        self.base_halite = halite;
        self
    }

    /// Halite on one cell.
    #[must_use]
    pub fn halite(mut self, x: i32, y: i32, halite: u32) -> Self {
        self.halite.push((Position::new(x, y), halite));
        self
    }

    /// Turn number.
    #[must_use]
    pub const fn turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    /// Banked halite of player 0.
    #[must_use]
    pub const fn bank(mut self, bank: u32) -> Self {
        self.bank = bank;
        self
    }

    /// Shipyard of player 0.
    #[must_use]
    pub const fn shipyard(mut self, x: i32, y: i32) -> Self {
        self.shipyard = Some(Position::new(x, y));
        self
    }

    /// Add a ship for player 0; ids are assigned in insertion order from 0.
    #[must_use]
    pub fn ship(mut self, x: i32, y: i32, halite: u32) -> Self {
        self.ships.push((Position::new(x, y), halite));
        self
    }

    /// Add a ship for player 1, whose shipyard sits at the origin.
    #[must_use]
    pub fn enemy_ship(mut self, x: i32, y: i32) -> Self {
        self.enemy_ships.push(Position::new(x, y));
        self
    }

    /// Rules constants.
    #[must_use]
    pub const fn constants(mut self, constants: GameConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Build the snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the map size is invalid.
    #[must_use]
    pub fn build(self) -> Snapshot {
        let mut map = GameMap::filled(self.width, self.height, self.base_halite)
            .expect("fixture map size must be positive");
        for (pos, halite) in &self.halite {
            map.set_halite(*pos, *halite);
        }

        let shipyard = self
            .shipyard
            .unwrap_or_else(|| Position::new(self.width / 2, self.height / 2));
        let mut me = Player::new(PlayerId(0), shipyard, self.bank);
        for (i, &(pos, halite)) in self.ships.iter().enumerate() {
            me.ships
                .push(Ship::new(ShipId(i as u32), PlayerId(0), pos, halite));
        }

        let mut players = vec![me];
        if !self.enemy_ships.is_empty() {
            let mut enemy = Player::new(PlayerId(1), Position::new(0, 0), 0);
            let first_id = self.ships.len() as u32;
            for (i, &pos) in self.enemy_ships.iter().enumerate() {
                enemy
                    .ships
                    .push(Ship::new(ShipId(first_id + i as u32), PlayerId(1), pos, 0));
            }
            players.push(enemy);
        }

        Snapshot::new(self.turn, PlayerId(0), players, map, self.constants)
            .expect("fixture player 0 is always present")
    }
}

/// Cell each ship ends the turn on, normalized, in processing order.
#[must_use]
pub fn destinations(snapshot: &Snapshot, plan: &TurnPlan) -> Vec<Position> {
    plan.assignments
        .iter()
        .map(|a| snapshot.map().normalize(a.destination()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let snap = SnapshotBuilder::new().build();
        assert_eq!(snap.map().width(), 32);
        assert_eq!(snap.me().shipyard.position, Position::new(16, 16));
        assert_eq!(snap.me().halite, 5000);
        assert_eq!(snap.players().len(), 1);
    }

    #[test]
    fn test_builder_ships_and_halite() {
        let snap = SnapshotBuilder::new()
            .size(8, 8)
            .fill(20)
            .halite(1, 1, 300)
            .ship(2, 2, 40)
            .enemy_ship(3, 3)
            .build();
        assert_eq!(snap.map().halite_at(Position::new(1, 1)), 300);
        assert_eq!(snap.map().halite_at(Position::new(0, 0)), 20);
        assert_eq!(snap.me().ships[0].id, ShipId(0));
        assert!(snap.map().is_occupied(Position::new(3, 3)));
        assert_eq!(snap.players()[1].ships[0].id, ShipId(1));
    }
}
