//! Proptest strategies for planner inputs.
//!
//! Generated boards are small so collisions between ships are common,
//! which is where the interesting planner behavior lives.

use proptest::prelude::*;

use prospector_core::prelude::*;

/// Parameters for one generated ship.
#[derive(Debug, Clone, Copy)]
pub struct ShipParams {
    /// Cell.
    pub position: Position,
    /// Cargo.
    pub halite: u32,
}

/// Halite values for a cell, skewed toward the low end like real maps.
pub fn arb_cell_halite() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => 0u32..100,
        2 => 100u32..500,
        1 => 500u32..1000,
    ]
}

/// Cargo values, including values around the return threshold.
pub fn arb_cargo() -> impl Strategy<Value = u32> {
    prop_oneof![
        0u32..200,
        200u32..880,
        880u32..=1000,
    ]
}

/// A ship somewhere on a `size`x`size` map.
pub fn arb_ship(size: i32) -> impl Strategy<Value = ShipParams> {
    (0..size, 0..size, arb_cargo()).prop_map(|(x, y, halite)| ShipParams {
        position: Position::new(x, y),
        halite,
    })
}

/// A snapshot with up to `max_ships` own ships on distinct cells.
pub fn arb_snapshot(size: i32, max_ships: usize) -> impl Strategy<Value = Snapshot> {
    let cells = (size * size) as usize;
    (
        proptest::collection::vec(arb_cell_halite(), cells),
        proptest::collection::vec(arb_ship(size), 0..max_ships),
        1u32..=400,
        0u32..6000,
    )
        .prop_map(move |(halite, ships, turn, bank)| {
            let map = GameMap::new(size, size, halite).expect("generated map matches its size");
            let base = Position::new(size / 2, size / 2);
            let mut me = Player::new(PlayerId(0), base, bank);
            let mut used = std::collections::HashSet::new();
            for params in ships {
                if used.insert(params.position) {
                    let id = ShipId(me.ships.len() as u32);
                    me.ships
                        .push(Ship::new(id, PlayerId(0), params.position, params.halite));
                }
            }
            Snapshot::new(turn, PlayerId(0), vec![me], map, GameConstants::default())
                .expect("player 0 is present")
        })
}
