//! Greedy target selection.
//!
//! Returning ships target the base. Mining ships compare the yield of
//! staying one more turn with the best cardinal neighbor, net of the cost
//! of leaving the current cell, and only move for a clear improvement.

use crate::constants::GameConstants;
use crate::entities::Ship;
use crate::grid::{Direction, GameMap, Position};
use crate::math::{floor_div, scale_percent, Fixed};
use crate::state::UnitState;

/// Everything the planner knows about one ship while deciding its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitContext {
    /// The ship.
    pub ship: Ship,
    /// State after this turn's update.
    pub state: UnitState,
    /// Own shipyard position.
    pub base: Position,
    /// Halite burned leaving the current cell.
    pub move_cost: u32,
    /// Whether the hold covers [`Self::move_cost`].
    pub can_move: bool,
    /// Final-turns mode.
    pub endgame: bool,
}

impl UnitContext {
    /// Gather the per-ship facts from the map.
    #[must_use]
    pub fn new(
        map: &GameMap,
        ship: Ship,
        state: UnitState,
        base: Position,
        endgame: bool,
        constants: &GameConstants,
    ) -> Self {
        let move_cost = floor_div(map.halite_at(ship.position), constants.move_cost_ratio);
        Self {
            ship,
            state,
            base,
            move_cost,
            can_move: ship.halite >= move_cost,
            endgame,
        }
    }

    /// Whether the ship is heading home.
    #[must_use]
    pub fn is_returning(&self) -> bool {
        self.state == UnitState::Returning
    }

    /// Whether the ship is standing on its base.
    #[must_use]
    pub fn on_base(&self, map: &GameMap) -> bool {
        map.normalize(self.ship.position) == map.normalize(self.base)
    }
}

/// Where the ship wants to be at the end of this turn.
#[must_use]
pub fn select_target(
    map: &GameMap,
    unit: &UnitContext,
    yield_percent: u32,
    stay_bias_percent: u32,
) -> Position {
    if !unit.can_move {
        return unit.ship.position;
    }
    match unit.state {
        UnitState::Returning => unit.base,
        UnitState::Mining => best_mining_cell(
            map,
            unit.ship.position,
            unit.move_cost,
            yield_percent,
            stay_bias_percent,
        ),
    }
}

/// Current cell, or the neighbor whose net yield beats staying by the bias.
#[must_use]
pub fn best_mining_cell(
    map: &GameMap,
    position: Position,
    move_cost: u32,
    yield_percent: u32,
    stay_bias_percent: u32,
) -> Position {
    let gain_stay = mining_yield(map, position, yield_percent);
    let cost = Fixed::from_num(move_cost);

    let mut best_gain = Fixed::from_num(-1);
    let mut best_cell = position;
    for direction in Direction::CARDINALS {
        let cell = position.directional_offset(direction);
        let gain = mining_yield(map, cell, yield_percent) - cost;
        if gain > best_gain {
            best_gain = gain;
            best_cell = cell;
        }
    }

    if best_gain > scale_percent(gain_stay, stay_bias_percent) {
        best_cell
    } else {
        position
    }
}

/// Expected haul from one turn of mining `cell`.
fn mining_yield(map: &GameMap, cell: Position, yield_percent: u32) -> Fixed {
    scale_percent(Fixed::from_num(map.halite_at(cell)), yield_percent)
}
