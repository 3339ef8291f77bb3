//! Collision-avoiding local pathfinding.
//!
//! No search: each ship looks one step ahead, takes the first cardinal
//! step that gets it closer to its target without entering a cell that
//! holds a ship or was claimed earlier this turn, and otherwise stays.

use crate::claims::ClaimedCells;
use crate::grid::{Direction, GameMap, Position};
use crate::targeting::UnitContext;

/// Pick this turn's step toward `target`.
///
/// The result is not yet checked against claims made for the final cell;
/// see [`commit`].
#[must_use]
pub fn choose_direction(
    map: &GameMap,
    claims: &ClaimedCells,
    unit: &UnitContext,
    target: Position,
) -> Direction {
    let position = map.normalize(unit.ship.position);
    let target = map.normalize(target);

    let direction = if target == position {
        if unit.on_base(map) && !unit.endgame && unit.can_move {
            escape_base(map, claims, position)
        } else {
            Direction::Still
        }
    } else if unit.can_move {
        step_toward(map, claims, position, target, !unit.is_returning())
    } else {
        Direction::Still
    };

    if direction != Direction::Still && unit.ship.halite < unit.move_cost {
        tracing::debug!(ship = %unit.ship.id, "Cannot pay move cost, staying");
        return Direction::Still;
    }
    direction
}

/// Step off the base onto the richest free neighbor, or stay if boxed in.
#[must_use]
pub fn escape_base(map: &GameMap, claims: &ClaimedCells, position: Position) -> Direction {
    let mut best = Direction::Still;
    let mut best_halite: i64 = -1;
    for direction in Direction::CARDINALS {
        let cell = position.directional_offset(direction);
        if claims.is_blocked(map, cell) {
            continue;
        }
        let halite = i64::from(map.halite_at(cell));
        if halite > best_halite {
            best_halite = halite;
            best = direction;
        }
    }
    best
}

/// First unblocked cardinal step that shortens the distance to `target`.
///
/// With `accept_target` set, a step landing exactly on the target also
/// qualifies.
#[must_use]
pub fn step_toward(
    map: &GameMap,
    claims: &ClaimedCells,
    position: Position,
    target: Position,
    accept_target: bool,
) -> Direction {
    let current = map.distance(position, target);
    Direction::CARDINALS
        .into_iter()
        .find(|&direction| {
            let cell = position.directional_offset(direction);
            if claims.is_blocked(map, cell) {
                return false;
            }
            map.distance(cell, target) < current
                || (accept_target && map.normalize(cell) == target)
        })
        .unwrap_or(Direction::Still)
}

/// Final collision check: claim the destination, or stay if it was taken.
///
/// Staying always claims the origin, even when it is already claimed.
pub fn commit(
    map: &GameMap,
    claims: &mut ClaimedCells,
    position: Position,
    direction: Direction,
) -> Direction {
    let destination = position.directional_offset(direction);
    let direction = if claims.is_claimed(map, destination) {
        Direction::Still
    } else {
        direction
    };
    claims.claim(map, position.directional_offset(direction));
    direction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GameConstants;
    use crate::entities::{PlayerId, Ship, ShipId};
    use crate::state::UnitState;

    const BASE: Position = Position::new(8, 8);

    fn unit(
        map: &GameMap,
        x: i32,
        y: i32,
        halite: u32,
        state: UnitState,
        endgame: bool,
    ) -> UnitContext {
        let ship = Ship::new(ShipId(1), PlayerId(0), Position::new(x, y), halite);
        UnitContext::new(map, ship, state, BASE, endgame, &GameConstants::default())
    }

    #[test]
    fn test_stays_when_target_is_here() {
        let map = GameMap::filled(16, 16, 0).unwrap();
        let claims = ClaimedCells::new();
        let u = unit(&map, 3, 3, 0, UnitState::Mining, false);
        assert_eq!(choose_direction(&map, &claims, &u, Position::new(3, 3)), Direction::Still);
    }

    #[test]
    fn test_escapes_base_to_richest_free_neighbor() {
        let mut map = GameMap::filled(16, 16, 0).unwrap();
        map.set_halite(Position::new(8, 7), 100);
        map.set_halite(Position::new(9, 8), 300);
        map.set_halite(Position::new(7, 8), 500);
        map.mark_occupied(Position::new(7, 8), ShipId(9));
        let claims = ClaimedCells::new();
        let u = unit(&map, 8, 8, 0, UnitState::Mining, false);
        assert_eq!(choose_direction(&map, &claims, &u, BASE), Direction::East);
    }

    #[test]
    fn test_escape_skips_claimed_and_stays_when_boxed_in() {
        let mut map = GameMap::filled(16, 16, 0).unwrap();
        let mut claims = ClaimedCells::new();
        claims.claim(&map, Position::new(8, 7));
        claims.claim(&map, Position::new(8, 9));
        map.mark_occupied(Position::new(9, 8), ShipId(2));
        assert_eq!(escape_base(&map, &claims, BASE), Direction::West);

        claims.claim(&map, Position::new(7, 8));
        assert_eq!(escape_base(&map, &claims, BASE), Direction::Still);
    }

    #[test]
    fn test_no_escape_in_endgame() {
        let map = GameMap::filled(16, 16, 0).unwrap();
        let claims = ClaimedCells::new();
        let u = unit(&map, 8, 8, 0, UnitState::Returning, true);
        assert_eq!(choose_direction(&map, &claims, &u, BASE), Direction::Still);
    }

    #[test]
    fn test_steps_toward_target_in_cardinal_order() {
        let map = GameMap::filled(16, 16, 0).unwrap();
        let claims = ClaimedCells::new();
        let u = unit(&map, 3, 3, 0, UnitState::Returning, false);
        // Base is south-east: south comes before east in scan order.
        assert_eq!(choose_direction(&map, &claims, &u, BASE), Direction::South);
    }

    #[test]
    fn test_blocked_step_falls_through_to_next() {
        let mut map = GameMap::filled(16, 16, 0).unwrap();
        map.mark_occupied(Position::new(3, 4), ShipId(5));
        let claims = ClaimedCells::new();
        let u = unit(&map, 3, 3, 0, UnitState::Returning, false);
        assert_eq!(choose_direction(&map, &claims, &u, BASE), Direction::East);
    }

    #[test]
    fn test_fully_blocked_stays() {
        let mut map = GameMap::filled(16, 16, 0).unwrap();
        map.mark_occupied(Position::new(3, 4), ShipId(5));
        let mut claims = ClaimedCells::new();
        claims.claim(&map, Position::new(4, 3));
        let u = unit(&map, 3, 3, 0, UnitState::Returning, false);
        assert_eq!(choose_direction(&map, &claims, &u, BASE), Direction::Still);
    }

    #[test]
    fn test_step_toward_wraps() {
        let map = GameMap::filled(16, 16, 0).unwrap();
        let claims = ClaimedCells::new();
        let dir = step_toward(&map, &claims, Position::new(0, 0), Position::new(15, 0), false);
        assert_eq!(dir, Direction::West);
    }

    #[test]
    fn test_unaffordable_ship_stays() {
        let mut map = GameMap::filled(16, 16, 0).unwrap();
        map.set_halite(Position::new(3, 3), 500);
        let claims = ClaimedCells::new();
        let u = unit(&map, 3, 3, 10, UnitState::Returning, false);
        assert!(!u.can_move);
        assert_eq!(choose_direction(&map, &claims, &u, BASE), Direction::Still);
    }

    #[test]
    fn test_commit_falls_back_to_stay_on_claimed_destination() {
        let map = GameMap::filled(16, 16, 0).unwrap();
        let mut claims = ClaimedCells::new();
        let origin = Position::new(4, 4);

        assert_eq!(commit(&map, &mut claims, origin, Direction::East), Direction::East);
        assert!(claims.is_claimed(&map, Position::new(5, 4)));

        let other = Position::new(5, 5);
        assert_eq!(commit(&map, &mut claims, other, Direction::North), Direction::Still);
        assert!(claims.is_claimed(&map, other));
        assert_eq!(claims.len(), 2);
    }
}
