//! The per-turn decision loop.
//!
//! Each turn the planner:
//!
//! 1. updates every ship's mining/returning state,
//! 2. orders ships so returning ships and then richer ships go first,
//! 3. picks a target and a collision-free step for each ship in order,
//!    claiming its destination cell as it goes,
//! 4. runs the spawn gate against the same claimed cells.
//!
//! Processing order is the collision tie-break: a ship planned earlier
//! wins any cell a later ship also wanted.
//!
//! # Example
//!
//! ```
//! use prospector_core::prelude::*;
//!
//! let mut me = Player::new(PlayerId(0), Position::new(4, 4), 5000);
//! me.ships.push(Ship::new(ShipId(0), PlayerId(0), Position::new(1, 1), 950));
//! let map = GameMap::filled(8, 8, 100).unwrap();
//! let snapshot = Snapshot::new(5, PlayerId(0), vec![me], map, GameConstants::default()).unwrap();
//!
//! let mut planner = TurnPlanner::new(StrategyConfig::default());
//! let plan = planner.plan_turn(&snapshot);
//! assert_eq!(plan.report.returning, 1);
//! ```

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::claims::ClaimedCells;
use crate::config::StrategyConfig;
use crate::entities::{Command, Ship, ShipId};
use crate::grid::{Direction, Position};
use crate::navigation;
use crate::snapshot::Snapshot;
use crate::spawn::{SpawnDecision, SpawnGate};
use crate::state::{UnitState, UnitStateTracker};
use crate::targeting::{self, UnitContext};

/// The decision made for one ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Ship.
    pub ship: ShipId,
    /// State used for the decision.
    pub state: UnitState,
    /// Cell at the start of the turn.
    pub from: Position,
    /// Where the ship wanted to go.
    pub target: Position,
    /// Step actually taken.
    pub direction: Direction,
}

impl Assignment {
    /// Cell the ship ends the turn on (not normalized).
    #[must_use]
    pub const fn destination(&self) -> Position {
        self.from.directional_offset(self.direction)
    }
}

/// Summary of one planned turn, for logs and the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn planned.
    pub turn: u32,
    /// Ships owned.
    pub ships: u32,
    /// Ships heading home.
    pub returning: u32,
    /// Ships ordered to step.
    pub moves: u32,
    /// Ships ordered to stay.
    pub stays: u32,
    /// Final-turns mode.
    pub endgame: bool,
    /// Stale state entries swept this turn.
    pub swept: u32,
    /// Spawn gate outcome.
    pub spawn: SpawnDecision,
}

/// Everything decided for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPlan {
    /// Commands for the engine, one per ship plus an optional spawn.
    pub commands: Vec<Command>,
    /// Per-ship decisions, in processing order.
    pub assignments: Vec<Assignment>,
    /// Turn summary.
    pub report: TurnReport,
}

/// Owns cross-turn state and plans each turn.
#[derive(Debug, Clone)]
pub struct TurnPlanner {
    config: StrategyConfig,
    states: UnitStateTracker,
    gate: SpawnGate,
}

impl TurnPlanner {
    /// Create a planner with no ship history.
    #[must_use]
    pub fn new(config: StrategyConfig) -> Self {
        Self {
            config,
            states: UnitStateTracker::new(),
            gate: SpawnGate::new(config),
        }
    }

    /// Tunables in use.
    #[must_use]
    pub const fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Ship states carried between turns.
    #[must_use]
    pub const fn states(&self) -> &UnitStateTracker {
        &self.states
    }

    /// Decide every ship's command and whether to spawn.
    pub fn plan_turn(&mut self, snapshot: &Snapshot) -> TurnPlan {
        let map = snapshot.map();
        let me = snapshot.me();
        let constants = snapshot.constants();
        let turn = snapshot.turn_number();
        let base = me.shipyard.position;
        let endgame = self.config.is_endgame(turn, constants.max_turns);

        let swept = self.states.retain_roster(me.ships.iter().map(|s| s.id)) as u32;

        for ship in &me.ships {
            self.states.update(
                ship,
                base,
                endgame,
                constants.max_halite,
                self.config.return_threshold_percent,
            );
        }

        let ordered = self.processing_order(&me.ships);

        let mut claims = ClaimedCells::new();
        let mut commands = Vec::with_capacity(ordered.len() + 1);
        let mut assignments = Vec::with_capacity(ordered.len());
        for ship in ordered {
            let state = self.states.state(ship.id);
            let unit = UnitContext::new(map, ship, state, base, endgame, constants);
            let target = targeting::select_target(
                map,
                &unit,
                self.config.yield_percent,
                self.config.stay_bias_percent,
            );
            let wanted = navigation::choose_direction(map, &claims, &unit, target);
            let direction = navigation::commit(map, &mut claims, ship.position, wanted);
            if direction != wanted {
                tracing::debug!(ship = %ship.id, ?wanted, "Destination already claimed, staying");
            }
            tracing::trace!(
                ship = %ship.id,
                ?state,
                from = %ship.position,
                target = %target,
                ?direction,
                halite = ship.halite,
                "Assigned"
            );

            commands.push(if direction == Direction::Still {
                ship.stay_still()
            } else {
                ship.move_to(direction)
            });
            assignments.push(Assignment {
                ship: ship.id,
                state,
                from: ship.position,
                target,
                direction,
            });
        }

        #[cfg(feature = "debug-validation")]
        {
            let mut seen = std::collections::HashSet::new();
            for assignment in &assignments {
                debug_assert!(
                    seen.insert(map.index(assignment.destination())),
                    "two ships share a destination on turn {turn}"
                );
            }
        }

        let spawn = self.gate.evaluate(snapshot, &claims, &self.states);
        match spawn {
            SpawnDecision::Spawn => {
                tracing::info!(turn, halite = me.halite, ships = me.ships.len(), "Spawning ship");
                commands.push(Command::Spawn);
            }
            SpawnDecision::Hold(reason) => {
                tracing::debug!(turn, %reason, "Not spawning");
            }
        }

        let moves = assignments
            .iter()
            .filter(|a| a.direction != Direction::Still)
            .count() as u32;
        let report = TurnReport {
            turn,
            ships: assignments.len() as u32,
            returning: assignments
                .iter()
                .filter(|a| a.state == UnitState::Returning)
                .count() as u32,
            moves,
            stays: assignments.len() as u32 - moves,
            endgame,
            swept,
            spawn,
        };

        TurnPlan {
            commands,
            assignments,
            report,
        }
    }

    /// Returning ships first, then by cargo, richest first.
    fn processing_order(&self, ships: &[Ship]) -> Vec<Ship> {
        let mut ordered = ships.to_vec();
        ordered.sort_by_key(|s| (Reverse(self.states.is_returning(s.id)), Reverse(s.halite)));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GameConstants;
    use crate::entities::{Player, PlayerId};
    use crate::grid::GameMap;
    use std::collections::HashSet;

    const BASE: Position = Position::new(8, 8);

    fn snapshot_with(
        turn: u32,
        ships: &[(u32, i32, i32, u32)],
        map: GameMap,
        bank: u32,
    ) -> Snapshot {
        let mut me = Player::new(PlayerId(0), BASE, bank);
        for &(id, x, y, halite) in ships {
            me.ships
                .push(Ship::new(ShipId(id), PlayerId(0), Position::new(x, y), halite));
        }
        Snapshot::new(turn, PlayerId(0), vec![me], map, GameConstants::default()).unwrap()
    }

    fn direction_of(plan: &TurnPlan, id: u32) -> Direction {
        plan.assignments
            .iter()
            .find(|a| a.ship == ShipId(id))
            .map(|a| a.direction)
            .unwrap()
    }

    #[test]
    fn test_returning_ships_processed_first_then_by_cargo() {
        let map = GameMap::filled(16, 16, 0).unwrap();
        let ships = [(1, 0, 0, 100), (2, 2, 2, 950), (3, 4, 4, 300), (4, 6, 6, 920)];
        let snap = snapshot_with(5, &ships, map, 0);
        let mut planner = TurnPlanner::new(StrategyConfig::default());
        let plan = planner.plan_turn(&snap);

        let order: Vec<u32> = plan.assignments.iter().map(|a| a.ship.0).collect();
        assert_eq!(order, vec![2, 4, 3, 1]);
        assert_eq!(plan.report.returning, 2);
    }

    #[test]
    fn test_contested_cell_goes_to_first_processed_ship() {
        // Both miners want (5, 5); the one carrying more is planned first.
        let mut map = GameMap::filled(16, 16, 0).unwrap();
        map.set_halite(Position::new(5, 5), 800);
        let ships = [(1, 4, 5, 100), (2, 6, 5, 500)];
        let snap = snapshot_with(5, &ships, map, 0);
        let mut planner = TurnPlanner::new(StrategyConfig::default());
        let plan = planner.plan_turn(&snap);

        assert_eq!(direction_of(&plan, 2), Direction::West);
        assert_eq!(direction_of(&plan, 1), Direction::Still);
    }

    #[test]
    fn test_destinations_never_collide() {
        let mut map = GameMap::filled(12, 12, 50).unwrap();
        map.set_halite(Position::new(3, 3), 900);
        let ships: Vec<(u32, i32, i32, u32)> = (0..12)
            .map(|i| (i, (i % 4) as i32 + 2, (i / 4) as i32 + 2, i * 80))
            .collect();
        let snap = snapshot_with(20, &ships, map, 0);
        let mut planner = TurnPlanner::new(StrategyConfig::default());
        let plan = planner.plan_turn(&snap);

        let mut seen = HashSet::new();
        for a in &plan.assignments {
            assert!(seen.insert(snap.map().index(a.destination())));
        }
        assert_eq!(plan.commands.len(), 12 + usize::from(plan.report.spawn.should_spawn()));
    }

    #[test]
    fn test_spawn_appended_last() {
        let map = GameMap::filled(32, 32, 0).unwrap();
        let snap = snapshot_with(10, &[], map, 5000);
        let mut planner = TurnPlanner::new(StrategyConfig::default());
        let plan = planner.plan_turn(&snap);
        assert_eq!(plan.commands, vec![Command::Spawn]);
        assert!(plan.report.spawn.should_spawn());
    }

    #[test]
    fn test_ship_leaving_base_unblocks_spawn() {
        let mut map = GameMap::filled(32, 32, 0).unwrap();
        map.set_halite(Position::new(9, 8), 200);
        let snap = snapshot_with(10, &[(1, 8, 8, 0)], map, 5000);
        let mut planner = TurnPlanner::new(StrategyConfig::default());
        let plan = planner.plan_turn(&snap);
        assert_eq!(direction_of(&plan, 1), Direction::East);
        // The ship is still on the base cell in the snapshot.
        assert!(!plan.report.spawn.should_spawn());
    }

    #[test]
    fn test_state_persists_and_orphans_are_swept() {
        let map = GameMap::filled(16, 16, 0).unwrap();
        let mut planner = TurnPlanner::new(StrategyConfig::default());

        let snap = snapshot_with(5, &[(1, 2, 2, 950), (2, 3, 3, 0)], map.clone(), 0);
        planner.plan_turn(&snap);
        assert!(planner.states().is_returning(ShipId(1)));

        // Cargo lost in transit; still returning because the ship has not reached base.
        let snap = snapshot_with(6, &[(1, 2, 3, 10)], map, 0);
        let plan = planner.plan_turn(&snap);
        assert!(planner.states().is_returning(ShipId(1)));
        assert_eq!(plan.report.swept, 1);
        assert_eq!(planner.states().len(), 1);
    }

    #[test]
    fn test_endgame_sends_everyone_home() {
        let map = GameMap::filled(16, 16, 100).unwrap();
        let snap = snapshot_with(371, &[(1, 2, 2, 0), (2, 8, 8, 0)], map, 0);
        let mut planner = TurnPlanner::new(StrategyConfig::default());
        let plan = planner.plan_turn(&snap);
        assert!(plan.report.endgame);
        assert_eq!(plan.report.returning, 2);
        assert_eq!(direction_of(&plan, 2), Direction::Still);
    }
}
