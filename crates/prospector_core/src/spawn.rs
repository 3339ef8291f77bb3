//! Spawn gate.
//!
//! Runs once per turn after every ship has claimed its destination. A new
//! ship is built only when the fleet is under its cap, the game is not too
//! close to the end, the bank covers the cost plus a phase-dependent
//! reserve, the base cell is free, and few returning ships are crowding
//! the base.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::claims::ClaimedCells;
use crate::config::StrategyConfig;
use crate::snapshot::Snapshot;
use crate::state::UnitStateTracker;

/// Why the gate declined to spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldReason {
    /// The fleet is already at the cap for this map size.
    ShipCap {
        /// Ships owned.
        ships: u32,
        /// Cap.
        cap: u32,
    },
    /// Too few turns remain for a new ship to pay for itself.
    TooLate {
        /// Current turn.
        turn: u32,
        /// Last turn on which spawning is allowed.
        last_turn: u32,
    },
    /// The bank is below cost plus reserve.
    Saving {
        /// Halite banked.
        available: u32,
        /// Cost plus reserve.
        needed: u32,
    },
    /// A ship is on, or will move onto, the base cell.
    BaseBlocked,
    /// Too many returning ships near the base.
    Congested {
        /// Returning ships near the base.
        nearby: u32,
        /// Allowed maximum.
        cap: u32,
    },
}

impl fmt::Display for HoldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShipCap { ships, cap } => write!(f, "ship cap reached ({ships}/{cap})"),
            Self::TooLate { turn, last_turn } => {
                write!(f, "too late to spawn (turn {turn} > {last_turn})")
            }
            Self::Saving { available, needed } => {
                write!(f, "saving ({available} < {needed})")
            }
            Self::BaseBlocked => write!(f, "base blocked"),
            Self::Congested { nearby, cap } => {
                write!(f, "base congested ({nearby} returning nearby > {cap})")
            }
        }
    }
}

/// Outcome of the spawn gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnDecision {
    /// Queue a spawn command.
    Spawn,
    /// Do not spawn this turn.
    Hold(HoldReason),
}

impl SpawnDecision {
    /// Whether a ship should be built.
    #[must_use]
    pub const fn should_spawn(&self) -> bool {
        matches!(self, Self::Spawn)
    }
}

/// Evaluates the spawn conditions against a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnGate {
    config: StrategyConfig,
}

impl SpawnGate {
    /// Create a gate using `config` thresholds.
    #[must_use]
    pub const fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    /// Check every condition in order and report the first that fails.
    #[must_use]
    pub fn evaluate(
        &self,
        snapshot: &Snapshot,
        claims: &ClaimedCells,
        states: &UnitStateTracker,
    ) -> SpawnDecision {
        match self.check(snapshot, claims, states) {
            Ok(()) => SpawnDecision::Spawn,
            Err(reason) => SpawnDecision::Hold(reason),
        }
    }

    fn check(
        &self,
        snapshot: &Snapshot,
        claims: &ClaimedCells,
        states: &UnitStateTracker,
    ) -> Result<(), HoldReason> {
        let map = snapshot.map();
        let me = snapshot.me();
        let constants = snapshot.constants();
        let turn = snapshot.turn_number();
        let area = map.area();

        let ships = me.ships.len() as u32;
        let cap = self.config.ship_cap(area);
        if ships >= cap {
            return Err(HoldReason::ShipCap { ships, cap });
        }

        let last_turn = constants
            .max_turns
            .saturating_sub(self.config.stop_buffer(area));
        if turn > last_turn {
            return Err(HoldReason::TooLate { turn, last_turn });
        }

        let needed = constants.ship_cost + self.config.reserve.for_turn(turn);
        if me.halite < needed {
            return Err(HoldReason::Saving {
                available: me.halite,
                needed,
            });
        }

        let base = me.shipyard.position;
        if claims.is_claimed(map, base) || map.is_occupied(base) {
            return Err(HoldReason::BaseBlocked);
        }

        let nearby = me
            .ships
            .iter()
            .filter(|s| states.is_returning(s.id))
            .filter(|s| map.distance(s.position, base) < self.config.congestion_radius)
            .count() as u32;
        if nearby > self.config.congestion_cap {
            return Err(HoldReason::Congested {
                nearby,
                cap: self.config.congestion_cap,
            });
        }

        Ok(())
    }
}
