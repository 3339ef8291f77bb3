//! # Prospector Core
//!
//! Deterministic decision core for the Prospector resource-collection bot.
//!
//! This crate contains **only** decision logic:
//! - No IO (the engine protocol lives in `prospector_bot`)
//! - No system randomness
//! - No floating-point math in decisions (gains use fixed-point)
//!
//! This separation enables:
//! - Driving the planner from the real engine or the local arena
//! - Replaying a snapshot and getting the same commands back
//! - Testing every policy rule against hand-built snapshots
//!
//! ## Crate Structure
//!
//! - [`grid`] - Toroidal map, positions, and directions
//! - [`entities`] - Ships, shipyards, players, and commands
//! - [`constants`] - Engine-provided game constants
//! - [`config`] - Strategy tunables
//! - [`state`] - Per-ship mining/returning state across turns
//! - [`claims`] - Per-turn claimed destination cells
//! - [`targeting`] - Greedy target selection
//! - [`navigation`] - Collision-avoiding local pathfinding
//! - [`spawn`] - Spawn gate
//! - [`planner`] - The per-turn decision loop

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod claims;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod grid;
pub mod math;
pub mod navigation;
pub mod planner;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod targeting;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::claims::ClaimedCells;
    pub use crate::config::{ReserveSchedule, StrategyConfig};
    pub use crate::constants::GameConstants;
    pub use crate::entities::{Command, Player, PlayerId, Ship, ShipId, Shipyard};
    pub use crate::error::{GameError, Result};
    pub use crate::grid::{Direction, GameMap, Position};
    pub use crate::math::Fixed;
    pub use crate::planner::{TurnPlan, TurnPlanner, TurnReport};
    pub use crate::snapshot::Snapshot;
    pub use crate::spawn::{HoldReason, SpawnDecision, SpawnGate};
    pub use crate::state::{UnitState, UnitStateTracker};
}
