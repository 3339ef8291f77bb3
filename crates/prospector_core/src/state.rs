//! Per-ship mining/returning state that persists across turns.
//!
//! The engine forgets nothing about ships except their intent, so the bot
//! keeps that one bit itself, keyed by ship id.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::entities::{Ship, ShipId};
use crate::grid::Position;
use crate::math::at_least_percent;

/// What a ship is currently trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitState {
    /// Collecting halite from the map.
    #[default]
    Mining,
    /// Carrying cargo home to the base.
    Returning,
}

/// Mapping from ship id to [`UnitState`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStateTracker {
    states: HashMap<ShipId, UnitState>,
}

impl UnitStateTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one ship's state for this turn and return the new state.
    ///
    /// Unknown ships start as [`UnitState::Mining`]. In the endgame every
    /// ship returns. Otherwise a returning ship resumes mining once it
    /// stands on `base`, and a mining ship returns once its hold reaches
    /// `return_threshold_percent` of `max_halite`.
    pub fn update(
        &mut self,
        ship: &Ship,
        base: Position,
        endgame: bool,
        max_halite: u32,
        return_threshold_percent: u32,
    ) -> UnitState {
        let state = self.states.entry(ship.id).or_default();
        let prev = *state;
        let next = if endgame {
            UnitState::Returning
        } else {
            match prev {
                UnitState::Returning if ship.position == base => UnitState::Mining,
                UnitState::Returning => UnitState::Returning,
                UnitState::Mining
                    if at_least_percent(ship.halite, max_halite, return_threshold_percent) =>
                {
                    UnitState::Returning
                }
                UnitState::Mining => UnitState::Mining,
            }
        };
        if next != prev {
            tracing::debug!(
                ship = %ship.id,
                from = ?prev,
                to = ?next,
                halite = ship.halite,
                "State change"
            );
        }
        *state = next;
        next
    }

    /// Current state; ships never seen count as mining.
    #[must_use]
    pub fn state(&self, id: ShipId) -> UnitState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    /// Whether the ship is heading home.
    #[must_use]
    pub fn is_returning(&self, id: ShipId) -> bool {
        self.state(id) == UnitState::Returning
    }

    /// Drop entries for ships that are no longer in `roster`.
    ///
    /// Returns how many entries were removed.
    pub fn retain_roster<I>(&mut self, roster: I) -> usize
    where
        I: IntoIterator<Item = ShipId>,
    {
        let alive: HashSet<ShipId> = roster.into_iter().collect();
        let before = self.states.len();
        self.states.retain(|id, _| alive.contains(id));
        before - self.states.len()
    }

    /// Number of tracked ships.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no ships are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
