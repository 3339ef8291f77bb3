//! Cells committed to by ships already planned this turn.

use std::collections::HashSet;

use crate::grid::{GameMap, Position};

/// Per-turn set of claimed destination cells, keyed by map cell index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimedCells {
    cells: HashSet<usize>,
}

impl ClaimedCells {
    /// Start a turn with nothing claimed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a ship already committed to `pos` this turn.
    #[must_use]
    pub fn is_claimed(&self, map: &GameMap, pos: Position) -> bool {
        self.cells.contains(&map.index(pos))
    }

    /// Claim `pos`. Returns `false` if it was already claimed.
    pub fn claim(&mut self, map: &GameMap, pos: Position) -> bool {
        self.cells.insert(map.index(pos))
    }

    /// Whether `pos` can't be entered: claimed this turn or holding a ship.
    #[must_use]
    pub fn is_blocked(&self, map: &GameMap, pos: Position) -> bool {
        self.is_claimed(map, pos) || map.is_occupied(pos)
    }

    /// Number of claimed cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing is claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
