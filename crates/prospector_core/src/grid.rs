//! Toroidal game grid.
//!
//! The map wraps on both axes: stepping off the east edge lands on the
//! west edge. Positions are stored unnormalized where convenient and
//! normalized whenever they touch map storage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::ShipId;
use crate::error::{GameError, Result};

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row, growing southward.
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one step in `direction` (not normalized).
    #[must_use]
    pub const fn directional_offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single-step movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward smaller y.
    North,
    /// Toward larger y.
    South,
    /// Toward larger x.
    East,
    /// Toward smaller x.
    West,
    /// Stay in place.
    Still,
}

impl Direction {
    /// The four movement directions, in the order candidates are scanned.
    pub const CARDINALS: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Coordinate delta for this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::Still => (0, 0),
        }
    }

    /// Engine wire character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::North => 'n',
            Self::South => 's',
            Self::East => 'e',
            Self::West => 'w',
            Self::Still => 'o',
        }
    }
}

/// One map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapCell {
    /// Halite lying on the cell.
    pub halite: u32,
    /// Ship standing on the cell this turn, if any (any owner).
    pub ship: Option<ShipId>,
}

/// Grid/map accessor: halite, occupancy, and toroidal distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMap {
    width: i32,
    height: i32,
    /// Cells stored in row-major order.
    cells: Vec<MapCell>,
}

impl GameMap {
    /// Create a map from row-major halite amounts.
    pub fn new(width: i32, height: i32, halite: Vec<u32>) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if halite.len() != expected {
            return Err(GameError::CellCountMismatch {
                width,
                height,
                expected,
                actual: halite.len(),
            });
        }
        let cells = halite
            .into_iter()
            .map(|halite| MapCell { halite, ship: None })
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Create a map with the same halite on every cell.
    pub fn filled(width: i32, height: i32, halite: u32) -> Result<Self> {
        let count = if width > 0 && height > 0 {
            (width as usize) * (height as usize)
        } else {
            0
        };
        Self::new(width, height, vec![halite; count])
    }

    /// Map width in cells.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Map height in cells.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[must_use]
    pub const fn area(&self) -> u32 {
        (self.width * self.height) as u32
    }

    /// Wrap a position onto the map.
    #[must_use]
    pub const fn normalize(&self, pos: Position) -> Position {
        Position {
            x: pos.x.rem_euclid(self.width),
            y: pos.y.rem_euclid(self.height),
        }
    }

    /// Row-major cell index of a (possibly unnormalized) position.
    #[must_use]
    pub const fn index(&self, pos: Position) -> usize {
        let p = self.normalize(pos);
        (p.y as usize) * (self.width as usize) + (p.x as usize)
    }

    /// Cell at a position.
    #[must_use]
    pub fn cell(&self, pos: Position) -> &MapCell {
        &self.cells[self.index(pos)]
    }

    /// Halite lying at a position.
    #[must_use]
    pub fn halite_at(&self, pos: Position) -> u32 {
        self.cell(pos).halite
    }

    /// Overwrite the halite at a position.
    pub fn set_halite(&mut self, pos: Position, halite: u32) {
        let index = self.index(pos);
        self.cells[index].halite = halite;
    }

    /// Whether any ship stands on the cell this turn.
    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cell(pos).ship.is_some()
    }

    /// Record that `ship` stands at `pos`.
    pub fn mark_occupied(&mut self, pos: Position, ship: ShipId) {
        let index = self.index(pos);
        self.cells[index].ship = Some(ship);
    }

    /// Forget all ship positions, ready for a fresh turn.
    pub fn clear_occupancy(&mut self) {
        for cell in &mut self.cells {
            cell.ship = None;
        }
    }

    /// Toroidal Manhattan distance.
    #[must_use]
    pub fn distance(&self, a: Position, b: Position) -> u32 {
        let a = self.normalize(a);
        let b = self.normalize(b);
        let dx = (a.x - b.x).unsigned_abs();
        let dy = (a.y - b.y).unsigned_abs();
        let wrap_dx = self.width as u32 - dx;
        let wrap_dy = self.height as u32 - dy;
        dx.min(wrap_dx) + dy.min(wrap_dy)
    }

    /// Total halite on the map.
    #[must_use]
    pub fn total_halite(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.halite)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(width: i32, height: i32) -> GameMap {
        GameMap::filled(width, height, 0).unwrap()
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(matches!(
            GameMap::new(0, 4, vec![]),
            Err(GameError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            GameMap::new(2, 2, vec![1, 2, 3]),
            Err(GameError::CellCountMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_normalize_wraps_both_axes() {
        let m = map(8, 6);
        assert_eq!(m.normalize(Position::new(-1, -1)), Position::new(7, 5));
        assert_eq!(m.normalize(Position::new(8, 6)), Position::new(0, 0));
        assert_eq!(m.normalize(Position::new(17, 13)), Position::new(1, 1));
    }

    #[test]
    fn test_distance_takes_shorter_way_around() {
        let m = map(32, 32);
        assert_eq!(m.distance(Position::new(0, 0), Position::new(31, 0)), 1);
        assert_eq!(m.distance(Position::new(0, 0), Position::new(16, 16)), 32);
        assert_eq!(m.distance(Position::new(2, 3), Position::new(5, 1)), 5);
        assert_eq!(m.distance(Position::new(-1, 0), Position::new(31, 0)), 0);
    }

    #[test]
    fn test_index_row_major() {
        let m = map(10, 4);
        assert_eq!(m.index(Position::new(3, 2)), 23);
        assert_eq!(m.index(Position::new(-1, 0)), 9);
    }

    #[test]
    fn test_occupancy_lifecycle() {
        let mut m = map(4, 4);
        let p = Position::new(1, 1);
        assert!(!m.is_occupied(p));
        m.mark_occupied(Position::new(5, 5), ShipId(3));
        assert!(m.is_occupied(p));
        assert_eq!(m.cell(p).ship, Some(ShipId(3)));
        m.clear_occupancy();
        assert!(!m.is_occupied(p));
    }

    #[test]
    fn test_directional_offset_and_wire_chars() {
        let p = Position::new(4, 4);
        assert_eq!(p.directional_offset(Direction::North), Position::new(4, 3));
        assert_eq!(p.directional_offset(Direction::South), Position::new(4, 5));
        assert_eq!(p.directional_offset(Direction::East), Position::new(5, 4));
        assert_eq!(p.directional_offset(Direction::West), Position::new(3, 4));
        assert_eq!(p.directional_offset(Direction::Still), p);
        let chars: String = Direction::CARDINALS.iter().map(|d| d.as_char()).collect();
        assert_eq!(chars, "nsew");
        assert_eq!(Direction::Still.as_char(), 'o');
    }

    #[test]
    fn test_halite_accessors() {
        let mut m = GameMap::new(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m.halite_at(Position::new(1, 1)), 4);
        m.set_halite(Position::new(0, 1), 40);
        assert_eq!(m.halite_at(Position::new(0, 1)), 40);
        assert_eq!(m.total_halite(), 47);
        assert_eq!(m.area(), 4);
    }
}
