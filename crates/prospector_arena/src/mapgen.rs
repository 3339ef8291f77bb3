//! Deterministic map generation.
//!
//! Maps are generated from a seed with a small LCG so the same seed always
//! produces the same map on every platform. Halite is laid out in one
//! fundamental region and mirrored so every player faces the same board:
//!
//! - 1 player: no mirroring, shipyard at the centre
//! - 2 players: mirrored left/right, shipyards on the horizontal midline
//! - 4 players: mirrored left/right and top/bottom, one shipyard per quadrant

use prospector_core::prelude::*;

use crate::error::{ArenaError, Result};

/// Map generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapConfig {
    /// Map width.
    pub width: i32,
    /// Map height.
    pub height: i32,
    /// Number of players: 1, 2 or 4.
    pub players: u32,
    /// Generation seed.
    pub seed: u64,
    /// Background halite per cell is drawn from `0..noise_max`.
    pub noise_max: u32,
    /// Rich patches per fundamental region.
    pub patches: u32,
    /// Cap on any single cell.
    pub cell_cap: u32,
}

impl MapConfig {
    /// Defaults for a map of the given size.
    #[must_use]
    pub fn new(width: i32, height: i32, players: u32, seed: u64) -> Self {
        let area = (width * height).max(1) as u32;
        Self {
            width,
            height,
            players,
            seed,
            noise_max: 120,
            patches: (area / 160).max(2),
            cell_cap: 1000,
        }
    }
}

/// A generated map with the players' shipyards, in player order.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMap {
    /// Halite layout; shipyard cells are empty.
    pub map: GameMap,
    /// Shipyard of player `i` at index `i`.
    pub shipyards: Vec<Position>,
}

/// Simple deterministic RNG for map generation.
#[derive(Debug, Clone)]
pub struct MapRng {
    state: u64,
}

impl MapRng {
    /// Seed the generator.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E37_79B9_7F4A_7C15),
        }
    }

    /// Next raw value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state >> 17
    }

    /// Uniform value in `min..max`; `min` when the range is empty.
    pub fn next_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let range = (max - min) as u64;
        min + (self.next_u64() % range) as i32
    }
}

/// Generate a map.
pub fn generate_map(config: MapConfig) -> Result<GeneratedMap> {
    if !crate::scenario::SUPPORTED_PLAYER_COUNTS.contains(&config.players) {
        return Err(ArenaError::InvalidScenario(format!(
            "cannot place {} players symmetrically",
            config.players
        )));
    }

    let mut map = GameMap::filled(config.width, config.height, 0)?;
    let mut rng = MapRng::new(config.seed);

    let mirror_x = config.players >= 2;
    let mirror_y = config.players == 4;
    let region_w = if mirror_x {
        (config.width + 1) / 2
    } else {
        config.width
    };
    let region_h = if mirror_y {
        (config.height + 1) / 2
    } else {
        config.height
    };

    let mut region = vec![0u32; (region_w * region_h) as usize];
    for cell in &mut region {
        *cell = rng.next_range(0, config.noise_max as i32) as u32;
    }

    for _ in 0..config.patches {
        let cx = rng.next_range(0, region_w);
        let cy = rng.next_range(0, region_h);
        let radius = rng.next_range(2, 6);
        let peak = rng.next_range(300, config.cell_cap as i32 + 1) as u32;
        add_patch(&mut region, region_w, region_h, (cx, cy), radius, peak);
    }

    for y in 0..config.height {
        for x in 0..config.width {
            let rx = if mirror_x && x >= region_w {
                config.width - 1 - x
            } else {
                x
            };
            let ry = if mirror_y && y >= region_h {
                config.height - 1 - y
            } else {
                y
            };
            let halite = region[(ry * region_w + rx) as usize].min(config.cell_cap);
            map.set_halite(Position::new(x, y), halite);
        }
    }

    let shipyards = shipyard_positions(config.width, config.height, config.players);
    for &pos in &shipyards {
        map.set_halite(pos, 0);
    }

    tracing::debug!(
        seed = config.seed,
        width = config.width,
        height = config.height,
        total_halite = map.total_halite(),
        "Generated map"
    );

    Ok(GeneratedMap { map, shipyards })
}

/// Cone-shaped deposit centred on `center`, clipped to the region.
fn add_patch(
    region: &mut [u32],
    width: i32,
    height: i32,
    center: (i32, i32),
    radius: i32,
    peak: u32,
) {
    for y in (center.1 - radius).max(0)..(center.1 + radius + 1).min(height) {
        for x in (center.0 - radius).max(0)..(center.0 + radius + 1).min(width) {
            let d = (x - center.0).abs() + (y - center.1).abs();
            if d <= radius {
                let share = peak * (radius + 1 - d) as u32 / (radius + 1) as u32;
                let cell = &mut region[(y * width + x) as usize];
                *cell = cell.saturating_add(share);
            }
        }
    }
}

/// Shipyards placed with the same symmetry as the halite.
#[must_use]
pub fn shipyard_positions(width: i32, height: i32, players: u32) -> Vec<Position> {
    let (left, right) = (width / 4, width - 1 - width / 4);
    let (top, bottom) = (height / 4, height - 1 - height / 4);
    match players {
        1 => vec![Position::new(width / 2, height / 2)],
        2 => vec![
            Position::new(left, height / 2),
            Position::new(right, height / 2),
        ],
        _ => vec![
            Position::new(left, top),
            Position::new(right, top),
            Position::new(left, bottom),
            Position::new(right, bottom),
        ],
    }
}
