//! Strategy tunables.
//!
//! Every threshold the planner and spawn gate consult lives here, in one
//! immutable struct handed to them at construction. [`StrategyConfig::default`]
//! is the tuned policy; RON files can override any subset of fields.
//!
//! ```ron
//! (
//!     endgame_turns: 40,
//!     reserve: (early_until: 60, early: 400, mid_until: 120, mid: 280, late: 125),
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Halite kept in the bank before spawning, by game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReserveSchedule {
    /// Turns before this use the early reserve.
    pub early_until: u32,
    /// Early-game reserve.
    pub early: u32,
    /// Turns before this (and not early) use the mid reserve.
    pub mid_until: u32,
    /// Mid-game reserve.
    pub mid: u32,
    /// Late-game reserve.
    pub late: u32,
}

impl Default for ReserveSchedule {
    fn default() -> Self {
        Self {
            early_until: 50,
            early: 500,
            mid_until: 120,
            mid: 280,
            late: 125,
        }
    }
}

impl ReserveSchedule {
    /// Reserve that applies on `turn`.
    #[must_use]
    pub const fn for_turn(&self, turn: u32) -> u32 {
        if turn < self.early_until {
            self.early
        } else if turn < self.mid_until {
            self.mid
        } else {
            self.late
        }
    }
}

/// Tunables for the planner and spawn gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Final turns during which every ship heads home.
    pub endgame_turns: u32,
    /// Cargo level (percent of capacity) that sends a ship home.
    pub return_threshold_percent: u32,
    /// Share of a cell's halite expected from one turn of mining, in percent.
    pub yield_percent: u32,
    /// A neighbor must beat the stay yield by this percentage to be chosen.
    pub stay_bias_percent: u32,
    /// Ship cap floor.
    pub min_ship_cap: u32,
    /// One ship allowed per this many map cells.
    pub ship_cap_divisor: u32,
    /// Maps up to this area use the small-map stop buffer.
    pub small_map_area: u32,
    /// Turns before the end when spawning stops on small maps.
    pub small_map_stop_buffer: u32,
    /// Turns before the end when spawning stops on larger maps.
    pub large_map_stop_buffer: u32,
    /// Bank reserve kept back when spawning.
    pub reserve: ReserveSchedule,
    /// Returning ships closer than this to the base count as congestion.
    pub congestion_radius: u32,
    /// Spawning pauses while more returning ships than this are close.
    pub congestion_cap: u32,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            endgame_turns: 30,
            return_threshold_percent: 90,
            yield_percent: 25,
            stay_bias_percent: 120,
            min_ship_cap: 8,
            ship_cap_divisor: 75,
            small_map_area: 1600,
            small_map_stop_buffer: 80,
            large_map_stop_buffer: 110,
            reserve: ReserveSchedule::default(),
            congestion_radius: 4,
            congestion_cap: 2,
        }
    }
}

impl StrategyConfig {
    /// Load and validate a config from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }

    /// Parse and validate a config from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let config: Self = ron::from_str(ron)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the planner cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.ship_cap_divisor == 0 {
            return Err(GameError::InvalidConfig(
                "ship_cap_divisor must be positive".to_string(),
            ));
        }
        if self.return_threshold_percent == 0 || self.return_threshold_percent > 100 {
            return Err(GameError::InvalidConfig(format!(
                "return_threshold_percent must be in 1..=100, got {}",
                self.return_threshold_percent
            )));
        }
        if self.yield_percent == 0 || self.yield_percent > 100 {
            return Err(GameError::InvalidConfig(format!(
                "yield_percent must be in 1..=100, got {}",
                self.yield_percent
            )));
        }
        if self.reserve.early_until > self.reserve.mid_until {
            return Err(GameError::InvalidConfig(format!(
                "reserve.early_until ({}) is after reserve.mid_until ({})",
                self.reserve.early_until, self.reserve.mid_until
            )));
        }
        Ok(())
    }

    /// Whether `turn` falls in the final homeward stretch.
    #[must_use]
    pub const fn is_endgame(&self, turn: u32, max_turns: u32) -> bool {
        turn > max_turns.saturating_sub(self.endgame_turns)
    }

    /// Maximum number of ships to own on a map of `area` cells.
    #[must_use]
    pub fn ship_cap(&self, area: u32) -> u32 {
        self.min_ship_cap.max(area / self.ship_cap_divisor.max(1))
    }

    /// Turns before the end when spawning stops on a map of `area` cells.
    #[must_use]
    pub const fn stop_buffer(&self, area: u32) -> u32 {
        if area <= self.small_map_area {
            self.small_map_stop_buffer
        } else {
            self.large_map_stop_buffer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reserve_schedule_phases() {
        let reserve = ReserveSchedule::default();
        assert_eq!(reserve.for_turn(0), 500);
        assert_eq!(reserve.for_turn(49), 500);
        assert_eq!(reserve.for_turn(50), 280);
        assert_eq!(reserve.for_turn(119), 280);
        assert_eq!(reserve.for_turn(120), 125);
        assert_eq!(reserve.for_turn(400), 125);
    }

    #[test]
    fn test_ship_cap_uses_floor_and_divisor() {
        let config = StrategyConfig::default();
        assert_eq!(config.ship_cap(32 * 32), 13);
        assert_eq!(config.ship_cap(16 * 16), 8);
        assert_eq!(config.ship_cap(64 * 64), 54);
    }

    #[test]
    fn test_stop_buffer_by_area() {
        let config = StrategyConfig::default();
        assert_eq!(config.stop_buffer(40 * 40), 80);
        assert_eq!(config.stop_buffer(48 * 48), 110);
    }

    #[test]
    fn test_endgame_boundary() {
        let config = StrategyConfig::default();
        assert!(!config.is_endgame(370, 400));
        assert!(config.is_endgame(371, 400));
        assert!(config.is_endgame(1, 20));
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config =
            StrategyConfig::from_ron_str("(endgame_turns: 40, congestion_cap: 3)").unwrap();
        assert_eq!(config.endgame_turns, 40);
        assert_eq!(config.congestion_cap, 3);
        assert_eq!(config.ship_cap_divisor, 75);
        assert_eq!(config.yield_percent, 25);
        assert_eq!(config.reserve, ReserveSchedule::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            StrategyConfig::from_ron_str("(ship_cap_divisor: 0)"),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            StrategyConfig::from_ron_str("(return_threshold_percent: 150)"),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            StrategyConfig::from_ron_str("(yield_percent: 0)"),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            StrategyConfig::from_ron_str("(reserve: (early_until: 200))"),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            StrategyConfig::from_ron_str("(endgame_turns: \"soon\")"),
            Err(GameError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(stay_bias_percent: 150)").unwrap();
        let config = StrategyConfig::load(file.path()).unwrap();
        assert_eq!(config.stay_bias_percent, 150);

        let missing = StrategyConfig::load("/definitely/not/here.ron");
        assert!(matches!(missing, Err(GameError::ConfigRead { .. })));
    }
}
