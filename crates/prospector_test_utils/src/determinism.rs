//! Determinism testing utilities.
//!
//! The planner must return the same commands for the same snapshot
//! sequence every time: the engine replays games by seed, and the arena
//! compares runs. Sources of non-determinism to watch for:
//!
//! - **Floating-point math**: gains use [`prospector_core::math::Fixed`].
//! - **HashMap iteration order**: state lives in hash maps, but ships are
//!   always iterated in snapshot order and sorted with a stable sort.
//! - **System randomness**: none in the core.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use prospector_core::prelude::*;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of steps per run.
    pub steps: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic run).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Planner is non-deterministic!\n\
                 Runs: {}\n\
                 Steps: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.steps,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a process several times from the same setup and compare hashes.
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    steps: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S, u64),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();
        for i in 0..steps {
            step(&mut state, i);
        }
        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        steps,
    }
}

/// Feed the same snapshot sequence to fresh planners and compare commands.
#[must_use]
pub fn verify_planner_determinism(
    runs: usize,
    snapshots: &[Snapshot],
    config: StrategyConfig,
) -> DeterminismResult {
    verify_determinism(
        runs,
        snapshots.len() as u64,
        || (TurnPlanner::new(config), Vec::<Command>::new()),
        |state: &mut (TurnPlanner, Vec<Command>), i: u64| {
            let plan = state.0.plan_turn(&snapshots[i as usize]);
            state.1.extend(plan.commands);
        },
        |state: &(TurnPlanner, Vec<Command>)| compute_hash(&state.1),
    )
}

/// Compute a hash for any hashable value.
#[must_use]
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::SnapshotBuilder;

    #[test]
    fn test_counter_is_deterministic() {
        let result = verify_determinism(3, 10, || 0u64, |s, i| *s += i, |s| *s);
        result.assert_deterministic();
        assert_eq!(result.unique_hashes().len(), 1);
    }

    #[test]
    #[should_panic(expected = "non-deterministic")]
    fn test_divergence_is_reported() {
        let counter = std::cell::Cell::new(0u64);
        let result = verify_determinism(
            2,
            1,
            || {
                counter.set(counter.get() + 1);
                counter.get()
            },
            |_, _| {},
            |s| *s,
        );
        result.assert_deterministic();
    }

    #[test]
    fn test_planner_sequence_is_deterministic() {
        let snapshots: Vec<Snapshot> = (1..=5)
            .map(|turn| {
                SnapshotBuilder::new()
                    .size(16, 16)
                    .fill(120)
                    .turn(turn)
                    .ship(3, 3, 100)
                    .ship(4, 3, 950)
                    .ship(8, 8, 0)
                    .build()
            })
            .collect();
        let result = verify_planner_determinism(4, &snapshots, StrategyConfig::default());
        result.assert_deterministic();
    }
}
