//! Game execution for the local arena.
//!
//! Every player is driven by its own [`TurnPlanner`] and sees the same
//! [`Snapshot`] the engine adapter would build. Each turn applies the
//! rules in engine order:
//!
//! 1. Spawns: cost deducted, new ship on the shipyard
//! 2. Moves: `floor(cell / MOVE_COST_RATIO)` deducted; a ship that cannot
//!    pay stays put
//! 3. Collisions: every ship sharing a cell is destroyed and its cargo is
//!    dropped on the cell
//! 4. Mining: ships that stayed take `ceil(cell / EXTRACT_RATIO)`, capped
//!    by free hold space
//! 5. Deposits: cargo on the owner's shipyard goes to the bank
//!
//! Inspiration and dropoffs are not simulated.

use std::collections::{HashMap, HashSet};

use prospector_core::math::{ceil_div, floor_div};
use prospector_core::prelude::*;

use crate::error::Result;
use crate::mapgen::{generate_map, MapConfig};
use crate::metrics::{GameMetrics, PlayerMetrics};
use crate::scenario::Scenario;

/// Configuration for a single game run.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Map generation seed.
    pub seed: u64,
    /// Scenario to play.
    pub scenario: Scenario,
    /// Game ID for tracking.
    pub game_id: String,
}

impl GameConfig {
    /// Config for one seed of a scenario.
    #[must_use]
    pub fn new(scenario: Scenario, seed: u64) -> Self {
        Self {
            game_id: format!("{}_{seed}", scenario.name),
            seed,
            scenario,
        }
    }
}

/// State for one player in the game.
#[derive(Debug)]
struct PlayerState {
    player: Player,
    planner: TurnPlanner,
    metrics: PlayerMetrics,
}

/// One ship's order for the turn, resolved against the rules.
#[derive(Debug, Clone, Copy)]
struct Order {
    owner: usize,
    ship: usize,
    direction: Direction,
}

/// A game in progress.
#[derive(Debug)]
pub struct GameRunner {
    config: GameConfig,
    constants: GameConstants,
    map: GameMap,
    players: Vec<PlayerState>,
    turn: u32,
    next_ship_id: u32,
    initial_map_halite: u64,
}

impl GameRunner {
    /// Generate the map and seat the players.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.scenario.validate()?;
        let scenario = &config.scenario;
        let generated = generate_map(MapConfig::new(
            scenario.width,
            scenario.height,
            scenario.players,
            config.seed,
        ))?;

        let players = generated
            .shipyards
            .iter()
            .enumerate()
            .map(|(i, &shipyard)| PlayerState {
                player: Player::new(PlayerId(i as u32), shipyard, scenario.starting_halite),
                planner: TurnPlanner::new(scenario.strategy),
                metrics: PlayerMetrics::new(i as u32),
            })
            .collect();

        Ok(Self {
            constants: scenario.constants(),
            initial_map_halite: generated.map.total_halite(),
            map: generated.map,
            players,
            turn: 0,
            next_ship_id: 0,
            config,
        })
    }

    /// Turns completed so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Whether the last turn has been played.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.turn >= self.constants.max_turns
    }

    /// Current map.
    #[must_use]
    pub const fn map(&self) -> &GameMap {
        &self.map
    }

    /// Current state of a player.
    #[must_use]
    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index).map(|p| &p.player)
    }

    /// The view player `index` gets at the start of the next turn.
    pub fn snapshot_for(&self, index: usize) -> Result<Snapshot> {
        let players = self.players.iter().map(|p| p.player.clone()).collect();
        Ok(Snapshot::new(
            self.turn + 1,
            PlayerId(index as u32),
            players,
            self.map.clone(),
            self.constants,
        )?)
    }

    /// Play one turn for every player.
    pub fn step(&mut self) -> Result<()> {
        let mut orders = Vec::new();
        let mut spawns = Vec::new();

        for index in 0..self.players.len() {
            let snapshot = self.snapshot_for(index)?;
            let state = &mut self.players[index];
            let plan = state.planner.plan_turn(&snapshot);

            if has_claim_conflict(&snapshot, &plan) {
                tracing::warn!(
                    game_id = %self.config.game_id,
                    player = index,
                    turn = snapshot.turn_number(),
                    "Planner committed two ships to one cell"
                );
                state.metrics.claim_conflicts += 1;
            }

            for command in &plan.commands {
                match *command {
                    Command::Spawn => spawns.push(index),
                    Command::Move { ship, direction } => {
                        if let Some(i) = state.player.ships.iter().position(|s| s.id == ship) {
                            orders.push(Order {
                                owner: index,
                                ship: i,
                                direction,
                            });
                        }
                    }
                }
            }
        }

        self.turn += 1;
        let mut moved: HashSet<ShipId> = HashSet::new();
        self.apply_spawns(&spawns, &mut moved);
        self.apply_moves(&orders, &mut moved);
        self.resolve_collisions();
        self.mine(&moved);
        self.deposit();

        for state in &mut self.players {
            let alive = state.player.ships.len() as u32;
            state.metrics.peak_ships = state.metrics.peak_ships.max(alive);
        }

        if self.turn % 50 == 0 {
            tracing::debug!(
                game_id = %self.config.game_id,
                turn = self.turn,
                map_halite = self.map.total_halite(),
                "Progress"
            );
        }
        Ok(())
    }

    fn apply_spawns(&mut self, spawns: &[usize], moved: &mut HashSet<ShipId>) {
        for &index in spawns {
            let state = &mut self.players[index];
            if state.player.halite < self.constants.ship_cost {
                tracing::debug!(player = index, "Spawn ignored: not enough halite");
                continue;
            }
            state.player.halite -= self.constants.ship_cost;
            let id = ShipId(self.next_ship_id);
            self.next_ship_id += 1;
            let position = state.player.shipyard.position;
            state
                .player
                .ships
                .push(Ship::new(id, state.player.id, position, 0));
            state.metrics.ships_built += 1;
            moved.insert(id);
        }
    }

    fn apply_moves(&mut self, orders: &[Order], moved: &mut HashSet<ShipId>) {
        for order in orders {
            if order.direction == Direction::Still {
                continue;
            }
            let state = &mut self.players[order.owner];
            let ship = &mut state.player.ships[order.ship];
            let cost = floor_div(
                self.map.halite_at(ship.position),
                self.constants.move_cost_ratio,
            );
            if ship.halite < cost {
                continue;
            }
            ship.halite -= cost;
            ship.position = self
                .map
                .normalize(ship.position.directional_offset(order.direction));
            state.metrics.halite_spent_moving += u64::from(cost);
            moved.insert(ship.id);
        }
    }

    fn resolve_collisions(&mut self) {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for ship in self.players.iter().flat_map(|p| p.player.ships.iter()) {
            *counts.entry(self.map.index(ship.position)).or_default() += 1;
        }
        if counts.values().all(|&c| c < 2) {
            return;
        }

        for state in &mut self.players {
            let map = &mut self.map;
            let metrics = &mut state.metrics;
            state.player.ships.retain(|ship| {
                let crowded = counts.get(&map.index(ship.position)).copied().unwrap_or(0) > 1;
                if crowded {
                    let dropped = map.halite_at(ship.position).saturating_add(ship.halite);
                    map.set_halite(ship.position, dropped);
                    metrics.ships_lost += 1;
                    tracing::debug!(
                        ship = %ship.id,
                        position = %ship.position,
                        "Ship destroyed in collision"
                    );
                }
                !crowded
            });
        }
    }

    fn mine(&mut self, moved: &HashSet<ShipId>) {
        for state in &mut self.players {
            for ship in &mut state.player.ships {
                if moved.contains(&ship.id) {
                    continue;
                }
                let cell = self.map.halite_at(ship.position);
                let room = self.constants.max_halite.saturating_sub(ship.halite);
                let extracted = ceil_div(cell, self.constants.extract_ratio).min(room);
                if extracted == 0 {
                    continue;
                }
                self.map.set_halite(ship.position, cell - extracted);
                ship.halite += extracted;
                state.metrics.halite_mined += u64::from(extracted);
            }
        }
    }

    fn deposit(&mut self) {
        for state in &mut self.players {
            let base = state.player.shipyard.position;
            for ship in &mut state.player.ships {
                if ship.position == base && ship.halite > 0 {
                    state.player.halite += ship.halite;
                    state.metrics.halite_deposited += u64::from(ship.halite);
                    ship.halite = 0;
                }
            }
        }
    }

    /// Play to the last turn and collect metrics.
    pub fn run(mut self) -> Result<GameMetrics> {
        tracing::info!(
            game_id = %self.config.game_id,
            seed = self.config.seed,
            players = self.players.len(),
            max_turns = self.constants.max_turns,
            "Starting game"
        );

        while !self.is_finished() {
            self.step()?;
        }
        Ok(self.finish())
    }

    fn finish(self) -> GameMetrics {
        let mut metrics = GameMetrics::new(
            &self.config.game_id,
            &self.config.scenario.name,
            self.config.seed,
        );
        metrics.initial_map_halite = self.initial_map_halite;
        metrics.players = self
            .players
            .into_iter()
            .map(|state| PlayerMetrics {
                final_halite: state.player.halite,
                ..state.metrics
            })
            .collect();
        metrics.finalize(self.turn, self.map.total_halite());

        tracing::info!(
            game_id = %metrics.game_id,
            winner = ?metrics.winner,
            turns = metrics.turns,
            "Game complete"
        );
        metrics
    }
}

/// Whether two ships in a plan end the turn on the same cell.
#[must_use]
pub fn has_claim_conflict(snapshot: &Snapshot, plan: &TurnPlan) -> bool {
    let mut seen = HashSet::new();
    !plan
        .assignments
        .iter()
        .all(|a| seen.insert(snapshot.map().index(a.destination())))
}

/// Run one game to completion.
pub fn run_game(config: GameConfig) -> Result<GameMetrics> {
    GameRunner::new(config)?.run()
}
