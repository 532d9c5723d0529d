//! Simulation engine: the orchestrator of a match.
//!
//! `SimulationEngine` owns the hecs world holding every tank, projectile,
//! and explosion, plus the roster, round state, and input state. It applies
//! queued commands at tick boundaries, runs the systems in a fixed order,
//! and returns a `GameStateSnapshot` each tick. Completely headless and
//! deterministic for a given seed and input sequence.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dzone_ai::{ChaseController, TankController};
use dzone_core::catalog::Catalog;
use dzone_core::commands::EngineCommand;
use dzone_core::config::{ArenaConfig, GameRules};
use dzone_core::constants::MAX_FRAME_DT;
use dzone_core::enums::{MatchPhase, Port, RoundEndReason, TankArchetype, UpgradeKind};
use dzone_core::error::ShopError;
use dzone_core::events::CombatEvent;
use dzone_core::player::PlayerRecord;
use dzone_core::state::GameStateSnapshot;
use dzone_core::types::{SimTime, TankId};

use crate::input::InputState;
use crate::persistence::{PersistenceError, SaveData, SAVE_VERSION};
use crate::roster::Roster;
use crate::round::RoundState;
use crate::shop;
use crate::systems;
use crate::systems::collision::CollisionContext;
use crate::systems::control::Controllers;
use crate::systems::EntityIds;
use crate::tank::Tank;
use crate::world_setup;

/// A seat at the table.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSeat {
    pub name: String,
    /// Human seats read `InputState`; others are driven by a controller.
    pub is_human: bool,
}

impl PlayerSeat {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: true,
        }
    }

    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: false,
        }
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub rules: GameRules,
    pub arena: ArenaConfig,
    pub catalog: Catalog,
    /// Players in tank-id order.
    pub seats: Vec<PlayerSeat>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rules: GameRules::default(),
            arena: ArenaConfig::default(),
            catalog: Catalog::standard(),
            seats: vec![PlayerSeat::human("PLAYER"), PlayerSeat::ai("CPU")],
        }
    }
}

/// The simulation engine. Owns the ECS world and all match state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    seed: u64,
    rng: ChaCha8Rng,
    rules: GameRules,
    arena: ArenaConfig,
    catalog: Catalog,
    roster: Roster,
    round: RoundState,
    input: InputState,
    controllers: Controllers,
    ids: EntityIds,
    command_queue: VecDeque<EngineCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<CombatEvent>,
    paused: bool,
}

/// Number of equal substeps needed to keep each under `MAX_FRAME_DT`.
fn substep_count(dt: f64) -> u32 {
    // Tolerance keeps exact multiples like 0.3 / 0.1 from rounding up.
    ((dt / MAX_FRAME_DT) - 1e-9).ceil().max(1.0) as u32
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. Starts in the menu.
    pub fn new(config: SimConfig) -> Self {
        let mut roster = Roster::new();
        for seat in &config.seats {
            roster.add_player(seat.name.clone(), seat.is_human, &config.rules);
        }
        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            seed: config.seed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            rules: config.rules,
            arena: config.arena,
            catalog: config.catalog,
            roster,
            round: RoundState::new(),
            input: InputState::new(),
            controllers: Controllers::new(),
            ids: EntityIds::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            paused: false,
        };
        engine.install_default_controllers();
        engine
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: EngineCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = EngineCommand>) {
        self.command_queue.extend(commands);
    }

    /// Replace the strategy driving a non-human tank.
    pub fn set_controller(&mut self, tank: TankId, controller: Box<dyn TankController>) {
        self.controllers.insert(tank, controller);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    /// A `dt` longer than `MAX_FRAME_DT` is split into equal substeps; the
    /// remaining substeps are dropped once a round ends.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.process_commands();

        if self.round.phase() == MatchPhase::Playing && !self.paused {
            let steps = substep_count(dt);
            let step = dt / steps as f64;
            let mut simulated = 0.0;
            for _ in 0..steps {
                simulated += step;
                if self.run_systems(step) {
                    break;
                }
            }
            self.time.advance(simulated);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.round,
            &self.rules,
            &self.roster,
            self.paused,
            events,
        )
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> MatchPhase {
        self.round.phase()
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for scenario setup and tooling.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Direct input access for an input layer that bypasses commands.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Clone of the live tank with `id`, if it exists this round.
    pub fn tank(&self, id: TankId) -> Option<Tank> {
        self.world
            .query::<&Tank>()
            .iter()
            .find(|(_, tank)| tank.id == id)
            .map(|(_, tank)| tank.clone())
    }

    // --- Shop ---

    pub fn purchase_weapon(&mut self, player: TankId, port: Port, index: usize) -> Result<u32, ShopError> {
        let catalog = &self.catalog;
        let record = shop_record(&self.round, &mut self.roster, player)?;
        shop::purchase_weapon(record, catalog, port, index)
    }

    pub fn purchase_tank(&mut self, player: TankId, archetype: TankArchetype) -> Result<u32, ShopError> {
        let catalog = &self.catalog;
        let record = shop_record(&self.round, &mut self.roster, player)?;
        shop::purchase_tank(record, catalog, archetype)
    }

    pub fn purchase_upgrade(&mut self, player: TankId, kind: UpgradeKind) -> Result<u32, ShopError> {
        let catalog = &self.catalog;
        let record = shop_record(&self.round, &mut self.roster, player)?;
        shop::purchase_upgrade(record, catalog, kind)
    }

    // --- Persistence ---

    /// Snapshot of everything needed to resume this match.
    pub fn save_data(&self) -> SaveData {
        SaveData {
            version: SAVE_VERSION,
            seed: self.seed,
            round: self.round.round(),
            phase: self.round.phase(),
            players: self.roster.records().to_vec(),
            stats: self.round.stats.clone(),
        }
    }

    /// Resume a saved match. A save taken mid-round resumes at the start
    /// of that round with freshly built tanks.
    pub fn restore(&mut self, save: SaveData) -> Result<(), PersistenceError> {
        if save.version != SAVE_VERSION {
            return Err(PersistenceError::Version {
                found: save.version,
            });
        }
        self.seed = save.seed;
        self.rng = ChaCha8Rng::seed_from_u64(save.seed.wrapping_add(save.round as u64));
        self.roster = Roster::from_records(save.players);
        self.controllers.clear();
        self.install_default_controllers();
        self.round.restore(save.round, save.phase, save.stats);
        self.command_queue.clear();
        match save.phase {
            MatchPhase::Playing => self.start_round(),
            _ => self.clear_arena(),
        }
        log::info!("restored round {} in {:?}", save.round, save.phase);
        Ok(())
    }

    fn install_default_controllers(&mut self) {
        let ai_seats: Vec<TankId> = self
            .roster
            .iter()
            .filter(|r| !r.is_human)
            .map(|r| r.id)
            .collect();
        for id in ai_seats {
            let seed = self.seed.wrapping_add(u64::from(id.0) + 1);
            self.controllers
                .entry(id)
                .or_insert_with(|| Box::new(ChaseController::new(seed)));
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::StartMatch => {
                if matches!(self.round.phase(), MatchPhase::Menu | MatchPhase::GameOver) {
                    let from = self.round.phase();
                    if from == MatchPhase::GameOver {
                        self.roster.reset(&self.rules);
                    }
                    self.round.start_match();
                    self.paused = false;
                    self.time = SimTime::default();
                    self.start_round();
                    self.events.push(CombatEvent::PhaseChanged {
                        from,
                        to: MatchPhase::Playing,
                    });
                    log::info!("match started with {} players", self.roster.len());
                }
            }
            EngineCommand::Press { tank, control } => self.input.press(tank, control),
            EngineCommand::Release { tank, control } => self.input.release(tank, control),
            EngineCommand::Pause => {
                if self.round.phase() == MatchPhase::Playing && !self.paused {
                    self.paused = true;
                    log::info!("simulation paused at tick {}", self.time.tick);
                }
            }
            EngineCommand::Resume => {
                if self.paused {
                    self.paused = false;
                    log::info!("simulation resumed at tick {}", self.time.tick);
                }
            }
            EngineCommand::ContinueFromShop => {
                if self.round.continue_from_shop() {
                    self.start_round();
                    self.events.push(CombatEvent::PhaseChanged {
                        from: MatchPhase::Shop,
                        to: MatchPhase::Playing,
                    });
                }
            }
            EngineCommand::ReturnToMenu => {
                let from = self.round.phase();
                if from != MatchPhase::Menu {
                    self.paused = false;
                    self.round.reset();
                    self.roster.reset(&self.rules);
                    self.clear_arena();
                    self.events.push(CombatEvent::PhaseChanged {
                        from,
                        to: MatchPhase::Menu,
                    });
                }
            }
        }
    }

    /// Run all systems in order for one frame. Returns true if the round ended.
    fn run_systems(&mut self, dt: f64) -> bool {
        // 1. Input and controllers -> intents, weapon selection, firing
        systems::control::run(
            &mut self.world,
            &self.input,
            &mut self.controllers,
            &self.roster,
            &self.catalog,
            &mut self.ids,
            &mut self.events,
            dt,
        );
        // 2. Tank motion and energy regen
        systems::movement::run(&mut self.world, dt);
        // 3. Projectile guidance, motion, and expiry
        systems::projectiles::run(&mut self.world, &mut self.ids, &mut self.events, dt);
        // 4. Explosion timers
        systems::explosions::run(&mut self.world, dt);
        // 5. Prune destroyed projectiles and finished explosions
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 6. No separate physics world; steps 2-3 are the integration.
        // 7. Collisions
        systems::collision::run(
            &mut self.world,
            &mut CollisionContext {
                arena: &self.arena,
                rules: &self.rules,
                roster: &mut self.roster,
                stats: &mut self.round.stats,
                ids: &mut self.ids,
                events: &mut self.events,
            },
        );
        // 8. Round clock
        self.round.update(dt, &self.rules);
        // 9. A pending end closes the round and skips the rest of the frame
        if let Some(end) = self.round.take_pending() {
            let winner = match end.reason {
                RoundEndReason::Timeout => self.timeout_winner(),
                RoundEndReason::Kill => end.winner,
            };
            self.finish_round(end.reason, winner);
            return true;
        }
        // 10. Win check: one or zero tanks left
        if let Some(survivor) = self.last_tank_standing() {
            self.round.signal_kill(survivor);
            if let Some(end) = self.round.take_pending() {
                self.finish_round(end.reason, end.winner);
                return true;
            }
        }
        // 11. Latch input edges for next frame
        self.input.end_frame();
        false
    }

    /// Living tank with the most shield; lowest id wins ties.
    fn timeout_winner(&self) -> Option<TankId> {
        let mut best: Option<(TankId, f64)> = None;
        for (_, tank) in self.world.query::<&Tank>().iter() {
            if !tank.alive() {
                continue;
            }
            let better = match best {
                None => true,
                Some((id, shield)) => {
                    tank.shield() > shield || (tank.shield() == shield && tank.id < id)
                }
            };
            if better {
                best = Some((tank.id, tank.shield()));
            }
        }
        best.map(|(id, _)| id)
    }

    /// `Some(survivor)` once at most one of two or more tanks is alive.
    fn last_tank_standing(&self) -> Option<Option<TankId>> {
        let mut total = 0;
        let mut alive: Vec<TankId> = Vec::new();
        for (_, tank) in self.world.query::<&Tank>().iter() {
            total += 1;
            if tank.alive() {
                alive.push(tank.id);
            }
        }
        (total >= 2 && alive.len() <= 1).then(|| alive.first().copied())
    }

    fn finish_round(&mut self, reason: RoundEndReason, winner: Option<TankId>) {
        let round = self.round.round();
        let next = self
            .round
            .end_round(reason, winner, &self.rules, &mut self.roster);
        self.events.push(CombatEvent::RoundEnded {
            round,
            reason,
            winner,
        });
        if next != MatchPhase::Playing {
            self.events.push(CombatEvent::PhaseChanged {
                from: MatchPhase::Playing,
                to: next,
            });
        }
        match next {
            MatchPhase::Playing => self.start_round(),
            _ => self.clear_arena(),
        }
    }

    /// Rebuild every tank from its record for a fresh round.
    fn start_round(&mut self) {
        self.input.clear();
        let spawned = world_setup::setup_round(
            &mut self.world,
            &self.roster,
            &self.catalog,
            &self.arena,
            &mut self.rng,
        );
        log::info!("round {} begins with {spawned} tanks", self.round.round());
    }

    fn clear_arena(&mut self) {
        self.world.clear();
        self.input.clear();
    }
}

fn shop_record<'a>(
    round: &RoundState,
    roster: &'a mut Roster,
    player: TankId,
) -> Result<&'a mut PlayerRecord, ShopError> {
    if round.phase() != MatchPhase::Shop {
        return Err(ShopError::Closed(round.phase()));
    }
    roster.get_mut(player).ok_or(ShopError::UnknownPlayer(player))
}
