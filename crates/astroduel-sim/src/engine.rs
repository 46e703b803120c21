//! Match engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs world and the entity registries, processes
//! player commands, runs all systems once per `tick(dt)` and produces
//! `MatchSnapshot`s. Completely headless, so it can be driven by any host
//! loop and tested deterministically.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use astroduel_core::commands::PlayerCommand;
use astroduel_core::components::{Body, Vehicle};
use astroduel_core::constants::*;
use astroduel_core::enums::{AttractorFalloff, GamePhase, ProjectileOwner, VehicleKind};
use astroduel_core::events::{MatchEvent, MatchOutcome};
use astroduel_core::level::{Level, LevelError, LevelObject, LevelPoint};
use astroduel_core::state::MatchSnapshot;
use astroduel_core::types::{Position, SimTime, Velocity};

use crate::registry::Registry;
use crate::scripts::ScriptQueue;
use crate::systems;
use crate::systems::asteroid_field::{FieldParams, FieldPlan};
use crate::systems::collision::Response;
use crate::systems::snapshot::SnapshotInput;
use crate::world_setup;

/// Configuration for starting a new match.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same asteroid fields.
    pub seed: u64,
    pub playfield_width: f64,
    pub playfield_height: f64,
    /// Per-tick vehicle velocity multiplier.
    pub damping: f64,
    pub vehicle_speed: f64,
    pub field: FieldParams,
    /// Minimum simulated time between two scripted actions of one vehicle.
    pub script_interval_secs: f64,
    pub attractor_falloff: AttractorFalloff,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            damping: VEHICLE_DAMPING,
            vehicle_speed: VEHICLE_SPEED,
            field: FieldParams::default(),
            script_interval_secs: SCRIPT_ACTION_INTERVAL_SECS,
            attractor_falloff: AttractorFalloff::default(),
        }
    }
}

/// The match engine. Owns the ECS world and all match state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    spaceship: Entity,
    ufo: Entity,
    projectiles: Registry,
    asteroids: Registry,
    attractors: Registry,
    spaceship_script: ScriptQueue,
    ufo_script: ScriptQueue,
    command_queue: VecDeque<PlayerCommand>,
    /// Commands released from the script queues during the last tick.
    scripted: Vec<PlayerCommand>,
    events: Vec<MatchEvent>,
    outcome: Option<MatchOutcome>,
    field: FieldPlan,
    /// Level the current layout came from; `None` for a rolled field.
    level: Option<Level>,
}

impl SimulationEngine {
    /// Create a match with both vehicles at their spawn points and a freshly
    /// rolled asteroid field.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let spaceship = world_setup::spawn_vehicle(
            &mut world,
            VehicleKind::Spaceship,
            world_setup::default_spawn(VehicleKind::Spaceship),
            config.vehicle_speed,
        );
        let ufo = world_setup::spawn_vehicle(
            &mut world,
            VehicleKind::Ufo,
            world_setup::default_spawn(VehicleKind::Ufo),
            config.vehicle_speed,
        );
        let mut asteroids = Registry::new();
        let field = systems::asteroid_field::spawn(&mut world, &mut rng, &config.field, &mut asteroids);
        info!(
            seed = config.seed,
            asteroids = field.placed_count(),
            "match created"
        );

        Self {
            world,
            config,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng,
            spaceship,
            ufo,
            projectiles: Registry::new(),
            asteroids,
            attractors: Registry::new(),
            spaceship_script: ScriptQueue::new(),
            ufo_script: ScriptQueue::new(),
            command_queue: VecDeque::new(),
            scripted: Vec::new(),
            events: Vec::new(),
            outcome: None,
            field,
            level: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the match by one frame of `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> MatchSnapshot {
        self.scripted.clear();
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_scripts(dt);
            self.run_systems(dt);
            self.time.advance(dt);
        }

        self.snapshot()
    }

    /// Current visible state, draining the events raised since the last snapshot.
    fn snapshot(&mut self) -> MatchSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInput {
                time: self.time,
                phase: self.phase,
                spaceship: (self.spaceship, self.spaceship_script.len()),
                ufo: (self.ufo, self.ufo_script.len()),
                projectiles: &self.projectiles,
                asteroids: &self.asteroids,
                attractors: &self.attractors,
                events,
                outcome: self.outcome,
            },
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Winner and loser once a vehicle has been destroyed.
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn vehicle_entity(&self, kind: VehicleKind) -> Entity {
        match kind {
            VehicleKind::Spaceship => self.spaceship,
            VehicleKind::Ufo => self.ufo,
        }
    }

    /// Copy of a vehicle's state.
    pub fn vehicle(&self, kind: VehicleKind) -> Option<Vehicle> {
        self.world
            .get::<&Vehicle>(self.vehicle_entity(kind))
            .ok()
            .map(|v| Vehicle::clone(&v))
    }

    pub fn projectiles(&self) -> &Registry {
        &self.projectiles
    }

    pub fn asteroids(&self) -> &Registry {
        &self.asteroids
    }

    pub fn attractors(&self) -> &Registry {
        &self.attractors
    }

    /// Layout rolled for the current asteroid field.
    pub fn field(&self) -> &FieldPlan {
        &self.field
    }

    /// Commands the script queues issued during the last tick, in order.
    pub fn scripted_commands(&self) -> &[PlayerCommand] {
        &self.scripted
    }

    pub fn script_len(&self, kind: VehicleKind) -> usize {
        match kind {
            VehicleKind::Spaceship => self.spaceship_script.len(),
            VehicleKind::Ufo => self.ufo_script.len(),
        }
    }

    fn script_mut(&mut self, kind: VehicleKind) -> &mut ScriptQueue {
        match kind {
            VehicleKind::Spaceship => &mut self.spaceship_script,
            VehicleKind::Ufo => &mut self.ufo_script,
        }
    }

    /// Spawn a projectile directly, bypassing a vehicle (for tests).
    #[cfg(test)]
    pub fn spawn_test_projectile(
        &mut self,
        owner: ProjectileOwner,
        position: Position,
        velocity: Velocity,
    ) -> Entity {
        let entity = world_setup::spawn_projectile(&mut self.world, owner, position, velocity);
        self.projectiles.insert(entity);
        entity
    }

    /// Overwrite a vehicle's position and velocity (for tests).
    #[cfg(test)]
    pub fn place_vehicle(&mut self, kind: VehicleKind, position: Position, velocity: Velocity) {
        let entity = self.vehicle_entity(kind);
        if let Ok(mut pos) = self.world.get::<&mut Position>(entity) {
            *pos = position;
        }
        if let Ok(mut vel) = self.world.get::<&mut Velocity>(entity) {
            *vel = velocity;
        }
    }

    /// Serialize the current vehicle and asteroid positions as a level.
    pub fn export_level(&self) -> Level {
        let position = |entity: Entity| {
            self.world
                .get::<&Position>(entity)
                .map(|p| LevelPoint::from(*p))
                .unwrap_or(LevelPoint::new(0.0, 0.0))
        };
        let objects = self
            .asteroids
            .live()
            .iter()
            .filter(|&&e| {
                self.world
                    .get::<&Body>(e)
                    .map(|b| b.enabled)
                    .unwrap_or(false)
            })
            .map(|&e| {
                let p = position(e);
                LevelObject::Asteroid { x: p.x, y: p.y }
            })
            .collect();

        Level {
            spaceship_position: position(self.spaceship),
            ufo_position: position(self.ufo),
            objects,
        }
    }

    /// Move both vehicles to the level's spawn points and replace the
    /// asteroid field with the level's objects.
    pub fn load_level(&mut self, level: &Level) -> Result<(), LevelError> {
        level.validate(self.config.playfield_width, self.config.playfield_height)?;

        world_setup::relocate_vehicle(&mut self.world, self.spaceship, level.spaceship_position.into());
        world_setup::relocate_vehicle(&mut self.world, self.ufo, level.ufo_position.into());

        self.asteroids.clear(&mut self.world);
        self.spawn_level_asteroids(level);
        self.field = FieldPlan::default();
        self.level = Some(level.clone());

        info!(asteroids = self.asteroids.len(), "level loaded");
        Ok(())
    }

    fn spawn_level_asteroids(&mut self, level: &Level) {
        for position in level.asteroid_positions() {
            let entity = world_setup::spawn_asteroid(&mut self.world, position);
            self.asteroids.insert(entity);
        }
    }

    /// Restore both vehicles, clear every projectile, asteroid and attractor,
    /// rebuild the field and start a fresh match. A loaded level is rebuilt
    /// as loaded; otherwise a new field is rolled.
    pub fn reset(&mut self) {
        self.projectiles.clear(&mut self.world);
        self.asteroids.clear(&mut self.world);
        self.attractors.clear(&mut self.world);

        world_setup::reset_vehicle(&mut self.world, self.spaceship);
        world_setup::reset_vehicle(&mut self.world, self.ufo);

        match self.level.take() {
            Some(level) => {
                self.spawn_level_asteroids(&level);
                self.level = Some(level);
            }
            None => {
                self.field = systems::asteroid_field::spawn(
                    &mut self.world,
                    &mut self.rng,
                    &self.config.field,
                    &mut self.asteroids,
                );
            }
        }
        self.spaceship_script.clear();
        self.ufo_script.clear();
        self.outcome = None;
        self.phase = GamePhase::Active;
        self.time = SimTime::default();

        info!(asteroids = self.asteroids.len(), "match reset");
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Move { vehicle, direction } => {
                if let Some(entity) = self.controllable(vehicle) {
                    let speed = self.vehicle_speed(entity);
                    if let Ok(mut vel) = self.world.get::<&mut Velocity>(entity) {
                        let (ux, uy) = direction.unit();
                        if ux != 0.0 {
                            vel.x = ux * speed;
                        }
                        if uy != 0.0 {
                            vel.y = uy * speed;
                        }
                    }
                }
            }
            PlayerCommand::MoveAngle { vehicle, degrees } => {
                if !degrees.is_finite() {
                    warn!(?vehicle, degrees, "ignored move with non-finite angle");
                    return;
                }
                if let Some(entity) = self.controllable(vehicle) {
                    let speed = self.vehicle_speed(entity);
                    if let Ok(mut vel) = self.world.get::<&mut Velocity>(entity) {
                        *vel = Velocity::from_angle(speed, degrees);
                    }
                }
            }
            PlayerCommand::Shoot { vehicle, degrees } => {
                if !degrees.is_finite() {
                    warn!(?vehicle, degrees, "ignored shot with non-finite angle");
                    return;
                }
                if let Some(entity) = self.controllable(vehicle) {
                    self.fire(entity, vehicle.laser(), degrees);
                }
            }
            PlayerCommand::QueueScript { vehicle, actions } => {
                if self.phase != GamePhase::Ended {
                    self.script_mut(vehicle).extend(actions);
                }
            }
            PlayerCommand::ClearScript { vehicle } => {
                self.script_mut(vehicle).clear();
            }
            PlayerCommand::SpawnAttractor { x, y } => {
                let center = Position::new(x, y);
                if !center.is_finite() {
                    warn!(x, y, "ignored attractor with non-finite position");
                    return;
                }
                let entity = world_setup::spawn_attractor(&mut self.world, center);
                self.attractors.insert(entity);
                debug!(x, y, "attractor spawned");
            }
            PlayerCommand::LoadLevel { level } => {
                if let Err(err) = self.load_level(&level) {
                    warn!(%err, "level rejected");
                }
            }
            PlayerCommand::ResetMatch => self.reset(),
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// The vehicle's entity if it can currently act on commands.
    fn controllable(&self, kind: VehicleKind) -> Option<Entity> {
        if self.phase != GamePhase::Active {
            return None;
        }
        let entity = self.vehicle_entity(kind);
        let alive = self.world.get::<&Vehicle>(entity).map(|v| v.alive).ok()?;
        alive.then_some(entity)
    }

    fn vehicle_speed(&self, entity: Entity) -> f64 {
        self.world
            .get::<&Vehicle>(entity)
            .map(|v| v.speed)
            .unwrap_or(0.0)
    }

    /// Spawn a laser at the shooter's position, heading along `degrees`.
    fn fire(&mut self, shooter: Entity, owner: ProjectileOwner, degrees: f64) {
        let origin = match self.world.get::<&Position>(shooter) {
            Ok(p) => *p,
            Err(_) => return,
        };
        let velocity = Velocity::from_angle(PROJECTILE_SPEED, degrees);
        let entity = world_setup::spawn_projectile(&mut self.world, owner, origin, velocity);
        self.projectiles.insert(entity);
        self.events.push(MatchEvent::ProjectileFired { owner });
    }

    /// Release at most one scripted action per vehicle.
    fn run_scripts(&mut self, dt: f64) {
        let interval = self.config.script_interval_secs;
        for kind in VehicleKind::ALL {
            if let Some(action) = self.script_mut(kind).poll(dt, interval) {
                trace!(?kind, ?action, "scripted action");
                let command = action.to_command(kind);
                self.scripted.push(command.clone());
                self.handle_command(command);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let width = self.config.playfield_width;
        let height = self.config.playfield_height;

        // 1. Flush last tick's removals
        let removed =
            self.projectiles.flush(&mut self.world) + self.asteroids.flush(&mut self.world);
        if removed > 0 {
            trace!(removed, "flushed staged entities");
        }
        // 2. Vehicle damping
        systems::damping::run(&mut self.world, self.config.damping);
        // 3. Attractor pull on projectiles
        systems::attraction::run(
            &mut self.world,
            self.projectiles.live(),
            self.attractors.live(),
            self.config.attractor_falloff,
        );
        // 4. Movement integration
        systems::movement::run(&mut self.world, dt);
        systems::movement::confine_vehicles(&mut self.world, width, height);
        // 5. Boundary culling (staged, removed next tick)
        systems::culling::run(&self.world, &mut self.projectiles, width, height);
        // 6. Collisions and hits
        self.resolve_collisions();
    }

    fn resolve_collisions(&mut self) {
        let projectiles = self.projectiles.live().to_vec();
        let asteroids = self.asteroids.live().to_vec();
        let vehicles = [self.spaceship, self.ufo];
        let tick = self.time.tick;

        let world = &mut self.world;
        let projectile_registry = &mut self.projectiles;
        let asteroid_registry = &mut self.asteroids;
        let events = &mut self.events;
        let outcome = &mut self.outcome;

        systems::collision::dispatch(
            world,
            &projectiles,
            &asteroids,
            Response::Collide,
            |world, projectile, asteroid| {
                systems::combat::projectile_strikes_asteroid(
                    world,
                    projectile,
                    asteroid,
                    projectile_registry,
                    asteroid_registry,
                    events,
                );
            },
        );
        systems::collision::dispatch(world, &vehicles, &asteroids, Response::Collide, |_, _, _| {});
        systems::collision::dispatch(world, &vehicles[..1], &vehicles[1..], Response::Collide, |_, _, _| {});
        systems::collision::dispatch(
            world,
            &projectiles,
            &vehicles,
            Response::Overlap,
            |world, projectile, vehicle| {
                if outcome.is_some() {
                    return;
                }
                if let Some(loser) = systems::combat::projectile_strikes_vehicle(
                    world,
                    projectile,
                    vehicle,
                    projectile_registry,
                    events,
                ) {
                    *outcome = Some(MatchOutcome {
                        winner: loser.opponent(),
                        loser,
                        tick,
                    });
                }
            },
        );

        if let Some(result) = self.outcome {
            if self.phase == GamePhase::Active {
                self.phase = GamePhase::Ended;
                self.spaceship_script.clear();
                self.ufo_script.clear();
                info!(winner = ?result.winner, loser = ?result.loser, tick, "match ended");
            }
        }
    }
}
