//! Builds the `MatchSnapshot` handed to the host after each tick.

use hecs::{Entity, World};

use astroduel_core::components::{Body, Projectile, Vehicle};
use astroduel_core::enums::{GamePhase, VehicleKind};
use astroduel_core::events::{MatchEvent, MatchOutcome};
use astroduel_core::state::{MatchSnapshot, ProjectileView, VehicleView};
use astroduel_core::types::{Position, SimTime, Velocity};

use crate::registry::Registry;

/// Everything besides the world a snapshot is built from.
pub struct SnapshotInput<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub spaceship: (Entity, usize),
    pub ufo: (Entity, usize),
    pub projectiles: &'a Registry,
    pub asteroids: &'a Registry,
    pub attractors: &'a Registry,
    pub events: Vec<MatchEvent>,
    pub outcome: Option<MatchOutcome>,
}

fn is_visible(world: &World, entity: Entity) -> bool {
    world.get::<&Body>(entity).map(|b| b.visible).unwrap_or(false)
}

fn vehicle_view(world: &World, entity: Entity, kind: VehicleKind, queued_actions: usize) -> VehicleView {
    let (health, alive) = world
        .get::<&Vehicle>(entity)
        .map(|v| (v.health, v.alive))
        .unwrap_or((0, false));
    VehicleView {
        kind,
        position: world.get::<&Position>(entity).map(|p| *p).unwrap_or_default(),
        velocity: world.get::<&Velocity>(entity).map(|v| *v).unwrap_or_default(),
        health,
        alive,
        visible: is_visible(world, entity),
        queued_actions,
    }
}

/// Collect the visible state. Spent projectiles and asteroids still waiting
/// for the next flush are hidden and left out.
pub fn build_snapshot(world: &World, input: SnapshotInput<'_>) -> MatchSnapshot {
    let projectiles = input
        .projectiles
        .live()
        .iter()
        .filter(|&&e| is_visible(world, e))
        .filter_map(|&e| {
            let owner = world.get::<&Projectile>(e).ok()?.owner;
            let position = *world.get::<&Position>(e).ok()?;
            let velocity = *world.get::<&Velocity>(e).ok()?;
            Some(ProjectileView {
                owner,
                position,
                velocity,
            })
        })
        .collect();

    let positions = |registry: &Registry| -> Vec<Position> {
        registry
            .live()
            .iter()
            .filter(|&&e| is_visible(world, e))
            .filter_map(|&e| world.get::<&Position>(e).ok().map(|p| *p))
            .collect()
    };

    MatchSnapshot {
        time: input.time,
        phase: input.phase,
        spaceship: vehicle_view(world, input.spaceship.0, VehicleKind::Spaceship, input.spaceship.1),
        ufo: vehicle_view(world, input.ufo.0, VehicleKind::Ufo, input.ufo.1),
        projectiles,
        asteroids: positions(input.asteroids),
        attractors: positions(input.attractors),
        events: input.events,
        outcome: input.outcome,
    }
}
