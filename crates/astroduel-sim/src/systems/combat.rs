//! Combat resolution: turns detected pairs into state transitions.
//!
//! Vehicle health runs 3 → 2 → 1 → 0. Zero is terminal: the vehicle's body
//! is disabled and hidden and no further hit can register against it.

use hecs::{Entity, World};

use astroduel_core::components::{Body, Projectile, Vehicle};
use astroduel_core::enums::VehicleKind;
use astroduel_core::events::MatchEvent;
use astroduel_core::types::Position;

use crate::registry::Registry;

fn is_enabled(world: &World, entity: Entity) -> bool {
    world.get::<&Body>(entity).map(|b| b.enabled).unwrap_or(false)
}

/// Disable an entity's body and stage it for removal.
fn destroy(world: &mut World, entity: Entity, registry: &mut Registry) {
    if let Ok(mut body) = world.get::<&mut Body>(entity) {
        body.disable();
    }
    registry.stage(entity);
}

/// A projectile struck an asteroid: both are destroyed.
pub fn projectile_strikes_asteroid(
    world: &mut World,
    projectile: Entity,
    asteroid: Entity,
    projectiles: &mut Registry,
    asteroids: &mut Registry,
    events: &mut Vec<MatchEvent>,
) {
    if !is_enabled(world, projectile) || !is_enabled(world, asteroid) {
        return;
    }
    destroy(world, projectile, projectiles);
    destroy(world, asteroid, asteroids);

    if let Ok(pos) = world.get::<&Position>(asteroid) {
        events.push(MatchEvent::AsteroidDestroyed { x: pos.x, y: pos.y });
    }
}

/// A projectile overlaps a vehicle.
///
/// Returns the vehicle's kind if this hit destroyed it. Shots fired by the
/// vehicle's own side, already-spent shots and already-destroyed vehicles
/// produce no transition.
pub fn projectile_strikes_vehicle(
    world: &mut World,
    projectile: Entity,
    vehicle: Entity,
    projectiles: &mut Registry,
    events: &mut Vec<MatchEvent>,
) -> Option<VehicleKind> {
    if !is_enabled(world, projectile) {
        return None;
    }
    let owner = world.get::<&Projectile>(projectile).ok()?.owner;

    let (kind, health) = {
        let mut state = world.get::<&mut Vehicle>(vehicle).ok()?;
        if !owner.can_hit(state.kind) || state.is_destroyed() {
            return None;
        }
        state.health -= 1;
        if state.health == 0 {
            state.alive = false;
        }
        (state.kind, state.health)
    };

    destroy(world, projectile, projectiles);
    events.push(MatchEvent::VehicleHit {
        vehicle: kind,
        health,
    });

    if health > 0 {
        return None;
    }

    if let Ok(mut body) = world.get::<&mut Body>(vehicle) {
        body.disable();
    }
    events.push(MatchEvent::MatchEnded {
        winner: kind.opponent(),
        loser: kind,
    });
    Some(kind)
}
