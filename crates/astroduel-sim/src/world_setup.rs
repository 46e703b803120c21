//! Entity spawn factories for setting up the match world.
//!
//! Each factory spawns one entity with the component bundle its kind needs.

use hecs::{Entity, World};

use astroduel_core::components::*;
use astroduel_core::constants::*;
use astroduel_core::enums::*;
use astroduel_core::types::{Position, Velocity};

/// Spawn point of a vehicle on a fresh match.
pub fn default_spawn(kind: VehicleKind) -> Position {
    match kind {
        VehicleKind::Spaceship => Position::new(SPACESHIP_SPAWN_X, SPACESHIP_SPAWN_Y),
        VehicleKind::Ufo => Position::new(UFO_SPAWN_X, UFO_SPAWN_Y),
    }
}

/// Spawn a vehicle at rest at `spawn`.
pub fn spawn_vehicle(world: &mut World, kind: VehicleKind, spawn: Position, speed: f64) -> Entity {
    world.spawn((
        Vehicle::new(kind, spawn, speed),
        spawn,
        Velocity::default(),
        Body::square(VEHICLE_HALF_EXTENT),
    ))
}

/// Spawn a laser of the given owner.
pub fn spawn_projectile(
    world: &mut World,
    owner: ProjectileOwner,
    position: Position,
    velocity: Velocity,
) -> Entity {
    world.spawn((
        Projectile { owner },
        position,
        velocity,
        Body::square(PROJECTILE_HALF_EXTENT),
    ))
}

/// Spawn an immovable asteroid.
pub fn spawn_asteroid(world: &mut World, position: Position) -> Entity {
    world.spawn((
        Asteroid,
        position,
        Velocity::default(),
        Body::square(ASTEROID_HALF_EXTENT).immovable(),
    ))
}

/// Spawn an attractor. It has no velocity, so movement never touches it.
pub fn spawn_attractor(world: &mut World, position: Position) -> Entity {
    world.spawn((
        Attractor,
        position,
        Body::square(ATTRACTOR_HALF_EXTENT).immovable(),
    ))
}

/// Put a vehicle back into its spawn state: full health, at its spawn
/// point, at rest, with an enabled body. Safe to call on a vehicle that
/// was never destroyed.
pub fn reset_vehicle(world: &mut World, entity: Entity) {
    let spawn = match world.get::<&mut Vehicle>(entity) {
        Ok(mut vehicle) => {
            vehicle.health = VEHICLE_MAX_HEALTH;
            vehicle.alive = true;
            vehicle.speed = vehicle.spawn_speed;
            vehicle.spawn
        }
        Err(_) => return,
    };
    if let Ok(mut position) = world.get::<&mut Position>(entity) {
        *position = spawn;
    }
    if let Ok(mut velocity) = world.get::<&mut Velocity>(entity) {
        *velocity = Velocity::default();
    }
    if let Ok(mut body) = world.get::<&mut Body>(entity) {
        body.enable();
    }
}

/// Move a vehicle's spawn point and place it there at rest.
pub fn relocate_vehicle(world: &mut World, entity: Entity, spawn: Position) {
    if let Ok(mut vehicle) = world.get::<&mut Vehicle>(entity) {
        vehicle.spawn = spawn;
    }
    if let Ok(mut position) = world.get::<&mut Position>(entity) {
        *position = spawn;
    }
    if let Ok(mut velocity) = world.get::<&mut Velocity>(entity) {
        *velocity = Velocity::default();
    }
}
