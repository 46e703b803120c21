//! Attractor ("black hole") pull on in-flight projectiles.

use glam::DVec2;
use hecs::{Entity, World};

use astroduel_core::components::Body;
use astroduel_core::enums::AttractorFalloff;
use astroduel_core::types::{Position, Velocity};

/// Velocity change a projectile at `from` receives from an attractor at `center`.
/// A projectile sitting exactly on the centre receives none.
pub fn pull(from: DVec2, center: DVec2, falloff: AttractorFalloff) -> DVec2 {
    let offset = center - from;
    let distance = offset.length();
    if distance <= f64::EPSILON {
        return DVec2::ZERO;
    }
    let direction = offset / distance;
    match falloff {
        AttractorFalloff::Unit => direction,
        AttractorFalloff::InverseSquare {
            strength,
            min_distance,
        } => {
            let d = distance.max(min_distance);
            direction * (strength / (d * d))
        }
    }
}

/// Add every attractor's pull to every enabled projectile's velocity.
pub fn run(
    world: &mut World,
    projectiles: &[Entity],
    attractors: &[Entity],
    falloff: AttractorFalloff,
) {
    if attractors.is_empty() {
        return;
    }

    let centers: Vec<DVec2> = attractors
        .iter()
        .filter_map(|&entity| world.get::<&Position>(entity).ok().map(|p| p.as_dvec2()))
        .collect();

    for &entity in projectiles {
        let enabled = world.get::<&Body>(entity).map(|b| b.enabled).unwrap_or(false);
        if !enabled {
            continue;
        }
        let from = match world.get::<&Position>(entity) {
            Ok(p) => p.as_dvec2(),
            Err(_) => continue,
        };
        let total: DVec2 = centers.iter().map(|&c| pull(from, c, falloff)).sum();
        if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
            *vel = Velocity::from(vel.as_dvec2() + total);
        }
    }
}
