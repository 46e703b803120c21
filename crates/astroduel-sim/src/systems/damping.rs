//! Velocity damping: vehicles drift to rest when no command is issued.

use hecs::World;

use astroduel_core::components::Vehicle;
use astroduel_core::types::Velocity;

/// Multiply every vehicle's velocity by `factor` (expected in `0.0..1.0`).
pub fn run(world: &mut World, factor: f64) {
    for (_entity, (vel, _vehicle)) in world.query_mut::<(&mut Velocity, &Vehicle)>() {
        vel.x *= factor;
        vel.y *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astroduel_core::components::Projectile;
    use astroduel_core::enums::{ProjectileOwner, VehicleKind};
    use astroduel_core::types::Position;

    #[test]
    fn test_damping_is_geometric() {
        let mut world = World::new();
        let entity = world.spawn((
            Vehicle::new(VehicleKind::Spaceship, Position::default(), 140.0),
            Velocity::new(100.0, -50.0),
        ));

        run(&mut world, 0.6);
        let vel = *world.get::<&Velocity>(entity).unwrap();
        assert!((vel.x - 60.0).abs() < 1e-9);
        assert!((vel.y + 30.0).abs() < 1e-9);

        run(&mut world, 0.6);
        let vel = *world.get::<&Velocity>(entity).unwrap();
        assert!((vel.x - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_projectiles_are_not_damped() {
        let mut world = World::new();
        let shot = world.spawn((
            Projectile {
                owner: ProjectileOwner::UfoLaser,
            },
            Velocity::new(200.0, 0.0),
        ));
        run(&mut world, 0.5);
        assert_eq!(world.get::<&Velocity>(shot).unwrap().x, 200.0);
    }
}
