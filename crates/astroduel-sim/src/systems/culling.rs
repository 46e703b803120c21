//! Boundary culling: stages projectiles that have left the playfield.

use hecs::{Entity, World};

use astroduel_core::components::Body;
use astroduel_core::types::Position;

use crate::registry::Registry;

/// Whether a body centred at `pos` is entirely off a `width` x `height` field.
/// A non-finite position is never on the field.
pub fn is_out_of_bounds(pos: &Position, body: &Body, width: f64, height: f64) -> bool {
    !pos.is_finite()
        || pos.x < -body.half_width
        || pos.x > width + body.half_width
        || pos.y < -body.half_height
        || pos.y > height + body.half_height
}

/// Stage every out-of-bounds projectile for removal at the next flush.
/// Returns the number newly staged.
pub fn run(world: &World, projectiles: &mut Registry, width: f64, height: f64) -> usize {
    let outside: Vec<Entity> = projectiles
        .live()
        .iter()
        .copied()
        .filter(|&entity| {
            let pos = world.get::<&Position>(entity);
            let body = world.get::<&Body>(entity);
            match (pos, body) {
                (Ok(pos), Ok(body)) => is_out_of_bounds(&pos, &body, width, height),
                _ => false,
            }
        })
        .collect();

    outside
        .into_iter()
        .filter(|&entity| projectiles.stage(entity))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_expanded_by_half_extent() {
        let body = Body::square(6.0);
        assert!(!is_out_of_bounds(&Position::new(1006.0, 300.0), &body, 1000.0, 600.0));
        assert!(is_out_of_bounds(&Position::new(1007.0, 300.0), &body, 1000.0, 600.0));
        assert!(!is_out_of_bounds(&Position::new(-6.0, 300.0), &body, 1000.0, 600.0));
        assert!(is_out_of_bounds(&Position::new(500.0, -6.5), &body, 1000.0, 600.0));
        assert!(is_out_of_bounds(&Position::new(500.0, 607.0), &body, 1000.0, 600.0));
        assert!(!is_out_of_bounds(&Position::new(500.0, 300.0), &body, 1000.0, 600.0));
    }

    #[test]
    fn test_non_finite_position_is_out_of_bounds() {
        let body = Body::square(6.0);
        assert!(is_out_of_bounds(&Position::new(f64::NAN, 300.0), &body, 1000.0, 600.0));
        assert!(is_out_of_bounds(&Position::new(500.0, f64::NAN), &body, 1000.0, 600.0));
        assert!(is_out_of_bounds(&Position::new(f64::NEG_INFINITY, 300.0), &body, 1000.0, 600.0));
    }

    #[test]
    fn test_run_stages_without_removing() {
        let mut world = World::new();
        let mut registry = Registry::new();
        let inside = world.spawn((Position::new(500.0, 300.0), Body::square(6.0)));
        let outside = world.spawn((Position::new(1007.0, 300.0), Body::square(6.0)));
        registry.insert(inside);
        registry.insert(outside);

        assert_eq!(run(&world, &mut registry, 1000.0, 600.0), 1);
        assert!(registry.is_staged(outside));
        assert!(!registry.is_staged(inside));
        assert!(registry.contains(outside));
        assert!(world.contains(outside));

        // Already staged: not counted twice.
        assert_eq!(run(&world, &mut registry, 1000.0, 600.0), 0);
    }
}
