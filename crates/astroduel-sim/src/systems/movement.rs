//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick (`position += velocity * dt`)
//! and keeps vehicles inside the playfield.

use hecs::World;

use astroduel_core::components::{Body, Vehicle};
use astroduel_core::types::{Position, Velocity};

/// Integrate every enabled body that has a velocity.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel, body)) in world.query_mut::<(&mut Position, &Velocity, &Body)>() {
        if !body.enabled || body.immovable {
            continue;
        }
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }
}

/// Clamp vehicles to the playfield. Hitting an edge stops motion along that axis.
pub fn confine_vehicles(world: &mut World, width: f64, height: f64) {
    for (_entity, (pos, vel, body, _vehicle)) in
        world.query_mut::<(&mut Position, &mut Velocity, &Body, &Vehicle)>()
    {
        if !body.enabled {
            continue;
        }
        let (min_x, max_x) = (body.half_width, (width - body.half_width).max(body.half_width));
        let (min_y, max_y) = (body.half_height, (height - body.half_height).max(body.half_height));

        if pos.x < min_x || pos.x > max_x {
            pos.x = pos.x.clamp(min_x, max_x);
            vel.x = 0.0;
        }
        if pos.y < min_y || pos.y > max_y {
            pos.y = pos.y.clamp(min_y, max_y);
            vel.y = 0.0;
        }
    }
}
