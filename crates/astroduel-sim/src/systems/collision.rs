//! Collision and overlap dispatch between two entity collections.
//!
//! Detection is a read-only sweep over enabled bodies. Every intersecting
//! pair found by the sweep is handed to the callback exactly once, in sweep
//! order. Callbacks must not despawn; they disable bodies and stage removals
//! on a `Registry` instead, so later pairs in the same sweep still refer to
//! live entities.

use glam::DVec2;
use hecs::{Entity, World};

use astroduel_core::components::Body;
use astroduel_core::types::{Position, Velocity};

/// Physical response applied to a detected pair before its callback runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Separate the bodies and cancel their closing velocity.
    Collide,
    /// Detection only.
    Overlap,
}

fn shape(world: &World, entity: Entity) -> Option<(Position, Body)> {
    let pos = *world.get::<&Position>(entity).ok()?;
    let body = *world.get::<&Body>(entity).ok()?;
    body.enabled.then_some((pos, body))
}

/// Penetration depth along each axis, or `None` if the boxes don't intersect.
/// Touching edges do not count as intersecting.
pub fn penetration(pa: &Position, ba: &Body, pb: &Position, bb: &Body) -> Option<DVec2> {
    let depth = DVec2::new(
        ba.half_width + bb.half_width - (pb.x - pa.x).abs(),
        ba.half_height + bb.half_height - (pb.y - pa.y).abs(),
    );
    (depth.x > 0.0 && depth.y > 0.0).then_some(depth)
}

/// All intersecting `(a, b)` pairs, `a` drawn from `first` and `b` from `second`.
pub fn detect(world: &World, first: &[Entity], second: &[Entity]) -> Vec<(Entity, Entity)> {
    let mut pairs = Vec::new();
    let second_shapes: Vec<(Entity, Position, Body)> = second
        .iter()
        .filter_map(|&e| shape(world, e).map(|(p, b)| (e, p, b)))
        .collect();

    for &a in first {
        let Some((pa, ba)) = shape(world, a) else {
            continue;
        };
        for &(b, pb, bb) in &second_shapes {
            if a != b && penetration(&pa, &ba, &pb, &bb).is_some() {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

/// Detect pairs between `first` and `second`, apply `response`, and invoke
/// `on_pair` once per pair. Returns the number of pairs dispatched.
pub fn dispatch<F>(
    world: &mut World,
    first: &[Entity],
    second: &[Entity],
    response: Response,
    mut on_pair: F,
) -> usize
where
    F: FnMut(&mut World, Entity, Entity),
{
    let pairs = detect(world, first, second);
    for &(a, b) in &pairs {
        if response == Response::Collide {
            separate(world, a, b);
        }
        on_pair(world, a, b);
    }
    pairs.len()
}

/// Push two intersecting bodies apart along the axis of least penetration.
/// Immovable bodies never move; two movable bodies split the push evenly.
pub fn separate(world: &mut World, a: Entity, b: Entity) {
    let (Some((pa, ba)), Some((pb, bb))) = (shape(world, a), shape(world, b)) else {
        return;
    };
    // An earlier pair in the same sweep may already have pushed these apart.
    let Some(depth) = penetration(&pa, &ba, &pb, &bb) else {
        return;
    };

    let (share_a, share_b) = match (ba.immovable, bb.immovable) {
        (false, false) => (0.5, 0.5),
        (false, true) => (1.0, 0.0),
        (true, false) => (0.0, 1.0),
        (true, true) => return,
    };

    let delta = pb.as_dvec2() - pa.as_dvec2();
    let (normal, amount) = if depth.x < depth.y {
        (DVec2::new(if delta.x >= 0.0 { 1.0 } else { -1.0 }, 0.0), depth.x)
    } else {
        (DVec2::new(0.0, if delta.y >= 0.0 { 1.0 } else { -1.0 }), depth.y)
    };

    push(world, a, -normal, amount * share_a);
    push(world, b, normal, amount * share_b);
}

/// Move `entity` by `amount` along `away` and drop any velocity heading back.
fn push(world: &mut World, entity: Entity, away: DVec2, amount: f64) {
    if amount <= 0.0 {
        return;
    }
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        *pos = Position::from(pos.as_dvec2() + away * amount);
    }
    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        let v = vel.as_dvec2();
        let closing = v.dot(away);
        if closing < 0.0 {
            *vel = Velocity::from(v - away * closing);
        }
    }
}
