//! Asteroid field placement.
//!
//! The vertical spawn range is split into equal bands, one candidate slot
//! per band. Each slot is filled when a roll in `0..99` lands under the
//! current spawn chance. A filled slot lowers the chance for the next one
//! and an empty slot raises it, which keeps fields from clumping.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use astroduel_core::constants::*;
use astroduel_core::types::Position;

use crate::registry::Registry;
use crate::world_setup;

/// Parameters of the placement roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldParams {
    /// Number of bands (candidate slots).
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub initial_chance: u32,
    pub chance_step: u32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: ASTEROID_COUNT,
            x_min: ASTEROID_SPAWN_X_MIN,
            x_max: ASTEROID_SPAWN_X_MAX,
            y_min: ASTEROID_SPAWN_Y_MIN,
            y_max: ASTEROID_SPAWN_Y_MAX,
            initial_chance: ASTEROID_SPAWN_INITIAL_CHANCE,
            chance_step: ASTEROID_SPAWN_CHANCE_STEP,
        }
    }
}

/// Result of one placement roll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPlan {
    /// One entry per band, top to bottom. `None` for an empty slot.
    pub slots: Vec<Option<Position>>,
    /// Spawn chance in effect when each slot was rolled.
    pub chances: Vec<u32>,
    /// Spawn chance after the last slot.
    pub final_chance: u32,
}

impl FieldPlan {
    pub fn placed(&self) -> impl Iterator<Item = Position> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn placed_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Roll a field layout without touching the world.
pub fn plan(rng: &mut ChaCha8Rng, params: &FieldParams) -> FieldPlan {
    let mut plan = FieldPlan {
        final_chance: params.initial_chance.min(ASTEROID_SPAWN_CHANCE_CEILING),
        ..Default::default()
    };
    if params.count == 0 {
        return plan;
    }

    let band_height = (params.y_max - params.y_min) / params.count as f64;
    let mut chance = plan.final_chance;

    for band in 0..params.count {
        plan.chances.push(chance);
        let roll = rng.gen_range(0..ASTEROID_SPAWN_ROLL_RANGE);
        if roll < chance {
            let x = if params.x_max > params.x_min {
                rng.gen_range(params.x_min..params.x_max)
            } else {
                params.x_min
            };
            let y = params.y_min + band as f64 * band_height;
            plan.slots.push(Some(Position::new(x, y)));
            chance = chance.saturating_sub(params.chance_step);
        } else {
            plan.slots.push(None);
            chance = (chance + params.chance_step).min(ASTEROID_SPAWN_CHANCE_CEILING);
        }
    }

    plan.final_chance = chance;
    plan
}

/// Roll a layout and spawn one asteroid per filled slot.
pub fn spawn(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    params: &FieldParams,
    asteroids: &mut Registry,
) -> FieldPlan {
    let plan = plan(rng, params);
    for position in plan.placed() {
        asteroids.insert(world_setup::spawn_asteroid(world, position));
    }
    plan
}
