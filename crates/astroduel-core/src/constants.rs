//! Simulation constants and tuning parameters.

/// Nominal host frame rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal frame rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Playfield ---

pub const PLAYFIELD_WIDTH: f64 = 1000.0;
pub const PLAYFIELD_HEIGHT: f64 = 600.0;

// --- Vehicles ---

/// Health every vehicle starts (and resets) with.
pub const VEHICLE_MAX_HEALTH: u8 = 3;

/// Scalar speed applied by a directional command (pixels/s).
pub const VEHICLE_SPEED: f64 = 140.0;

/// Per-frame velocity multiplier applied to both vehicles.
pub const VEHICLE_DAMPING: f64 = 0.98;

/// Half width/height of a vehicle's collision box.
pub const VEHICLE_HALF_EXTENT: f64 = 40.0;

pub const SPACESHIP_SPAWN_X: f64 = PLAYFIELD_WIDTH / 2.0 - PLAYFIELD_WIDTH / 2.5;
pub const SPACESHIP_SPAWN_Y: f64 = PLAYFIELD_HEIGHT / 2.0;
pub const UFO_SPAWN_X: f64 = PLAYFIELD_WIDTH / 2.0 + PLAYFIELD_WIDTH / 2.5;
pub const UFO_SPAWN_Y: f64 = PLAYFIELD_HEIGHT / 2.0;

/// Default firing direction for the spaceship (faces right).
pub const SPACESHIP_FACING_DEGREES: f64 = 0.0;
/// Default firing direction for the UFO (faces left).
pub const UFO_FACING_DEGREES: f64 = 180.0;

// --- Projectiles ---

/// Launch speed of every laser (pixels/s).
pub const PROJECTILE_SPEED: f64 = 200.0;
pub const PROJECTILE_HALF_EXTENT: f64 = 6.0;

// --- Asteroids ---

pub const ASTEROID_HALF_EXTENT: f64 = 26.0;
pub const ASTEROID_COUNT: usize = 8;
pub const ASTEROID_SPAWN_X_MIN: f64 = PLAYFIELD_WIDTH / 2.0 - PLAYFIELD_WIDTH / 4.0;
pub const ASTEROID_SPAWN_X_MAX: f64 = PLAYFIELD_WIDTH / 2.0 + PLAYFIELD_WIDTH / 4.0;
pub const ASTEROID_SPAWN_Y_MIN: f64 = 50.0;
pub const ASTEROID_SPAWN_Y_MAX: f64 = PLAYFIELD_HEIGHT - 50.0;

/// Slot rolls are drawn from `0..ASTEROID_SPAWN_ROLL_RANGE`.
pub const ASTEROID_SPAWN_ROLL_RANGE: u32 = 99;
/// Spawn-chance threshold before the first slot is rolled.
pub const ASTEROID_SPAWN_INITIAL_CHANCE: u32 = 90;
/// Threshold change per filled (−) or empty (+) slot.
pub const ASTEROID_SPAWN_CHANCE_STEP: u32 = 10;
/// Upper bound for the threshold; any roll in range fills the slot at this value.
pub const ASTEROID_SPAWN_CHANCE_CEILING: u32 = ASTEROID_SPAWN_ROLL_RANGE;

// --- Attractors ---

pub const ATTRACTOR_HALF_EXTENT: f64 = 32.0;

// --- Scripts ---

/// Minimum simulated time between two scripted actions of one vehicle.
pub const SCRIPT_ACTION_INTERVAL_SECS: f64 = 0.5;
