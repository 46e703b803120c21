//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in screen space (pixels). x = right, y = down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in screen space (pixels/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Velocity of the given magnitude pointing along `degrees`
    /// (0 = right, 90 = down).
    pub fn from_angle(speed: f64, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Self::new(speed * radians.cos(), speed * radians.sin())
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
