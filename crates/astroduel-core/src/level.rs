//! Level documents: vehicle spawn points plus a list of placed objects.
//!
//! The JSON shape is shared with existing level files, including the
//! `"astroid"` object tag.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::state::MatchSnapshot;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub spaceship_position: LevelPoint,
    pub ufo_position: LevelPoint,
    pub objects: Vec<LevelObject>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LevelObject {
    #[serde(rename = "astroid")]
    Asteroid { x: f64, y: f64 },
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("malformed level document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{what} has a non-finite coordinate ({x}, {y})")]
    NonFinite { what: String, x: f64, y: f64 },
    #[error("{what} at ({x}, {y}) lies outside the {width}x{height} playfield")]
    OutOfBounds {
        what: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl LevelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Position> for LevelPoint {
    fn from(p: Position) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<LevelPoint> for Position {
    fn from(p: LevelPoint) -> Self {
        Position::new(p.x, p.y)
    }
}

impl LevelObject {
    pub fn position(&self) -> Position {
        match *self {
            LevelObject::Asteroid { x, y } => Position::new(x, y),
        }
    }
}

impl Level {
    /// Parse and validate a level against the default playfield.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)?;
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Every coordinate must be finite and inside `[0, width] x [0, height]`.
    pub fn validate(&self, width: f64, height: f64) -> Result<(), LevelError> {
        check_point("spaceship position", self.spaceship_position.into(), width, height)?;
        check_point("ufo position", self.ufo_position.into(), width, height)?;
        for (i, object) in self.objects.iter().enumerate() {
            check_point(&format!("object {i}"), object.position(), width, height)?;
        }
        Ok(())
    }

    /// Layout shown by a snapshot: vehicle positions and the visible asteroids.
    pub fn from_snapshot(snapshot: &MatchSnapshot) -> Self {
        Self {
            spaceship_position: snapshot.spaceship.position.into(),
            ufo_position: snapshot.ufo.position.into(),
            objects: snapshot
                .asteroids
                .iter()
                .map(|p| LevelObject::Asteroid { x: p.x, y: p.y })
                .collect(),
        }
    }

    /// Positions of every asteroid object, in document order.
    pub fn asteroid_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.objects.iter().map(|object| match object {
            LevelObject::Asteroid { .. } => object.position(),
        })
    }
}

fn check_point(what: &str, p: Position, width: f64, height: f64) -> Result<(), LevelError> {
    if !p.x.is_finite() || !p.y.is_finite() {
        return Err(LevelError::NonFinite {
            what: what.to_string(),
            x: p.x,
            y: p.y,
        });
    }
    if !(0.0..=width).contains(&p.x) || !(0.0..=height).contains(&p.y) {
        return Err(LevelError::OutOfBounds {
            what: what.to_string(),
            x: p.x,
            y: p.y,
            width,
            height,
        });
    }
    Ok(())
}
