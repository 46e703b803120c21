//! Reading and writing level files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use astroduel_core::level::Level;

/// Load and validate a level document from disk.
pub fn read_level(path: &Path) -> Result<Level> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file {}", path.display()))?;
    let level = Level::from_json(&json)
        .with_context(|| format!("invalid level file {}", path.display()))?;
    Ok(level)
}

pub fn write_level(path: &Path, level: &Level) -> Result<()> {
    let json = level.to_json()?;
    fs::write(path, json)
        .with_context(|| format!("failed to write level file {}", path.display()))?;
    Ok(())
}
