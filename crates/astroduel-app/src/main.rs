//! ASTRODUEL host CLI: runs a headless match, optionally from a level file
//! and a list of opening commands, and prints the final state.
//!
//! Usage:
//!   cargo run -p astroduel-app -- --seed 7 --ticks 600
//!   cargo run -p astroduel-app -- --level arena.json --commands opening.json --save-level out.json

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use astroduel_app::game_loop::{self, LoopOptions};
use astroduel_app::level_io;
use astroduel_core::commands::PlayerCommand;
use astroduel_core::constants::SCRIPT_ACTION_INTERVAL_SECS;
use astroduel_core::level::Level;
use astroduel_sim::engine::{SimConfig, SimulationEngine};

#[derive(Parser)]
#[command(name = "astroduel")]
#[command(about = "Run a spaceship-versus-UFO duel headlessly")]
struct Args {
    /// RNG seed for the asteroid field
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to run before stopping
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Pace ticks to real time instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Per-tick vehicle velocity multiplier, in [0, 1)
    #[arg(long, value_parser = parse_damping)]
    damping: Option<f64>,

    /// Seconds between two scripted actions of one vehicle
    #[arg(long, default_value_t = SCRIPT_ACTION_INTERVAL_SECS)]
    script_interval: f64,

    /// Level file to load before the first tick
    #[arg(long)]
    level: Option<PathBuf>,

    /// JSON array of commands queued before the first tick
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Write the final layout as a level file
    #[arg(long)]
    save_level: Option<PathBuf>,
}

fn parse_damping(raw: &str) -> Result<f64, String> {
    let factor: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..1.0).contains(&factor) {
        Ok(factor)
    } else {
        Err(format!("damping must be in [0, 1), got {factor}"))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = SimConfig {
        seed: args.seed,
        script_interval_secs: args.script_interval,
        ..Default::default()
    };
    if let Some(damping) = args.damping {
        config.damping = damping;
    }
    let mut engine = SimulationEngine::new(config);

    if let Some(path) = &args.level {
        let level = level_io::read_level(path)?;
        engine.load_level(&level)?;
        info!(path = %path.display(), "level loaded");
    }

    if let Some(path) = &args.commands {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read command file {}", path.display()))?;
        let commands: Vec<PlayerCommand> = serde_json::from_str(&json)
            .with_context(|| format!("invalid command file {}", path.display()))?;
        engine.queue_commands(commands);
    }

    let options = LoopOptions {
        max_ticks: Some(args.ticks),
        unpaced: !args.realtime,
    };
    let handle = game_loop::spawn_game_loop(engine, None, options)
        .context("failed to spawn game loop thread")?;
    let last = handle
        .thread
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?
        .context("game loop produced no snapshot")?;

    println!("=== MATCH STATE ===");
    println!("  Tick:       {}", last.time.tick);
    println!("  Phase:      {:?}", last.phase);
    for view in [&last.spaceship, &last.ufo] {
        println!(
            "  {:<10}  health {} at ({:.1}, {:.1})",
            format!("{:?}:", view.kind),
            view.health,
            view.position.x,
            view.position.y
        );
    }
    println!("  Asteroids:  {}", last.asteroids.len());
    println!("  Lasers:     {}", last.projectiles.len());
    if let Some(outcome) = last.outcome {
        println!("  Winner:     {:?} (tick {})", outcome.winner, outcome.tick);
    }

    if let Some(path) = &args.save_level {
        let level = Level::from_snapshot(&last);
        level_io::write_level(path, &level)?;
        info!(path = %path.display(), "level saved");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damping_range() {
        assert_eq!(parse_damping("0.9"), Ok(0.9));
        assert_eq!(parse_damping("0"), Ok(0.0));
        assert!(parse_damping("1").is_err());
        assert!(parse_damping("1.5").is_err());
        assert!(parse_damping("-0.1").is_err());
        assert!(parse_damping("NaN").is_err());
        assert!(parse_damping("fast").is_err());
    }

    #[test]
    fn test_cli_rejects_out_of_range_damping() {
        assert!(Args::try_parse_from(["astroduel", "--damping", "1.2"]).is_err());
        let args = Args::try_parse_from(["astroduel", "--damping", "0.5"]).unwrap();
        assert_eq!(args.damping, Some(0.5));
    }
}
