//! Star Barrage headless runner
//!
//! Drives the simulation with the autopilot at the fixed tick rate (as fast
//! as possible, no wall-clock pacing) and reports how the session went.
//!
//! Usage:
//!   cargo run --release -- --seed 7 --ticks 36000
//!   RUST_LOG=debug cargo run -- --config tuning.json --json

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use star_barrage::Tuning;
use star_barrage::consts::TICKS_PER_SECOND;
use star_barrage::sim::{GameEvent, GameState, SessionStatus, autopilot, tick};

#[derive(Parser)]
#[command(name = "star-barrage")]
#[command(about = "Run a headless Star Barrage session driven by the autopilot")]
struct Args {
    /// Run seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Stop after this many ticks if the session is still alive
    #[arg(long, default_value_t = 10 * 60 * TICKS_PER_SECOND as u64)]
    ticks: u64,
    /// Optional JSON tuning file (missing fields keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the final status as JSON
    #[arg(long)]
    json: bool,
}

/// Tallies of drained events
#[derive(Debug, Default)]
struct RunStats {
    kills: u32,
    bosses: u32,
    pickups: u32,
    hits: u32,
}

impl RunStats {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::EnemyKilled { .. } => self.kills += 1,
            GameEvent::BossDefeated { .. } => self.bosses += 1,
            GameEvent::PowerUpCollected { .. } => self.pickups += 1,
            GameEvent::PlayerHit { .. } => self.hits += 1,
            GameEvent::WaveStarted { .. }
            | GameEvent::BossSpawned { .. }
            | GameEvent::GameOver { .. } => {}
        }
    }
}

fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let tuning = Tuning::from_json(&json)
        .with_context(|| format!("invalid tuning in {}", path.display()))?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(tuning)
}

fn run(state: &mut GameState, max_ticks: u64) -> RunStats {
    let mut stats = RunStats::default();
    let report_every = 10 * TICKS_PER_SECOND as u64;

    while state.time_ticks < max_ticks && !state.is_game_over() {
        let input = autopilot::next_input(state);
        tick(state, &input);

        for event in state.drain_events() {
            stats.record(&event);
        }

        if state.time_ticks.is_multiple_of(report_every) {
            let status = state.status();
            log::info!(
                "t={}s level={} score={} lives={}",
                status.tick / TICKS_PER_SECOND as u64,
                status.level,
                status.score,
                status.lives
            );
        }
    }

    stats
}

fn print_status(status: &SessionStatus, stats: &RunStats) {
    println!("=== SESSION ===");
    println!("  Ticks:      {}", status.tick);
    println!("  Level:      {}", status.level);
    println!("  Score:      {}", status.score);
    println!("  Lives:      {}", status.lives);
    println!("  Game over:  {}", status.game_over);
    println!("  Kills:      {}", stats.kills);
    println!("  Bosses:     {}", stats.bosses);
    println!("  Pickups:    {}", stats.pickups);
    println!("  Hits taken: {}", stats.hits);
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let tuning = load_tuning(args.config.as_ref())?;
    let mut state = GameState::new(args.seed, &tuning).context("failed to start session")?;

    let stats = run(&mut state, args.ticks);
    let status = state.status();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print_status(&status, &stats);
    }

    Ok(())
}
