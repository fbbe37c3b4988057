//! Star Barrage - simulation core of a 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, cleanup)
//! - `tuning`: Data-driven game balance
//! - `error`: Construction-time configuration failures
//!
//! Rendering, input capture and audio live in the host. The host samples a
//! [`sim::TickInput`] each frame, calls [`sim::tick`] at a fixed cadence and
//! draws from [`sim::Snapshot`]. Gameplay events queue up on the state until
//! the host takes them with [`sim::GameState::drain_events`], which it must do
//! every tick or the queue grows for the whole session.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::{EnemyStats, Tuning};

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Logical play-field dimensions, shared with the presentation layer
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player spawn offset from the bottom edge
    pub const PLAYER_SPAWN_BOTTOM_OFFSET: f32 = 80.0;

    /// Bullets are pruned this far beyond the top/bottom edge
    pub const BULLET_MARGIN: f32 = 20.0;
    /// Enemies and power-ups are pruned this far below the bottom edge
    pub const BOTTOM_MARGIN: f32 = 50.0;

    /// Enemy weave: x += sin(y * FREQ) * AMPLITUDE per tick
    pub const ENEMY_WEAVE_FREQ: f32 = 0.05;
    pub const ENEMY_WEAVE_AMPLITUDE: f32 = 2.0;

    /// Wave size = WAVE_BASE_SIZE + WAVE_SIZE_PER_LEVEL * level
    pub const WAVE_BASE_SIZE: u32 = 5;
    pub const WAVE_SIZE_PER_LEVEL: u32 = 2;
    /// A boss replaces the wave check on levels that are multiples of this
    pub const BOSS_LEVEL_INTERVAL: u32 = 3;
    /// Horizontal inset for enemy spawn positions
    pub const SPAWN_X_INSET: f32 = 50.0;
    /// Enemies spawn with y in [SPAWN_Y_MIN, SPAWN_Y_MAX)
    pub const SPAWN_Y_MIN: f32 = -500.0;
    pub const SPAWN_Y_MAX: f32 = -50.0;
    /// Boss spawn altitude (above the field)
    pub const BOSS_SPAWN_Y: f32 = -100.0;

    /// Score awards
    pub const BOSS_KILL_SCORE: u64 = 1000;
    pub const POWERUP_PICKUP_SCORE: u64 = 50;
    pub const BONUS_SCORE_AWARD: u64 = 500;

    /// Particle burst sizes
    pub const HIT_BURST: usize = 5;
    pub const ENEMY_DEATH_BURST: usize = 30;
    pub const BOSS_HIT_BURST: usize = 10;
    pub const BOSS_DEATH_BURST: usize = 100;
    pub const PLAYER_HIT_BURST: usize = 20;
}

/// Packed 0xRRGGBB colors handed to the renderer
pub mod palette {
    pub const ORANGE: u32 = 0xFFA500;
    pub const YELLOW: u32 = 0xFFFF00;
    pub const PURPLE: u32 = 0x800080;
    pub const RED: u32 = 0xFF0000;
    pub const DARK_RED: u32 = 0x8B0000;
    pub const GREEN: u32 = 0x008000;
    pub const BLUE: u32 = 0x0000FF;
    pub const GOLD: u32 = 0xFFD700;
}
