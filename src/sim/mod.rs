//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - One seeded RNG owned by the state
//! - Stable iteration order (insertion order, entity IDs ascend)
//! - No rendering, input or platform dependencies

pub mod aabb;
pub mod autopilot;
pub mod cleanup;
pub mod collision;
pub mod motion;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, Hitbox};
pub use snapshot::{SessionStatus, Snapshot};
pub use state::{
    Boss, BossPhase, Bullet, BulletOwner, Enemy, EnemyKind, GameEvent, GamePhase, GameState,
    Particle, Player, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
