//! Read-only views for the presentation layer
//!
//! A [`Snapshot`] is an owned copy taken after a completed tick, so a renderer
//! on another thread can draw from it while the next tick runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::palette;

use super::state::{BossPhase, BulletOwner, EnemyKind, GamePhase, GameState, PowerUpKind};

/// Score, level, lives and the terminal flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub game_over: bool,
    pub paused: bool,
    pub tick: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub lives: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub owner: BulletOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub color: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub phase: BossPhase,
    pub color: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
    pub alpha: u8,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: SessionStatus,
    pub player: PlayerView,
    pub bullets: Vec<BulletView>,
    pub enemies: Vec<EnemyView>,
    pub boss: Option<BossView>,
    pub power_ups: Vec<PowerUpView>,
    pub particles: Vec<ParticleView>,
}

impl GameState {
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            score: self.score,
            level: self.level,
            lives: self.player.lives,
            game_over: self.phase == GamePhase::GameOver,
            paused: self.phase == GamePhase::Paused,
            tick: self.time_ticks,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status(),
            player: PlayerView {
                pos: self.player.pos,
                size: self.player.size.as_vec2(),
                lives: self.player.lives,
            },
            bullets: self
                .bullets
                .iter()
                .map(|b| BulletView {
                    id: b.id,
                    pos: b.pos,
                    size: b.size.as_vec2(),
                    owner: b.owner,
                })
                .collect(),
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    pos: e.pos,
                    size: e.size.as_vec2(),
                    health: e.health,
                    color: e.color,
                })
                .collect(),
            boss: self.boss.as_ref().map(|b| BossView {
                pos: b.pos,
                size: b.size.as_vec2(),
                health: b.health,
                max_health: b.max_health,
                phase: b.phase,
                color: palette::DARK_RED,
            }),
            power_ups: self
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.pos,
                    size: p.size.as_vec2(),
                    color: p.kind.color(),
                })
                .collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                    alpha: p.alpha(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::state::GameState;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(9, &Tuning::default()).unwrap();
        state.spawn_burst(glam::Vec2::new(50.0, 50.0), crate::palette::RED, 3);
        let snap = state.snapshot();

        assert_eq!(snap.status.level, 1);
        assert_eq!(snap.status.lives, 3);
        assert!(!snap.status.game_over);
        assert_eq!(snap.enemies.len(), state.enemies.len());
        assert!(snap.boss.is_none());
        assert_eq!(snap.particles.len(), 3);
        assert!(snap.particles.iter().all(|p| p.alpha == 255));
        let ids: Vec<_> = state.enemies.iter().map(|e| e.id).collect();
        let snap_ids: Vec<_> = snap.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, snap_ids);
    }

    #[test]
    fn test_boss_view_is_dark_red() {
        let mut state = GameState::new(9, &Tuning::default()).unwrap();
        state.enemies.clear();
        state.level = 3;
        crate::sim::spawner::spawn_boss(&mut state);
        let boss = state.snapshot().boss.unwrap();
        assert_eq!(boss.color, crate::palette::DARK_RED);
        assert_eq!(boss.health, boss.max_health);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let state = GameState::new(9, &Tuning::default()).unwrap();
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: super::Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, state.status());
    }
}
