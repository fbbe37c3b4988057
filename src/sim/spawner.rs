//! Wave and boss spawning policy

use glam::Vec2;
use rand::Rng;

use super::state::{Boss, Enemy, EnemyKind, GameEvent, GameState};
use crate::consts::*;

/// Number of enemies in a normal wave at `level`
pub fn wave_size(level: u32) -> u32 {
    WAVE_BASE_SIZE + WAVE_SIZE_PER_LEVEL * level
}

/// Whether clearing `level` leads to a boss encounter
pub fn is_boss_level(level: u32) -> bool {
    level.is_multiple_of(BOSS_LEVEL_INTERVAL)
}

/// Spawn a normal wave for the current level
///
/// Enemies start above the field at staggered heights so they stream in
/// rather than arriving together.
pub fn spawn_wave(state: &mut GameState) {
    let count = wave_size(state.level);
    state.enemies.reserve(count as usize);

    for _ in 0..count {
        let x = state
            .rng
            .random_range(SPAWN_X_INSET..FIELD_WIDTH - SPAWN_X_INSET);
        let y = state.rng.random_range(SPAWN_Y_MIN..SPAWN_Y_MAX);
        let kind = EnemyKind::ALL[state.rng.random_range(0..EnemyKind::ALL.len())];

        let id = state.next_entity_id();
        let size = state.hitboxes.enemy(kind);
        let enemy = Enemy::new(id, kind, Vec2::new(x, y), size, state.tuning.enemies.get(kind));
        state.enemies.push(enemy);
    }

    state.enemies_destroyed = 0;
    state.events.push(GameEvent::WaveStarted {
        level: state.level,
        enemies: count,
    });
    log::info!("Level {}: wave of {} enemies", state.level, count);
}

/// Spawn the boss for the current level (no-op if one is already active)
pub fn spawn_boss(state: &mut GameState) {
    if state.boss.is_some() {
        log::warn!("Boss already active at level {}", state.level);
        return;
    }

    let size = state.hitboxes.boss;
    let max_health = state.tuning.boss.max_health_for_level(state.level);
    let pos = Vec2::new((FIELD_WIDTH - size.width()) / 2.0, BOSS_SPAWN_Y);
    state.boss = Some(Boss::new(pos, size, state.tuning.boss.speed, max_health));

    state.enemies_destroyed = 0;
    state.events.push(GameEvent::BossSpawned {
        level: state.level,
        max_health,
    });
    log::info!("Level {}: boss spawned with {} health", state.level, max_health);
}

/// React to a cleared field: boss on boss levels, otherwise the next wave
pub fn advance_progression(state: &mut GameState) {
    if is_boss_level(state.level) {
        spawn_boss(state);
    } else {
        state.level += 1;
        spawn_wave(state);
    }
}
