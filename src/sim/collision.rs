//! Collision detection and resolution
//!
//! Box overlap is the only geometric test. Pairs are resolved in a fixed
//! priority order; later steps see the flags and health written by earlier
//! ones, but no entity moves and no collection shrinks until cleanup.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::palette;

/// Run every resolution step in priority order
pub fn resolve(state: &mut GameState) {
    player_bullets_vs_enemies(state);
    player_bullets_vs_boss(state);
    hostile_bullets_vs_player(state);
    enemies_vs_player(state);
    power_ups_vs_player(state);
}

/// Each live player bullet hits at most one enemy: the first overlapping one
pub fn player_bullets_vs_enemies(state: &mut GameState) {
    // Drops are buffered until the scan finishes
    let mut drops: Vec<Vec2> = Vec::new();

    for bi in 0..state.bullets.len() {
        let bullet = &state.bullets[bi];
        if !bullet.is_player() || bullet.dead {
            continue;
        }
        let bounds = bullet.bounds();
        let damage = bullet.damage;

        let Some(ei) = state
            .enemies
            .iter()
            .position(|e| e.is_alive() && e.bounds().intersects(&bounds))
        else {
            continue;
        };

        state.bullets[bi].dead = true;
        let enemy = &mut state.enemies[ei];
        enemy.health -= damage;
        let killed = !enemy.is_alive();
        let (kind, score, color, pos, center) = (
            enemy.kind,
            enemy.score,
            enemy.color,
            enemy.pos,
            enemy.bounds().center(),
        );

        state.spawn_burst(bounds.center(), palette::YELLOW, HIT_BURST);

        if killed {
            state.spawn_burst(center, color, ENEMY_DEATH_BURST);
            state.award(score);
            state.enemies_destroyed += 1;
            state.total_kills += 1;
            state.events.push(GameEvent::EnemyKilled { kind, score });
            log::debug!("{} enemy destroyed (+{score})", kind.name());

            if state.rng.random_bool(state.tuning.power_ups.drop_chance) {
                drops.push(pos);
            }
        }
    }

    for pos in drops {
        state.spawn_power_up(pos);
    }
}

/// Player bullets not already consumed this tick damage the boss
pub fn player_bullets_vs_boss(state: &mut GameState) {
    for bi in 0..state.bullets.len() {
        let Some(boss) = state.boss.as_mut() else {
            return;
        };
        let bullet = &mut state.bullets[bi];
        if !bullet.is_player() || bullet.dead || !boss.bounds().intersects(&bullet.bounds()) {
            continue;
        }

        bullet.dead = true;
        boss.health -= bullet.damage;
        let hit_at = bullet.bounds().center();
        let killed = !boss.is_alive();
        let center = boss.bounds().center();

        state.spawn_burst(hit_at, palette::ORANGE, BOSS_HIT_BURST);

        if killed {
            state.spawn_burst(center, palette::RED, BOSS_DEATH_BURST);
            state.award(BOSS_KILL_SCORE);
            state.boss = None;
            state.events.push(GameEvent::BossDefeated { level: state.level });
            log::info!("Boss defeated at level {} (+{BOSS_KILL_SCORE})", state.level);
            state.level += 1;
        }
    }
}

/// Any hostile bullet touching the ship costs one life
pub fn hostile_bullets_vs_player(state: &mut GameState) {
    for bi in 0..state.bullets.len() {
        if state.is_game_over() {
            return;
        }
        let player_bounds = state.player.bounds();
        let bullet = &mut state.bullets[bi];
        if bullet.is_player() || bullet.dead || !bullet.bounds().intersects(&player_bounds) {
            continue;
        }

        bullet.dead = true;
        state.damage_player(1);
        state.spawn_burst(player_bounds.center(), palette::RED, PLAYER_HIT_BURST);
    }
}

/// Ramming the ship destroys the enemy outright and costs one life.
/// Rammed enemies award no score.
pub fn enemies_vs_player(state: &mut GameState) {
    for ei in 0..state.enemies.len() {
        if state.is_game_over() {
            return;
        }
        let player_bounds = state.player.bounds();
        let enemy = &mut state.enemies[ei];
        if !enemy.is_alive() || !enemy.bounds().intersects(&player_bounds) {
            continue;
        }

        enemy.health = 0;
        let (center, color) = (enemy.bounds().center(), enemy.color);
        state.damage_player(1);
        state.spawn_burst(center, color, ENEMY_DEATH_BURST);
    }
}

/// Pickups apply immediately and award a flat bonus on top of their effect
pub fn power_ups_vs_player(state: &mut GameState) {
    let floor = state.tuning.player.fire_rate_floor;
    let step = state.tuning.player.faster_fire_step;

    for pi in 0..state.power_ups.len() {
        if state.is_game_over() {
            return;
        }
        let power_up = &mut state.power_ups[pi];
        if power_up.dead || !power_up.bounds().intersects(&state.player.bounds()) {
            continue;
        }

        power_up.dead = true;
        let kind = power_up.kind;
        let bonus = power_up.apply(&mut state.player, floor, step);
        state.award(bonus + POWERUP_PICKUP_SCORE);
        state.events.push(GameEvent::PowerUpCollected { kind });
        log::debug!("Picked up {kind:?}");
    }
}
