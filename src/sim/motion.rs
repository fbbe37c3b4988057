//! Per-tick motion rules and hostile firing
//!
//! Each category moves by its own rule. New bullets are appended after the
//! bullet pass so shots fired this tick start moving next tick, except player
//! shots which are emitted before bullets move.

use glam::Vec2;
use rand::Rng;

use super::state::{BossPhase, BulletOwner, GameState};
use super::tick::TickInput;
use crate::consts::*;

/// Advance every entity by one tick
pub fn advance(state: &mut GameState, input: &TickInput) {
    move_player(state, input);
    move_bullets(state);
    move_enemies(state);
    move_boss(state);
    move_power_ups(state);
    move_particles(state);
}

/// Step the ship per active direction (clamped to the field) and fire
pub fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    let mut step = Vec2::ZERO;
    if input.up {
        step.y -= player.speed;
    }
    if input.down {
        step.y += player.speed;
    }
    if input.left {
        step.x -= player.speed;
    }
    if input.right {
        step.x += player.speed;
    }

    let max = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT) - player.size.as_vec2();
    player.pos = (player.pos + step).clamp(Vec2::ZERO, max.max(Vec2::ZERO));

    player.fire_cooldown = player.fire_cooldown.saturating_sub(1);
    if input.fire && player.fire_cooldown == 0 {
        player.fire_cooldown = player.fire_rate;
        let bullet_w = state.hitboxes.bullet.width();
        let pos = Vec2::new(
            player.pos.x + (player.size.width() - bullet_w) / 2.0,
            player.pos.y,
        );
        let vel = Vec2::new(0.0, -state.tuning.bullets.player_speed);
        state.spawn_bullet(pos, vel, BulletOwner::Player);
    }
}

/// Linear translation; out-of-field bullets are left for cleanup
pub fn move_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel;
    }
}

/// Descend and weave, then roll each enemy's shot
pub fn move_enemies(state: &mut GameState) {
    let mut shots: Vec<Vec2> = Vec::new();
    let bullet_w = state.hitboxes.bullet.width();

    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.speed;
        enemy.pos.x += (enemy.pos.y * ENEMY_WEAVE_FREQ).sin() * ENEMY_WEAVE_AMPLITUDE;

        if state.rng.random_bool(enemy.shoot_chance) {
            let b = enemy.bounds();
            shots.push(Vec2::new(b.center().x - bullet_w / 2.0, b.max.y));
        }
    }

    let vel = Vec2::new(0.0, state.tuning.bullets.enemy_speed);
    for pos in shots {
        state.spawn_bullet(pos, vel, BulletOwner::Hostile);
    }
}

/// Descend to patrol altitude, then sweep between the field edges
pub fn move_boss(state: &mut GameState) {
    let altitude = state.tuning.boss.patrol_altitude;
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    match boss.phase {
        BossPhase::Descending => {
            boss.pos.y += boss.descent_speed;
            if boss.pos.y >= altitude {
                boss.phase = BossPhase::Patrolling;
            }
        }
        BossPhase::Patrolling => {
            let max_x = (FIELD_WIDTH - boss.size.width()).max(0.0);
            boss.pos.x += boss.vel_x;
            if boss.pos.x <= 0.0 {
                boss.pos.x = 0.0;
                boss.vel_x = boss.vel_x.abs();
            } else if boss.pos.x >= max_x {
                boss.pos.x = max_x;
                boss.vel_x = -boss.vel_x.abs();
            }
        }
    }

    let b = boss.bounds();
    if state.rng.random_bool(state.tuning.boss.shoot_chance) {
        let bullet_w = state.hitboxes.bullet.width();
        let pos = Vec2::new(b.center().x - bullet_w / 2.0, b.max.y);
        let vel = Vec2::new(0.0, state.tuning.bullets.boss_speed);
        state.spawn_bullet(pos, vel, BulletOwner::Hostile);
    }
}

pub fn move_power_ups(state: &mut GameState) {
    let fall = state.tuning.power_ups.fall_speed;
    for power_up in &mut state.power_ups {
        power_up.pos.y += fall;
    }
}

pub fn move_particles(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Boss, GameState};
    use crate::tuning::Tuning;

    fn quiet_state() -> GameState {
        let mut tuning = Tuning::default();
        tuning.enemies.basic.shoot_chance = 0.0;
        tuning.enemies.fast.shoot_chance = 0.0;
        tuning.enemies.tank.shoot_chance = 0.0;
        tuning.boss.shoot_chance = 0.0;
        let mut state = GameState::new(3, &tuning).unwrap();
        state.enemies.clear();
        state
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut state = quiet_state();
        let start = state.player.pos;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        move_player(&mut state, &right);
        assert_eq!(state.player.pos, start + Vec2::new(5.0, 0.0));

        state.player.pos = Vec2::new(2.0, 3.0);
        let up_left = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        move_player(&mut state, &up_left);
        assert_eq!(state.player.pos, Vec2::ZERO);

        state.player.pos = Vec2::new(FIELD_WIDTH - 42.0, FIELD_HEIGHT - 41.0);
        let down_right = TickInput {
            down: true,
            right: true,
            ..Default::default()
        };
        move_player(&mut state, &down_right);
        assert_eq!(
            state.player.pos,
            Vec2::new(FIELD_WIDTH - 40.0, FIELD_HEIGHT - 40.0)
        );
    }

    #[test]
    fn test_player_fire_respects_cooldown() {
        let mut state = quiet_state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        move_player(&mut state, &fire);
        assert_eq!(state.bullets.len(), 1);
        let bullet = &state.bullets[0];
        assert!(bullet.is_player());
        assert_eq!(bullet.vel, Vec2::new(0.0, -10.0));
        assert_eq!(
            bullet.bounds().center().x,
            state.player.center().x,
            "shot leaves from the ship's center"
        );

        // Fire rate 15: next shot exactly 15 ticks later
        for _ in 0..14 {
            move_player(&mut state, &fire);
        }
        assert_eq!(state.bullets.len(), 1);
        move_player(&mut state, &fire);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_bullets_move_linearly_without_clamping() {
        let mut state = quiet_state();
        state.spawn_bullet(Vec2::new(10.0, 5.0), Vec2::new(0.0, -10.0), BulletOwner::Player);
        move_bullets(&mut state);
        assert_eq!(state.bullets[0].pos, Vec2::new(10.0, -5.0));
        move_bullets(&mut state);
        assert_eq!(state.bullets[0].pos, Vec2::new(10.0, -15.0));
    }

    #[test]
    fn test_enemy_weaves_deterministically() {
        let mut state = quiet_state();
        crate::sim::spawner::spawn_wave(&mut state);
        let before: Vec<_> = state.enemies.iter().map(|e| (e.pos, e.speed)).collect();
        move_enemies(&mut state);
        for (enemy, (pos, speed)) in state.enemies.iter().zip(before) {
            let y = pos.y + speed;
            let x = pos.x + (y * ENEMY_WEAVE_FREQ).sin() * ENEMY_WEAVE_AMPLITUDE;
            assert_eq!(enemy.pos, Vec2::new(x, y));
        }
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_certain_shooter_fires_from_bottom_center() {
        let mut state = quiet_state();
        state.tuning.enemies.tank.shoot_chance = 1.0;
        crate::sim::spawner::spawn_wave(&mut state);
        let tanks = state
            .enemies
            .iter()
            .filter(|e| e.kind == crate::sim::EnemyKind::Tank)
            .count();
        move_enemies(&mut state);
        assert_eq!(state.bullets.len(), tanks);
        assert!(state.bullets.iter().all(|b| b.owner == BulletOwner::Hostile));
        assert!(state.bullets.iter().all(|b| b.vel == Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn test_boss_descends_then_patrols() {
        let mut state = quiet_state();
        let size = state.hitboxes.boss;
        state.boss = Some(Boss::new(Vec2::new(350.0, -100.0), size, 3.0, 60));

        // 150 px at 3 px/tick
        for _ in 0..49 {
            move_boss(&mut state);
        }
        let boss = state.boss.as_ref().unwrap();
        assert_eq!(boss.phase, BossPhase::Descending);
        assert_eq!(boss.pos.x, 350.0);

        move_boss(&mut state);
        let boss = state.boss.as_ref().unwrap();
        assert_eq!(boss.phase, BossPhase::Patrolling);
        assert_eq!(boss.pos.y, 50.0);

        move_boss(&mut state);
        let boss = state.boss.as_ref().unwrap();
        assert_eq!(boss.pos, Vec2::new(353.0, 50.0));
    }

    #[test]
    fn test_boss_reverses_at_edges() {
        let mut state = quiet_state();
        let size = state.hitboxes.boss;
        let mut boss = Boss::new(Vec2::new(FIELD_WIDTH - 101.0, 50.0), size, 3.0, 60);
        boss.phase = BossPhase::Patrolling;
        state.boss = Some(boss);

        move_boss(&mut state);
        let boss = state.boss.as_ref().unwrap();
        assert_eq!(boss.pos.x, FIELD_WIDTH - 100.0);
        assert!(boss.vel_x < 0.0);

        state.boss.as_mut().unwrap().pos.x = 1.0;
        move_boss(&mut state);
        let boss = state.boss.as_ref().unwrap();
        assert_eq!(boss.pos.x, 0.0);
        assert!(boss.vel_x > 0.0);
    }

    #[test]
    fn test_particles_age() {
        let mut state = quiet_state();
        state.spawn_burst(Vec2::new(100.0, 100.0), crate::palette::RED, 3);
        move_particles(&mut state);
        for p in &state.particles {
            assert_eq!(p.life, 29);
            assert!(p.vel.x >= -5.0 && p.vel.x < 5.0);
            assert_eq!(p.pos, Vec2::new(100.0, 100.0) + p.vel);
        }
    }
}
