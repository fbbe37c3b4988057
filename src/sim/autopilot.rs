//! Scripted pilot for demos and soak runs
//!
//! Reads the state, never mutates it, and draws no randomness, so a run
//! driven by the autopilot stays reproducible from its seed.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// How far above the ship hostile shots are considered a threat
const DODGE_LOOKAHEAD: f32 = 90.0;
/// Power-ups lower than this are worth chasing
const PICKUP_CHASE_Y: f32 = FIELD_HEIGHT * 0.5;

/// Pick the input for the next tick
pub fn next_input(state: &GameState) -> TickInput {
    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };

    let player = state.player.bounds();
    let center = player.center();
    let deadzone = state.player.speed;

    // Return to the home row if something pushed us up
    let home_y = FIELD_HEIGHT - PLAYER_SPAWN_BOTTOM_OFFSET;
    if state.player.pos.y + deadzone < home_y {
        input.down = true;
    }

    // Dodge the nearest incoming hostile shot in our column
    let threat = state
        .bullets
        .iter()
        .filter(|b| !b.is_player() && !b.dead)
        .map(|b| b.bounds())
        .filter(|b| {
            b.max.x > player.min.x - deadzone
                && b.min.x < player.max.x + deadzone
                && b.max.y <= player.max.y
                && b.max.y > player.min.y - DODGE_LOOKAHEAD
        })
        .max_by(|a, b| a.max.y.total_cmp(&b.max.y));

    if let Some(shot) = threat {
        if (shot.center().x >= center.x && player.min.x > 0.0) || player.max.x >= FIELD_WIDTH {
            input.left = true;
        } else {
            input.right = true;
        }
        return input;
    }

    let target_x = chase_target(state, center).unwrap_or(FIELD_WIDTH / 2.0);
    if target_x < center.x - deadzone {
        input.left = true;
    } else if target_x > center.x + deadzone {
        input.right = true;
    }

    input
}

/// Horizontal position worth lining up with: a falling power-up within
/// reach, else the boss, else the lowest enemy on screen
fn chase_target(state: &GameState, ship: Vec2) -> Option<f32> {
    let pickup = state
        .power_ups
        .iter()
        .filter(|p| !p.dead && p.pos.y > PICKUP_CHASE_Y && p.pos.y < ship.y)
        .min_by(|a, b| {
            let da = (a.bounds().center().x - ship.x).abs();
            let db = (b.bounds().center().x - ship.x).abs();
            da.total_cmp(&db)
        });
    if let Some(p) = pickup {
        return Some(p.bounds().center().x);
    }

    if let Some(boss) = &state.boss {
        return Some(boss.bounds().center().x);
    }

    state
        .enemies
        .iter()
        .filter(|e| e.is_alive() && e.bounds().max.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e| e.bounds().center().x)
}
