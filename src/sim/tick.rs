//! Fixed timestep simulation tick
//!
//! One call is one complete pass: motion and firing, collisions, cleanup,
//! then the wave check. Nothing is left half-applied between calls.

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};
use super::{cleanup, collision, motion};

/// Input flags sampled by the host for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused at tick {}", state.time_ticks);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed at tick {}", state.time_ticks);
            }
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    motion::advance(state, input);
    collision::resolve(state);
    cleanup::prune(state);
    cleanup::check_wave_complete(state);
}
