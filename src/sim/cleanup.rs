//! Lifecycle: prune dead and out-of-field entities, then check wave state

use super::spawner;
use super::state::GameState;

/// Compact every collection in one pass per category
pub fn prune(state: &mut GameState) {
    state.bullets.retain(|b| !b.should_remove());
    state.enemies.retain(|e| !e.should_remove());
    state.power_ups.retain(|p| !p.should_remove());
    state.particles.retain(|p| !p.should_remove());
}

/// Spawn the next wave or boss once the field is clear.
/// Returns true when progression advanced.
pub fn check_wave_complete(state: &mut GameState) -> bool {
    if state.is_game_over() || !state.wave_complete() {
        return false;
    }
    spawner::advance_progression(state);
    true
}
