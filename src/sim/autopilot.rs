//! Demo/idle-mode pilot
//!
//! Steers toward the next platform up the chain from the one last landed on.
//! Used by the headless runner and as a smoke driver in tests.

use super::field::Platform;
use super::physics::Steer;
use super::state::GameState;

/// Horizontal slack before the pilot bothers to steer
const DEAD_ZONE: f32 = 3.0;

/// Platform the pilot is currently aiming for
pub fn target(state: &GameState) -> Option<&Platform> {
    let reference_y = state
        .run
        .last_landed_id
        .and_then(|id| state.field.iter().find(|p| p.id == id))
        .map(|p| p.top())
        .unwrap_or_else(|| state.player.bottom());

    state
        .field
        .iter()
        .filter(|p| p.top() < reference_y - 1.0)
        .max_by(|a, b| a.top().total_cmp(&b.top()))
}

/// Held directions that close the gap to the target's centre
pub fn steer(state: &GameState) -> Steer {
    let Some(platform) = target(state) else {
        return Steer::default();
    };
    let player_center = state.player.pos.x + state.player.size.x / 2.0;
    let platform_center = platform.left() + platform.size.x / 2.0;
    let dx = platform_center - player_center;
    Steer {
        left: dx < -DEAD_ZONE,
        right: dx > DEAD_ZONE,
    }
}
