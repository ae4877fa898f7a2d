//! Swept landing detection
//!
//! The test runs against the displacement about to be applied this tick, so a
//! fast fall cannot tunnel through a thin platform between two frames.

use super::field::{Platform, PlatformField};
use super::physics::{Player, VerticalStep};

/// True if the player's bottom edge crosses `platform`'s top surface this tick
///
/// `vy` is the velocity that will be added this tick (post-gravity). Requires
/// a strictly descending player and strict horizontal overlap.
pub fn is_landing(player: &Player, platform: &Platform, vy: f32) -> bool {
    if vy <= 0.0 {
        return false;
    }
    let overlaps_x =
        player.pos.x + player.size.x > platform.left() && player.pos.x < platform.right();
    if !overlaps_x {
        return false;
    }
    let prev_bottom = player.prev_y + player.size.y;
    let next_bottom = player.pos.y + player.size.y + vy;
    prev_bottom <= platform.top() && next_bottom >= platform.top()
}

/// Ids of every platform landed on this tick, in field iteration order
///
/// More than one hit in a tick is not expected under the gap invariant; when
/// it happens all hits are reported and the caller processes them in order.
pub fn find_landings(player: &Player, field: &PlatformField, step: &VerticalStep) -> Vec<u32> {
    field
        .iter()
        .filter(|p| is_landing(player, p, step.vy))
        .map(|p| p.id)
        .collect()
}
