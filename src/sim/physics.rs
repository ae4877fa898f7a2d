//! Fixed-step player integration
//!
//! One update per animation tick: `vy += gravity; y += vy`. Measured frame
//! time never enters the physics.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// The player-controlled ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = falling)
    pub vy: f32,
    /// y at the start of the current tick, before integration
    pub prev_y: f32,
}

impl Player {
    /// Player standing centred on the start platform
    pub fn new(tuning: &Tuning) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vy: 0.0,
            prev_y: 0.0,
        };
        player.reset(tuning);
        player
    }

    /// Re-centre on the start platform at rest
    pub fn reset(&mut self, tuning: &Tuning) {
        self.pos = Vec2::new(
            tuning.field_width / 2.0 - self.size.x / 2.0,
            tuning.start_platform_y() - self.size.y,
        );
        self.vy = 0.0;
        self.prev_y = self.pos.y;
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Vertical step computed ahead of commit, so landing can be tested against it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalStep {
    /// Velocity after this tick's gravity
    pub vy: f32,
    /// y the player reaches if nothing intervenes
    pub next_y: f32,
}

/// Held directions, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steer {
    pub left: bool,
    pub right: bool,
}

/// Apply held-direction movement and wrap around the field edges
pub fn move_horizontal(player: &mut Player, steer: Steer, speed: f32, field_width: f32) {
    if steer.left {
        player.pos.x -= speed;
    }
    if steer.right {
        player.pos.x += speed;
    }
    player.pos.x = wrap_x(player.pos.x, player.size.x, field_width);
}

/// Leaving past one edge re-enters at the other; the legal range is `[-width, field_width]`
#[inline]
pub fn wrap_x(x: f32, width: f32, field_width: f32) -> f32 {
    if x < -width {
        field_width
    } else if x > field_width {
        -width
    } else {
        x
    }
}

/// Record `prev_y` and compute the tentative vertical step
///
/// Nothing is committed; see [`commit_vertical`].
pub fn begin_vertical(player: &mut Player, gravity: f32) -> VerticalStep {
    player.prev_y = player.pos.y;
    let vy = player.vy + gravity;
    VerticalStep {
        vy,
        next_y: player.pos.y + vy,
    }
}

/// Commit a tentative step's position, keeping `vy` as given
pub fn commit_vertical(player: &mut Player, step: VerticalStep, vy: f32) {
    player.pos.y = step.next_y;
    player.vy = vy;
}

/// Hold position (pre-launch): `prev_y` still tracks the current tick
pub fn hold_vertical(player: &mut Player) {
    player.prev_y = player.pos.y;
}
