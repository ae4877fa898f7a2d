//! Camera scroll
//!
//! The player never climbs above the scroll threshold: the world moves down
//! instead, which is what makes a finite platform set look like an endless
//! tower.

use serde::{Deserialize, Serialize};

use super::field::PlatformField;
use super::physics::Player;
use crate::tuning::Tuning;

/// Scroll threshold plus the background drift the renderer reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Player y above which the world shifts down
    pub threshold: f32,
    pub drift_factor: f32,
    pub ambient_drift: f32,
    /// Parallax accumulator, cosmetic only
    pub bg_offset: f32,
    /// Total world shift since the last reset
    pub climbed: f32,
}

impl Camera {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            threshold: tuning.scroll_threshold(),
            drift_factor: tuning.scroll_drift_factor,
            ambient_drift: tuning.ambient_drift,
            bg_offset: 0.0,
            climbed: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.bg_offset = 0.0;
        self.climbed = 0.0;
    }

    /// Pin the player at the threshold and shift the field by the same amount
    ///
    /// Returns the applied shift (0 when the player is below the threshold).
    pub fn follow(&mut self, player: &mut Player, field: &mut PlatformField) -> f32 {
        let mut delta = 0.0;
        if player.pos.y < self.threshold {
            delta = self.threshold - player.pos.y;
            player.pos.y += delta;
            field.shift(delta);
            self.bg_offset += delta * self.drift_factor;
            self.climbed += delta;
        }
        self.bg_offset += self.ambient_drift;
        delta
    }
}
