//! Data-driven game balance
//!
//! Every tunable the simulation reads lives in [`Tuning`]. Defaults match the
//! shipped feel; a JSON file may override any subset of fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning document is rejected
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// A field is present but its value breaks a simulation invariant
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {e}"),
            TuningError::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Static balance ranges for one process lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    /// Per-tick velocity increment (pixels/tick²)
    pub gravity: f32,
    /// Velocity assigned on every landing (negative = upward)
    pub jump_impulse: f32,
    /// Velocity added by a boost (stacks with current velocity)
    pub boost_impulse: f32,
    /// Horizontal pixels per tick while a direction is held
    pub player_speed: f32,
    pub player_width: f32,
    pub player_height: f32,

    pub platform_width: f32,
    pub platform_height: f32,
    pub gap_min: i32,
    pub gap_max: i32,
    pub reach_min: i32,
    pub reach_max: i32,
    pub margin_left: i32,
    pub margin_right: i32,
    /// Draws attempted before the generator snaps out of the minimum-reach dead zone
    pub reach_attempts: u32,

    /// Distance of the start platform above the field bottom
    pub start_platform_offset: f32,
    /// Scroll threshold as a fraction of field height, measured from the top
    pub scroll_threshold_fraction: f32,
    pub scroll_drift_factor: f32,
    /// Background drift added every tick regardless of scrolling
    pub ambient_drift: f32,
    /// Platforms this far below the field bottom are recycled
    pub recycle_epsilon: f32,
    /// Extra platforms kept alive beyond one screen's worth
    pub lookahead_extra: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            boost_impulse: BOOST_IMPULSE,
            player_speed: PLAYER_SPEED,
            player_width: PLAYER_SIZE,
            player_height: PLAYER_SIZE,

            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            gap_min: GAP_MIN,
            gap_max: GAP_MAX,
            reach_min: REACH_MIN,
            reach_max: REACH_MAX,
            margin_left: 0,
            margin_right: 0,
            reach_attempts: 8,

            start_platform_offset: START_PLATFORM_OFFSET,
            scroll_threshold_fraction: 0.42,
            scroll_drift_factor: 0.3,
            ambient_drift: 0.18,
            recycle_epsilon: 2.0,
            lookahead_extra: 3,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file, falling back to defaults if it is missing or rejected
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("boost_impulse", self.boost_impulse),
            ("player_speed", self.player_speed),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("start_platform_offset", self.start_platform_offset),
            ("scroll_threshold_fraction", self.scroll_threshold_fraction),
            ("scroll_drift_factor", self.scroll_drift_factor),
            ("ambient_drift", self.ambient_drift),
            ("recycle_epsilon", self.recycle_epsilon),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(TuningError::Invalid { field, reason: "must be finite" });
            }
        }

        let invalid = |field: &'static str, reason: &'static str| -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        };
        if self.field_width <= 0.0 {
            return invalid("field_width", "must be positive");
        }
        if self.field_height <= 0.0 {
            return invalid("field_height", "must be positive");
        }
        if self.gravity <= 0.0 {
            return invalid("gravity", "must pull downward (positive)");
        }
        if self.jump_impulse >= 0.0 {
            return invalid("jump_impulse", "must point upward (negative)");
        }
        if self.platform_width <= 0.0 || self.platform_width > self.field_width {
            return invalid("platform_width", "must be positive and fit the field");
        }
        if self.gap_min <= 0 {
            return invalid("gap_min", "must be positive");
        }
        if self.gap_min > self.gap_max {
            return invalid("gap_max", "must be >= gap_min");
        }
        if self.reach_min < 0 {
            return invalid("reach_min", "must not be negative");
        }
        if self.reach_min > self.reach_max {
            return invalid("reach_max", "must be >= reach_min");
        }
        if self.margin_left < 0 || self.margin_right < 0 {
            return invalid("margin_left", "margins must not be negative");
        }
        if !(0.0..1.0).contains(&self.scroll_threshold_fraction) {
            return invalid("scroll_threshold_fraction", "must lie in [0, 1)");
        }
        if self.reach_attempts == 0 {
            return invalid("reach_attempts", "must be at least 1");
        }
        Ok(())
    }

    /// Vertical position of the start platform's top surface
    pub fn start_platform_y(&self) -> f32 {
        self.field_height - self.start_platform_offset
    }

    /// Player y above which the world scrolls
    pub fn scroll_threshold(&self) -> f32 {
        (self.field_height * self.scroll_threshold_fraction).floor()
    }

    pub fn average_gap(&self) -> f32 {
        (self.gap_min + self.gap_max) as f32 / 2.0
    }

    /// Live platform count the field keeps after every recycle
    pub fn min_platform_count(&self) -> usize {
        let avg = self.average_gap();
        if avg <= 0.0 || !avg.is_finite() {
            return self.lookahead_extra.max(1);
        }
        let screens = (self.field_height / avg).ceil().max(0.0) as usize;
        (screens + self.lookahead_extra).max(1)
    }
}
