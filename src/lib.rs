//! Space Hop - a vertically scrolling platform-hopping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (platform generation, physics, landing, scroll, run state)
//! - `tuning`: Data-driven game balance
//! - `best_score`: Best-score persistence
//! - `web`: wasm32 bridge for the browser presentation layer
//!
//! Rendering, input binding and audio live outside this crate and consume
//! [`sim::Snapshot`] and [`sim::GameEvent`].

pub mod best_score;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_score::BestScore;
pub use tuning::{Tuning, TuningError};

/// Default tunables (pixels and pixels-per-tick on a 240x360 field)
pub mod consts {
    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 240.0;
    pub const FIELD_HEIGHT: f32 = 360.0;

    /// Gravity added to vertical velocity every tick (not dt-scaled)
    pub const GRAVITY: f32 = 0.34;
    /// Bounce velocity assigned on landing
    pub const JUMP_IMPULSE: f32 = -8.2;
    /// Mid-air boost, added to current velocity
    pub const BOOST_IMPULSE: f32 = -3.8;
    pub const PLAYER_SPEED: f32 = 2.3;
    pub const PLAYER_SIZE: f32 = 28.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 44.0;
    pub const PLATFORM_HEIGHT: f32 = 8.0;
    pub const GAP_MIN: i32 = 50;
    pub const GAP_MAX: i32 = 70;
    pub const REACH_MIN: i32 = 55;
    pub const REACH_MAX: i32 = 80;

    /// Start platform sits this far above the field bottom
    pub const START_PLATFORM_OFFSET: f32 = 38.0;
}
