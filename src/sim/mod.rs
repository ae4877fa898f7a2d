//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, never scaled by frame time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod field;
pub mod generator;
pub mod landing;
pub mod physics;
pub mod scroll;
pub mod state;
pub mod tick;

pub use field::{Platform, PlatformField};
pub use generator::PlatformGenerator;
pub use landing::{find_landings, is_landing};
pub use physics::{Player, Steer, VerticalStep};
pub use scroll::Camera;
pub use state::{GameEvent, GameState, PlatformView, RectView, RunPhase, RunState, Snapshot};
pub use tick::{TickInput, tick};
