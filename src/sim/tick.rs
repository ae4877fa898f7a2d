//! Fixed-step simulation tick
//!
//! Core game loop that advances the simulation by exactly one frame. The
//! order inside a tick is fixed: integrate, detect landings, scroll, recycle,
//! check game over.

use super::autopilot;
use super::landing::find_landings;
use super::physics::{Steer, begin_vertical, commit_vertical, hold_vertical, move_horizontal};
use super::state::{GameState, RunPhase};

/// Held-input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Demo mode: the pilot supplies the held directions and starts the run
    pub autopilot: bool,
}

impl TickInput {
    pub fn held(left: bool, right: bool) -> Self {
        Self {
            left,
            right,
            autopilot: false,
        }
    }
}

/// Advance the game state by one frame
///
/// `time_ms` only feeds cosmetic clocks; physics always advances one fixed step.
pub fn tick(state: &mut GameState, input: &TickInput, time_ms: Option<f64>) {
    if let Some(t) = time_ms {
        state.time_ms = t;
    }

    // Frozen until restart
    if state.run.phase == RunPhase::GameOver {
        return;
    }

    let steer = if input.autopilot {
        if state.run.phase == RunPhase::Idle {
            state.start_run();
        }
        autopilot::steer(state)
    } else {
        Steer {
            left: input.left,
            right: input.right,
        }
    };

    // First directional input launches the run
    if state.run.phase == RunPhase::Idle && (steer.left || steer.right) {
        state.start_run();
    }

    state.time_ticks += 1;

    if state.run.phase == RunPhase::Running {
        let tuning = &state.tuning;
        move_horizontal(&mut state.player, steer, tuning.player_speed, tuning.field_width);

        // Landing is tested against the tentative step, before it is committed
        let step = begin_vertical(&mut state.player, tuning.gravity);
        let landings = find_landings(&state.player, &state.field, &step);
        commit_vertical(&mut state.player, step, step.vy);

        for platform_id in landings {
            state.player.vy = state.tuning.jump_impulse;
            state.run.register_landing(platform_id, &mut state.events);
        }
    } else {
        hold_vertical(&mut state.player);
    }

    state.camera.follow(&mut state.player, &mut state.field);
    state.field.recycle(state.tuning.field_height);
    state.check_game_over();
}
