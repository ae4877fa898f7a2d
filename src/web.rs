//! Browser bridge
//!
//! The page owns the canvas, keyboard/pointer listeners, audio and the
//! `requestAnimationFrame` loop. It calls [`WebGame::tick`] once per frame and
//! reads state back as JSON.

use wasm_bindgen::prelude::*;

use crate::best_score::BestScore;
use crate::sim::{GameState, RunPhase, TickInput, tick};

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    input: TickInput,
    stored_best: BestScore,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; a zero seed picks one from the clock
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebGame {
        let seed = if seed == 0 {
            js_sys::Date::now() as u64
        } else {
            seed
        };
        let stored_best = BestScore::load();
        log::info!("Space Hop core ready (seed {seed})");
        WebGame {
            state: GameState::new(seed).with_best(stored_best.best),
            input: TickInput::default(),
            stored_best,
        }
    }

    /// Held directions, as tracked by the page's key listeners
    pub fn set_held(&mut self, left: bool, right: bool) {
        self.input.left = left;
        self.input.right = right;
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Advance one frame; `time_ms` is the rAF timestamp
    pub fn tick(&mut self, time_ms: f64) {
        let was_over = self.state.phase() == RunPhase::GameOver;
        tick(&mut self.state, &self.input, Some(time_ms));

        let over = self.state.phase() == RunPhase::GameOver;
        if over && !was_over && self.stored_best.record(self.state.run.best) {
            self.stored_best.save();
        }
    }

    pub fn start_run(&mut self) -> bool {
        self.state.start_run()
    }

    pub fn apply_boost(&mut self) -> bool {
        self.state.apply_boost()
    }

    pub fn restart(&mut self) {
        self.state.restart();
    }

    pub fn score(&self) -> u32 {
        self.state.run.score
    }

    pub fn best(&self) -> u32 {
        self.state.run.best
    }

    pub fn phase(&self) -> String {
        self.state.phase().as_str().to_string()
    }

    /// Player, platforms and HUD values for the renderer
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_default()
    }

    /// Events since the last call, for audio/HUD reactions
    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.state.drain_events()).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Install logging and the panic hook; called once by the page
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
