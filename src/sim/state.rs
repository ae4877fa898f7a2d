//! Game state and core simulation types
//!
//! [`GameState`] is the whole simulation context. It is created once, mutated
//! in place by [`tick`](super::tick::tick) and the action methods, and reset
//! (not recreated) on restart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::PlatformField;
use super::physics::Player;
use super::scroll::Camera;
use crate::tuning::Tuning;

/// Run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Player shown on the start platform, frozen until the first move or start
    #[default]
    Idle,
    /// Gravity and input active
    Running,
    /// Fell off the bottom; only `restart` leaves this phase
    GameOver,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::Running => "running",
            RunPhase::GameOver => "game_over",
        }
    }
}

/// Events for the HUD and audio collaborators, drained once per frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RunStarted,
    LandedOnNewPlatform { platform_id: u32, score: u32 },
    /// First time this run the score passes the best held at run start
    NewBest { best: u32 },
    Boosted { charges_left: u8 },
    GameOverEntered { score: u32, best: u32 },
}

/// Score bookkeeping and the boost resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: RunPhase,
    pub score: u32,
    /// Running maximum across runs
    pub best: u32,
    /// Platform credited for the latest score increment
    pub last_landed_id: Option<u32>,
    /// 0 or 1
    pub boost_charges: u8,
    /// Best held when the current run began
    best_at_start: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            phase: RunPhase::Idle,
            score: 0,
            best: 0,
            last_landed_id: None,
            boost_charges: 1,
            best_at_start: 0,
        }
    }
}

impl RunState {
    pub fn with_best(best: u32) -> Self {
        Self {
            best,
            best_at_start: best,
            ..Default::default()
        }
    }

    /// Clear per-run fields; `best` survives
    pub fn reset(&mut self) {
        self.phase = RunPhase::Idle;
        self.score = 0;
        self.last_landed_id = None;
        self.boost_charges = 1;
        self.best_at_start = self.best;
    }

    /// Credit a landing on `platform_id`
    ///
    /// Refills the boost charge unconditionally. The score only moves when
    /// the id differs from the last credited one.
    pub fn register_landing(&mut self, platform_id: u32, events: &mut Vec<GameEvent>) {
        self.boost_charges = 1;
        if self.last_landed_id == Some(platform_id) {
            return;
        }
        self.score += 1;
        self.last_landed_id = Some(platform_id);
        events.push(GameEvent::LandedOnNewPlatform {
            platform_id,
            score: self.score,
        });
        if self.score > self.best {
            self.best = self.score;
            if self.score == self.best_at_start + 1 {
                log::info!("New best: {}", self.best);
                events.push(GameEvent::NewBest { best: self.best });
            }
        }
    }
}

/// Read-only view for the renderer/HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: RectView,
    pub platforms: Vec<PlatformView>,
    pub phase: RunPhase,
    pub score: u32,
    pub best: u32,
    pub boost_charges: u8,
    pub bg_offset: f32,
    /// Last absolute time passed to `tick`, in ms
    pub time_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectView {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

fn rect(pos: Vec2, size: Vec2) -> RectView {
    RectView {
        x: pos.x,
        y: pos.y,
        w: size.x,
        h: size.y,
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the platform generator was created with
    pub seed: u64,
    pub tuning: Tuning,
    pub player: Player,
    pub field: PlatformField,
    pub camera: Camera,
    pub run: RunState,
    /// Ticks simulated since process start
    pub time_ticks: u64,
    /// Cosmetic clock from the scheduler, never read by physics
    pub time_ms: f64,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            player: Player::new(&tuning),
            field: PlatformField::new(seed, &tuning),
            camera: Camera::new(&tuning),
            run: RunState::default(),
            time_ticks: 0,
            time_ms: 0.0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Seed the running best (e.g. from persistent storage)
    pub fn with_best(mut self, best: u32) -> Self {
        self.run = RunState::with_best(best);
        self
    }

    pub fn phase(&self) -> RunPhase {
        self.run.phase
    }

    /// Leave `Idle` and enable gravity; ignored in any other phase
    pub fn start_run(&mut self) -> bool {
        if self.run.phase != RunPhase::Idle {
            return false;
        }
        self.run.phase = RunPhase::Running;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started (best {})", self.run.best);
        true
    }

    /// Spend the boost charge: adds the boost impulse to the current velocity
    pub fn apply_boost(&mut self) -> bool {
        if self.run.phase != RunPhase::Running || self.run.boost_charges == 0 {
            return false;
        }
        self.player.vy += self.tuning.boost_impulse;
        self.run.boost_charges -= 1;
        self.events.push(GameEvent::Boosted {
            charges_left: self.run.boost_charges,
        });
        true
    }

    /// Rebuild the field, re-centre the player and return to `Idle`
    pub fn restart(&mut self) {
        self.field.initialize();
        self.player.reset(&self.tuning);
        self.camera.reset();
        self.run.reset();
        log::info!("Restarted (best {})", self.run.best);
    }

    /// Enter `GameOver` once the player has fallen off the bottom
    pub(crate) fn check_game_over(&mut self) {
        if self.run.phase == RunPhase::Running && self.player.pos.y > self.tuning.field_height {
            self.run.phase = RunPhase::GameOver;
            self.events.push(GameEvent::GameOverEntered {
                score: self.run.score,
                best: self.run.best,
            });
            log::info!("Game over: score {} (best {})", self.run.score, self.run.best);
        }
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: rect(self.player.pos, self.player.size),
            platforms: self
                .field
                .iter()
                .map(|p| PlatformView {
                    id: p.id,
                    x: p.pos.x,
                    y: p.pos.y,
                    w: p.size.x,
                    h: p.size.y,
                })
                .collect(),
            phase: self.run.phase,
            score: self.run.score,
            best: self.run.best,
            boost_charges: self.run.boost_charges,
            bg_offset: self.camera.bg_offset,
            time_ms: self.time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase(), RunPhase::Idle);
        assert_eq!(state.run.score, 0);
        assert_eq!(state.run.boost_charges, 1);
        assert_eq!(state.run.last_landed_id, None);
        assert!(state.field.len() >= state.field.min_count());
    }

    #[test]
    fn test_score_counts_id_transitions() {
        let mut run = RunState::default();
        let mut events = Vec::new();
        let (a, b) = (4, 9);
        for id in [a, a, b, a] {
            run.register_landing(id, &mut events);
        }
        // a, b, and the return to a; the repeated a is free
        assert_eq!(run.score, 3);
        assert_eq!(run.best, 3);
        assert_eq!(run.last_landed_id, Some(a));
        let landed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LandedOnNewPlatform { .. }))
            .count();
        assert_eq!(landed, 3);
    }

    #[test]
    fn test_new_best_announced_once() {
        let mut run = RunState::with_best(1);
        let mut events = Vec::new();
        for id in 0..4 {
            run.register_landing(id, &mut events);
        }
        let bests: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::NewBest { .. }))
            .collect();
        assert_eq!(bests, vec![&GameEvent::NewBest { best: 2 }]);
        assert_eq!(run.best, 4);
    }

    #[test]
    fn test_landing_refills_boost() {
        let mut run = RunState::default();
        let mut events = Vec::new();
        run.boost_charges = 0;
        run.register_landing(3, &mut events);
        run.boost_charges = 0;
        // Same platform: no score, charge still refilled
        run.register_landing(3, &mut events);
        assert_eq!(run.boost_charges, 1);
        assert_eq!(run.score, 1);
    }

    #[test]
    fn test_start_run_only_from_idle() {
        let mut state = GameState::new(2);
        assert!(state.start_run());
        assert!(!state.start_run());
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_boost_requires_running() {
        let mut state = GameState::new(3);
        assert!(!state.apply_boost());
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.run.boost_charges, 1);
    }

    #[test]
    fn test_restart_keeps_best() {
        let mut state = GameState::new(4).with_best(7);
        state.start_run();
        state.run.score = 3;
        state.run.phase = RunPhase::GameOver;
        state.player.pos.y = 500.0;
        state.restart();
        assert_eq!(state.phase(), RunPhase::Idle);
        assert_eq!(state.run.score, 0);
        assert_eq!(state.run.best, 7);
        assert_eq!(state.player.pos.y, 294.0);
        assert!(state.field.len() >= state.field.min_count());
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(5);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Idle\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.platforms.len(), state.field.len());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&GameEvent::Boosted { charges_left: 0 }).unwrap();
        assert_eq!(json, r#"{"type":"boosted","charges_left":0}"#);
    }
}
