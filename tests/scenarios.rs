//! End-to-end runs through the public simulation API

use proptest::prelude::*;
use space_hop::Tuning;
use space_hop::sim::{GameEvent, GameState, RunPhase, TickInput, is_landing, tick};

fn idle() -> TickInput {
    TickInput::default()
}

#[test]
fn free_fall_ends_run_and_stays_over() {
    let tuning = Tuning::default();
    assert_eq!(tuning.field_height, 360.0);
    assert_eq!(tuning.start_platform_y(), 322.0);
    assert_eq!((tuning.gap_min, tuning.gap_max), (50, 70));
    assert_eq!(tuning.gravity, 0.34);

    let mut state = GameState::with_tuning(77, tuning);
    state.start_run();
    // Off to the side of the start platform so nothing catches the fall
    state.player.pos.x = 4.0;
    state.player.vy = 0.0;

    let mut ticks = 0;
    while state.phase() == RunPhase::Running {
        tick(&mut state, &idle(), None);
        ticks += 1;
        assert!(ticks < 200, "never fell off");
    }
    assert_eq!(state.phase(), RunPhase::GameOver);
    assert!(state.player.pos.y > state.tuning.field_height);
    assert_eq!(state.run.score, 0);
    // 0.34 * n(n+1)/2 must exceed the 66px drop from y=294
    assert_eq!(ticks, 20);

    let events = state.drain_events();
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOverEntered { score: 0, best: 0 })
    );

    for _ in 0..50 {
        tick(&mut state, &TickInput::held(true, false), Some(1000.0));
        assert!(!state.start_run());
        assert!(!state.apply_boost());
    }
    assert_eq!(state.phase(), RunPhase::GameOver);

    state.restart();
    assert_eq!(state.phase(), RunPhase::Idle);
}

#[test]
fn boost_spends_single_charge() {
    let mut state = GameState::new(5);
    state.start_run();
    tick(&mut state, &idle(), None);
    assert_eq!(state.player.vy, state.tuning.jump_impulse);
    assert_eq!(state.run.boost_charges, 1);

    assert!(state.apply_boost());
    let boosted = state.tuning.jump_impulse + state.tuning.boost_impulse;
    assert_eq!(state.player.vy, boosted);
    assert_eq!(state.run.boost_charges, 0);

    assert!(!state.apply_boost());
    assert_eq!(state.player.vy, boosted);
    assert_eq!(state.run.boost_charges, 0);

    let boosts = state
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::Boosted { .. }))
        .count();
    assert_eq!(boosts, 1);
}

#[test]
fn boost_recharges_on_landing() {
    let mut state = GameState::new(6);
    state.start_run();
    tick(&mut state, &idle(), None);

    // Boost at the apex so the climb stays under the scroll threshold
    while state.player.vy < 0.0 {
        tick(&mut state, &idle(), None);
    }
    assert!(state.apply_boost());
    assert_eq!(state.run.boost_charges, 0);

    let mut landed = false;
    for _ in 0..300 {
        tick(&mut state, &idle(), None);
        if state.run.boost_charges == 1 {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert_eq!(state.player.vy, state.tuning.jump_impulse);
    assert_eq!(state.camera.climbed, 0.0);
}

#[test]
fn restart_from_game_over_resets_run() {
    let mut state = GameState::new(31).with_best(10);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    for _ in 0..400 {
        tick(&mut state, &input, None);
    }
    // Force the fall
    state.player.pos.y = state.tuning.field_height + 50.0;
    state.player.vy = 5.0;
    tick(&mut state, &idle(), None);
    assert_eq!(state.phase(), RunPhase::GameOver);
    let score = state.run.score;
    assert!(score > 0);

    state.restart();
    assert_eq!(state.run.score, 0);
    assert_eq!(state.run.best, score.max(10));
    assert_eq!(state.run.boost_charges, 1);
    assert_eq!(state.run.last_landed_id, None);
    assert_eq!(state.camera.bg_offset, 0.0);
    assert!(state.field.len() >= state.field.min_count());
    assert_eq!(state.player.vy, 0.0);

    let fresh = GameState::new(31);
    assert_eq!(state.field.min_count(), fresh.field.min_count());
    assert_eq!(state.player.pos, fresh.player.pos);
}

#[test]
fn scrolling_keeps_player_at_threshold() {
    let mut state = GameState::new(404);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let threshold = state.tuning.scroll_threshold();
    for _ in 0..1500 {
        tick(&mut state, &input, None);
        if state.phase() != RunPhase::Running {
            break;
        }
        assert!(state.player.pos.y >= threshold);
        assert!(state.field.len() >= state.field.min_count());
    }
    assert!(state.camera.climbed > 0.0);
}

proptest! {
    #[test]
    fn crossing_surface_always_bounces(
        x_offset in -27.0f32..43.0,
        gap in 0.0f32..10.0,
        vy in 0.5f32..30.0,
    ) {
        let mut state = GameState::new(1);
        state.start_run();
        state.field.clear();
        let surface = 250.0;
        let id = state.field.push_at(100.0, surface);

        // Bottom starts `gap` above the surface and reaches it this tick
        let vy_before = vy.max(gap + 0.5) - state.tuning.gravity;
        state.player.pos.x = 100.0 + x_offset;
        state.player.pos.y = surface - gap - state.player.size.y;
        state.player.vy = vy_before;

        let platform = state.field.get(0).unwrap().clone();
        let mut preview = state.player.clone();
        preview.prev_y = preview.pos.y;
        let will_land = is_landing(&preview, &platform, vy_before + state.tuning.gravity);

        tick(&mut state, &idle(), None);
        prop_assert!(will_land);
        prop_assert_eq!(state.player.vy, state.tuning.jump_impulse);
        prop_assert_eq!(state.run.last_landed_id, Some(id));
    }
}
