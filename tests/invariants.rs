//! Property tests for the simulation core
//!
//! Drives whole sessions with arbitrary seeds and shield movement and checks
//! the invariants that must hold regardless of what falls where.

use proptest::prelude::*;

use lung_defender::consts::{GAME_WIDTH, MAX_COMBO, MAX_LEVEL};
use lung_defender::sim::{GameMode, GamePhase, GameWorld, TickInput, tick};

const DT: f32 = 1.0 / 60.0;

fn run_session(seed: u64, targets: &[f32], ticks_per_target: usize) -> GameWorld {
    let mut world = GameWorld::new(seed);
    world.start(GameMode::Endless, seed);

    for &target in targets {
        let input = TickInput {
            target_x: Some(target),
            ..Default::default()
        };
        for _ in 0..ticks_per_target {
            tick(&mut world, &input, DT);
        }
    }
    world
}

proptest! {
    #[test]
    fn meters_stay_in_range(
        seed in any::<u64>(),
        targets in prop::collection::vec(0.0f32..GAME_WIDTH, 1..20),
    ) {
        let mut world = GameWorld::new(seed);
        world.start(GameMode::Endless, seed);

        for &target in &targets {
            let input = TickInput { target_x: Some(target), ..Default::default() };
            for _ in 0..30 {
                tick(&mut world, &input, DT);
                prop_assert!((0.0..=100.0).contains(&world.health()));
                prop_assert!((0.0..=100.0).contains(&world.tar()));
                prop_assert!(world.combo <= MAX_COMBO);
                prop_assert!((1..=MAX_LEVEL).contains(&world.level));
            }
        }
    }

    #[test]
    fn game_over_exactly_when_a_meter_fails(
        seed in any::<u64>(),
        targets in prop::collection::vec(0.0f32..GAME_WIDTH, 4..16),
    ) {
        let world = run_session(seed, &targets, 60);
        if world.phase == GamePhase::GameOver {
            prop_assert!(world.health() <= 0.0 || world.tar() >= 100.0);
        } else {
            prop_assert!(world.health() > 0.0 && world.tar() < 100.0);
        }
    }

    #[test]
    fn shield_never_leaves_the_field(
        seed in any::<u64>(),
        targets in prop::collection::vec(-2000.0f32..2000.0, 1..12),
    ) {
        let world = run_session(seed, &targets, 30);
        prop_assert!(world.shield.left() >= 0.0);
        prop_assert!(world.shield.right() <= GAME_WIDTH);
    }

    #[test]
    fn identical_sessions_agree(
        seed in any::<u64>(),
        targets in prop::collection::vec(0.0f32..GAME_WIDTH, 1..10),
    ) {
        let a = run_session(seed, &targets, 45);
        let b = run_session(seed, &targets, 45);
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.health(), b.health());
        prop_assert_eq!(a.tar(), b.tar());
        prop_assert_eq!(a.level, b.level);
        prop_assert_eq!(a.entities.len(), b.entities.len());
    }

    #[test]
    fn max_combo_tracks_combo(
        seed in any::<u64>(),
        targets in prop::collection::vec(0.0f32..GAME_WIDTH, 1..12),
    ) {
        let world = run_session(seed, &targets, 45);
        prop_assert!(world.max_combo >= world.combo);
        prop_assert!(world.max_combo <= MAX_COMBO);
    }

    #[test]
    fn score_never_decreases(
        seed in any::<u64>(),
        targets in prop::collection::vec(0.0f32..GAME_WIDTH, 1..8),
    ) {
        let mut world = GameWorld::new(seed);
        world.start(GameMode::Endless, seed);

        let mut last_score = 0;
        for &target in &targets {
            let input = TickInput { target_x: Some(target), ..Default::default() };
            for _ in 0..45 {
                tick(&mut world, &input, DT);
                prop_assert!(world.score >= last_score);
                last_score = world.score;
            }
        }
    }
}
