//! Spawn planner
//!
//! Probability-weighted selection of entity kind, speed and size as a function
//! of the difficulty level. All randomness goes through the world's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{EntityKind, FallingEntity, GameWorld, Zigzag};
use crate::consts::*;

/// Per-level base speed range in units/s. Fixed staircase, not a formula.
pub fn speed_range(level: u32) -> (f32, f32) {
    match level.clamp(1, MAX_LEVEL) {
        1 => (140.0, 200.0),
        2 => (180.0, 250.0),
        3 => (220.0, 300.0),
        4 => (260.0, 350.0),
        5 => (300.0, 400.0),
        6 => (340.0, 450.0),
        7 => (380.0, 500.0),
        8 => (420.0, 550.0),
        9 => (460.0, 600.0),
        _ => (500.0, 650.0),
    }
}

/// Seconds between regular spawns; shrinks with level, floored at 400ms
pub fn spawn_interval(level: u32) -> f32 {
    (0.8 - level as f32 * 0.04).max(0.4)
}

/// Map a unit-interval roll onto an entity kind via level-dependent bands.
///
/// Hazard bands widen with level while the fresh-air band shrinks, so the game
/// gets both faster and stingier with health pickups. At high levels the
/// hazard bands crowd the pickups out entirely.
pub fn kind_for_roll(level: u32, roll: f32) -> EntityKind {
    let lvl = level.clamp(1, MAX_LEVEL) as f32;

    let fast = 0.15 + lvl * 0.01;
    let big = fast + 0.12 + lvl * 0.01;
    let zigzag = big + 0.10 + lvl * 0.01;
    let normal = zigzag + 0.15;
    let tar = normal + 0.18 + lvl * 0.01;
    let cigarette = tar + 0.10 + lvl * 0.005;
    let fresh_air = cigarette + 0.12 - lvl * 0.008;

    if roll < fast {
        EntityKind::SmokeFast
    } else if roll < big {
        EntityKind::SmokeBig
    } else if roll < zigzag {
        EntityKind::SmokeZigzag
    } else if roll < normal {
        EntityKind::Smoke
    } else if roll < tar {
        EntityKind::Tar
    } else if roll < cigarette {
        EntityKind::Cigarette
    } else if roll < fresh_air {
        EntityKind::FreshAir
    } else {
        EntityKind::Medicine
    }
}

/// Create one entity at a random x above the top edge and add it to the world
pub fn spawn_entity(world: &mut GameWorld) {
    let (min, max) = speed_range(world.level);
    let base_speed = world.rng.random_range(min..max);
    let roll: f32 = world.rng.random();
    let kind = kind_for_roll(world.level, roll);

    let x = world
        .rng
        .random_range(SPAWN_MARGIN..(GAME_WIDTH - SPAWN_MARGIN));

    let zigzag = (kind == EntityKind::SmokeZigzag).then(|| Zigzag {
        phase: world.rng.random_range(0.0..std::f32::consts::TAU),
        amplitude: world.rng.random_range(40.0..70.0),
        frequency: world.rng.random_range(3.0..5.0),
    });

    let id = world.next_entity_id();
    world.entities.push(FallingEntity {
        id,
        kind,
        pos: Vec2::new(x, SPAWN_Y),
        speed: base_speed * kind.speed_multiplier(),
        size: kind.size(),
        opacity: 1.0,
        zigzag,
    });
}

/// Queue the burst-mechanic bonus spawns that may follow a regular spawn.
///
/// Level >= 5 fires an extra spawn 100ms later with p=0.3; level >= 8
/// independently adds another 200ms later with p=0.2. The countdowns live in
/// the world, so a session reset cancels them.
pub fn schedule_bonus_spawns(world: &mut GameWorld) {
    if world.level >= 5 && world.rng.random::<f32>() < 0.3 {
        world.bonus_spawns.push(0.1);
    }
    if world.level >= 8 && world.rng.random::<f32>() < 0.2 {
        world.bonus_spawns.push(0.2);
    }
}
