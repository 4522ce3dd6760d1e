//! Per-frame simulation step
//!
//! Advances the world by one wall-clock delta. The caller clamps dt via
//! [`MAX_FRAME_DT`] so a backgrounded tab cannot produce a huge step.

use glam::Vec2;

use super::spawn;
use super::state::{BurstKind, EntityKind, GameEvent, GamePhase, GameWorld};
use crate::consts::*;

const SCORE_COLOR: &str = "#22c55e";
const AIR_COLOR: &str = "#06b6d4";
const DAMAGE_COLOR: &str = "#ef4444";

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Target shield x (from pointer position or keyboard nudges)
    pub target_x: Option<f32>,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game world by one frame
pub fn tick(world: &mut GameWorld, input: &TickInput, dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);

    if input.pause {
        match world.phase {
            GamePhase::Playing => {
                world.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => world.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match world.phase {
        GamePhase::Idle | GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::LevelUp => {
            // Fact interstitial: real-time countdown, then play resumes on
            // its own. No host timer involved, so a reset cancels it.
            world.levelup_timer -= dt;
            if world.levelup_timer <= 0.0 {
                world.levelup_timer = 0.0;
                world.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Playing => {}
    }

    if let Some(target) = input.target_x {
        world.shield.set_target(target);
    }

    world.game_time += dt;
    world.survival_time += dt;
    world.screen_shake = (world.screen_shake - dt * 12.0).max(0.0);
    world.damage_flash = (world.damage_flash - dt).max(0.0);

    // Regular spawn cadence, plus the high-level burst mechanic
    world.spawn_timer += dt;
    if world.spawn_timer >= spawn::spawn_interval(world.level) {
        world.spawn_timer = 0.0;
        spawn::spawn_entity(world);
        spawn::schedule_bonus_spawns(world);
    }

    // Delayed bonus spawns
    let mut due = 0;
    world.bonus_spawns.retain_mut(|timer| {
        *timer -= dt;
        if *timer <= 0.0 {
            due += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..due {
        spawn::spawn_entity(world);
    }

    // Level timer; level only ever increases, capped at MAX_LEVEL
    world.level_timer += dt;
    if world.level_timer >= LEVEL_DURATION && world.level < MAX_LEVEL {
        world.level_timer = 0.0;
        world.level += 1;
        world.fact_index = Some((world.level - 1) as usize);
        world.levelup_timer = LEVELUP_INTERSTITIAL;
        world.phase = GamePhase::LevelUp;
        world.events.push(GameEvent::LevelUp { level: world.level });
        return;
    }

    world.shield.ease_toward_target(dt);

    // Integrate entities and resolve collisions. Damage/tar/score deltas are
    // aggregated across the whole tick and applied once.
    let shield_left = world.shield.left();
    let shield_right = world.shield.right();

    let mut damage_this_tick = 0.0f32;
    let mut tar_this_tick = 0.0f32;
    let mut score_this_tick = 0u64;

    let mut entities = std::mem::take(&mut world.entities);
    entities.retain_mut(|entity| {
        entity.pos.y += entity.speed * dt;

        if let Some(z) = &mut entity.zigzag {
            z.phase += z.frequency * dt;
            entity.pos.x += z.phase.sin() * z.amplitude * dt * 3.0;
            let half = entity.size / 2.0;
            entity.pos.x = entity.pos.x.clamp(half, GAME_WIDTH - half);
        }

        // Shield collision, only while the vertical extents overlap the band
        let in_band = entity.bottom() >= SHIELD_Y && entity.top() <= SHIELD_Y + SHIELD_HEIGHT;
        if in_band && entity.right() >= shield_left && entity.left() <= shield_right {
            let pos = entity.pos;
            let text_pos = pos - Vec2::new(0.0, 20.0);

            if entity.kind.is_hazard() {
                let points = (entity.kind.block_points() as f32
                    * (1.0 + world.combo as f32 * COMBO_SCALE))
                    .floor() as u64;
                score_this_tick += points;
                world.combo = (world.combo + 1).min(MAX_COMBO);
                world.max_combo = world.max_combo.max(world.combo);
                world.stats.hazards_blocked += 1;
                world.spawn_burst(pos, BurstKind::Smoke);
                world.push_floating_text(text_pos, format!("+{points}"), SCORE_COLOR);
                world.events.push(GameEvent::Blocked);
            } else if entity.kind == EntityKind::FreshAir {
                world.restore_health(10.0);
                score_this_tick += entity.kind.block_points() as u64;
                world.stats.powerups_collected += 1;
                world.spawn_burst(pos, BurstKind::Air);
                world.push_floating_text(text_pos, "+10 HP", AIR_COLOR);
                world.events.push(GameEvent::PowerUp);
            } else {
                world.restore_health(25.0);
                world.reduce_tar(20.0);
                score_this_tick += entity.kind.block_points() as u64;
                world.stats.powerups_collected += 1;
                world.spawn_burst(pos, BurstKind::Heal);
                world.push_floating_text(text_pos, "+25 HP -20 Tar", SCORE_COLOR);
                world.events.push(GameEvent::PowerUp);
            }
            return false;
        }

        // Past the lung line: hazards hurt, pickups just disappear
        if entity.pos.y > LUNG_Y + LUNG_OVERSHOOT {
            if entity.kind.is_hazard() {
                let damage = entity.kind.lung_damage();
                damage_this_tick += damage;
                tar_this_tick += entity.kind.lung_tar();
                world.combo = 0;
                world.spawn_burst(Vec2::new(entity.pos.x, LUNG_Y), BurstKind::Damage);
                world.push_floating_text(
                    Vec2::new(entity.pos.x, LUNG_Y - 20.0),
                    format!("-{damage:.0}"),
                    DAMAGE_COLOR,
                );
            }
            return false;
        }

        true
    });
    world.entities = entities;

    if damage_this_tick > 0.0 {
        world.apply_damage(damage_this_tick);
        world.accumulate_tar(tar_this_tick);
        world.stats.damage_taken += damage_this_tick as u32;
        world.stats.tar_absorbed += tar_this_tick as u32;
        world.screen_shake = 6.0;
        world.damage_flash = 0.15;
        world.events.push(GameEvent::Damaged);
    }
    if score_this_tick > 0 {
        world.score += score_this_tick;
    }

    // Particle physics: velocity, gravity, lifetime decay
    world.particles.retain_mut(|p| {
        p.pos += p.vel * dt;
        p.vel.y += PARTICLE_GRAVITY * dt;
        p.life -= dt / p.max_life;
        p.life > 0.0
    });

    // Floating texts rise and fade
    world.floating_texts.retain_mut(|ft| {
        ft.pos.y -= FLOATING_TEXT_RISE * dt;
        ft.life -= FLOATING_TEXT_DECAY * dt;
        ft.life > 0.0
    });

    if world.is_terminal() {
        world.phase = GamePhase::GameOver;
        world.events.push(GameEvent::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EntityKind, FallingEntity, GameMode, Zigzag};

    const DT: f32 = 1.0 / 60.0;

    fn playing_world(seed: u64) -> GameWorld {
        let mut world = GameWorld::new(seed);
        world.start(GameMode::Endless, seed);
        world
    }

    fn push_entity(world: &mut GameWorld, kind: EntityKind, x: f32, y: f32, speed: f32) {
        let id = world.next_entity_id();
        let zigzag = (kind == EntityKind::SmokeZigzag).then_some(Zigzag {
            phase: 0.0,
            amplitude: 50.0,
            frequency: 4.0,
        });
        world.entities.push(FallingEntity {
            id,
            kind,
            pos: Vec2::new(x, y),
            speed,
            size: kind.size(),
            opacity: 1.0,
            zigzag,
        });
    }

    #[test]
    fn test_fast_smoke_block_scores_and_combos() {
        let mut world = playing_world(1);
        let shield_x = world.shield.x;
        push_entity(&mut world, EntityKind::SmokeFast, shield_x, SHIELD_Y, 200.0);

        tick(&mut world, &TickInput::default(), DT);

        // floor(25 * (1 + 0 * 0.2)) = 25
        assert_eq!(world.score, 25);
        assert_eq!(world.combo, 1);
        assert_eq!(world.max_combo, 1);
        assert_eq!(world.stats.hazards_blocked, 1);
        assert!(world.entities.iter().all(|e| e.kind != EntityKind::SmokeFast));
        assert!(world.floating_texts.iter().any(|ft| ft.text == "+25"));
        assert!(world.events.contains(&GameEvent::Blocked));
        assert!(!world.particles.is_empty());
    }

    #[test]
    fn test_combo_scales_score_and_caps() {
        let mut world = playing_world(2);
        world.combo = 4;
        let shield_x = world.shield.x;
        push_entity(&mut world, EntityKind::Smoke, shield_x, SHIELD_Y, 200.0);

        tick(&mut world, &TickInput::default(), DT);

        // floor(15 * (1 + 4 * 0.2)) = floor(27) = 27
        assert_eq!(world.score, 27);
        assert_eq!(world.combo, 5);

        world.combo = MAX_COMBO;
        let shield_x = world.shield.x;
        push_entity(&mut world, EntityKind::Smoke, shield_x, SHIELD_Y, 200.0);
        tick(&mut world, &TickInput::default(), DT);
        assert_eq!(world.combo, MAX_COMBO);
    }

    #[test]
    fn test_cigarette_leak_damages_and_resets_combo() {
        let mut world = playing_world(3);
        world.combo = 6;
        // Far from the shield, just above the overshoot line
        push_entity(&mut world, EntityKind::Cigarette, 100.0, LUNG_Y + LUNG_OVERSHOOT, 100.0);

        tick(&mut world, &TickInput::default(), DT);

        assert_eq!(world.health(), 70.0);
        assert_eq!(world.tar(), 15.0);
        assert_eq!(world.combo, 0);
        assert_eq!(world.stats.damage_taken, 30);
        assert_eq!(world.screen_shake, 6.0);
        assert!(world.damage_flash > 0.0);
        assert!(world.floating_texts.iter().any(|ft| ft.text == "-30"));
        assert!(world.events.contains(&GameEvent::Damaged));
        assert_eq!(world.phase, GamePhase::Playing);
    }

    #[test]
    fn test_tar_overflow_clamps_and_ends_session() {
        let mut world = playing_world(4);
        world.accumulate_tar(95.0);
        push_entity(&mut world, EntityKind::Cigarette, 100.0, LUNG_Y + LUNG_OVERSHOOT, 100.0);

        tick(&mut world, &TickInput::default(), DT);

        // 95 + 15 must clamp to 100, not overshoot, and trigger game over
        assert_eq!(world.tar(), 100.0);
        assert_eq!(world.phase, GamePhase::GameOver);
        assert!(world.events.contains(&GameEvent::GameOver));

        // Terminal state: further ticks change nothing
        let score = world.score;
        let time = world.survival_time;
        tick(&mut world, &TickInput::default(), DT);
        assert_eq!(world.phase, GamePhase::GameOver);
        assert_eq!(world.score, score);
        assert_eq!(world.survival_time, time);
    }

    #[test]
    fn test_pickups_dropped_silently_at_bottom() {
        let mut world = playing_world(5);
        world.combo = 3;
        push_entity(&mut world, EntityKind::FreshAir, 100.0, LUNG_Y + LUNG_OVERSHOOT, 100.0);

        tick(&mut world, &TickInput::default(), DT);

        assert_eq!(world.health(), 100.0);
        assert_eq!(world.combo, 3, "missing a pickup must not reset the combo");
        assert!(world.entities.is_empty());
        assert!(world.floating_texts.is_empty());
    }

    #[test]
    fn test_fresh_air_restores_health() {
        let mut world = playing_world(6);
        world.apply_damage(50.0);
        world.combo = 2;
        let shield_x = world.shield.x;
        push_entity(&mut world, EntityKind::FreshAir, shield_x, SHIELD_Y, 200.0);

        tick(&mut world, &TickInput::default(), DT);

        assert_eq!(world.health(), 60.0);
        // Flat 25 points, no combo scaling, combo untouched
        assert_eq!(world.score, 25);
        assert_eq!(world.combo, 2);
        assert_eq!(world.stats.powerups_collected, 1);
        assert!(world.floating_texts.iter().any(|ft| ft.text == "+10 HP"));
        assert!(world.events.contains(&GameEvent::PowerUp));
    }

    #[test]
    fn test_medicine_heals_and_cleans_tar() {
        let mut world = playing_world(7);
        world.apply_damage(50.0);
        world.accumulate_tar(40.0);
        let shield_x = world.shield.x;
        push_entity(&mut world, EntityKind::Medicine, shield_x, SHIELD_Y, 200.0);

        tick(&mut world, &TickInput::default(), DT);

        assert_eq!(world.health(), 75.0);
        assert_eq!(world.tar(), 20.0);
        assert_eq!(world.score, 40);
        assert!(world.floating_texts.iter().any(|ft| ft.text == "+25 HP -20 Tar"));
    }

    #[test]
    fn test_level_up_interstitial_and_auto_return() {
        let mut world = playing_world(8);
        world.level = 3;
        world.level_timer = LEVEL_DURATION - 0.05;

        tick(&mut world, &TickInput::default(), 0.1);

        assert_eq!(world.level, 4);
        assert_eq!(world.phase, GamePhase::LevelUp);
        assert_eq!(world.fact_index, Some(3));
        assert!(world.events.iter().any(|e| *e == GameEvent::LevelUp { level: 4 }));

        // Resumes automatically after the 3s interstitial, no input required
        for _ in 0..31 {
            tick(&mut world, &TickInput::default(), 0.1);
        }
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.level, 4);
    }

    #[test]
    fn test_level_caps_at_max() {
        let mut world = playing_world(9);
        world.level = MAX_LEVEL;
        world.level_timer = LEVEL_DURATION + 1.0;

        tick(&mut world, &TickInput::default(), DT);

        assert_eq!(world.level, MAX_LEVEL);
        assert_eq!(world.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_toggle() {
        let mut world = playing_world(10);
        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut world, &input, DT);
        assert_eq!(world.phase, GamePhase::Paused);

        // Nothing advances while paused
        let time = world.survival_time;
        tick(&mut world, &TickInput::default(), DT);
        assert_eq!(world.survival_time, time);

        tick(&mut world, &input, DT);
        assert_eq!(world.phase, GamePhase::Playing);
    }

    #[test]
    fn test_dt_clamped() {
        let mut world = playing_world(11);
        tick(&mut world, &TickInput::default(), 5.0);
        assert!(world.survival_time <= MAX_FRAME_DT + f32::EPSILON);
    }

    #[test]
    fn test_zigzag_stays_in_bounds() {
        let mut world = playing_world(12);
        push_entity(&mut world, EntityKind::SmokeZigzag, 20.0, 50.0, 100.0);
        for _ in 0..120 {
            tick(&mut world, &TickInput::default(), DT);
        }
        for e in world.entities.iter().filter(|e| e.zigzag.is_some()) {
            assert!(e.pos.x >= e.size / 2.0);
            assert!(e.pos.x <= GAME_WIDTH - e.size / 2.0);
        }
    }

    #[test]
    fn test_shield_input_moves_toward_target() {
        let mut world = playing_world(13);
        let input = TickInput {
            target_x: Some(500.0),
            ..Default::default()
        };
        let start = world.shield.x;
        for _ in 0..60 {
            tick(&mut world, &input, DT);
        }
        assert!(world.shield.x > start);
        assert!((world.shield.x - 500.0).abs() < 5.0);
    }

    #[test]
    fn test_determinism_under_fixed_seed() {
        let mut a = playing_world(99999);
        let mut b = playing_world(99999);

        let input = TickInput {
            target_x: Some(420.0),
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.combo, b.combo);
        assert_eq!(a.entities.len(), b.entities.len());
        assert_eq!(a.health(), b.health());
        assert_eq!(a.tar(), b.tar());
        for (ea, eb) in a.entities.iter().zip(&b.entities) {
            assert_eq!(ea.id, eb.id);
            assert_eq!(ea.kind, eb.kind);
            assert!((ea.pos - eb.pos).length() < 1e-4);
        }
    }

    #[test]
    fn test_spawn_cadence_produces_entities() {
        let mut world = playing_world(14);
        // Two simulated seconds at level 1 (interval 0.76s)
        for _ in 0..120 {
            tick(&mut world, &TickInput::default(), DT);
        }
        assert!(world.stats.hazards_blocked > 0 || !world.entities.is_empty() || world.stats.damage_taken > 0);
    }

    #[test]
    fn test_particles_and_texts_expire() {
        let mut world = playing_world(15);
        world.spawn_burst(Vec2::new(300.0, 200.0), BurstKind::Smoke);
        world.push_floating_text(Vec2::new(300.0, 200.0), "+15", SCORE_COLOR);
        for _ in 0..240 {
            tick(&mut world, &TickInput::default(), DT);
            // Burst effects only; clear gameplay side effects between ticks
            world.entities.clear();
        }
        assert!(world.particles.is_empty());
        assert!(world.floating_texts.is_empty());
    }
}
