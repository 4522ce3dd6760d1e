//! Session state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameWorld`]; the UI layer gets
//! read-only [`HudSnapshot`] copies.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen, mode choice
    Idle,
    /// Active gameplay
    Playing,
    /// Frame loop suspended
    Paused,
    /// Fact interstitial after a level-up, auto-returns to Playing
    LevelUp,
    /// Session ended (health empty or tar full)
    GameOver,
}

/// Selected game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Play until health or tar fails
    #[default]
    Endless,
    /// Same rules, with a displayed 2-minute survival target
    Survival,
}

/// Falling entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Smoke,
    SmokeFast,
    SmokeBig,
    SmokeZigzag,
    Tar,
    Cigarette,
    FreshAir,
    Medicine,
}

impl EntityKind {
    /// Hazards damage the lungs when unblocked; the rest are pickups
    pub fn is_hazard(&self) -> bool {
        !matches!(self, EntityKind::FreshAir | EntityKind::Medicine)
    }

    /// Visual diameter in field units
    pub fn size(&self) -> f32 {
        match self {
            EntityKind::Smoke => 28.0,
            EntityKind::SmokeFast => 22.0,
            EntityKind::SmokeBig => 42.0,
            EntityKind::SmokeZigzag => 26.0,
            EntityKind::Tar => 34.0,
            EntityKind::Cigarette => 38.0,
            EntityKind::FreshAir => 28.0,
            EntityKind::Medicine => 26.0,
        }
    }

    /// Multiplier applied to the level base speed
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            EntityKind::SmokeFast => 1.8,
            EntityKind::SmokeBig => 0.6,
            EntityKind::SmokeZigzag => 0.9,
            _ => 1.0,
        }
    }

    /// Base points for blocking (hazards) or catching (pickups).
    /// Only hazard points are scaled by the combo multiplier.
    pub fn block_points(&self) -> u32 {
        match self {
            EntityKind::Smoke => 15,
            EntityKind::SmokeFast => 25,
            EntityKind::SmokeBig => 35,
            EntityKind::SmokeZigzag => 30,
            EntityKind::Tar => 30,
            EntityKind::Cigarette => 50,
            EntityKind::FreshAir => 25,
            EntityKind::Medicine => 40,
        }
    }

    /// Health damage dealt when this entity reaches the lungs unblocked
    pub fn lung_damage(&self) -> f32 {
        match self {
            EntityKind::Smoke => 10.0,
            EntityKind::SmokeFast => 12.0,
            EntityKind::SmokeZigzag => 14.0,
            EntityKind::SmokeBig => 18.0,
            EntityKind::Tar => 20.0,
            EntityKind::Cigarette => 30.0,
            EntityKind::FreshAir | EntityKind::Medicine => 0.0,
        }
    }

    /// Tar accumulation when this entity reaches the lungs unblocked
    pub fn lung_tar(&self) -> f32 {
        match self {
            EntityKind::Smoke => 4.0,
            EntityKind::SmokeFast => 5.0,
            EntityKind::SmokeZigzag => 6.0,
            EntityKind::SmokeBig => 8.0,
            EntityKind::Tar => 10.0,
            EntityKind::Cigarette => 15.0,
            EntityKind::FreshAir | EntityKind::Medicine => 0.0,
        }
    }
}

/// Horizontal oscillation parameters, present only on zigzag smoke
#[derive(Debug, Clone, Copy)]
pub struct Zigzag {
    pub phase: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

/// A falling hazard or power-up
#[derive(Debug, Clone)]
pub struct FallingEntity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Vertical speed in units/s
    pub speed: f32,
    pub size: f32,
    pub opacity: f32,
    pub zigzag: Option<Zigzag>,
}

impl FallingEntity {
    pub fn top(&self) -> f32 {
        self.pos.y - self.size / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size / 2.0
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.size / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }
}

/// A short-lived visual particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime fraction, 1 -> 0
    pub life: f32,
    pub max_life: f32,
    pub color: &'static str,
    pub size: f32,
}

/// Rising score/damage label
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub color: &'static str,
    /// Remaining lifetime fraction, 1 -> 0
    pub life: f32,
}

/// Particle burst palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    Smoke,
    Air,
    Heal,
    Damage,
}

impl BurstKind {
    fn palette(&self) -> &'static [&'static str] {
        match self {
            BurstKind::Smoke => &["#6b7280", "#4b5563", "#374151", "#9ca3af"],
            BurstKind::Air => &["#22d3ee", "#06b6d4", "#0891b2", "#67e8f9"],
            BurstKind::Heal => &["#22c55e", "#16a34a", "#15803d", "#4ade80"],
            BurstKind::Damage => &["#ef4444", "#dc2626", "#b91c1c", "#f87171"],
        }
    }

    fn count(&self) -> usize {
        match self {
            BurstKind::Damage => 20,
            _ => 12,
        }
    }
}

/// The player-controlled shield paddle
#[derive(Debug, Clone)]
pub struct Shield {
    /// Eased position actually drawn and collided against
    pub x: f32,
    /// Where the player wants the shield (pointer/keyboard)
    pub target_x: f32,
}

impl Default for Shield {
    fn default() -> Self {
        Self {
            x: GAME_WIDTH / 2.0,
            target_x: GAME_WIDTH / 2.0,
        }
    }
}

impl Shield {
    /// Clamp so the shield stays fully on-field
    pub fn set_target(&mut self, x: f32) {
        let half = SHIELD_WIDTH / 2.0;
        self.target_x = x.clamp(half, GAME_WIDTH - half);
    }

    pub fn nudge_target(&mut self, delta: f32) {
        self.set_target(self.target_x + delta);
    }

    /// Ease toward the target; single-pole filter, framerate-independent
    pub fn ease_toward_target(&mut self, dt: f32) {
        self.x += (self.target_x - self.x) * crate::ease_factor(dt, SHIELD_SMOOTH_TAU);
    }

    pub fn left(&self) -> f32 {
        self.x - SHIELD_WIDTH / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + SHIELD_WIDTH / 2.0
    }
}

/// Counters shown on the game-over panel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    pub hazards_blocked: u32,
    pub tar_absorbed: u32,
    pub damage_taken: u32,
    pub powerups_collected: u32,
}

/// One-shot events drained by the shell for audio/DOM effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Blocked,
    PowerUp,
    Damaged,
    LevelUp { level: u32 },
    GameOver,
}

/// Mutable simulation arena, exclusively owned by the frame loop
#[derive(Debug, Clone)]
pub struct GameWorld {
    pub seed: u64,
    pub phase: GamePhase,
    pub mode: GameMode,
    pub score: u64,
    health: f32,
    tar: f32,
    pub level: u32,
    pub combo: u32,
    pub max_combo: u32,
    /// Elapsed session time (simulated seconds)
    pub survival_time: f32,
    pub stats: SessionStats,
    pub shield: Shield,
    pub entities: Vec<FallingEntity>,
    pub particles: Vec<Particle>,
    pub floating_texts: Vec<FloatingText>,
    /// Seconds since the last regular spawn
    pub spawn_timer: f32,
    /// Seconds into the current level
    pub level_timer: f32,
    /// Countdown timers for delayed burst spawns; reset drops them
    pub bonus_spawns: Vec<f32>,
    /// Remaining real-time seconds of the level-up interstitial
    pub levelup_timer: f32,
    /// Which fact the interstitial shows (level - 1), if any
    pub fact_index: Option<usize>,
    pub screen_shake: f32,
    /// Remaining seconds of the red damage flash
    pub damage_flash: f32,
    /// Total simulated time, drives background animation
    pub game_time: f32,
    /// Drained by the shell after each tick
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameWorld {
    /// Create a world sitting on the start screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            mode: GameMode::Endless,
            score: 0,
            health: 100.0,
            tar: 0.0,
            level: 1,
            combo: 0,
            max_combo: 0,
            survival_time: 0.0,
            stats: SessionStats::default(),
            shield: Shield::default(),
            entities: Vec::new(),
            particles: Vec::new(),
            floating_texts: Vec::new(),
            spawn_timer: 0.0,
            level_timer: 0.0,
            bonus_spawns: Vec::new(),
            levelup_timer: 0.0,
            fact_index: None,
            screen_shake: 0.0,
            damage_flash: 0.0,
            game_time: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Reset everything and enter Playing in the given mode.
    /// Dropping the timer vectors cancels any pending bonus spawns, so a
    /// fresh session can never be mutated by leftovers of the previous one.
    pub fn start(&mut self, mode: GameMode, seed: u64) {
        *self = Self::new(seed);
        self.mode = mode;
        self.phase = GamePhase::Playing;
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn tar(&self) -> f32 {
        self.tar
    }

    /// All health writes clamp to [0, 100]
    pub fn apply_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, 100.0);
    }

    pub fn restore_health(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, 100.0);
    }

    /// All tar writes clamp to [0, 100]
    pub fn accumulate_tar(&mut self, amount: f32) {
        self.tar = (self.tar + amount).clamp(0.0, 100.0);
    }

    pub fn reduce_tar(&mut self, amount: f32) {
        self.tar = (self.tar - amount).clamp(0.0, 100.0);
    }

    /// The session terminates exactly when health empties or tar fills
    pub fn is_terminal(&self) -> bool {
        self.health <= 0.0 || self.tar >= 100.0
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Emit a ring of particles at an effect origin
    pub fn spawn_burst(&mut self, origin: Vec2, kind: BurstKind) {
        let palette = kind.palette();
        let count = kind.count();

        for i in 0..count {
            let angle = std::f32::consts::TAU * i as f32 / count as f32
                + self.rng.random_range(0.0..0.5);
            let speed = self.rng.random_range(80.0..230.0);
            let color = palette[self.rng.random_range(0..palette.len())];

            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 80.0),
                life: 1.0,
                max_life: self.rng.random_range(0.6..1.2),
                color,
                size: self.rng.random_range(4.0..10.0),
            });
        }
    }

    pub fn push_floating_text(&mut self, pos: Vec2, text: impl Into<String>, color: &'static str) {
        self.floating_texts.push(FloatingText {
            pos,
            text: text.into(),
            color,
            life: 1.0,
        });
    }

    /// Publish a read-only copy for the UI layer
    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            phase: self.phase,
            mode: self.mode,
            score: self.score,
            health: self.health,
            tar: self.tar,
            level: self.level,
            combo: self.combo,
            max_combo: self.max_combo,
            survival_time: self.survival_time,
            stats: self.stats,
            fact_index: self.fact_index,
            screen_shake: self.screen_shake,
            damage_flash: self.damage_flash > 0.0,
        }
    }
}

/// One-way snapshot published after each tick for display purposes only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub score: u64,
    pub health: f32,
    pub tar: f32,
    pub level: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub survival_time: f32,
    pub stats: SessionStats,
    pub fact_index: Option<usize>,
    pub screen_shake: f32,
    pub damage_flash: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_and_tar_always_clamped() {
        let mut world = GameWorld::new(1);
        world.apply_damage(250.0);
        assert_eq!(world.health(), 0.0);
        world.restore_health(500.0);
        assert_eq!(world.health(), 100.0);
        world.accumulate_tar(180.0);
        assert_eq!(world.tar(), 100.0);
        world.reduce_tar(999.0);
        assert_eq!(world.tar(), 0.0);
    }

    #[test]
    fn test_terminal_condition() {
        let mut world = GameWorld::new(1);
        assert!(!world.is_terminal());
        world.apply_damage(100.0);
        assert!(world.is_terminal());

        let mut world = GameWorld::new(1);
        world.accumulate_tar(100.0);
        assert!(world.is_terminal());
    }

    #[test]
    fn test_start_resets_everything() {
        let mut world = GameWorld::new(7);
        world.score = 1234;
        world.apply_damage(60.0);
        world.level = 5;
        world.bonus_spawns.push(0.1);
        let id = world.next_entity_id();
        world.entities.push(FallingEntity {
            id,
            kind: EntityKind::Smoke,
            pos: Vec2::new(100.0, 100.0),
            speed: 150.0,
            size: 28.0,
            opacity: 1.0,
            zigzag: None,
        });

        world.start(GameMode::Survival, 8);
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.mode, GameMode::Survival);
        assert_eq!(world.score, 0);
        assert_eq!(world.health(), 100.0);
        assert_eq!(world.level, 1);
        assert!(world.entities.is_empty());
        assert!(world.bonus_spawns.is_empty());
    }

    #[test]
    fn test_shield_target_clamped_to_field() {
        let mut shield = Shield::default();
        shield.set_target(-500.0);
        assert_eq!(shield.target_x, SHIELD_WIDTH / 2.0);
        shield.set_target(5000.0);
        assert_eq!(shield.target_x, GAME_WIDTH - SHIELD_WIDTH / 2.0);
    }

    #[test]
    fn test_shield_easing_converges_without_overshoot() {
        let mut shield = Shield::default();
        shield.set_target(450.0);
        let mut last_gap = (shield.target_x - shield.x).abs();
        for _ in 0..300 {
            shield.ease_toward_target(1.0 / 60.0);
            let gap = (shield.target_x - shield.x).abs();
            assert!(gap <= last_gap);
            last_gap = gap;
        }
        assert!(last_gap < 0.5);
    }

    #[test]
    fn test_burst_counts() {
        let mut world = GameWorld::new(3);
        world.spawn_burst(Vec2::new(300.0, 200.0), BurstKind::Smoke);
        assert_eq!(world.particles.len(), 12);
        world.particles.clear();
        world.spawn_burst(Vec2::new(300.0, 200.0), BurstKind::Damage);
        assert_eq!(world.particles.len(), 20);
    }

    #[test]
    fn test_hazard_classification() {
        assert!(EntityKind::Smoke.is_hazard());
        assert!(EntityKind::SmokeFast.is_hazard());
        assert!(EntityKind::SmokeBig.is_hazard());
        assert!(EntityKind::SmokeZigzag.is_hazard());
        assert!(EntityKind::Tar.is_hazard());
        assert!(EntityKind::Cigarette.is_hazard());
        assert!(!EntityKind::FreshAir.is_hazard());
        assert!(!EntityKind::Medicine.is_hazard());
    }

    #[test]
    fn test_cigarette_hits_hardest() {
        for kind in [
            EntityKind::Smoke,
            EntityKind::SmokeFast,
            EntityKind::SmokeZigzag,
            EntityKind::SmokeBig,
            EntityKind::Tar,
        ] {
            assert!(kind.lung_damage() < EntityKind::Cigarette.lung_damage());
            assert!(kind.lung_tar() < EntityKind::Cigarette.lung_tar());
        }
    }
}
