//! Lung Defender - an arcade lung-protection minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, session state)
//! - `renderer`: Canvas2D render pass (wasm only)
//! - `audio`: Procedural Web Audio sound cues
//! - `highscore`: Persisted best score
//! - `i18n`: Flat string tables and per-level facts

pub mod audio;
pub mod highscore;
pub mod i18n;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscore::HighScore;
pub use i18n::{Language, Translator};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical play field dimensions (canvas units)
    pub const GAME_WIDTH: f32 = 600.0;
    pub const GAME_HEIGHT: f32 = 500.0;

    /// Shield geometry - a horizontal paddle near the bottom
    pub const SHIELD_WIDTH: f32 = 100.0;
    pub const SHIELD_HEIGHT: f32 = 14.0;
    pub const SHIELD_Y: f32 = GAME_HEIGHT - 80.0;

    /// Lung boundary - entities crossing this line are gone for good
    pub const LUNG_Y: f32 = GAME_HEIGHT - 45.0;
    /// How far past the lung line an entity must travel before it counts
    pub const LUNG_OVERSHOOT: f32 = 30.0;

    /// Entities spawn this far above the visible top edge
    pub const SPAWN_Y: f32 = -40.0;
    /// Horizontal spawn margin on each side
    pub const SPAWN_MARGIN: f32 = 40.0;

    /// One level lasts this many simulated seconds
    pub const LEVEL_DURATION: f32 = 30.0;
    /// Highest difficulty level
    pub const MAX_LEVEL: u32 = 10;
    /// Real-time length of the level-up fact interstitial
    pub const LEVELUP_INTERSTITIAL: f32 = 3.0;

    /// Maximum dt fed to the simulation (tab backgrounding protection)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Shield easing time constant; equivalent to 18%/frame at 60 Hz
    pub const SHIELD_SMOOTH_TAU: f32 = 0.084;

    /// Keyboard nudge per arrow/A-D press (field units)
    pub const KEY_MOVE_STEP: f32 = 30.0;

    /// Downward particle gravity (units/s^2)
    pub const PARTICLE_GRAVITY: f32 = 250.0;
    /// Floating text rise speed (units/s) and life decay (1/s)
    pub const FLOATING_TEXT_RISE: f32 = 60.0;
    pub const FLOATING_TEXT_DECAY: f32 = 1.5;

    /// Combo cap and per-step score multiplier
    pub const MAX_COMBO: u32 = 10;
    pub const COMBO_SCALE: f32 = 0.2;

    /// Survival mode target duration (seconds, display only)
    pub const SURVIVAL_TARGET: f32 = 120.0;
}

/// Exponential ease factor for a single-pole filter with time constant `tau`.
///
/// Framerate-independent equivalent of "move 18% of the remaining distance
/// per 60 Hz frame": `x += (target - x) * ease_factor(dt, tau)`.
#[inline]
pub fn ease_factor(dt: f32, tau: f32) -> f32 {
    1.0 - (-dt / tau).exp()
}

/// Format elapsed seconds as `m:ss` for the HUD clock.
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{}:{:02}", total / 60, total % 60)
}
