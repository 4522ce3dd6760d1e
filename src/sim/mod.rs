//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Wall-clock dt in, clamped by the caller
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The frame loop owns a single mutable [`GameWorld`]; the UI layer only ever
//! sees read-only [`HudSnapshot`] copies published after each tick.

pub mod spawn;
pub mod state;
pub mod tick;

pub use spawn::{kind_for_roll, spawn_entity, spawn_interval, speed_range};
pub use state::{
    BurstKind, EntityKind, FallingEntity, FloatingText, GameEvent, GameMode, GamePhase, GameWorld,
    HudSnapshot, Particle, SessionStats, Shield, Zigzag,
};
pub use tick::{TickInput, tick};
