//! Audio system using Web Audio API
//!
//! Procedurally generated sound cues, no audio assets. Each cue is a single
//! oscillator with a short gain envelope.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Hazard blocked by the shield
    Block,
    /// Hazard reached the lungs
    Damage,
    /// Power-up caught
    PowerUp,
    /// Level advanced
    LevelUp,
    /// Session ended
    GameOver,
}

/// Audio manager for the game
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    muted: bool,
}

#[cfg(target_arch = "wasm32")]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, muted: false }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Play a sound cue
    pub fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Block => self.play_block(ctx),
            SoundEffect::Damage => self.play_damage(ctx),
            SoundEffect::PowerUp => self.play_powerup(ctx),
            SoundEffect::LevelUp => self.play_levelup(ctx),
            SoundEffect::GameOver => self.play_gameover(ctx),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Block - short descending ping
    fn play_block(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(400.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Damage - low descending thud
    fn play_damage(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(100.0, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Power-up - rising sweep
    fn play_powerup(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(800.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Level up - three ascending steps
    fn play_levelup(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.12, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(450.0, t + 0.1).ok();
        osc.frequency().set_value_at_time(600.0, t + 0.2).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Game over - long fall
    fn play_gameover(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(80.0, t + 0.5)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.5).ok();
    }
}

/// Native stub, keeps the shell code target-agnostic
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
pub struct AudioManager {
    muted: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resume(&self) {}

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn play(&self, _effect: SoundEffect) {}
}
