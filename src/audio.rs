//! Audio system using Web Audio API
//!
//! One short oscillator sweep per gameplay event, no sample files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::session::EffectSink;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Apple eaten
    Eat,
    /// Invincible apple eaten
    PowerUp,
    /// Rock smashed while invincible
    Smash,
    /// Snake hit a rock
    Die,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Eat => SoundEffect::Eat,
            GameEvent::PowerUp => SoundEffect::PowerUp,
            GameEvent::Smash => SoundEffect::Smash,
            GameEvent::Die => SoundEffect::Die,
        }
    }
}

/// Audio manager for the game.
///
/// Created on the first user gesture; browsers keep contexts made earlier
/// suspended.
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = match AudioContext::new() {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                log::warn!("Failed to create AudioContext - audio disabled: {e:?}");
                None
            }
        };
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx
            && ctx.state() == web_sys::AudioContextState::Suspended
            && let Err(e) = ctx.resume()
        {
            log::warn!("AudioContext resume failed: {e:?}");
        }
    }

    /// Pick up volume changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Release the context; later effects are silently dropped
    pub fn close(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            if let Err(e) = ctx.close() {
                log::warn!("AudioContext close failed: {e:?}");
            }
            log::info!("Audio closed");
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        let played = match effect {
            SoundEffect::Eat => play_eat(ctx, vol),
            SoundEffect::PowerUp => play_power_up(ctx, vol),
            SoundEffect::Smash => play_smash(ctx, vol),
            SoundEffect::Die => play_die(ctx, vol),
        };
        if played.is_none() {
            log::warn!("Could not play {effect:?}");
        }
    }
}

impl EffectSink for AudioManager {
    fn trigger(&mut self, event: GameEvent) {
        self.play(event.into());
    }
}

/// Create an oscillator routed through a gain node to the speakers
fn create_osc(
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

/// Linear fade from `peak` to silence, then stop
fn envelope(osc: &OscillatorNode, gain: &GainNode, t: f64, peak: f32, end: f64) -> Option<()> {
    gain.gain().set_value_at_time(peak, t).ok()?;
    gain.gain().linear_ramp_to_value_at_time(0.0, t + end).ok()?;
    osc.start().ok()?;
    osc.stop_with_when(t + end).ok()?;
    Some(())
}

/// Eat - quick rising chirp
fn play_eat(ctx: &AudioContext, vol: f32) -> Option<()> {
    let (osc, gain) = create_osc(ctx, 600.0, OscillatorType::Sine)?;
    let t = ctx.current_time();

    osc.frequency().set_value_at_time(600.0, t).ok()?;
    osc.frequency()
        .exponential_ramp_to_value_at_time(1000.0, t + 0.1)
        .ok()?;
    envelope(&osc, &gain, t, vol * 0.1, 0.2)
}

/// Power-up - slow sweep up
fn play_power_up(ctx: &AudioContext, vol: f32) -> Option<()> {
    let (osc, gain) = create_osc(ctx, 300.0, OscillatorType::Triangle)?;
    let t = ctx.current_time();

    osc.frequency().set_value_at_time(300.0, t).ok()?;
    osc.frequency()
        .linear_ramp_to_value_at_time(800.0, t + 0.3)
        .ok()?;
    envelope(&osc, &gain, t, vol * 0.1, 0.4)
}

/// Smash - buzzy drop
fn play_smash(ctx: &AudioContext, vol: f32) -> Option<()> {
    let (osc, gain) = create_osc(ctx, 150.0, OscillatorType::Square)?;
    let t = ctx.current_time();

    osc.frequency().set_value_at_time(150.0, t).ok()?;
    osc.frequency()
        .exponential_ramp_to_value_at_time(40.0, t + 0.2)
        .ok()?;
    envelope(&osc, &gain, t, vol * 0.2, 0.25)
}

/// Die - long descending buzz
fn play_die(ctx: &AudioContext, vol: f32) -> Option<()> {
    let (osc, gain) = create_osc(ctx, 200.0, OscillatorType::Sawtooth)?;
    let t = ctx.current_time();

    osc.frequency().set_value_at_time(200.0, t).ok()?;
    osc.frequency()
        .exponential_ramp_to_value_at_time(50.0, t + 0.5)
        .ok()?;
    envelope(&osc, &gain, t, vol * 0.2, 0.5)
}
