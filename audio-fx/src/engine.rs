//! The processing context.
//!
//! [`AudioEngine`] owns one instance of every effect, the selection state
//! machine and the output level. Lifecycle calls take `&mut self`, so they
//! can never overlap with [`process_block`](AudioEngine::process_block).

use crate::config::EngineConfig;
use crate::constants::Q15_ONE;
use crate::controller::{EffectController, EffectKind, Transition};
use crate::dsp::fixed::{block_multiply, float_to_q15, q15_to_float};
use crate::effect::Effect;
use crate::effects::{Flanger, PitchShifter, ReverbEngine, ReverbPresetId, Tremolo};
use crate::error::ConfigError;

/// Owner of every effect instance, the selection state machine and the
/// output level.
///
/// Lifecycle methods run in the foreground; [`process_block`](Self::process_block)
/// runs in the audio interrupt. The application serializes the two with its
/// own lock.
pub struct AudioEngine {
    controller: EffectController,
    flanger: Flanger,
    tremolo: Tremolo,
    reverb: ReverbEngine,
    pitch: PitchShifter,
    /// Q15 gain applied after the effect chain.
    output_gain: i32,
}

impl AudioEngine {
    /// Engine with the reference tuning, in loopback.
    pub fn new() -> Self {
        AudioEngine {
            controller: EffectController::new(),
            flanger: Flanger::new(),
            tremolo: Tremolo::new(),
            reverb: ReverbEngine::new(),
            pitch: PitchShifter::new(),
            output_gain: Q15_ONE,
        }
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let reverb = ReverbEngine::with_config(config.reverb, config.reverb_preset)?;
        Ok(AudioEngine {
            controller: EffectController::new(),
            flanger: Flanger::with_config(config.flanger)?,
            tremolo: Tremolo::with_config(config.tremolo)?,
            reverb,
            pitch: PitchShifter::with_config(config.pitch_shift)?,
            output_gain: Q15_ONE,
        })
    }

    fn effect_mut(&mut self, kind: EffectKind) -> Option<&mut dyn Effect> {
        match kind {
            EffectKind::Loopback => None,
            EffectKind::Flanger => Some(&mut self.flanger),
            EffectKind::Tremolo => Some(&mut self.tremolo),
            EffectKind::Reverb => Some(&mut self.reverb),
        }
    }

    fn apply(&mut self, transition: Transition) {
        if let Some(old) = transition.cleanup {
            if let Some(effect) = self.effect_mut(old) {
                effect.clear();
            }
            log::debug!("engine: cleaned up {}", old.name());
        }
        if let Some(new) = transition.init {
            if let Some(effect) = self.effect_mut(new) {
                effect.init();
            }
            log::debug!("engine: initialized {}", new.name());
        }
    }

    /// Make `kind` the current effect, cleaning up the previous one.
    pub fn set_effect(&mut self, kind: EffectKind) {
        let transition = self.controller.set_effect(kind);
        self.apply(transition);
    }

    pub fn current_effect(&self) -> EffectKind {
        self.controller.current()
    }

    /// Mark `kind` inactive and zero its buffers.
    pub fn cleanup_effect(&mut self, kind: EffectKind) {
        self.controller.cleanup_effect(kind);
        if let Some(effect) = self.effect_mut(kind) {
            effect.clear();
        }
    }

    /// Clean up every effect and return to loopback.
    pub fn cleanup_all_effects(&mut self) {
        for kind in EffectKind::ALL {
            if kind != EffectKind::Loopback {
                self.cleanup_effect(kind);
            }
        }
        self.set_effect(EffectKind::Loopback);
    }

    /// Load a reverb preset. Rebuilds the reverb network immediately.
    pub fn set_reverb_preset(&mut self, preset: ReverbPresetId) {
        self.reverb.set_preset(preset);
        self.controller.mark_initialized(EffectKind::Reverb);
    }

    pub fn reverb_preset(&self) -> ReverbPresetId {
        self.reverb.preset()
    }

    /// Turn the pitch overlay on or off. Enabling it from off resets the
    /// shifter to no shift, so set the frequency afterwards.
    pub fn set_pitch_shift_enabled(&mut self, enabled: bool) {
        if self.controller.set_pitch_shift_enabled(enabled) {
            self.pitch.init();
        }
    }

    pub fn is_pitch_shift_enabled(&self) -> bool {
        self.controller.is_pitch_shift_enabled()
    }

    pub fn set_pitch_frequency(&mut self, hz: f32) -> Result<(), ConfigError> {
        self.pitch.set_pitch_frequency(hz)
    }

    pub fn pitch_frequency(&self) -> f32 {
        self.pitch.frequency()
    }

    /// Set the post-chain output level, `0.0..=1.0`.
    pub fn set_output_level(&mut self, level: f32) {
        let clamped = level.clamp(0.0, 1.0);
        if clamped != level {
            log::warn!("output level {} clamped to {}", level, clamped);
        }
        self.output_gain = float_to_q15(clamped) as i32;
    }

    pub fn output_level(&self) -> f32 {
        q15_to_float(self.output_gain as i16)
    }

    /// Run one block through `kind`, then the pitch overlay and output level.
    ///
    /// An effect that was never initialized is bypassed with a plain copy.
    /// Only `min(input.len(), output.len())` samples are produced.
    pub fn process_block(&mut self, kind: EffectKind, input: &[i16], output: &mut [i16]) {
        let len = input.len().min(output.len());
        let (input, output) = (&input[..len], &mut output[..len]);

        let ready = self.controller.is_initialized(kind);
        match self.effect_mut(kind) {
            Some(effect) if ready => effect.process(input, output),
            _ => output.copy_from_slice(input),
        }

        if self.controller.is_pitch_shift_enabled() {
            self.pitch.process_in_place(output);
        }

        if self.output_gain != Q15_ONE {
            block_multiply(output, self.output_gain);
        }
    }

    /// [`process_block`](Self::process_block) with the current effect.
    pub fn process_current(&mut self, input: &[i16], output: &mut [i16]) {
        let kind = self.controller.current();
        self.process_block(kind, input, output);
    }

    /// Selection flags.
    pub fn controller(&self) -> &EffectController {
        &self.controller
    }

    /// The flanger instance.
    pub fn flanger(&self) -> &Flanger {
        &self.flanger
    }

    /// The tremolo instance.
    pub fn tremolo(&self) -> &Tremolo {
        &self.tremolo
    }

    /// The reverb instance and its pool.
    pub fn reverb(&self) -> &ReverbEngine {
        &self.reverb
    }

    /// The pitch overlay.
    pub fn pitch_shifter(&self) -> &PitchShifter {
        &self.pitch
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}
