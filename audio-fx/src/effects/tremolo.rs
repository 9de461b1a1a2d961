//! Amplitude modulation by a sine LFO.
//!
//! `gain = (1 - depth/2) + depth/2 * sin(lfo)`, all in Q15, so the gain
//! swings between `1 - depth` and `1` and never exceeds unity.

use crate::config::TremoloConfig;
use crate::constants::Q15_ONE;
use crate::dsp::{PhaseAccumulator, Wavetable};
use crate::effect::Effect;
use crate::error::ConfigError;

/// Tremolo effect. No delay line, purely multiplicative.
pub struct Tremolo {
    lfo: PhaseAccumulator,
    table: Wavetable,
    config: TremoloConfig,
}

impl Tremolo {
    /// Create a tremolo with the reference tuning (3 Hz, depth 0.8).
    pub fn new() -> Self {
        Tremolo {
            lfo: PhaseAccumulator::new(),
            table: Wavetable::sine(),
            config: TremoloConfig::default(),
        }
    }

    /// Create a tremolo with custom tuning.
    pub fn with_config(config: TremoloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut tremolo = Self::new();
        tremolo.config = config;
        Ok(tremolo)
    }

    /// Set the modulation depth (Q15, negative values are treated as 0).
    pub fn set_depth(&mut self, depth: i16) {
        self.config.depth = depth.max(0);
    }

    /// Current modulation depth (Q15).
    pub fn depth(&self) -> i16 {
        self.config.depth
    }

    /// Q15 gain for a given LFO value.
    #[inline(always)]
    pub fn gain_for(&self, modulation: i16) -> i32 {
        let half_depth = (self.config.depth >> 1) as i32;
        let offset = Q15_ONE - half_depth;
        offset + ((half_depth * modulation as i32) >> 15)
    }

    /// Process one sample.
    #[inline(always)]
    pub fn process_sample(&mut self, x: i16) -> i16 {
        self.lfo.advance();
        let gain = self.gain_for(self.table.lookup(&self.lfo));
        // gain <= 32767, so the product always fits back into 16 bits
        ((x as i32 * gain) >> 15) as i16
    }

    /// Current LFO phase.
    pub fn lfo_phase(&self) -> u32 {
        self.lfo.phase()
    }
}

impl Default for Tremolo {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Tremolo {
    fn init(&mut self) {
        self.table = Wavetable::sine();
        self.lfo = PhaseAccumulator::new();
        self.lfo.set_frequency(self.config.rate_hz);
        log::debug!(
            "tremolo: init depth={} lfo_inc={}",
            self.config.depth,
            self.lfo.increment()
        );
    }

    fn process(&mut self, input: &[i16], output: &mut [i16]) {
        for (out, &x) in output.iter_mut().zip(input.iter()) {
            *out = self.process_sample(x);
        }
    }

    fn clear(&mut self) {
        self.lfo.reset();
    }
}
