//! LFO-modulated short delay, mixed feed-forward with the dry signal.
//!
//! Per sample:
//!
//! ```text
//! delay = L0 + A * sin(lfo)          (Q15, clamped to [1, capacity - 2])
//! y     = sat(x + g * delayed(delay))
//! ```
//!
//! The fractional part of the delay drives a linear interpolation between
//! the two neighbouring taps, so the sweep is click-free.

use crate::config::FlangerConfig;
use crate::dsp::intrinsics::saturate16;
use crate::dsp::{DelayLine, PhaseAccumulator, Wavetable};
use crate::effect::Effect;
use crate::error::ConfigError;

/// Flanger delay buffer length in samples.
pub const FLANGER_DELAY_SIZE: usize = 512;

/// Smallest allowed modulated delay: 1.0 sample in Q15.
const MIN_DELAY_Q15: i32 = 1 << 15;

/// Largest allowed modulated delay in Q15 (leaves room for the second tap).
const MAX_DELAY_Q15: i32 = ((FLANGER_DELAY_SIZE as i32) - 2) << 15;

/// Flanger effect. One delay line, one sine LFO.
pub struct Flanger {
    delay: DelayLine<FLANGER_DELAY_SIZE>,
    lfo: PhaseAccumulator,
    table: Wavetable,
    config: FlangerConfig,
}

impl Flanger {
    /// Create a flanger with the reference tuning.
    pub fn new() -> Self {
        Flanger {
            delay: DelayLine::new(),
            lfo: PhaseAccumulator::new(),
            table: Wavetable::sine(),
            config: FlangerConfig::default(),
        }
    }

    /// Create a flanger with custom tuning.
    pub fn with_config(config: FlangerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut flanger = Self::new();
        flanger.config = config;
        Ok(flanger)
    }

    /// Active configuration.
    pub fn config(&self) -> &FlangerConfig {
        &self.config
    }

    /// Modulated delay in Q15 for a given LFO value, clamped to the buffer.
    #[inline(always)]
    fn delay_q15(&self, lfo: i16) -> i32 {
        let d = ((self.config.delay_center as i32) << 15)
            + self.config.delay_depth as i32 * lfo as i32;
        d.clamp(MIN_DELAY_Q15, MAX_DELAY_Q15)
    }

    /// Process one sample.
    #[inline(always)]
    pub fn process_sample(&mut self, x: i16) -> i16 {
        self.lfo.advance();
        let lfo = self.table.lookup(&self.lfo);

        let d = self.delay_q15(lfo);
        let int_delay = (d >> 15) as usize;
        let frac = (d & 0x7FFF) as i16;

        let delayed = self.delay.read_interpolated(int_delay, frac);
        let wet = (self.config.gain as i32 * delayed as i32) >> 15;
        let y = saturate16(x as i32 + wet);

        self.delay.write(x);
        y
    }

    /// Whether the delay line holds only zeros.
    pub fn is_silent(&self) -> bool {
        self.delay.is_silent()
    }

    /// Current LFO phase.
    pub fn lfo_phase(&self) -> u32 {
        self.lfo.phase()
    }
}

impl Default for Flanger {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Flanger {
    fn init(&mut self) {
        self.table = Wavetable::sine();
        self.lfo = PhaseAccumulator::new();
        self.lfo.set_frequency(self.config.lfo_hz);
        self.delay.clear();
        log::debug!(
            "flanger: init L0={} A={} g={} lfo_inc={}",
            self.config.delay_center,
            self.config.delay_depth,
            self.config.gain,
            self.lfo.increment()
        );
    }

    fn process(&mut self, input: &[i16], output: &mut [i16]) {
        for (out, &x) in output.iter_mut().zip(input.iter()) {
            *out = self.process_sample(x);
        }
    }

    fn clear(&mut self) {
        self.delay.clear();
        self.lfo.reset();
    }
}
