//! Two-grain delay-line pitch shifter.
//!
//! A single phasor sweeps the read delay across a 2048-sample window. Two
//! grains read the same buffer half a window apart and are crossfaded with
//! triangular windows, so whichever grain is about to jump back is always
//! silent. The phasor increment sets the pitch ratio:
//!
//! ```text
//! delay_rate = (1 - f / f_root) / window   (Q32)
//! ```
//!
//! `delay_rate == 0` leaves the pitch untouched, negative rates shift up.

use crate::config::PitchShiftConfig;
use crate::dsp::intrinsics::saturate16;
use crate::dsp::wavetable::triangle_window;
use crate::dsp::{DelayLine, PhaseAccumulator};
use crate::effect::Effect;
use crate::error::{check_frequency, ConfigError};

/// Circular buffer length in samples.
pub const PITCH_BUFFER_SIZE: usize = 4096;

/// Grain window length in samples.
pub const PITCH_WINDOW: usize = 2048;

/// `high16 >> WINDOW_SHIFT` spans `0..PITCH_WINDOW`.
const WINDOW_SHIFT: u32 = 5;

/// Grain B runs 180° behind grain A.
const GRAIN_OFFSET: u32 = 0x8000_0000;

const _: () = assert!((1 << (16 - WINDOW_SHIFT)) == PITCH_WINDOW);
const _: () = assert!(PITCH_WINDOW < PITCH_BUFFER_SIZE);

/// Pitch shifter state.
pub struct PitchShifter {
    delay: DelayLine<PITCH_BUFFER_SIZE>,
    phasor: PhaseAccumulator,
    delay_rate: i32,
    frequency: f32,
    config: PitchShiftConfig,
}

impl PitchShifter {
    /// Create a shifter rooted at C4 (261.63 Hz), with no shift applied.
    pub fn new() -> Self {
        let config = PitchShiftConfig::default();
        PitchShifter {
            delay: DelayLine::new(),
            phasor: PhaseAccumulator::new(),
            delay_rate: 0,
            frequency: config.root_hz,
            config,
        }
    }

    pub fn with_config(config: PitchShiftConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut shifter = Self::new();
        shifter.config = config;
        shifter.frequency = config.root_hz;
        Ok(shifter)
    }

    /// Q32 phasor increment that moves `root_hz` to `hz`.
    pub fn rate_for(hz: f32, root_hz: f32) -> i32 {
        let ratio = hz as f64 / root_hz as f64;
        let rate = (1.0 - ratio) / PITCH_WINDOW as f64 * 4_294_967_296.0;
        libm::round(rate) as i32
    }

    /// Retarget the output pitch. Takes effect on the next sample.
    pub fn set_pitch_frequency(&mut self, hz: f32) -> Result<(), ConfigError> {
        check_frequency(hz)?;
        self.frequency = hz;
        self.delay_rate = Self::rate_for(hz, self.config.root_hz);
        let phase = self.phasor.phase();
        self.phasor = PhaseAccumulator::with_increment(self.delay_rate as u32);
        self.phasor.set_phase(phase);
        log::debug!("pitch: {} Hz, delay_rate {}", hz, self.delay_rate);
        Ok(())
    }

    /// Current target frequency.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Current phasor increment (Q32, signed).
    pub fn delay_rate(&self) -> i32 {
        self.delay_rate
    }

    pub fn phase(&self) -> u32 {
        self.phasor.phase()
    }

    /// Windowed, interpolated read for a grain at `phase`.
    #[inline(always)]
    fn grain(&self, phase: u32) -> i32 {
        let high16 = (phase >> 16) as u16;
        let gain = triangle_window(high16) as i32;
        let delay = (high16 >> WINDOW_SHIFT) as usize;
        let frac = ((phase >> 6) & 0x7FFF) as i16;
        // The sample just written sits at offset 1
        let value = self.delay.read_interpolated(delay + 1, frac) as i32;
        (value * gain) >> 15
    }

    /// Process one sample.
    #[inline(always)]
    pub fn process_sample(&mut self, x: i16) -> i16 {
        self.delay.write(x);
        let phase = self.phasor.phase();
        let y = saturate16(self.grain(phase) + self.grain(phase.wrapping_add(GRAIN_OFFSET)));
        self.phasor.advance();
        y
    }

    /// Shift a block in place, as an overlay after another effect.
    pub fn process_in_place(&mut self, block: &mut [i16]) {
        for sample in block.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    pub fn is_silent(&self) -> bool {
        self.delay.is_silent()
    }
}

impl Default for PitchShifter {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for PitchShifter {
    fn init(&mut self) {
        self.delay.clear();
        self.phasor = PhaseAccumulator::new();
        self.delay_rate = 0;
        self.frequency = self.config.root_hz;
        log::debug!("pitch: init, root {} Hz", self.config.root_hz);
    }

    fn process(&mut self, input: &[i16], output: &mut [i16]) {
        for (out, &x) in output.iter_mut().zip(input.iter()) {
            *out = self.process_sample(x);
        }
    }

    fn clear(&mut self) {
        self.delay.clear();
        self.phasor.reset();
    }
}
