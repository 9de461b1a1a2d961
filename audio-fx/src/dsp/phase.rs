//! Direct digital synthesis phase accumulator.
//!
//! A 32-bit phase register wraps naturally at 2^32 (= 360°). The upper bits
//! index a wavetable, so producing a periodic control signal needs one add
//! and one shift per sample, with no division and no drift.

use crate::constants::AUDIO_SAMPLE_RATE_F32;

/// 2^32 as `f32`.
const PHASE_SCALE: f32 = 4_294_967_296.0;

/// Phase accumulator with a fixed per-sample increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseAccumulator {
    /// Current phase (wraps at 32 bits).
    phase: u32,
    /// Phase increment per sample: `freq / sample_rate * 2^32`.
    increment: u32,
}

impl PhaseAccumulator {
    /// Create an accumulator at phase 0 that does not move.
    pub const fn new() -> Self {
        PhaseAccumulator {
            phase: 0,
            increment: 0,
        }
    }

    /// Create an accumulator with a raw increment.
    pub const fn with_increment(increment: u32) -> Self {
        PhaseAccumulator {
            phase: 0,
            increment,
        }
    }

    /// Create an accumulator running at `hz` for the given sample rate.
    pub fn from_frequency(hz: f32, sample_rate: f32) -> Self {
        Self::with_increment(Self::increment_for(hz, sample_rate))
    }

    /// `round(hz * 2^32 / sample_rate)`, saturating at the `u32` range.
    pub fn increment_for(hz: f32, sample_rate: f32) -> u32 {
        let inc = libm::round(hz as f64 * (PHASE_SCALE as f64 / sample_rate as f64));
        inc as u32
    }

    /// Retune to `hz` at the engine's sample rate. Phase is preserved.
    pub fn set_frequency(&mut self, hz: f32) {
        self.increment = Self::increment_for(hz, AUDIO_SAMPLE_RATE_F32);
    }

    /// Advance by one sample.
    #[inline(always)]
    pub fn advance(&mut self) {
        self.phase = self.phase.wrapping_add(self.increment);
    }

    /// Top `bits` bits of the phase, i.e. an index into a `2^bits` table.
    #[inline(always)]
    pub fn index(&self, bits: u32) -> usize {
        (self.phase >> (32 - bits)) as usize
    }

    /// Current phase.
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Current increment.
    pub fn increment(&self) -> u32 {
        self.increment
    }

    /// Set the phase directly (e.g. to start 180° out of phase).
    pub fn set_phase(&mut self, phase: u32) {
        self.phase = phase;
    }

    /// Rewind to phase 0, keeping the increment.
    pub fn reset(&mut self) {
        self.phase = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_matches_reference_values() {
        // 0.5 Hz flanger LFO at 48 kHz
        assert_eq!(PhaseAccumulator::increment_for(0.5, 48_000.0), 44739);
        // 3 Hz tremolo LFO at 48 kHz
        assert_eq!(PhaseAccumulator::increment_for(3.0, 48_000.0), 268435);
        assert_eq!(PhaseAccumulator::increment_for(0.0, 48_000.0), 0);
    }

    #[test]
    fn index_takes_top_bits() {
        let mut acc = PhaseAccumulator::new();
        acc.set_phase(0xAB12_3456);
        assert_eq!(acc.index(8), 0xAB);
        assert_eq!(acc.index(16), 0xAB12);
        assert_eq!(acc.index(1), 1);
    }

    #[test]
    fn exact_period_returns_to_start() {
        let inc = 1u32 << 24;
        let mut acc = PhaseAccumulator::with_increment(inc);
        acc.set_phase(12345);
        let steps = (1u64 << 32) / inc as u64;
        for _ in 0..steps {
            acc.advance();
        }
        assert_eq!(acc.phase(), 12345);
    }

    #[test]
    fn inexact_period_lands_within_one_increment() {
        let mut acc = PhaseAccumulator::from_frequency(1000.0, 48_000.0);
        let inc = acc.increment();
        let steps = (1u64 << 32) / inc as u64;
        for _ in 0..steps {
            acc.advance();
        }
        // Distance back to phase 0 on the circle
        let p = acc.phase();
        let dist = p.min(p.wrapping_neg());
        assert!(dist < inc, "phase {p:#x} not within one increment ({inc}) of start");
    }

    #[test]
    fn advance_wraps_without_panicking() {
        let mut acc = PhaseAccumulator::with_increment(u32::MAX);
        acc.set_phase(5);
        acc.advance();
        assert_eq!(acc.phase(), 4);
    }

    #[test]
    fn reset_keeps_increment() {
        let mut acc = PhaseAccumulator::with_increment(77);
        acc.advance();
        acc.reset();
        assert_eq!(acc.phase(), 0);
        assert_eq!(acc.increment(), 77);
    }
}
