//! Q15 wavetables built once at initialization.

use super::phase::PhaseAccumulator;

/// Number of index bits for the LFO wavetable.
pub const LFO_TABLE_BITS: u32 = 8;

/// Number of entries in the LFO wavetable.
pub const LFO_TABLE_SIZE: usize = 1 << LFO_TABLE_BITS;

/// 256-entry signed sine table, full range `-32767..=32767`.
///
/// Built with floating point exactly once; lookups are integer-only.
#[derive(Clone)]
pub struct Wavetable {
    samples: [i16; LFO_TABLE_SIZE],
}

impl Wavetable {
    /// Build one period of `sin(2πi/256) * 32767`.
    pub fn sine() -> Self {
        let mut samples = [0i16; LFO_TABLE_SIZE];
        for (i, s) in samples.iter_mut().enumerate() {
            let rad = i as f32 / LFO_TABLE_SIZE as f32 * (2.0 * core::f32::consts::PI);
            *s = (libm::sinf(rad) * 32767.0) as i16;
        }
        Wavetable { samples }
    }

    /// Table entry at the accumulator's current phase (top 8 bits).
    #[inline(always)]
    pub fn lookup(&self, acc: &PhaseAccumulator) -> i16 {
        self.samples[acc.index(LFO_TABLE_BITS)]
    }

    /// Raw access to the table contents.
    pub fn samples(&self) -> &[i16; LFO_TABLE_SIZE] {
        &self.samples
    }
}

/// Triangular crossfade window over a full 16-bit phase.
///
/// Rises `0 → 32767` over the first half and falls `32767 → 0` over the
/// second, so two windows 180° apart always sum to 32767.
#[inline(always)]
pub fn triangle_window(high16: u16) -> i16 {
    if high16 < 32768 {
        high16 as i16
    } else {
        (65535 - high16) as i16
    }
}
