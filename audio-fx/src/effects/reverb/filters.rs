//! Comb and allpass building blocks, and the per-channel network.
//!
//! Filters don't own their buffers. Each holds a [`Region`] handed out by the
//! reverb's [`MemoryPool`] and is passed the matching slice on every call.

use super::presets::{ReverbPreset, NUM_ALLPASSES, NUM_COMBS};
use crate::constants::{AUDIO_SAMPLE_RATE, REVERB_AP_CHUNK, REVERB_COMB_CHUNK, REVERB_MIN_DELAY};
use crate::dsp::fixed::float_to_q15;
use crate::dsp::intrinsics::{saturate16, signed_saturate_rshift};
use crate::memory::{MemoryPool, Region};

/// Convert a preset delay to samples, add `extra`, and clamp to
/// `[REVERB_MIN_DELAY, chunk]`.
pub fn delay_samples(ms: f32, extra: u16, chunk: u16) -> usize {
    let base = (ms * (AUDIO_SAMPLE_RATE as f32 / 1000.0)) as u16;
    base.saturating_add(extra).clamp(REVERB_MIN_DELAY, chunk) as usize
}

/// Feedback comb with optional one-pole damping in the loop.
#[derive(Debug, Clone, Copy)]
pub struct CombFilter {
    region: Region,
    ptr: usize,
    gain: i16,
    damp_state: i16,
    damp_shift: u8,
}

impl CombFilter {
    /// Unconfigured comb on the scratch region.
    pub const fn new() -> Self {
        CombFilter {
            region: Region::Scratch,
            ptr: 0,
            gain: 0,
            damp_state: 0,
            damp_shift: 0,
        }
    }

    /// Take a `delay`-sample region from `pool` and set the loop parameters.
    pub fn configure<const N: usize>(
        &mut self,
        pool: &mut MemoryPool<N>,
        delay: usize,
        gain: i16,
        damp_shift: u8,
    ) {
        self.region = pool.alloc_or_scratch(delay);
        self.gain = gain;
        self.damp_shift = damp_shift.min(6);
        self.reset();
    }

    /// Delay length in samples.
    pub fn delay(&self) -> usize {
        self.region.len()
    }

    /// Pool region holding the delay samples.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Run one sample through the loop. Returns the (damped) delayed sample.
    #[inline(always)]
    pub fn process(&mut self, buf: &mut [i16], input: i16) -> i16 {
        let delayed = buf[self.ptr];
        let filtered = if self.damp_shift != 0 {
            // Stays between the old state and `delayed`, so it fits 16 bits
            let state = self.damp_state as i32;
            let next = (state + ((delayed as i32 - state) >> self.damp_shift)) as i16;
            self.damp_state = next;
            next
        } else {
            delayed
        };

        buf[self.ptr] = saturate16(input as i32 + ((self.gain as i32 * filtered as i32) >> 15));
        self.ptr += 1;
        if self.ptr >= buf.len() {
            self.ptr = 0;
        }
        filtered
    }

    /// Rewind the pointer and the damping state. Buffer contents are untouched.
    pub fn reset(&mut self) {
        self.ptr = 0;
        self.damp_state = 0;
    }
}

impl Default for CombFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Schroeder allpass diffuser.
#[derive(Debug, Clone, Copy)]
pub struct AllpassFilter {
    region: Region,
    ptr: usize,
    gain: i16,
}

impl AllpassFilter {
    /// Unconfigured allpass on the scratch region.
    pub const fn new() -> Self {
        AllpassFilter {
            region: Region::Scratch,
            ptr: 0,
            gain: 0,
        }
    }

    /// Take a `delay`-sample region from `pool` and set the gain.
    pub fn configure<const N: usize>(&mut self, pool: &mut MemoryPool<N>, delay: usize, gain: i16) {
        self.region = pool.alloc_or_scratch(delay);
        self.gain = gain;
        self.reset();
    }

    /// Delay length in samples.
    pub fn delay(&self) -> usize {
        self.region.len()
    }

    /// Pool region holding the delay samples.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Run one sample through the diffuser and return its output.
    #[inline(always)]
    pub fn process(&mut self, buf: &mut [i16], input: i16) -> i16 {
        let delayed = buf[self.ptr] as i32;
        let g = self.gain as i32;
        let v = input as i32 + ((g * delayed) >> 15);
        let out = delayed - ((g * v) >> 15);

        buf[self.ptr] = saturate16(v);
        self.ptr += 1;
        if self.ptr >= buf.len() {
            self.ptr = 0;
        }
        saturate16(out)
    }

    /// Rewind the pointer. Buffer contents are untouched.
    pub fn reset(&mut self) {
        self.ptr = 0;
    }
}

impl Default for AllpassFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Four parallel combs into two series allpasses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverbChannel {
    combs: [CombFilter; NUM_COMBS],
    allpasses: [AllpassFilter; NUM_ALLPASSES],
}

impl ReverbChannel {
    /// Channel with every filter on the scratch region.
    pub const fn new() -> Self {
        ReverbChannel {
            combs: [CombFilter::new(); NUM_COMBS],
            allpasses: [AllpassFilter::new(); NUM_ALLPASSES],
        }
    }

    /// Allocate and tune every filter for `preset`, lengthening each delay
    /// by `extra` samples.
    pub fn configure<const N: usize>(
        &mut self,
        pool: &mut MemoryPool<N>,
        preset: &ReverbPreset,
        extra: u16,
    ) {
        for (i, comb) in self.combs.iter_mut().enumerate() {
            let delay = delay_samples(preset.comb_ms[i], extra, REVERB_COMB_CHUNK);
            comb.configure(pool, delay, float_to_q15(preset.comb_gains[i]), preset.damp_shift);
        }
        for (i, ap) in self.allpasses.iter_mut().enumerate() {
            let delay = delay_samples(preset.allpass_ms[i], extra, REVERB_AP_CHUNK);
            ap.configure(pool, delay, float_to_q15(preset.allpass_gains[i]));
        }
    }

    /// Produce one wet sample.
    #[inline(always)]
    pub fn process<const N: usize>(&mut self, pool: &mut MemoryPool<N>, input: i16) -> i16 {
        let mut sum = 0i32;
        for comb in self.combs.iter_mut() {
            let region = comb.region();
            sum += comb.process(pool.slice_mut(region), input) as i32;
        }
        let mut y = signed_saturate_rshift::<16, 2>(sum) as i16;
        for ap in self.allpasses.iter_mut() {
            let region = ap.region();
            y = ap.process(pool.slice_mut(region), y);
        }
        y
    }

    /// Rewind every filter. Buffer contents are untouched.
    pub fn reset(&mut self) {
        self.combs.iter_mut().for_each(CombFilter::reset);
        self.allpasses.iter_mut().for_each(AllpassFilter::reset);
    }

    /// Comb delay lengths in samples.
    pub fn comb_delays(&self) -> [usize; NUM_COMBS] {
        let mut out = [0; NUM_COMBS];
        for (d, comb) in out.iter_mut().zip(self.combs.iter()) {
            *d = comb.delay();
        }
        out
    }

    /// Allpass delay lengths in samples.
    pub fn allpass_delays(&self) -> [usize; NUM_ALLPASSES] {
        let mut out = [0; NUM_ALLPASSES];
        for (d, ap) in out.iter_mut().zip(self.allpasses.iter()) {
            *d = ap.delay();
        }
        out
    }
}
