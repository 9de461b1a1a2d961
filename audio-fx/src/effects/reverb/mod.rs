//! Schroeder reverb: four damped feedback combs in parallel feeding two
//! allpass diffusers in series, per channel.
//!
//! | Stage      | Per sample                                               |
//! |------------|----------------------------------------------------------|
//! | comb       | `fb = sat(x + g * lowpass(delayed))`, summed then `>> 2` |
//! | allpass    | `v = x + g * d`, `y = d - g * v`                         |
//! | mix        | `sat(dry * x + wet * y)`                                 |
//!
//! All delay buffers come out of one bump-allocated [`MemoryPool`]. Stereo
//! mode runs a second network on the odd samples of an interleaved block,
//! with every delay lengthened by a small spread so the channels decorrelate.

mod filters;
mod presets;

pub use filters::{delay_samples, AllpassFilter, CombFilter, ReverbChannel};
pub use presets::{ReverbPreset, ReverbPresetId, NUM_ALLPASSES, NUM_COMBS};

use crate::config::ReverbConfig;
use crate::constants::REVERB_MEM_SIZE;
use crate::dsp::fixed::float_to_q15;
use crate::dsp::intrinsics::saturate16;
use crate::effect::Effect;
use crate::error::ConfigError;
use crate::memory::MemoryPool;

/// Stereo (or mono) reverb backed by a `POOL`-sample memory pool.
pub struct ReverbEngine<const POOL: usize = REVERB_MEM_SIZE> {
    pool: MemoryPool<POOL>,
    left: ReverbChannel,
    right: ReverbChannel,
    preset: ReverbPresetId,
    wet: i16,
    dry: i16,
    config: ReverbConfig,
}

impl ReverbEngine {
    /// Stereo reverb on the default pool, Hall preset selected.
    pub fn new() -> Self {
        Self::build(ReverbConfig::default(), ReverbPresetId::Hall)
    }
}

impl<const POOL: usize> ReverbEngine<POOL> {
    fn build(config: ReverbConfig, preset: ReverbPresetId) -> Self {
        ReverbEngine {
            pool: MemoryPool::new(),
            left: ReverbChannel::new(),
            right: ReverbChannel::new(),
            preset,
            wet: 0,
            dry: 0,
            config,
        }
    }

    /// Create an uninitialized reverb with a custom channel layout.
    pub fn with_config(config: ReverbConfig, preset: ReverbPresetId) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, preset))
    }

    /// Select a preset and rebuild the whole network from an empty pool.
    pub fn set_preset(&mut self, preset: ReverbPresetId) {
        self.preset = preset;
        self.initialize();
    }

    /// Loaded preset.
    pub fn preset(&self) -> ReverbPresetId {
        self.preset
    }

    /// Channel layout.
    pub fn config(&self) -> &ReverbConfig {
        &self.config
    }

    /// Pool samples in use by the current network.
    pub fn memory_used(&self) -> usize {
        self.pool.allocated()
    }

    /// Whether every delay buffer holds only zeros.
    pub fn is_silent(&self) -> bool {
        self.pool.is_zeroed()
    }

    /// Left (or mono) network.
    pub fn left(&self) -> &ReverbChannel {
        &self.left
    }

    /// Right network, all scratch in mono mode.
    pub fn right(&self) -> &ReverbChannel {
        &self.right
    }

    fn initialize(&mut self) {
        let params = self.preset.params();
        self.pool.reset();
        self.wet = float_to_q15(params.wet);
        self.dry = float_to_q15(params.dry);

        self.left.configure(&mut self.pool, params, 0);
        if self.config.stereo {
            self.right.configure(&mut self.pool, params, self.config.spread);
        } else {
            self.right = ReverbChannel::new();
        }

        log::debug!(
            "reverb: {} preset ({}), {}/{} pool samples",
            self.preset.name(),
            if self.config.stereo { "stereo" } else { "mono" },
            self.pool.allocated(),
            self.pool.capacity()
        );
    }

    #[inline(always)]
    fn mix(dry: i32, wet: i32, x: i16, reverb: i16) -> i16 {
        saturate16(((dry * x as i32) >> 15) + ((wet * reverb as i32) >> 15))
    }
}

impl Default for ReverbEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<const POOL: usize> Effect for ReverbEngine<POOL> {
    fn init(&mut self) {
        self.initialize();
    }

    fn process(&mut self, input: &[i16], output: &mut [i16]) {
        let dry = self.dry as i32;
        let wet = self.wet as i32;
        let pool = &mut self.pool;

        if self.config.stereo {
            let mut channels = [&mut self.left, &mut self.right];
            for (frame_in, frame_out) in input.chunks(2).zip(output.chunks_mut(2)) {
                for ((&x, y), channel) in frame_in
                    .iter()
                    .zip(frame_out.iter_mut())
                    .zip(channels.iter_mut())
                {
                    *y = Self::mix(dry, wet, x, channel.process(pool, x));
                }
            }
        } else {
            for (&x, y) in input.iter().zip(output.iter_mut()) {
                *y = Self::mix(dry, wet, x, self.left.process(pool, x));
            }
        }
    }

    fn clear(&mut self) {
        self.pool.zero_allocated();
        self.left.reset();
        self.right.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{AUDIO_BLOCK_SIZE, REVERB_COMB_CHUNK};

    fn stereo(preset: ReverbPresetId) -> ReverbEngine {
        let mut r = ReverbEngine::new();
        r.set_preset(preset);
        r
    }

    fn mono(preset: ReverbPresetId) -> ReverbEngine {
        let cfg = ReverbConfig {
            stereo: false,
            ..ReverbConfig::default()
        };
        let mut r = ReverbEngine::with_config(cfg, preset).unwrap();
        r.init();
        r
    }

    /// Feed a stereo impulse, then `frames - 1` silent frames, block by block.
    /// Returns (peak over the run, peak over the last block).
    fn impulse_peaks<const P: usize>(r: &mut ReverbEngine<P>, frames: usize) -> (i32, i32) {
        let mut input = [0i16; AUDIO_BLOCK_SIZE];
        let mut output = [0i16; AUDIO_BLOCK_SIZE];
        input[0] = 32767;
        input[1] = 32767;

        let blocks = frames * 2 / AUDIO_BLOCK_SIZE;
        let mut peak = 0;
        let mut last = 0;
        for b in 0..blocks {
            r.process(&input, &mut output);
            input[0] = 0;
            input[1] = 0;
            // Skip the dry impulse itself
            let start = if b == 0 { 2 } else { 0 };
            last = output[start..].iter().map(|&s| (s as i32).abs()).max().unwrap();
            peak = peak.max(last);
        }
        (peak, last)
    }

    #[test]
    fn hall_pool_usage() {
        // Left: combs 1195 + 1408 + 2001 + 1636, allpasses 105 + 307
        // Right: the same plus 23 on each of the six filters
        assert_eq!(stereo(ReverbPresetId::Hall).memory_used(), 13442);
        assert_eq!(mono(ReverbPresetId::Hall).memory_used(), 6652);
    }

    #[test]
    fn every_preset_fits_the_pool() {
        for id in ReverbPresetId::ALL {
            let r = stereo(id);
            assert!(r.memory_used() <= REVERB_MEM_SIZE);
            assert!(r.left().comb_delays().iter().all(|&d| d > 2));
        }
    }

    #[test]
    fn room_combs_clamp_to_chunk() {
        let r = stereo(ReverbPresetId::Room);
        assert!(r
            .left()
            .comb_delays()
            .iter()
            .all(|&d| d == REVERB_COMB_CHUNK as usize));
    }

    #[test]
    fn right_channel_is_spread() {
        let r = stereo(ReverbPresetId::Stage);
        for (l, rr) in r.left().comb_delays().iter().zip(r.right().comb_delays().iter()) {
            assert_eq!(*rr, *l + 23);
        }
    }

    #[test]
    fn impulse_response_is_bounded_and_decays() {
        for id in ReverbPresetId::ALL {
            let mut r = stereo(id);
            // 10 000 frames for the stability window, then keep going for decay
            let (peak, _) = impulse_peaks(&mut r, 10_240);
            assert!(peak > 0, "{}: no reverb tail", id.name());
            assert!(peak <= 32767);
            let (_, last) = impulse_peaks(&mut stereo(id), 48_128);
            assert!(last < peak / 4, "{}: tail {} vs peak {}", id.name(), last, peak);
        }
    }

    #[test]
    fn first_sample_is_dry_only() {
        let mut r = stereo(ReverbPresetId::Hall);
        let mut out = [0i16; 2];
        r.process(&[10000, -10000], &mut out);
        // dry 1.0 → 32767, one LSB of Q15 scaling lost
        assert_eq!(out, [9999, -10000]);
    }

    #[test]
    fn mono_uses_left_channel_only() {
        let mut r = mono(ReverbPresetId::Stage);
        assert_eq!(r.right().comb_delays(), [2; NUM_COMBS]);
        let input = [1000i16; 7];
        let mut output = [0i16; 7];
        r.process(&input, &mut output);
        assert!(output.iter().all(|&s| s != 0));
    }

    #[test]
    fn pool_exhaustion_degrades_gracefully() {
        let mut r = ReverbEngine::<64>::with_config(ReverbConfig::default(), ReverbPresetId::Hall)
            .unwrap();
        r.init();
        assert_eq!(r.memory_used(), 0);
        assert!(r.left().comb_delays().iter().all(|&d| d == 2));

        let mut input = [0i16; AUDIO_BLOCK_SIZE];
        for (i, s) in input.iter_mut().enumerate() {
            *s = ((i as i32 * 7919) % 65536 - 32768) as i16;
        }
        let mut output = [0i16; AUDIO_BLOCK_SIZE];
        for _ in 0..20 {
            r.process(&input, &mut output);
        }
        // Every filter shares the scratch pair; the dry path still comes through
        assert!(output.iter().any(|&s| s != 0));
        assert_eq!(r.memory_used(), 0);
    }

    #[test]
    fn partial_exhaustion_keeps_the_filters_that_fit() {
        // Room for the left combs (6240) and the first left allpass (105)
        let mut r =
            ReverbEngine::<6400>::with_config(ReverbConfig::default(), ReverbPresetId::Hall)
                .unwrap();
        r.init();
        assert_eq!(r.left().comb_delays(), [1195, 1408, 2001, 1636]);
        assert_eq!(r.left().allpass_delays(), [105, 2]);
        assert_eq!(r.right().comb_delays(), [2; NUM_COMBS]);
        assert_eq!(r.right().allpass_delays(), [2; NUM_ALLPASSES]);
        assert_eq!(r.memory_used(), 6345);

        // The surviving left combs still ring; saturation keeps the rest in range
        let (peak, _) = impulse_peaks(&mut r, 10_240);
        assert!(peak > 0);
        assert!(peak <= 32767);
    }

    #[test]
    fn clear_zeroes_all_buffers() {
        let mut r = stereo(ReverbPresetId::Hall);
        let input = [5000i16; AUDIO_BLOCK_SIZE];
        let mut output = [0i16; AUDIO_BLOCK_SIZE];
        for _ in 0..8 {
            r.process(&input, &mut output);
        }
        assert!(!r.is_silent());
        r.clear();
        assert!(r.is_silent());
        // Allocation survives a clear
        assert_eq!(r.memory_used(), 13442);

        let silence = [0i16; AUDIO_BLOCK_SIZE];
        r.process(&silence, &mut output);
        assert!(output.iter().all(|&s| s == 0));
    }

    #[test]
    fn set_preset_reinitializes() {
        let mut r = stereo(ReverbPresetId::Hall);
        let used = r.memory_used();
        r.set_preset(ReverbPresetId::Stage);
        assert_eq!(r.preset(), ReverbPresetId::Stage);
        assert_ne!(r.memory_used(), used);
        assert!(r.is_silent());
    }

    #[test]
    fn oversized_spread_rejected() {
        let cfg = ReverbConfig {
            stereo: true,
            spread: 4000,
        };
        assert!(ReverbEngine::<64>::with_config(cfg, ReverbPresetId::Hall).is_err());
    }
}
