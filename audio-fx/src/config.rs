//! Runtime configuration for the effects.
//!
//! Every struct's `Default` carries the reference tuning for a 48 kHz
//! codec. Float fields are converted to fixed point when the effect is
//! constructed, never in the audio path.

use crate::effects::flanger::FLANGER_DELAY_SIZE;
use crate::effects::reverb::ReverbPresetId;
use crate::error::{check_frequency, ConfigError};

/// Flanger tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlangerConfig {
    /// Centre delay `L0` in samples.
    pub delay_center: u16,
    /// LFO sweep amplitude `A` in samples (delay spans `L0 ± A`).
    pub delay_depth: u16,
    /// Feed-forward gain of the delayed signal (Q15).
    pub gain: i16,
    /// LFO rate in Hz.
    pub lfo_hz: f32,
}

impl Default for FlangerConfig {
    fn default() -> Self {
        // 1 ms .. 5 ms sweep at 48 kHz, 0.7 wet gain
        FlangerConfig {
            delay_center: 144,
            delay_depth: 96,
            gain: 22938,
            lfo_hz: 0.5,
        }
    }
}

impl FlangerConfig {
    /// Longest delay the sweep can reach, in samples.
    pub fn max_delay(&self) -> u32 {
        self.delay_center as u32 + self.delay_depth as u32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_frequency(self.lfo_hz)?;
        // The interpolated read touches one sample past the integer delay
        let capacity = FLANGER_DELAY_SIZE as u32;
        if self.max_delay() + 2 > capacity {
            return Err(ConfigError::DelayOutOfRange {
                requested: self.max_delay(),
                capacity,
            });
        }
        Ok(())
    }
}

/// Tremolo tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TremoloConfig {
    /// LFO rate in Hz.
    pub rate_hz: f32,
    /// Modulation depth, Q15 (`0` = none, `32767` = full).
    pub depth: i16,
}

impl Default for TremoloConfig {
    fn default() -> Self {
        TremoloConfig {
            rate_hz: 3.0,
            depth: 26214,
        }
    }
}

impl TremoloConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_frequency(self.rate_hz)?;
        if self.depth < 0 {
            return Err(ConfigError::InvalidDepth(self.depth as i32));
        }
        Ok(())
    }
}

/// Pitch shifter tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchShiftConfig {
    /// Frequency that maps to a 1.0 pitch ratio (no shift).
    pub root_hz: f32,
}

impl Default for PitchShiftConfig {
    fn default() -> Self {
        // C4
        PitchShiftConfig { root_hz: 261.63 }
    }
}

impl PitchShiftConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_frequency(self.root_hz)
    }
}

/// Reverb channel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverbConfig {
    /// Process interleaved `L, R` pairs with independent channel networks.
    pub stereo: bool,
    /// Samples added to every right-channel filter delay.
    pub spread: u16,
}

impl Default for ReverbConfig {
    fn default() -> Self {
        ReverbConfig {
            stereo: true,
            spread: crate::constants::REVERB_SPREAD,
        }
    }
}

impl ReverbConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacity = crate::constants::REVERB_AP_CHUNK as u32;
        if self.spread as u32 >= capacity {
            return Err(ConfigError::DelayOutOfRange {
                requested: self.spread as u32,
                capacity,
            });
        }
        Ok(())
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineConfig {
    pub flanger: FlangerConfig,
    pub tremolo: TremoloConfig,
    pub pitch_shift: PitchShiftConfig,
    pub reverb: ReverbConfig,
    /// Preset loaded the first time the reverb is initialized.
    pub reverb_preset: ReverbPresetId,
}

impl EngineConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.flanger.validate()?;
        self.tremolo.validate()?;
        self.pitch_shift.validate()?;
        self.reverb.validate()
    }
}
