//! Reverb preset table.

use crate::error::{check_gain, ConfigError};

/// Comb filters per channel.
pub const NUM_COMBS: usize = 4;
/// Allpass filters per channel.
pub const NUM_ALLPASSES: usize = 2;

/// One immutable preset. Delays are in milliseconds, gains in linear units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbPreset {
    pub comb_ms: [f32; NUM_COMBS],
    pub allpass_ms: [f32; NUM_ALLPASSES],
    pub comb_gains: [f32; NUM_COMBS],
    pub allpass_gains: [f32; NUM_ALLPASSES],
    pub wet: f32,
    pub dry: f32,
    /// One-pole low-pass shift in the comb feedback path, `0` disables it.
    pub damp_shift: u8,
}

impl ReverbPreset {
    /// Check that every feedback gain is strictly below unity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &g in self.comb_gains.iter() {
            check_gain("comb", g)?;
        }
        for &g in self.allpass_gains.iter() {
            check_gain("allpass", g)?;
        }
        Ok(())
    }
}

static PRESETS: [ReverbPreset; 3] = [
    // Hall: prime-ish comb lengths, long tail, full dry
    ReverbPreset {
        comb_ms: [24.90, 29.35, 41.70, 34.10],
        allpass_ms: [2.20, 6.40],
        comb_gains: [0.70, 0.78, 0.73, 0.75],
        allpass_gains: [0.60, 0.58],
        wet: 0.38,
        dry: 1.00,
        damp_shift: 0,
    },
    // Room: comb lengths exceed the per-filter chunk and end up clamped
    ReverbPreset {
        comb_ms: [200.0, 300.0, 400.0, 500.0],
        allpass_ms: [7.06, 6.46],
        comb_gains: [0.50, 0.48, 0.56, 0.44],
        allpass_gains: [0.716, 0.613],
        wet: 0.20,
        dry: 0.80,
        damp_shift: 0,
    },
    // Stage: brighter early reflections, damped tail
    ReverbPreset {
        comb_ms: [46.27, 39.96, 28.03, 51.85],
        allpass_ms: [3.50, 1.20],
        comb_gains: [0.758, 0.854, 0.796, 0.825],
        allpass_gains: [0.70, 0.70],
        wet: 0.50,
        dry: 1.00,
        damp_shift: 4,
    },
];

/// Preset selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ReverbPresetId {
    #[default]
    Hall = 0,
    Room = 1,
    Stage = 2,
}

impl ReverbPresetId {
    /// Every preset, in selector order.
    pub const ALL: [ReverbPresetId; 3] =
        [ReverbPresetId::Hall, ReverbPresetId::Room, ReverbPresetId::Stage];

    /// Map a raw selector, falling back to [`Hall`](ReverbPresetId::Hall).
    pub fn from_index(index: u8) -> Self {
        Self::try_from(index).unwrap_or_else(|err| {
            log::warn!("{}, using HALL", err);
            ReverbPresetId::Hall
        })
    }

    /// The preset's parameters.
    pub fn params(self) -> &'static ReverbPreset {
        &PRESETS[self as usize]
    }

    /// Display name, as shown on the front panel.
    pub fn name(self) -> &'static str {
        match self {
            ReverbPresetId::Hall => "HALL",
            ReverbPresetId::Room => "ROOM",
            ReverbPresetId::Stage => "STAGE",
        }
    }

    /// The following preset, wrapping after the last.
    pub fn next(self) -> Self {
        match self {
            ReverbPresetId::Hall => ReverbPresetId::Room,
            ReverbPresetId::Room => ReverbPresetId::Stage,
            ReverbPresetId::Stage => ReverbPresetId::Hall,
        }
    }
}

impl TryFrom<u8> for ReverbPresetId {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ReverbPresetId::Hall),
            1 => Ok(ReverbPresetId::Room),
            2 => Ok(ReverbPresetId::Stage),
            other => Err(ConfigError::UnknownPreset(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_stable() {
        for id in ReverbPresetId::ALL {
            assert_eq!(id.params().validate(), Ok(()), "{}", id.name());
        }
    }

    #[test]
    fn unknown_index_falls_back_to_hall() {
        assert_eq!(ReverbPresetId::from_index(2), ReverbPresetId::Stage);
        assert_eq!(ReverbPresetId::from_index(3), ReverbPresetId::Hall);
        assert_eq!(ReverbPresetId::from_index(255), ReverbPresetId::Hall);
        assert_eq!(
            ReverbPresetId::try_from(7),
            Err(ConfigError::UnknownPreset(7))
        );
    }

    #[test]
    fn next_cycles_through_all() {
        let mut id = ReverbPresetId::default();
        assert_eq!(id, ReverbPresetId::Hall);
        for expected in [ReverbPresetId::Room, ReverbPresetId::Stage, ReverbPresetId::Hall] {
            id = id.next();
            assert_eq!(id, expected);
        }
    }

    #[test]
    fn unstable_preset_rejected() {
        let mut p = *ReverbPresetId::Hall.params();
        p.comb_gains[2] = 1.0;
        assert_eq!(
            p.validate(),
            Err(ConfigError::UnstableGain { name: "comb", gain: 1.0 })
        );
    }
}
