//! Configuration-time errors.
//!
//! The audio path itself never fails: it saturates or degrades. These errors
//! only come out of constructors, `TryFrom` conversions and `validate()`.

/// Rejected configuration or selector value.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown effect selector {0}")]
    UnknownEffect(u8),

    #[error("unknown reverb preset {0}")]
    UnknownPreset(u8),

    #[error("{name} gain {gain} would make the feedback loop unstable (|gain| must be < 1.0)")]
    UnstableGain { name: &'static str, gain: f32 },

    #[error("delay of {requested} samples does not fit a {capacity}-sample buffer")]
    DelayOutOfRange { requested: u32, capacity: u32 },

    #[error("frequency {0} Hz is not a positive finite value")]
    InvalidFrequency(f32),

    #[error("depth {0} is outside the Q15 range 0..=32767")]
    InvalidDepth(i32),
}

/// Check that `hz` is finite and strictly positive.
pub(crate) fn check_frequency(hz: f32) -> Result<(), ConfigError> {
    if hz.is_finite() && hz > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFrequency(hz))
    }
}

/// Check that a feedback gain keeps its pole inside the unit circle.
pub(crate) fn check_gain(name: &'static str, gain: f32) -> Result<(), ConfigError> {
    if gain.is_finite() && gain.abs() < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::UnstableGain { name, gain })
    }
}
