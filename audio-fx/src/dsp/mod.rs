//! Fixed-point DSP building blocks shared by the effects.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`intrinsics`] | ARM DSP instruction wrappers (`SSAT`, `QADD`, `SMMUL`) |
//! | [`fixed`] | Q15/Q31 saturating arithmetic and init-time float conversion |
//! | [`delay_line`] | Power-of-two circular sample buffer |
//! | [`phase`] | 32-bit DDS phase accumulator |
//! | [`wavetable`] | LFO sine table and triangular grain window |

pub mod intrinsics;
pub mod fixed;
pub mod delay_line;
pub mod phase;
pub mod wavetable;

pub use delay_line::DelayLine;
pub use phase::PhaseAccumulator;
pub use wavetable::Wavetable;
