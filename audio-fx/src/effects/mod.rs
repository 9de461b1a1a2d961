//! Audio effects.
//!
//! | Module          | Effect                                           |
//! |-----------------|--------------------------------------------------|
//! | `flanger`       | LFO-swept short delay, feed-forward              |
//! | `tremolo`       | LFO amplitude modulation                         |
//! | `reverb`        | Schroeder comb/allpass network, mono or stereo   |
//! | `pitch_shift`   | Two-grain delay-line pitch shifter               |
//!
//! Every effect implements [`Effect`](crate::effect::Effect).

pub mod flanger;
pub mod pitch_shift;
pub mod reverb;
pub mod tremolo;

pub use flanger::Flanger;
pub use pitch_shift::PitchShifter;
pub use reverb::{ReverbEngine, ReverbPresetId};
pub use tremolo::Tremolo;
