//! # audio-fx
//!
//! A `no_std`, allocation-free, fixed-point audio effects engine for
//! single-core DSP targets driven by a ping-pong DMA double buffer. It
//! provides a flanger, a tremolo, a Schroeder reverb (mono or stereo, three
//! presets) and a granular pitch shifter that can be layered on top of any
//! of them.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Math | [`dsp`] | Q15/Q31 saturating arithmetic, delay lines, DDS oscillators |
//! | Memory | [`memory`] | Bump-allocated sample pool for the reverb |
//! | Trait | [`effect`] | `Effect` trait: `init` / `process` / `clear` |
//! | Effects | [`effects`] | Flanger, tremolo, reverb, pitch shifter |
//! | Control | [`controller`] | Effect selection and lifecycle state machine |
//! | Context | [`engine`] | `AudioEngine`, owner of all state |
//! | I/O | [`io`] | Ping-pong scheduler and lock-free selection |
//! | Sequencing | [`scenes`] | Single-button performance sequence |
//!
//! ## Quick start
//!
//! ```ignore
//! use audio_fx::controller::EffectKind;
//! use audio_fx::effects::ReverbPresetId;
//! use audio_fx::engine::AudioEngine;
//! use audio_fx::io::{BlockScheduler, SharedSelection};
//!
//! static SELECTION: SharedSelection = SharedSelection::new();
//!
//! let mut engine = AudioEngine::new();
//! let mut scheduler = BlockScheduler::new();
//!
//! // Foreground, holding the engine lock: stereo stage reverb with an
//! // octave-up overlay. Enable the overlay before setting its frequency.
//! engine.set_reverb_preset(ReverbPresetId::Stage);
//! engine.set_pitch_shift_enabled(true);
//! engine.set_pitch_frequency(523.26)?;
//! SELECTION.select(&mut engine, EffectKind::Reverb);
//!
//! // DMA half-transfer / transfer-complete interrupt: dispatch only
//! scheduler.on_block_ready(&mut engine, &SELECTION);
//! ```
//!
//! ## Audio parameters
//!
//! - **Sample rate:** 48 000 Hz ([`constants::AUDIO_SAMPLE_RATE`])
//! - **Double buffer:** 1024 samples, two halves of 512
//!   ([`constants::AUDIO_BUFFER_SIZE`], [`constants::AUDIO_BLOCK_SIZE`])
//! - **Sample format:** `i16` (Q15), stereo interleaved `L, R`
//! - **Reverb pool:** 32 000 samples ([`constants::REVERB_MEM_SIZE`])
//!
//! ## Logging
//!
//! Initialization, preset and selection changes are reported through the
//! [`log`] facade. Nothing is logged from the per-sample path. The crate
//! installs no logger.

#![no_std]

pub mod config;
pub mod constants;
pub mod controller;
pub mod dsp;
pub mod effect;
pub mod effects;
pub mod engine;
pub mod error;
pub mod io;
pub mod memory;
pub mod scenes;

pub use config::EngineConfig;
pub use controller::EffectKind;
pub use effect::Effect;
pub use engine::AudioEngine;
pub use error::ConfigError;
