//! Effect selection word shared between foreground and interrupt.
//!
//! The foreground (button handler, serial command, ...) owns every lifecycle
//! call: it initializes the new effect, cleans up the old one and changes
//! presets on `&mut AudioEngine` while holding the application's lock on it.
//! It then publishes the effect word. The audio interrupt only reads that
//! word at the top of each block and dispatches to it. The store is
//! `Relaxed`: the word is independent of everything else and a change only
//! has to land within one block.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::controller::EffectKind;
use crate::engine::AudioEngine;

/// Effect the audio interrupt dispatches to.
pub struct SharedSelection {
    effect: AtomicU8,
}

impl SharedSelection {
    /// Loopback.
    pub const fn new() -> Self {
        SharedSelection {
            effect: AtomicU8::new(EffectKind::Loopback as u8),
        }
    }

    /// Foreground: run the lifecycle for `kind` on `engine`, then publish it.
    ///
    /// The new effect is initialized before its word becomes visible to the
    /// interrupt, so the handler never dispatches to unprepared state.
    pub fn select(&self, engine: &mut AudioEngine, kind: EffectKind) {
        engine.set_effect(kind);
        self.publish(kind);
    }

    /// Store the effect word without touching any engine state.
    pub fn publish(&self, kind: EffectKind) {
        self.effect.store(kind as u8, Ordering::Relaxed);
    }

    /// Interrupt side: the published effect. A corrupted word reads as
    /// loopback. Never logs.
    pub fn effect(&self) -> EffectKind {
        EffectKind::try_from(self.effect.load(Ordering::Relaxed)).unwrap_or_default()
    }
}

impl Default for SharedSelection {
    fn default() -> Self {
        Self::new()
    }
}
