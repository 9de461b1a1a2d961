//! Effect selection state machine.
//!
//! At most one effect is current at a time. The controller only tracks
//! flags; it returns a [`Transition`] describing which effect has to be
//! cleaned up and which has to be initialized, and the
//! [`AudioEngine`](crate::engine::AudioEngine) applies it to the effect
//! instances it owns.

use crate::error::ConfigError;

/// The closed set of selectable effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(u8)]
pub enum EffectKind {
    /// Input copied to output unchanged.
    #[default]
    Loopback = 0,
    Flanger = 1,
    Tremolo = 2,
    Reverb = 3,
}

impl EffectKind {
    pub const COUNT: usize = 4;

    pub const ALL: [EffectKind; Self::COUNT] = [
        EffectKind::Loopback,
        EffectKind::Flanger,
        EffectKind::Tremolo,
        EffectKind::Reverb,
    ];

    /// Map a raw selector, falling back to [`Loopback`](EffectKind::Loopback).
    pub fn from_index(index: u8) -> Self {
        Self::try_from(index).unwrap_or_else(|err| {
            log::warn!("{}, using LOOPBACK", err);
            EffectKind::Loopback
        })
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            EffectKind::Loopback => "LOOPBACK",
            EffectKind::Flanger => "FLANGER",
            EffectKind::Tremolo => "TREMOLO",
            EffectKind::Reverb => "REVERB",
        }
    }

    /// Next effect in selector order, wrapping back to loopback.
    pub const fn next(self) -> Self {
        match self {
            EffectKind::Loopback => EffectKind::Flanger,
            EffectKind::Flanger => EffectKind::Tremolo,
            EffectKind::Tremolo => EffectKind::Reverb,
            EffectKind::Reverb => EffectKind::Loopback,
        }
    }
}

impl TryFrom<u8> for EffectKind {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EffectKind::Loopback),
            1 => Ok(EffectKind::Flanger),
            2 => Ok(EffectKind::Tremolo),
            3 => Ok(EffectKind::Reverb),
            other => Err(ConfigError::UnknownEffect(other)),
        }
    }
}

/// Work the owner of the effects must carry out after a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// Effect whose buffers must be zeroed.
    pub cleanup: Option<EffectKind>,
    /// Effect that must be initialized before its first block.
    pub init: Option<EffectKind>,
}

/// Per-effect lifecycle flags plus the pitch overlay switch.
#[derive(Debug, Clone)]
pub struct EffectController {
    current: EffectKind,
    initialized: [bool; EffectKind::COUNT],
    active: [bool; EffectKind::COUNT],
    pitch_shift_active: bool,
}

impl EffectController {
    /// Loopback selected, initialized and active; everything else untouched.
    pub const fn new() -> Self {
        let mut initialized = [false; EffectKind::COUNT];
        let mut active = [false; EffectKind::COUNT];
        initialized[EffectKind::Loopback.index()] = true;
        active[EffectKind::Loopback.index()] = true;
        EffectController {
            current: EffectKind::Loopback,
            initialized,
            active,
            pitch_shift_active: false,
        }
    }

    pub fn current(&self) -> EffectKind {
        self.current
    }

    pub fn is_initialized(&self, kind: EffectKind) -> bool {
        self.initialized[kind.index()]
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.active[kind.index()]
    }

    /// Record that `kind` has been initialized outside of [`set_effect`](Self::set_effect).
    pub fn mark_initialized(&mut self, kind: EffectKind) {
        self.initialized[kind.index()] = true;
    }

    /// Make `kind` current.
    ///
    /// The previous effect is cleaned up if it differs and isn't loopback;
    /// `kind` is initialized on first use only.
    pub fn set_effect(&mut self, kind: EffectKind) -> Transition {
        let mut transition = Transition::default();
        let old = self.current;

        if old != kind && old != EffectKind::Loopback {
            self.cleanup_effect(old);
            transition.cleanup = Some(old);
        }

        if !self.initialized[kind.index()] {
            self.initialized[kind.index()] = true;
            transition.init = Some(kind);
        }

        self.current = kind;
        self.active[kind.index()] = true;
        transition
    }

    /// Mark `kind` inactive. The caller zeroes its buffers.
    pub fn cleanup_effect(&mut self, kind: EffectKind) {
        self.active[kind.index()] = false;
    }

    /// Turn the pitch overlay on or off. Returns `true` when it went from off
    /// to on and the shifter has to be re-initialized; any target frequency
    /// must be applied after that.
    pub fn set_pitch_shift_enabled(&mut self, enabled: bool) -> bool {
        let needs_init = enabled && !self.pitch_shift_active;
        self.pitch_shift_active = enabled;
        needs_init
    }

    pub fn is_pitch_shift_enabled(&self) -> bool {
        self.pitch_shift_active
    }
}

impl Default for EffectController {
    fn default() -> Self {
        Self::new()
    }
}
