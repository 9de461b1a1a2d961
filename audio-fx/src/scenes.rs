//! Single-button performance sequence.
//!
//! | Step | Scene                          |
//! |------|--------------------------------|
//! | 0    | Loopback                       |
//! | 1    | Reverb, Hall                   |
//! | 2    | Reverb, Room                   |
//! | 3-6  | Reverb, Stage + pitch B4/D4/F4/F#4 |
//! | 7    | Flanger                        |
//! | 8    | Tremolo                        |
//!
//! Every press advances one step and wraps after the last.

use crate::controller::EffectKind;
use crate::effects::ReverbPresetId;
use crate::engine::AudioEngine;
use crate::error::ConfigError;
use crate::io::SharedSelection;

/// Equal-tempered frequency of a MIDI note, A4 (69) = 440 Hz.
pub fn note_frequency(midi_note: u8) -> f32 {
    440.0 * libm::powf(2.0, (midi_note as f32 - 69.0) / 12.0)
}

/// One step of the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub name: &'static str,
    pub effect: EffectKind,
    /// Preset loaded before the effect is selected.
    pub preset: Option<ReverbPresetId>,
    /// Pitch overlay target, `None` turns the overlay off.
    pub pitch_hz: Option<f32>,
}

impl Scene {
    const fn plain(name: &'static str, effect: EffectKind) -> Self {
        Scene {
            name,
            effect,
            preset: None,
            pitch_hz: None,
        }
    }

    const fn reverb(name: &'static str, preset: ReverbPresetId, pitch_hz: Option<f32>) -> Self {
        Scene {
            name,
            effect: EffectKind::Reverb,
            preset: Some(preset),
            pitch_hz,
        }
    }

    /// Foreground: bring `engine` to this scene, then publish its effect
    /// for the audio interrupt.
    ///
    /// A preset that is already loaded is left alone so its tail keeps
    /// ringing across steps.
    pub fn apply(
        &self,
        engine: &mut AudioEngine,
        selection: &SharedSelection,
    ) -> Result<(), ConfigError> {
        // Enabling resets the shifter, so it goes before the frequency
        engine.set_pitch_shift_enabled(self.pitch_hz.is_some());
        if let Some(hz) = self.pitch_hz {
            engine.set_pitch_frequency(hz)?;
        }
        if let Some(preset) = self.preset {
            if preset != engine.reverb_preset()
                || !engine.controller().is_initialized(EffectKind::Reverb)
            {
                engine.set_reverb_preset(preset);
            }
        }
        selection.select(engine, self.effect);
        log::debug!("scene: {}", self.name);
        Ok(())
    }
}

/// The full sequence.
pub static SCENES: [Scene; 9] = [
    Scene::plain("LOOPBACK", EffectKind::Loopback),
    Scene::reverb("REVERB HALL", ReverbPresetId::Hall, None),
    Scene::reverb("REVERB ROOM", ReverbPresetId::Room, None),
    Scene::reverb("STAGE + B4", ReverbPresetId::Stage, Some(493.88)),
    Scene::reverb("STAGE + D4", ReverbPresetId::Stage, Some(293.66)),
    Scene::reverb("STAGE + F4", ReverbPresetId::Stage, Some(349.23)),
    Scene::reverb("STAGE + F#4", ReverbPresetId::Stage, Some(369.99)),
    Scene::plain("FLANGER", EffectKind::Flanger),
    Scene::plain("TREMOLO", EffectKind::Tremolo),
];

/// Position in [`SCENES`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneCycler {
    step: usize,
}

impl SceneCycler {
    /// At the first scene.
    pub const fn new() -> Self {
        SceneCycler { step: 0 }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Scene at the current step.
    pub fn current(&self) -> &'static Scene {
        &SCENES[self.step]
    }

    /// Move to the next scene and return it.
    pub fn advance(&mut self) -> &'static Scene {
        self.step = (self.step + 1) % SCENES.len();
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn note_frequencies() {
        assert_abs_diff_eq!(note_frequency(69), 440.0, epsilon = 1e-3);
        assert_abs_diff_eq!(note_frequency(60), 261.63, epsilon = 0.01);
        assert_abs_diff_eq!(note_frequency(81), 880.0, epsilon = 1e-2);
    }

    #[test]
    fn stage_scenes_use_note_pitches() {
        let notes = [71u8, 62, 65, 66];
        for (scene, note) in SCENES[3..7].iter().zip(notes) {
            let hz = scene.pitch_hz.unwrap();
            assert_abs_diff_eq!(hz, note_frequency(note), epsilon = 0.01);
        }
    }

    #[test]
    fn cycler_wraps() {
        let mut cycler = SceneCycler::new();
        assert_eq!(cycler.current().effect, EffectKind::Loopback);
        for _ in 0..SCENES.len() - 1 {
            cycler.advance();
        }
        assert_eq!(cycler.current().name, "TREMOLO");
        assert_eq!(cycler.advance().name, "LOOPBACK");
        assert_eq!(cycler.step(), 0);
    }

    #[test]
    fn full_sequence_on_engine() {
        let mut engine = AudioEngine::new();
        let selection = SharedSelection::new();
        let mut cycler = SceneCycler::new();
        for _ in 0..SCENES.len() + 1 {
            let scene = cycler.advance();
            scene.apply(&mut engine, &selection).unwrap();
            assert_eq!(engine.current_effect(), scene.effect);
            assert_eq!(selection.effect(), scene.effect);
            assert_eq!(engine.is_pitch_shift_enabled(), scene.pitch_hz.is_some());
            if let Some(preset) = scene.preset {
                assert_eq!(engine.reverb_preset(), preset);
            }
            if let Some(hz) = scene.pitch_hz {
                assert_eq!(engine.pitch_frequency(), hz);
                assert_ne!(engine.pitch_shifter().delay_rate(), 0);
            }
        }
    }

    #[test]
    fn stage_steps_keep_the_reverb_tail() {
        let mut engine = AudioEngine::new();
        let selection = SharedSelection::new();
        let input = [4000i16; 512];
        let mut output = [0i16; 512];

        SCENES[3].apply(&mut engine, &selection).unwrap();
        let used = engine.reverb().memory_used();
        for _ in 0..4 {
            engine.process_block(selection.effect(), &input, &mut output);
        }
        assert!(!engine.reverb().is_silent());

        for scene in &SCENES[4..7] {
            scene.apply(&mut engine, &selection).unwrap();
            assert!(!engine.reverb().is_silent(), "{}", scene.name);
            assert_eq!(engine.reverb().memory_used(), used);
        }
    }

    #[test]
    fn preset_change_rebuilds_from_silence() {
        let mut engine = AudioEngine::new();
        let selection = SharedSelection::new();
        let input = [4000i16; 512];
        let mut output = [0i16; 512];

        SCENES[1].apply(&mut engine, &selection).unwrap();
        let hall = engine.reverb().memory_used();
        engine.process_block(selection.effect(), &input, &mut output);
        assert!(!engine.reverb().is_silent());

        SCENES[2].apply(&mut engine, &selection).unwrap();
        assert!(engine.reverb().is_silent());
        assert_ne!(engine.reverb().memory_used(), hall);
    }
}
