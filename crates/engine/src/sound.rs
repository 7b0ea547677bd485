//! Sound manager - mute state in front of a playback backend
//!
//! The engine emits cues and music start/stop requests without knowing whether anything is
//! audible. [`SoundManager`] is the [`AudioSink`] the engine talks to: it tracks the two mute
//! toggles and forwards to a [`SoundOutput`] only what should actually be heard.

use blockfall_core::AudioSink;
use blockfall_types::SoundCue;

/// Volume for sound effects (0.0 - 1.0).
pub const EFFECT_VOLUME: f32 = 0.5;

/// Volume for background music (0.0 - 1.0).
pub const MUSIC_VOLUME: f32 = 0.3;

/// A playback backend. Calls are fire-and-forget.
pub trait SoundOutput {
    fn play_cue(&mut self, cue: SoundCue, volume: f32);
    /// Start the looping theme from the top.
    fn start_music(&mut self, volume: f32);
    /// Stop and rewind the theme.
    fn stop_music(&mut self);
}

/// Backend that produces no sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl SoundOutput for NullOutput {
    fn play_cue(&mut self, _cue: SoundCue, _volume: f32) {}
    fn start_music(&mut self, _volume: f32) {}
    fn stop_music(&mut self) {}
}

#[derive(Debug, Clone, Default)]
pub struct SoundManager<O> {
    output: O,
    music_muted: bool,
    sound_muted: bool,
}

impl<O: SoundOutput> SoundManager<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            music_muted: false,
            sound_muted: false,
        }
    }

    /// Start with the given mute flags.
    pub fn with_mutes(output: O, music_muted: bool, sound_muted: bool) -> Self {
        Self {
            output,
            music_muted,
            sound_muted,
        }
    }

    /// Flip music mute. Muting stops the theme, unmuting starts it.
    ///
    /// Returns the new muted state.
    pub fn toggle_music(&mut self) -> bool {
        self.music_muted = !self.music_muted;
        if self.music_muted {
            AudioSink::stop_music(self);
        } else {
            AudioSink::start_music(self);
        }
        self.music_muted
    }

    /// Flip effects mute. Returns the new muted state.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_muted = !self.sound_muted;
        self.sound_muted
    }

    pub fn is_music_muted(&self) -> bool {
        self.music_muted
    }

    pub fn is_sound_muted(&self) -> bool {
        self.sound_muted
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

impl<O: SoundOutput> AudioSink for SoundManager<O> {
    fn play_sound(&mut self, cue: SoundCue) {
        if !self.sound_muted {
            self.output.play_cue(cue, EFFECT_VOLUME);
        }
    }

    fn start_music(&mut self) {
        if !self.music_muted {
            self.output.start_music(MUSIC_VOLUME);
        }
    }

    // Stopping is never gated: a muted theme must not keep playing.
    fn stop_music(&mut self) {
        self.output.stop_music();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Tape {
        cues: Vec<SoundCue>,
        playing: bool,
        starts: u32,
    }

    impl SoundOutput for Tape {
        fn play_cue(&mut self, cue: SoundCue, volume: f32) {
            assert_eq!(volume, EFFECT_VOLUME);
            self.cues.push(cue);
        }
        fn start_music(&mut self, volume: f32) {
            assert_eq!(volume, MUSIC_VOLUME);
            self.playing = true;
            self.starts += 1;
        }
        fn stop_music(&mut self) {
            self.playing = false;
        }
    }

    #[test]
    fn cues_pass_through_when_unmuted() {
        let mut sm = SoundManager::new(Tape::default());
        sm.play_sound(SoundCue::Move);
        sm.play_sound(SoundCue::Clear);
        assert_eq!(sm.output().cues, vec![SoundCue::Move, SoundCue::Clear]);
    }

    #[test]
    fn toggle_sound_suppresses_cues() {
        let mut sm = SoundManager::new(Tape::default());
        assert!(sm.toggle_sound());
        sm.play_sound(SoundCue::Drop);
        assert!(sm.output().cues.is_empty());

        assert!(!sm.toggle_sound());
        sm.play_sound(SoundCue::Drop);
        assert_eq!(sm.output().cues, vec![SoundCue::Drop]);
    }

    #[test]
    fn toggle_music_stops_and_restarts() {
        let mut sm = SoundManager::new(Tape::default());
        sm.start_music();
        assert!(sm.output().playing);

        assert!(sm.toggle_music());
        assert!(!sm.output().playing);

        // Muted: start requests are dropped.
        sm.start_music();
        assert!(!sm.output().playing);

        assert!(!sm.toggle_music());
        assert!(sm.output().playing);
        assert_eq!(sm.output().starts, 2);
    }

    #[test]
    fn stop_is_forwarded_even_when_muted() {
        let mut sm = SoundManager::with_mutes(Tape::default(), true, true);
        sm.output_mut().playing = true;
        sm.stop_music();
        assert!(!sm.output().playing);
    }
}
