//! Collaborator traits - side effects the engine calls out to
//!
//! The engine never talks to a terminal or a speaker directly. It is generic over an
//! [`AudioSink`] and a [`ScoreDisplay`], and the front-end supplies real implementations.
//! The null implementations are used by headless games, benches and most tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::SoundCue;

/// Receives sound cues and music start/stop requests. Fire-and-forget.
pub trait AudioSink {
    fn play_sound(&mut self, cue: SoundCue);
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

/// Receives score/level/lines updates and the game-over reveal.
pub trait ScoreDisplay {
    fn show_stats(&mut self, score: u32, level: u32, lines: u32);
    fn show_game_over(&mut self, final_score: u32);
    fn hide_game_over(&mut self);
    /// Level-up pulse marker on the level readout.
    fn set_level_highlight(&mut self, on: bool);
    /// Mute state readout. Hosts without audio controls can ignore it.
    fn show_audio_state(&mut self, _music_muted: bool, _sound_muted: bool) {}
}

/// Audio sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound(&mut self, _cue: SoundCue) {}
    fn start_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Display that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl ScoreDisplay for NullDisplay {
    fn show_stats(&mut self, _score: u32, _level: u32, _lines: u32) {}
    fn show_game_over(&mut self, _final_score: u32) {}
    fn hide_game_over(&mut self) {}
    fn set_level_highlight(&mut self, _on: bool) {}
}

impl<T: AudioSink + ?Sized> AudioSink for &mut T {
    fn play_sound(&mut self, cue: SoundCue) {
        (**self).play_sound(cue)
    }

    fn start_music(&mut self) {
        (**self).start_music()
    }

    fn stop_music(&mut self) {
        (**self).stop_music()
    }
}

impl<T: ScoreDisplay + ?Sized> ScoreDisplay for &mut T {
    fn show_stats(&mut self, score: u32, level: u32, lines: u32) {
        (**self).show_stats(score, level, lines)
    }

    fn show_game_over(&mut self, final_score: u32) {
        (**self).show_game_over(final_score)
    }

    fn hide_game_over(&mut self) {
        (**self).hide_game_over()
    }

    fn set_level_highlight(&mut self, on: bool) {
        (**self).set_level_highlight(on)
    }

    fn show_audio_state(&mut self, music_muted: bool, sound_muted: bool) {
        (**self).show_audio_state(music_muted, sound_muted)
    }
}

/// Shared display: the host keeps a clone to read what the engine last pushed.
impl<T: ScoreDisplay> ScoreDisplay for Rc<RefCell<T>> {
    fn show_stats(&mut self, score: u32, level: u32, lines: u32) {
        self.borrow_mut().show_stats(score, level, lines)
    }

    fn show_game_over(&mut self, final_score: u32) {
        self.borrow_mut().show_game_over(final_score)
    }

    fn hide_game_over(&mut self) {
        self.borrow_mut().hide_game_over()
    }

    fn set_level_highlight(&mut self, on: bool) {
        self.borrow_mut().set_level_highlight(on)
    }

    fn show_audio_state(&mut self, music_muted: bool, sound_muted: bool) {
        self.borrow_mut().show_audio_state(music_muted, sound_muted)
    }
}
