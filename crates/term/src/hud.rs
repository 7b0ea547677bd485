//! HUD state - the terminal's score display collaborator
//!
//! The engine pushes stats, the game-over reveal, the level-up highlight and the mute state
//! here; [`GameView`](crate::GameView) reads it when drawing the side panel and overlays.

use blockfall_core::ScoreDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HudState {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Final score while the game-over reveal is shown.
    pub final_score: Option<u32>,
    pub level_highlight: bool,
    pub music_muted: bool,
    pub sound_muted: bool,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            final_score: None,
            level_highlight: false,
            music_muted: false,
            sound_muted: false,
        }
    }
}

impl ScoreDisplay for HudState {
    fn show_stats(&mut self, score: u32, level: u32, lines: u32) {
        self.score = score;
        self.level = level;
        self.lines = lines;
    }

    fn show_game_over(&mut self, final_score: u32) {
        self.final_score = Some(final_score);
    }

    fn hide_game_over(&mut self) {
        self.final_score = None;
    }

    fn set_level_highlight(&mut self, on: bool) {
        self.level_highlight = on;
    }

    fn show_audio_state(&mut self, music_muted: bool, sound_muted: bool) {
        self.music_muted = music_muted;
        self.sound_muted = sound_muted;
    }
}
