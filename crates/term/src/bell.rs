//! Terminal bell as a sound backend.
//!
//! Terminals have one sound. It rings for the cues worth interrupting for; everything else,
//! music included, is silent.

use std::io::{self, Write};

use blockfall_engine::SoundOutput;
use blockfall_types::SoundCue;

const BEL: &[u8] = b"\x07";

pub struct BellOutput<W: Write = io::Stdout> {
    out: W,
    enabled: bool,
}

impl BellOutput<io::Stdout> {
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> BellOutput<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

fn rings(cue: SoundCue) -> bool {
    matches!(cue, SoundCue::Clear | SoundCue::LevelUp | SoundCue::GameOver)
}

impl<W: Write> SoundOutput for BellOutput<W> {
    fn play_cue(&mut self, cue: SoundCue, volume: f32) {
        if !self.enabled || volume <= 0.0 || !rings(cue) {
            return;
        }
        // Playback is fire-and-forget; a failed bell is not worth surfacing.
        let _ = self.out.write_all(BEL).and_then(|()| self.out.flush());
    }

    fn start_music(&mut self, _volume: f32) {}

    fn stop_music(&mut self) {}
}
