//! Session - one running game plus everything the host wires around it
//!
//! Owns the engine (with a [`SoundManager`] as its audio collaborator), the loop driver and
//! the optional event log. Audio mute toggles are handled here because they belong to the
//! sound manager, not to the game rules.

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::Result;

use blockfall_core::{FrameOutcome, GameSnapshot, GameState, ScoreDisplay};
use blockfall_types::GameAction;

use crate::driver::LoopDriver;
use crate::event_log::{EventLog, EventRecord};
use crate::sound::{SoundManager, SoundOutput};

pub struct Session<O, D, W = BufWriter<File>>
where
    O: SoundOutput,
    D: ScoreDisplay,
    W: Write,
{
    game: GameState<SoundManager<O>, D>,
    driver: LoopDriver,
    log: Option<EventLog<W>>,
    seed: u32,
}

impl<O, D, W> Session<O, D, W>
where
    O: SoundOutput,
    D: ScoreDisplay,
    W: Write,
{
    pub fn new(
        seed: u32,
        frame_ms: u32,
        sound: SoundManager<O>,
        display: D,
        log: Option<EventLog<W>>,
    ) -> Self {
        let mut game = GameState::with_collaborators(seed, sound, display);
        let (music, effects) = (
            game.audio().is_music_muted(),
            game.audio().is_sound_muted(),
        );
        game.display_mut().show_audio_state(music, effects);
        Self {
            game,
            driver: LoopDriver::new(frame_ms),
            log,
            seed,
        }
    }

    /// Start the first game.
    pub fn start(&mut self, now: f64) -> Result<()> {
        self.record(EventRecord::SessionStart {
            t_ms: now,
            seed: self.seed,
        })?;
        self.game.start(now);
        Ok(())
    }

    /// Apply one input. Returns true if anything changed.
    pub fn handle_action(&mut self, action: GameAction, now: f64) -> Result<bool> {
        match action {
            GameAction::ToggleMusic => {
                self.game.audio_mut().toggle_music();
                self.refresh_audio_state();
                Ok(true)
            }
            GameAction::ToggleSound => {
                self.game.audio_mut().toggle_sound();
                self.refresh_audio_state();
                Ok(true)
            }
            GameAction::Restart => {
                self.record(EventRecord::Restart { t_ms: now })?;
                Ok(self.game.handle_action(action, now))
            }
            _ => Ok(self.game.handle_action(action, now)),
        }
    }

    /// One host loop iteration: fire due deferred tasks, then run a frame if one is due.
    pub fn tick<F>(&mut self, now: f64, render: F) -> Result<FrameOutcome>
    where
        F: FnOnce(&GameSnapshot) -> Result<()>,
    {
        self.game.poll_deferred(now);
        let outcome = self.driver.frame(&mut self.game, now, render)?;
        if let Some(ev) = self.game.take_last_event() {
            self.record(EventRecord::lock(now, &ev))?;
        }
        Ok(outcome)
    }

    /// Record the final stats and flush the log.
    pub fn finish(&mut self, now: f64) -> Result<()> {
        self.record(EventRecord::SessionEnd {
            t_ms: now,
            score: self.game.score(),
            lines: self.game.lines(),
            level: self.game.level(),
        })?;
        if let Some(log) = self.log.as_mut() {
            log.flush()?;
        }
        Ok(())
    }

    fn refresh_audio_state(&mut self) {
        let music = self.game.audio().is_music_muted();
        let effects = self.game.audio().is_sound_muted();
        self.game.display_mut().show_audio_state(music, effects);
    }

    fn record(&mut self, rec: EventRecord) -> Result<()> {
        match self.log.as_mut() {
            Some(log) => log.record(&rec),
            None => Ok(()),
        }
    }

    pub fn game(&self) -> &GameState<SoundManager<O>, D> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState<SoundManager<O>, D> {
        &mut self.game
    }

    pub fn driver(&self) -> &LoopDriver {
        &self.driver
    }

    /// Time the host may wait for input before the next frame slot.
    pub fn poll_timeout(&self, now: f64) -> std::time::Duration {
        self.driver.time_until_due(now)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn log(&self) -> Option<&EventLog<W>> {
        self.log.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::NullOutput;
    use blockfall_core::{NullDisplay, Piece};
    use blockfall_core::geometry::Matrix;

    #[derive(Debug, Default)]
    struct AudioPanel {
        audio: Option<(bool, bool)>,
    }

    impl ScoreDisplay for AudioPanel {
        fn show_stats(&mut self, _score: u32, _level: u32, _lines: u32) {}
        fn show_game_over(&mut self, _final_score: u32) {}
        fn hide_game_over(&mut self) {}
        fn set_level_highlight(&mut self, _on: bool) {}
        fn show_audio_state(&mut self, music_muted: bool, sound_muted: bool) {
            self.audio = Some((music_muted, sound_muted));
        }
    }

    fn session() -> Session<NullOutput, AudioPanel, Vec<u8>> {
        Session::new(
            11,
            16,
            SoundManager::new(NullOutput),
            AudioPanel::default(),
            Some(EventLog::new(Vec::new())),
        )
    }

    fn logged(s: &Session<NullOutput, AudioPanel, Vec<u8>>) -> Vec<serde_json::Value> {
        let bytes = s.log().map(|l| l.get_ref().clone()).unwrap_or_default();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn audio_toggles_update_display() {
        let mut s = session();
        assert_eq!(s.game().display().audio, Some((false, false)));

        assert!(s.handle_action(GameAction::ToggleMusic, 0.0).unwrap());
        assert_eq!(s.game().display().audio, Some((true, false)));
        assert!(s.handle_action(GameAction::ToggleSound, 0.0).unwrap());
        assert_eq!(s.game().display().audio, Some((true, true)));
    }

    #[test]
    fn audio_toggles_work_while_paused() {
        let mut s = session();
        s.start(0.0).unwrap();
        s.handle_action(GameAction::Pause, 1.0).unwrap();
        assert!(s.handle_action(GameAction::ToggleSound, 2.0).unwrap());
        assert!(s.game().audio().is_sound_muted());
    }

    #[test]
    fn lock_events_are_logged() {
        let mut s = session();
        s.start(0.0).unwrap();
        let dot = Piece::from_matrix(Matrix::from_rows(&[[1u8]]).unwrap()).at(0, 19);
        s.game_mut().set_current_piece(dot);

        s.tick(0.0, |_| Ok(())).unwrap();
        s.tick(1001.0, |_| Ok(())).unwrap();

        let records = logged(&s);
        assert_eq!(records[0]["event"], "session_start");
        assert_eq!(records[0]["seed"], 11);
        assert_eq!(records[1]["event"], "lock");
        assert_eq!(records[1]["lines_cleared"], 0);
    }

    #[test]
    fn restart_and_finish_are_logged() {
        let mut s = session();
        s.start(0.0).unwrap();
        s.handle_action(GameAction::Restart, 5.0).unwrap();
        s.finish(10.0).unwrap();

        let events: Vec<_> = logged(&s)
            .iter()
            .map(|v| v["event"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(events, vec!["session_start", "restart", "session_end"]);
    }

    #[test]
    fn works_without_a_log() {
        let mut s: Session<NullOutput, NullDisplay, Vec<u8>> =
            Session::new(1, 16, SoundManager::new(NullOutput), NullDisplay, None);
        s.start(0.0).unwrap();
        assert!(s.handle_action(GameAction::MoveLeft, 1.0).is_ok());
        s.finish(2.0).unwrap();
    }
}
