//! Game state module - the engine
//!
//! Ties together board, pieces, spawner, scoring and the collaborators. Input arrives as
//! discrete transitions (`move_horizontal`, `rotate`, `hard_drop`, ...), time arrives through
//! `update(dt)`, and the host drives frames through `animate`.
//!
//! States: `Ready -> Running <-> Paused -> GameOver`. A fresh or reset engine is Ready: it
//! holds a piece but nothing advances until `start` primes the frame chain. Every frame that
//! runs requests the next one; pausing or losing breaks the chain and only `start` or an
//! unpause primes it again.

use crate::board::Board;
use crate::collab::{AudioSink, NullAudio, NullDisplay, ScoreDisplay};
use crate::deferred::{DeferredTask, DeferredTasks, TaskId};
use crate::geometry::rotate;
use crate::pieces::{spawn_x, Piece};
use crate::rng::PieceSpawner;
use crate::scoring::{apply_line_clear, drop_interval_ms};
use crate::snapshot::{GameSnapshot, TimersSnapshot};
use crate::types::{
    GameAction, LockEvent, PieceKind, RotateDir, SoundCue, LEVEL_UP_PULSE_MS, LOCK_DELAY_MS,
};

/// Rotation kick offsets, tried in order; the first one that fits wins.
pub const KICKS: [(i16, i16); 6] = [(0, 0), (1, 0), (-1, 0), (0, -1), (2, 0), (-2, 0)];

/// Result of one `animate` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// No frame was requested.
    Idle,
    /// A frame was requested but the game is paused or over; the chain is now broken.
    Stopped,
    /// The frame ran `update` with this delta and rendered.
    Ran { delta_ms: f64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<A = NullAudio, D = NullDisplay> {
    board: Board,
    spawner: PieceSpawner,
    current: Piece,
    ghost: Piece,
    score: u32,
    lines: u32,
    level: u32,
    game_over: bool,
    paused: bool,
    drop_counter: f64,
    lock_counter: f64,
    drop_interval: f64,
    lock_delay: f64,
    /// Host time of the last frame (or of start/unpause).
    last_time: f64,
    frame_requested: bool,
    tasks: DeferredTasks,
    highlight_task: Option<TaskId>,
    /// Last lock outcome (consumed by observers).
    last_event: Option<LockEvent>,
    audio: A,
    display: D,
}

impl GameState {
    /// Headless game with null collaborators.
    pub fn new(seed: u32) -> Self {
        Self::with_collaborators(seed, NullAudio, NullDisplay)
    }
}

impl<A: AudioSink, D: ScoreDisplay> GameState<A, D> {
    /// Create a game in the Ready state; the board is empty and the first piece is in place.
    pub fn with_collaborators(seed: u32, audio: A, display: D) -> Self {
        let placeholder = Piece::new(PieceKind::I);
        let mut game = Self {
            board: Board::new(),
            spawner: PieceSpawner::new(seed),
            current: placeholder,
            ghost: placeholder,
            score: 0,
            lines: 0,
            level: 1,
            game_over: false,
            paused: false,
            drop_counter: 0.0,
            lock_counter: 0.0,
            drop_interval: drop_interval_ms(1),
            lock_delay: LOCK_DELAY_MS,
            last_time: 0.0,
            frame_requested: false,
            tasks: DeferredTasks::new(),
            highlight_task: None,
            last_event: None,
            audio,
            display,
        };
        game.reset();
        game
    }

    /// Back to Ready: empty board, zeroed stats, new current piece.
    ///
    /// The lookahead piece survives the reset and becomes the new current piece.
    pub fn reset(&mut self) {
        self.tasks.cancel_all();
        self.highlight_task = None;
        self.display.set_level_highlight(false);

        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.game_over = false;
        self.paused = false;
        self.drop_interval = drop_interval_ms(1);
        self.drop_counter = 0.0;
        self.lock_counter = 0.0;
        self.frame_requested = false;
        self.last_event = None;

        self.display.show_stats(self.score, self.level, self.lines);
        self.display.hide_game_over();
        self.spawn_piece();
        self.audio.stop_music();
    }

    /// Re-anchor timing, start the music and request the first frame. No-op after game over.
    pub fn start(&mut self, now: f64) {
        if self.game_over {
            return;
        }
        self.last_time = now;
        self.audio.start_music();
        self.frame_requested = true;
    }

    /// Promote the lookahead piece to current and center it on row 0.
    ///
    /// Returns false (and ends the game) if the new piece collides where it spawns.
    pub fn spawn_piece(&mut self) -> bool {
        let piece = self.spawner.promote();
        self.current = piece.at(spawn_x(piece.width()), 0);
        self.update_ghost_piece();

        if self.board.collides(&self.current) {
            self.game_over = true;
            self.audio.play_sound(SoundCue::GameOver);
            self.display.show_game_over(self.score);
            self.audio.stop_music();
            return false;
        }
        true
    }

    /// Shift the piece one column (`dir` is -1 or 1). Returns false if blocked.
    pub fn move_horizontal(&mut self, dir: i16) -> bool {
        let moved = self.current.offset(dir.signum(), 0);
        if self.board.collides(&moved) {
            return false;
        }
        self.current = moved;
        self.update_ghost_piece();
        self.audio.play_sound(SoundCue::Move);
        true
    }

    /// Move down one row. Resets the gravity counter but not the lock counter.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.current.offset(0, 1);
        if self.board.collides(&moved) {
            return false;
        }
        self.current = moved;
        self.drop_counter = 0.0;
        self.audio.play_sound(SoundCue::Move);
        true
    }

    /// Rotate a quarter turn, trying each offset in [`KICKS`].
    pub fn rotate(&mut self, dir: RotateDir) -> bool {
        let matrix = rotate(&self.current.matrix, dir);
        let candidate = Piece { matrix, ..self.current };

        for (dx, dy) in KICKS {
            let kicked = candidate.offset(dx, dy);
            if !self.board.collides(&kicked) {
                self.current = kicked;
                self.update_ghost_piece();
                self.audio.play_sound(SoundCue::Rotate);
                return true;
            }
        }
        false
    }

    /// Drop to the resting row and force a lock on the next gravity tick.
    ///
    /// Returns the number of rows fallen.
    pub fn hard_drop(&mut self) -> u32 {
        let mut rows = 0;
        while !self.board.collides(&self.current.offset(0, 1)) {
            self.current.y += 1;
            rows += 1;
        }
        self.lock_counter = self.lock_delay;
        self.audio.play_sound(SoundCue::Drop);
        rows
    }

    /// Flip the pause flag. Unpausing re-anchors timing and requests a frame.
    pub fn toggle_pause(&mut self, now: f64) {
        self.paused = !self.paused;
        if !self.paused {
            self.last_time = now;
            self.frame_requested = true;
        }
    }

    /// Advance gravity and lock delay by `dt` milliseconds.
    ///
    /// Assumes the game is running; `animate` is what skips paused and finished games.
    pub fn update(&mut self, dt: f64) {
        self.drop_counter += dt;
        if self.drop_counter <= self.drop_interval {
            return;
        }

        let moved = self.current.offset(0, 1);
        if !self.board.collides(&moved) {
            self.current = moved;
            self.drop_counter = 0.0;
            self.lock_counter = 0.0;
            return;
        }

        self.lock_counter += dt;
        if self.lock_counter >= self.lock_delay {
            self.lock_piece();
            self.drop_counter = 0.0;
            self.lock_counter = 0.0;
        }
    }

    fn lock_piece(&mut self) {
        self.board.merge(&self.current);
        let score_before = self.score;
        let level_before = self.level;
        let cleared = self.clear_lines();
        self.spawn_piece();

        self.last_event = Some(LockEvent {
            lines_cleared: cleared,
            score_delta: self.score - score_before,
            score: self.score,
            lines: self.lines,
            level: self.level,
            level_up: self.level != level_before,
            game_over: self.game_over,
        });
    }

    /// Clear full rows and apply scoring. Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_rows() as u32;
        if cleared == 0 {
            return 0;
        }

        self.audio.play_sound(SoundCue::Clear);
        let result = apply_line_clear(cleared, self.lines, self.level);
        self.score = self.score.saturating_add(result.points);
        self.lines = result.lines;
        self.level = result.level;
        self.drop_interval = drop_interval_ms(self.level);
        self.display.show_stats(self.score, self.level, self.lines);

        if result.level_up {
            self.audio.play_sound(SoundCue::LevelUp);
            self.display.set_level_highlight(true);
            if let Some(id) = self.highlight_task.take() {
                self.tasks.cancel(id);
            }
            self.highlight_task = self.tasks.schedule(
                self.last_time + LEVEL_UP_PULSE_MS,
                DeferredTask::ClearLevelHighlight,
            );
        }
        cleared
    }

    /// Recompute the ghost: the current piece moved straight down as far as it fits.
    pub fn update_ghost_piece(&mut self) {
        let mut ghost = self.current;
        while !self.board.collides(&ghost) {
            ghost.y += 1;
        }
        ghost.y -= 1;
        self.ghost = ghost;
    }

    /// Run deferred tasks due at `now`. Returns how many ran.
    ///
    /// Hosts call this every loop iteration, paused or not.
    pub fn poll_deferred(&mut self, now: f64) -> usize {
        let due = self.tasks.take_due(now);
        for task in &due {
            match task {
                DeferredTask::ClearLevelHighlight => {
                    self.highlight_task = None;
                    self.display.set_level_highlight(false);
                }
            }
        }
        due.len()
    }

    /// One frame: consume the frame request, advance by the time since the last frame,
    /// render, and request the next frame.
    pub fn animate<E, F>(&mut self, now: f64, render: F) -> Result<FrameOutcome, E>
    where
        F: FnOnce(&Self) -> Result<(), E>,
    {
        if !self.take_frame_request() {
            return Ok(FrameOutcome::Idle);
        }
        if self.game_over || self.paused {
            return Ok(FrameOutcome::Stopped);
        }

        let delta_ms = now - self.last_time;
        self.last_time = now;
        self.update(delta_ms);
        render(self)?;
        self.frame_requested = true;
        Ok(FrameOutcome::Ran { delta_ms })
    }

    /// Dispatch a logical input.
    ///
    /// Restart works in every state. Everything else is ignored after game over, and only
    /// `Pause` gets through while paused. Audio toggles belong to the host and are ignored.
    /// Returns true if the action changed the game.
    pub fn handle_action(&mut self, action: GameAction, now: f64) -> bool {
        if action == GameAction::Restart {
            self.reset();
            self.start(now);
            return true;
        }
        if self.game_over {
            return false;
        }
        if action == GameAction::Pause {
            self.toggle_pause(now);
            return true;
        }
        if self.paused {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.move_horizontal(-1),
            GameAction::MoveRight => self.move_horizontal(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.rotate(RotateDir::Clockwise),
            GameAction::RotateCcw => self.rotate(RotateDir::CounterClockwise),
            GameAction::Pause
            | GameAction::Restart
            | GameAction::ToggleMusic
            | GameAction::ToggleSound => false,
        }
    }

    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    pub fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Replace the current piece as-is (no centering) and recompute the ghost.
    pub fn set_current_piece(&mut self, piece: Piece) {
        self.current = piece;
        self.update_ghost_piece();
    }

    /// Replace the lookahead piece.
    pub fn set_next_piece(&mut self, piece: Piece) {
        self.spawner.set_next(piece);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn ghost(&self) -> &Piece {
        &self.ghost
    }

    pub fn next(&self) -> Option<&Piece> {
        self.spawner.peek()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn drop_counter(&self) -> f64 {
        self.drop_counter
    }

    pub fn lock_counter(&self) -> f64 {
        self.lock_counter
    }

    pub fn drop_interval(&self) -> f64 {
        self.drop_interval
    }

    pub fn lock_delay(&self) -> f64 {
        self.lock_delay
    }

    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    pub fn set_last_time(&mut self, now: f64) {
        self.last_time = now;
    }

    pub fn level_highlight_pending(&self) -> bool {
        self.highlight_task.is_some()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.current = self.current;
        out.ghost = self.ghost;
        out.next = self.spawner.peek().copied();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.timers = TimersSnapshot {
            drop_ms: self.drop_counter,
            lock_ms: self.lock_counter,
            drop_interval_ms: self.drop_interval,
            lock_delay_ms: self.lock_delay,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
