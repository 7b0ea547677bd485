use serde::Serialize;

use crate::pieces::Piece;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TimersSnapshot {
    pub drop_ms: f64,
    pub lock_ms: f64,
    pub drop_interval_ms: f64,
    pub lock_delay_ms: f64,
}

/// Everything a renderer needs for one frame, copied out of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Piece,
    pub ghost: Piece,
    pub next: Option<Piece>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Board tag at (x, y), 0 outside the grid.
    pub fn cell(&self, x: i16, y: i16) -> u8 {
        if x < 0 || y < 0 {
            return 0;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let placeholder = Piece::new(PieceKind::I);
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: placeholder,
            ghost: placeholder,
            next: None,
            score: 0,
            lines: 0,
            level: 1,
            paused: false,
            game_over: false,
            timers: TimersSnapshot::default(),
        }
    }
}
