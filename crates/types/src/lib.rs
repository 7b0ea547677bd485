//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no external dependencies, so it can be used by the
//! engine, the terminal front-end, and tests alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Default host frame cadence (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `LOCK_DELAY_MS` | 1000 | Grace period before a resting piece is forced to lock |
//! | `LEVEL_UP_PULSE_MS` | 500 | How long the level display stays highlighted |
//! | `DROP_INTERVAL_FLOOR_MS` | 16 | Lower bound for the gravity interval |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, RotateDir, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_tag(3), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.tag(), 3);
//!
//! assert_eq!(RotateDir::Clockwise.reverse(), RotateDir::CounterClockwise);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: f64 = 1000.0;

/// Per-level gravity speed-up factor (`interval = BASE_DROP_MS * factor^(level - 1)`)
pub const DROP_SPEEDUP: f64 = 0.85;

/// Lower bound for the gravity interval. One host frame.
pub const DROP_INTERVAL_FLOOR_MS: f64 = 16.0;

/// Time a resting piece may still move before it is merged into the board
pub const LOCK_DELAY_MS: f64 = 1000.0;

/// Duration of the level display highlight after a level-up
pub const LEVEL_UP_PULSE_MS: f64 = 500.0;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear rewards for 1..=4 rows, multiplied by the current level.
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(BASE_DROP_MS, 1000.0);
        assert_eq!(LOCK_DELAY_MS, 1000.0);
        assert_eq!(LEVEL_UP_PULSE_MS, 500.0);
        assert_eq!(LINES_PER_LEVEL, 10);
        assert_eq!(LINE_SCORES, [40, 100, 300, 1200]);
    }

    #[test]
    fn piece_tags_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(PieceKind::from_tag(0), None);
        assert_eq!(PieceKind::from_tag(8), None);
    }

    #[test]
    fn unknown_action_is_none() {
        assert_eq!(GameAction::from_str("jump"), None);
        assert_eq!(GameAction::from_str(""), None);
    }
}

/// The seven piece kinds
///
/// Each kind carries a fixed tag (1-7) which is what the board stores:
/// I=1, O=2, T=3, S=4, Z=5, J=6, L=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in tag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Integer tag stored in board cells and piece matrices.
    pub fn tag(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::tag`]. Returns `None` for 0 (empty) and anything above 7.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter, used by the side panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotateDir {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl RotateDir {
    pub fn reverse(&self) -> Self {
        match self {
            RotateDir::Clockwise => RotateDir::CounterClockwise,
            RotateDir::CounterClockwise => RotateDir::Clockwise,
        }
    }
}

/// Logical input codes delivered by the input source
///
/// Physical key bindings are an input-layer concern (see `blockfall-input`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to its resting row and force a lock
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Reset and start a new game
    Restart,
    /// Mute/unmute background music
    ToggleMusic,
    /// Mute/unmute sound effects
    ToggleSound,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotatecw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "togglemusic" => Some(GameAction::ToggleMusic),
            "togglesound" => Some(GameAction::ToggleSound),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::ToggleMusic => "toggleMusic",
            GameAction::ToggleSound => "toggleSound",
        }
    }
}

/// Named sound effects the engine asks the audio collaborator to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Rotate,
    Drop,
    Clear,
    LevelUp,
    GameOver,
}

impl SoundCue {
    pub const ALL: [SoundCue; 6] = [
        SoundCue::Move,
        SoundCue::Rotate,
        SoundCue::Drop,
        SoundCue::Clear,
        SoundCue::LevelUp,
        SoundCue::GameOver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Move => "move",
            SoundCue::Rotate => "rotate",
            SoundCue::Drop => "drop",
            SoundCue::Clear => "clear",
            SoundCue::LevelUp => "levelUp",
            SoundCue::GameOver => "gameOver",
        }
    }
}

/// Core-side event emitted after a piece locks.
///
/// Consumed by observers such as the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_delta: u32,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub level_up: bool,
    pub game_over: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell (tag 0)
/// - `Some(PieceKind)`: Cell filled with the specified piece kind (tag 1-7)
pub type Cell = Option<PieceKind>;

/// Integer tag of a cell (0 for empty).
pub fn cell_tag(cell: Cell) -> u8 {
    cell.map(|k| k.tag()).unwrap_or(0)
}
