//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management, and simulation logic.
//! It has no dependencies on terminals, audio devices, or clocks: time comes in as
//! milliseconds from the host, and side effects go out through collaborator traits.
//!
//! # Module Structure
//!
//! - [`geometry`]: piece matrices and quarter-turn rotation
//! - [`board`]: 10x20 grid with collision detection, merging and line clearing
//! - [`pieces`]: the seven-shape catalog and the positioned [`Piece`]
//! - [`rng`]: seeded LCG and the uniform piece spawner with one piece of lookahead
//! - [`scoring`]: line clear rewards, level formula, gravity speed
//! - [`collab`]: audio and score-display collaborator traits
//! - [`deferred`]: cancellable one-shot timers (level-up pulse)
//! - [`game_state`]: the engine state machine
//! - [`snapshot`]: render-facing copy of the state
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every spawn is one of seven kinds with equal odds
//! - **Simple kicks**: rotation tries offsets (0,0), (1,0), (-1,0), (0,-1), (2,0), (-2,0)
//! - **Lock delay**: a resting piece locks after 1000ms of gravity ticks
//! - **Ghost piece**: shows where the current piece will land
//! - **Scoring**: 40/100/300/1200 times the level for 1-4 rows
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start(0.0);
//!
//! game.handle_action(GameAction::MoveRight, 0.0);
//! game.handle_action(GameAction::RotateCw, 0.0);
//! game.handle_action(GameAction::HardDrop, 0.0);
//!
//! // The forced lock lands on the next gravity tick.
//! game.update(1001.0);
//! assert!(game.board().filled_count() > 0);
//! ```
//!
//! # Timing
//!
//! - Gravity: 1000ms at level 1, times 0.85 per level, floored at 16ms
//! - Gravity timing snaps: the drop counter resets to 0 on each tick instead of carrying over
//! - Lock delay: accumulated only on gravity ticks while the piece cannot move down

pub mod board;
pub mod collab;
pub mod deferred;
pub mod game_state;
pub mod geometry;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collab::{AudioSink, NullAudio, NullDisplay, ScoreDisplay};
pub use deferred::{DeferredTask, DeferredTasks, TaskId};
pub use game_state::{FrameOutcome, GameState, KICKS};
pub use geometry::{rotate, Matrix};
pub use pieces::{get_shape, spawn_x, Piece};
pub use rng::{PieceSpawner, SimpleRng};
pub use scoring::{apply_line_clear, calculate_level, drop_interval_ms, line_clear_score, ScoreResult};
pub use snapshot::{GameSnapshot, TimersSnapshot};
