//! Terminal front-end.
//!
//! A small, game-oriented rendering layer: [`GameView`] draws a snapshot and the HUD into a
//! [`FrameBuffer`], and [`TerminalRenderer`] flushes changed cells through crossterm. Cells
//! are drawn 2 columns wide to roughly square them up.

pub mod bell;
pub mod fb;
pub mod game_view;
pub mod hud;
pub mod render_throttle;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use bell::BellOutput;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use hud::HudState;
pub use render_throttle::{frame_fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
