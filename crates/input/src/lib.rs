//! Terminal input mapping.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Key repeat comes from the
//! terminal itself; there is no DAS/ARR handling here.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
