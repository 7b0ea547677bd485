//! Host-side runtime around the core engine.
//!
//! - [`driver`]: frame scheduler that calls `update` then the render callout
//! - [`sound`]: mute-aware [`AudioSink`](blockfall_core::AudioSink) over a playback backend
//! - [`session`]: engine + driver + event log, and the audio toggles
//! - [`config`]: CLI flags with environment fallbacks
//! - [`event_log`]: optional JSON-lines log of game events

pub mod config;
pub mod driver;
pub mod event_log;
pub mod session;
pub mod sound;

pub use config::GameConfig;
pub use driver::LoopDriver;
pub use event_log::{EventLog, EventRecord};
pub use session::Session;
pub use sound::{NullOutput, SoundManager, SoundOutput, EFFECT_VOLUME, MUSIC_VOLUME};
