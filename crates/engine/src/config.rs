//! Runtime configuration: command-line flags with environment fallbacks.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use blockfall_types::FRAME_MS;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "blockfall", version, about, long_about = None)]
pub struct GameConfig {
    /// Seed for the piece sequence. The same seed replays the same pieces.
    /// Defaults to a value derived from the system clock.
    /// Example: `blockfall --seed 42`.
    #[arg(short, long, env = "BLOCKFALL_SEED")]
    pub seed: Option<u32>,

    /// Start with background music muted.
    #[arg(long, env = "BLOCKFALL_MUTE_MUSIC")]
    pub mute_music: bool,

    /// Start with sound effects muted.
    #[arg(long, env = "BLOCKFALL_MUTE_SOUND")]
    pub mute_sound: bool,

    /// Ring the terminal bell for line clears, level-ups and game over.
    #[arg(long, env = "BLOCKFALL_BELL")]
    pub bell: bool,

    /// Append one JSON object per game event to this file.
    #[arg(long, env = "BLOCKFALL_EVENT_LOG", value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Host frame interval in milliseconds.
    #[arg(
        long,
        env = "BLOCKFALL_FRAME_MS",
        default_value_t = FRAME_MS,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub frame_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            mute_music: false,
            mute_sound: false,
            bell: false,
            event_log: None,
            frame_ms: FRAME_MS,
        }
    }
}

impl GameConfig {
    /// The configured seed, or one derived from the current time.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(1);
            (nanos as u32) ^ ((nanos >> 32) as u32)
        })
    }

    /// Event log path, ignoring an empty or blank value.
    pub fn event_log_path(&self) -> Option<&PathBuf> {
        self.event_log
            .as_ref()
            .filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty())
    }
}
