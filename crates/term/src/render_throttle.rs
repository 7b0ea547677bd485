use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::core::GameSnapshot;
use crate::hud::HudState;

/// Rate limit for redraws of screens that do not animate (paused, game over).
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to render a new frame.
    ///
    /// - When `is_static=false`: always render (no throttling).
    /// - When `is_static=true`: render immediately on fingerprint change, otherwise at most
    ///   once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        if !self.has_rendered || !is_static || fingerprint != self.last_fingerprint {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
            return true;
        }

        if now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms {
            self.last_render_ms = now_ms;
            return true;
        }

        false
    }

    /// Forget the last frame, e.g. after a terminal resize.
    pub fn reset(&mut self) {
        self.has_rendered = false;
    }
}

/// Hash of everything visible on screen. Timers are excluded.
pub fn frame_fingerprint(snap: &GameSnapshot, hud: &HudState) -> u64 {
    let mut h = DefaultHasher::new();
    snap.board.hash(&mut h);
    snap.current.hash(&mut h);
    snap.ghost.hash(&mut h);
    snap.next.hash(&mut h);
    (snap.paused, snap.game_over).hash(&mut h);
    hud.hash(&mut h);
    h.finish()
}
