//! Game loop driver - the host-side frame scheduler
//!
//! The engine never schedules itself. It raises a frame request, and the driver runs the
//! frame once the host clock reaches the next frame slot. A frame is `update(delta)` followed
//! by one render callout with a fresh snapshot.
//!
//! The snapshot buffer is owned by the driver and reused, so a frame does not allocate.

use std::time::Duration;

use anyhow::Result;

use blockfall_core::{AudioSink, FrameOutcome, GameSnapshot, GameState, ScoreDisplay};

#[derive(Debug, Clone)]
pub struct LoopDriver {
    frame_ms: f64,
    next_due: f64,
    frames: u64,
    snapshot: GameSnapshot,
}

impl LoopDriver {
    pub fn new(frame_ms: u32) -> Self {
        Self {
            frame_ms: frame_ms.max(1) as f64,
            next_due: 0.0,
            frames: 0,
            snapshot: GameSnapshot::default(),
        }
    }

    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// True once the host clock reaches the next frame slot.
    pub fn is_due(&self, now: f64) -> bool {
        now >= self.next_due
    }

    /// How long the host may block on input before the next frame slot.
    pub fn time_until_due(&self, now: f64) -> Duration {
        let ms = (self.next_due - now).clamp(0.0, self.frame_ms);
        Duration::from_micros((ms * 1000.0).round() as u64)
    }

    /// Run one frame if the game asked for one and the slot is due.
    ///
    /// A request made before the slot is due stays outstanding and the call returns `Idle`.
    pub fn frame<A, D, F>(
        &mut self,
        game: &mut GameState<A, D>,
        now: f64,
        render: F,
    ) -> Result<FrameOutcome>
    where
        A: AudioSink,
        D: ScoreDisplay,
        F: FnOnce(&GameSnapshot) -> Result<()>,
    {
        if !game.frame_requested() || !self.is_due(now) {
            return Ok(FrameOutcome::Idle);
        }

        let snapshot = &mut self.snapshot;
        let outcome = game.animate(now, |g| {
            g.snapshot_into(snapshot);
            render(snapshot)
        })?;

        if let FrameOutcome::Ran { .. } = outcome {
            self.frames += 1;
            self.next_due = now + self.frame_ms;
        }
        Ok(outcome)
    }

    /// Last snapshot handed to the renderer.
    pub fn last_snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }
}

impl Default for LoopDriver {
    fn default() -> Self {
        Self::new(blockfall_types::FRAME_MS)
    }
}
