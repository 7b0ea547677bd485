//! RNG module - uniform random piece generation
//!
//! Every spawn picks one of the seven kinds with equal probability; there is no bag
//! and no history. A single piece of lookahead is kept so the UI can preview it.
//!
//! The generator is a small LCG so that a seed fully determines a game.

use crate::pieces::Piece;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        (self.next_u32() >> 16) % max.max(1)
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Produces pieces for the engine and holds the one-piece lookahead.
#[derive(Debug, Clone)]
pub struct PieceSpawner {
    rng: SimpleRng,
    next: Option<Piece>,
}

impl PieceSpawner {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            next: None,
        }
    }

    /// A fresh catalog piece of a uniformly chosen kind, at the origin.
    pub fn random_piece(&mut self) -> Piece {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        Piece::new(PieceKind::ALL[idx])
    }

    /// Hand out the lookahead piece and generate a new one.
    ///
    /// An empty lookahead is filled first, so the very first call costs two draws.
    pub fn promote(&mut self) -> Piece {
        let current = match self.next.take() {
            Some(piece) => piece,
            None => self.random_piece(),
        };
        self.next = Some(self.random_piece());
        current
    }

    /// The lookahead piece, if one has been generated.
    pub fn peek(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// Replace the lookahead (tests and scripted setups).
    pub fn set_next(&mut self, piece: Piece) {
        self.next = Some(piece);
    }

    /// Current RNG state, usable as a seed to replay the remaining sequence.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceSpawner {
    fn default() -> Self {
        Self::new(1)
    }
}
