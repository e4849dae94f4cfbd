//! RNG module - uniform random piece generation
//!
//! Each draw picks one of the seven kinds independently and uniformly; there is
//! no bag and no repeat avoidance, so droughts and streaks are possible.
//!
//! The engine draws through the [`PieceSource`] trait so that callers can
//! substitute a scripted sequence ([`FixedPieces`]) for deterministic tests and
//! replays.

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits, which have a much longer period than the low bits of an LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Source of upcoming piece kinds
pub trait PieceSource {
    /// Draw the next piece kind.
    fn next_kind(&mut self) -> PieceKind;
}

/// Independent uniform draws over the seven kinds
#[derive(Debug, Clone)]
pub struct UniformPieces {
    rng: SimpleRng,
    seed: u32,
}

impl UniformPieces {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl PieceSource for UniformPieces {
    fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

impl Default for UniformPieces {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Scripted sequence that repeats from the start once exhausted
///
/// An empty script yields `PieceKind::O` forever.
#[derive(Debug, Clone)]
pub struct FixedPieces {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl FixedPieces {
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        Self {
            kinds: kinds.into(),
            cursor: 0,
        }
    }

    /// Build from a string of piece letters, ignoring anything else (`"IIOT"`)
    pub fn from_letters(letters: &str) -> Self {
        let kinds: Vec<PieceKind> = letters
            .chars()
            .filter_map(|c| PieceKind::from_str(&c.to_string()))
            .collect();
        Self::new(kinds)
    }
}

impl PieceSource for FixedPieces {
    fn next_kind(&mut self) -> PieceKind {
        let Some(&kind) = self.kinds.get(self.cursor) else {
            self.cursor = 0;
            return self.kinds.first().copied().unwrap_or(PieceKind::O);
        };
        self.cursor += 1;
        if self.cursor >= self.kinds.len() {
            self.cursor = 0;
        }
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for &mut S {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}
