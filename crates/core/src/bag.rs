//! Bag module - 7-bag piece randomizer
//!
//! Two shuffled bags are kept: `current` is dealt from its back, `next` is the
//! lookahead. When `current` runs dry it is replaced by `next` and a fresh `next` is
//! shuffled, so every aligned window of seven draws holds each kind exactly once and
//! at least seven upcoming kinds are always visible.
//!
//! The generator is owned by the bag and seeded explicitly; nothing is global.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::PieceKind;

/// Most kinds [`Bag::peek`] can report: the rest of `current` plus all of `next`.
pub const MAX_PEEK: usize = 14;

type Sequence = ArrayVec<PieceKind, 7>;

/// 7-bag generator with lookahead
#[derive(Debug, Clone)]
pub struct Bag {
    current: Sequence,
    next: Sequence,
    rng: StdRng,
    seed: u64,
}

impl Bag {
    /// Create a bag whose shuffles are fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        let mut bag = Self {
            current: Sequence::new(),
            next: Sequence::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
        };
        bag.refill();
        bag
    }

    /// Create a bag seeded from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    fn shuffled(&mut self) -> Sequence {
        let mut seq: Sequence = PieceKind::ALL.into_iter().collect();
        seq.shuffle(&mut self.rng);
        seq
    }

    /// Replace both sequences with two independent shuffles.
    pub fn refill(&mut self) {
        self.current = self.shuffled();
        self.next = self.shuffled();
    }

    /// Deal the next kind.
    pub fn draw(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.current.pop() {
                if self.current.is_empty() {
                    self.advance();
                }
                return kind;
            }
            self.advance();
        }
    }

    fn advance(&mut self) {
        let fresh = self.shuffled();
        self.current = std::mem::replace(&mut self.next, fresh);
    }

    /// Upcoming kinds in deal order, at most `n` (and at most [`MAX_PEEK`]).
    pub fn peek(&self, n: usize) -> ArrayVec<PieceKind, MAX_PEEK> {
        self.current
            .iter()
            .rev()
            .chain(self.next.iter().rev())
            .take(n.min(MAX_PEEK))
            .copied()
            .collect()
    }

    /// Seed this bag was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
