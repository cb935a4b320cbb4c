//! RNG module - piece randomizers and the supply queue
//!
//! Two randomization policies are available, selected when the queue is built:
//!
//! - [`RandomizerKind::Bag`]: each bag contains one of each piece (O, I, S, Z, T, L, J),
//!   shuffled. Draws from the bag until empty, then generates a new bag, so every
//!   window of 7 draws aligned to a bag boundary holds each kind exactly once.
//! - [`RandomizerKind::Uniform`]: every draw is independent and uniform over the 7 kinds.
//!
//! Both are driven by a seeded [`StdRng`], so the same seed always yields the same stream.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::types::{PieceKind, QUEUE_LOOKAHEAD};

/// Randomization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomizerKind {
    #[default]
    Bag,
    Uniform,
}

impl RandomizerKind {
    /// Parse policy name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bag" | "bag7" | "7bag" => Some(RandomizerKind::Bag),
            "uniform" | "rand" | "random" => Some(RandomizerKind::Uniform),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RandomizerKind::Bag => "bag",
            RandomizerKind::Uniform => "uniform",
        }
    }
}

/// Per-policy state
#[derive(Debug, Clone)]
enum Policy {
    Bag { bag: [PieceKind; 7], index: usize },
    Uniform,
}

impl Policy {
    fn new(kind: RandomizerKind) -> Self {
        match kind {
            // index == 7 forces a refill on the first draw
            RandomizerKind::Bag => Policy::Bag {
                bag: PieceKind::ALL,
                index: 7,
            },
            RandomizerKind::Uniform => Policy::Uniform,
        }
    }
}

/// Seeded piece randomizer
#[derive(Debug, Clone)]
pub struct Randomizer {
    kind: RandomizerKind,
    policy: Policy,
    rng: StdRng,
}

impl Randomizer {
    pub fn new(kind: RandomizerKind, seed: u64) -> Self {
        Self {
            kind,
            policy: Policy::new(kind),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn kind(&self) -> RandomizerKind {
        self.kind
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        match &mut self.policy {
            Policy::Bag { bag, index } => {
                if *index >= bag.len() {
                    *bag = PieceKind::ALL;
                    bag.shuffle(&mut self.rng);
                    *index = 0;
                }
                let kind = bag[*index];
                *index += 1;
                kind
            }
            Policy::Uniform => PieceKind::ALL[self.rng.gen_range(0..PieceKind::COUNT)],
        }
    }

    /// Discard any partially drawn bag; the RNG stream continues
    pub fn reset(&mut self) {
        self.policy = Policy::new(self.kind);
    }

    /// Restart the stream from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.reset();
    }
}

/// Fixed-length lookahead of upcoming pieces
#[derive(Debug, Clone)]
pub struct PieceQueue {
    pending: VecDeque<PieceKind>,
    randomizer: Randomizer,
}

impl PieceQueue {
    /// Create a queue filled with [`QUEUE_LOOKAHEAD`] pieces
    pub fn new(randomizer: Randomizer) -> Self {
        let mut queue = Self {
            pending: VecDeque::with_capacity(QUEUE_LOOKAHEAD),
            randomizer,
        };
        queue.fill();
        queue
    }

    fn fill(&mut self) {
        while self.pending.len() < QUEUE_LOOKAHEAD {
            let kind = self.randomizer.draw();
            self.pending.push_back(kind);
        }
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        // The queue is refilled after every pop, so the head always exists.
        self.pending[0]
    }

    /// Remove the head and append a freshly drawn piece
    pub fn pop(&mut self) -> PieceKind {
        let head = self.pending.pop_front().unwrap_or_else(|| self.randomizer.draw());
        self.fill();
        head
    }

    /// Upcoming pieces, head first
    pub fn preview(&self) -> [PieceKind; QUEUE_LOOKAHEAD] {
        let mut out = [PieceKind::O; QUEUE_LOOKAHEAD];
        for (slot, &kind) in out.iter_mut().zip(&self.pending) {
            *slot = kind;
        }
        out
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop the lookahead and redraw it, continuing the RNG stream
    pub fn reset(&mut self) {
        self.pending.clear();
        self.randomizer.reset();
        self.fill();
    }

    /// Drop the lookahead and redraw it from a fresh seed
    pub fn reseed(&mut self, seed: u64) {
        self.pending.clear();
        self.randomizer.reseed(seed);
        self.fill();
    }

    pub fn randomizer_kind(&self) -> RandomizerKind {
        self.randomizer.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomizer_deterministic() {
        for kind in [RandomizerKind::Bag, RandomizerKind::Uniform] {
            let mut a = Randomizer::new(kind, 12345);
            let mut b = Randomizer::new(kind, 12345);
            for _ in 0..100 {
                assert_eq!(a.draw(), b.draw());
            }
        }
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut rng = Randomizer::new(RandomizerKind::Bag, 1);
        let mut drawn: Vec<PieceKind> = (0..7).map(|_| rng.draw()).collect();
        drawn.sort();
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }

    #[test]
    fn test_reseed_replays_stream() {
        let mut rng = Randomizer::new(RandomizerKind::Uniform, 7);
        let first: Vec<_> = (0..20).map(|_| rng.draw()).collect();
        rng.reseed(7);
        let again: Vec<_> = (0..20).map(|_| rng.draw()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_queue_length_is_constant() {
        let mut queue = PieceQueue::new(Randomizer::new(RandomizerKind::Bag, 3));
        assert_eq!(queue.len(), QUEUE_LOOKAHEAD);
        for _ in 0..20 {
            queue.pop();
            assert_eq!(queue.len(), QUEUE_LOOKAHEAD);
        }
        queue.reset();
        assert_eq!(queue.len(), QUEUE_LOOKAHEAD);
    }

    #[test]
    fn test_queue_peek_matches_pop() {
        let mut queue = PieceQueue::new(Randomizer::new(RandomizerKind::Uniform, 9));
        for _ in 0..10 {
            let preview = queue.preview();
            assert_eq!(preview[0], queue.peek());
            let popped = queue.pop();
            assert_eq!(popped, preview[0]);
            assert_eq!(queue.peek(), preview[1]);
        }
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(RandomizerKind::from_str("BAG"), Some(RandomizerKind::Bag));
        assert_eq!(
            RandomizerKind::from_str("uniform"),
            Some(RandomizerKind::Uniform)
        );
        assert_eq!(RandomizerKind::from_str("nes"), None);
    }
}
