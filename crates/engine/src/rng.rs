//! RNG module - 7-bag piece generation on a seeded LCG
//!
//! Every bag holds each piece kind once in shuffled order, so droughts are
//! bounded. The generator is deterministic for a given seed, which keeps the
//! engine reproducible in tests.

use crate::pieces::PieceKind;

/// Linear congruential generator (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would stay zero forever.
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Bag randomizer handing out piece kinds.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    bag: [PieceKind; 7],
    next: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: PieceKind::ALL,
            next: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill();
        queue
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.next = 0;
    }

    pub fn draw(&mut self) -> PieceKind {
        if self.next >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.next];
        self.next += 1;
        kind
    }
}
