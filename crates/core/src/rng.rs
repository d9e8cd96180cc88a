//! RNG module - seeded shuffling for tile deals
//!
//! A full deal is a "pair deck": every kind `1..=18` appears exactly twice.
//! The deck is shuffled with Fisher-Yates driven by a small LCG so that the
//! same seed always reproduces the same deal (tests, benches, `--seed`).

use arrayvec::ArrayVec;

use crate::types::{TileKind, COPIES_PER_KIND, FULL_DEAL_TILES, TILE_KINDS};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would be a fixed point for the shuffle tests below
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Fixed-capacity deck of tile kinds for one full deal.
pub type PairDeck = ArrayVec<TileKind, FULL_DEAL_TILES>;

/// Every kind `1..=TILE_KINDS` twice, in ascending order.
///
/// Stack-only; does not allocate.
pub fn pair_deck() -> PairDeck {
    let mut deck = PairDeck::new();
    for kind in 1..=TILE_KINDS {
        for _ in 0..COPIES_PER_KIND {
            deck.push(kind);
        }
    }
    deck
}

/// A pair deck shuffled tile-by-tile (copies of a kind end up anywhere).
pub fn shuffled_deck(rng: &mut SimpleRng) -> PairDeck {
    let mut deck = pair_deck();
    rng.shuffle(&mut deck);
    deck
}

/// The kinds `1..=TILE_KINDS` in shuffled order, one entry per pair.
pub fn shuffled_pair_order(rng: &mut SimpleRng) -> ArrayVec<TileKind, { TILE_KINDS as usize }> {
    let mut pairs: ArrayVec<TileKind, { TILE_KINDS as usize }> = (1..=TILE_KINDS).collect();
    rng.shuffle(&mut pairs);
    pairs
}
