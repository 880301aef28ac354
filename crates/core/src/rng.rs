//! RNG module - deterministic deck shuffling
//!
//! A deck is two copies of every symbol, shuffled with Fisher-Yates.
//! Bounded draws use multiply-shift with rejection so every permutation is
//! equally likely; the same seed always deals the same deck.

use crate::types::{Symbol, DECK_SIZE};

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

    /// Generate an unbiased value in range [0, bound)
    ///
    /// Uses the high bits of `next_u32() * bound` and rejects the short
    /// low-order zone, so no residue is favoured. `bound` must be non-zero.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let m = (self.next_u32() as u64) * (bound as u64);
            if (m as u32) >= threshold {
                return (m >> 32) as u32;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Unshuffled deck: every symbol twice, in identifier order
pub fn ordered_deck() -> [Symbol; DECK_SIZE] {
    let mut deck = [Symbol::Gamepad; DECK_SIZE];
    for (i, slot) in deck.iter_mut().enumerate() {
        *slot = Symbol::ALL[i / 2];
    }
    deck
}

/// Deal a freshly shuffled deck
pub fn shuffled_deck(rng: &mut SimpleRng) -> [Symbol; DECK_SIZE] {
    let mut deck = ordered_deck();
    rng.shuffle(&mut deck);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SYMBOL_COUNT;

    fn symbol_counts(deck: &[Symbol]) -> [usize; SYMBOL_COUNT] {
        let mut counts = [0usize; SYMBOL_COUNT];
        for s in deck {
            counts[s.index()] += 1;
        }
        counts
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_below_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for bound in 1..=17u32 {
            for _ in 0..200 {
                assert!(rng.next_below(bound) < bound);
            }
        }
    }

    #[test]
    fn test_ordered_deck_pairs() {
        let deck = ordered_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(symbol_counts(&deck), [2; SYMBOL_COUNT]);
    }

    #[test]
    fn test_shuffled_deck_keeps_two_of_each() {
        for seed in 0..50 {
            let mut rng = SimpleRng::new(seed);
            let deck = shuffled_deck(&mut rng);
            assert_eq!(symbol_counts(&deck), [2; SYMBOL_COUNT], "seed {}", seed);
        }
    }

    #[test]
    fn test_same_seed_same_deck() {
        let a = shuffled_deck(&mut SimpleRng::new(99));
        let b = shuffled_deck(&mut SimpleRng::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_moves_cards_around() {
        // Across many deals, the first slot should see every symbol.
        let mut rng = SimpleRng::new(3);
        let mut seen = [false; SYMBOL_COUNT];
        for _ in 0..400 {
            let deck = shuffled_deck(&mut rng);
            seen[deck[0].index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
