//! RNG module - seeded randomness for round generation
//!
//! Implements letter drawing without replacement from the 26-letter pool.
//! The pool is refilled when it runs dry, so any number of letters can be
//! drawn (a single round never needs more than the pool holds).
//!
//! Also provides a simple LCG so that a seed fully determines a game.

use crate::types::LETTER_POOL;

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
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Uniform value in `lo..=hi`.
    pub fn next_between(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo <= hi);
        lo + self.next_range(hi - lo + 1)
    }

    /// Fair coin.
    pub fn next_bool(&mut self) -> bool {
        self.next_range(2) == 1
    }

    /// Current state (a seed that reproduces the remaining sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Letters still available for the current draw.
#[derive(Debug, Clone)]
pub struct LetterPool {
    available: Vec<char>,
}

impl LetterPool {
    pub fn new() -> Self {
        Self {
            available: LETTER_POOL.to_vec(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.available.len()
    }

    /// Take one letter at random, refilling the pool first if it is empty.
    pub fn draw(&mut self, rng: &mut SimpleRng) -> char {
        if self.available.is_empty() {
            self.available.extend_from_slice(&LETTER_POOL);
        }
        let i = rng.next_range(self.available.len() as u32) as usize;
        self.available.swap_remove(i)
    }
}

impl Default for LetterPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw `count` letters from a fresh pool.
///
/// Letters are distinct for the first 26 draws.
pub fn draw_letters(rng: &mut SimpleRng, count: usize) -> Vec<char> {
    let mut pool = LetterPool::new();
    (0..count).map(|_| pool.draw(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_between_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 3];
        for _ in 0..500 {
            let v = rng.next_between(2, 4);
            assert!((2..=4).contains(&v));
            seen[(v - 2) as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_next_bool_produces_both() {
        let mut rng = SimpleRng::new(99);
        let heads = (0..200).filter(|_| rng.next_bool()).count();
        assert!(heads > 0 && heads < 200);
    }

    #[test]
    fn test_draw_letters_without_replacement() {
        let mut rng = SimpleRng::new(42);
        let mut letters = draw_letters(&mut rng, 26);
        letters.sort_unstable();
        assert_eq!(letters, LETTER_POOL.to_vec());
    }

    #[test]
    fn test_pool_refills_when_exhausted() {
        let mut rng = SimpleRng::new(3);
        let letters = draw_letters(&mut rng, 30);
        assert_eq!(letters.len(), 30);
        assert!(letters.iter().all(|c| LETTER_POOL.contains(c)));
    }

    #[test]
    fn test_pool_remaining_counts_down() {
        let mut rng = SimpleRng::new(5);
        let mut pool = LetterPool::new();
        assert_eq!(pool.remaining(), 26);
        pool.draw(&mut rng);
        assert_eq!(pool.remaining(), 25);
    }
}
