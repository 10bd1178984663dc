//! Round generator - builds the cup configuration for a round.
//!
//! Two-stack rounds draw both pyramid heights independently from the rules'
//! height range and redraw until they differ. The single-stack round builds
//! one fixed-height pyramid on a randomly chosen side.

use tracing::{debug, info};

use crate::cup::Cup;
use crate::layout::level_and_position;
use crate::rng::{draw_letters, SimpleRng};
use crate::types::*;

/// Number of cups in a pyramid of height `h`.
pub fn triangular(h: u32) -> u32 {
    h * (h + 1) / 2
}

/// Parameters governing round shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRules {
    pub min_height: u32,
    pub max_height: u32,
    pub single_stack_round: u32,
    pub single_stack_height: u32,
    pub max_rounds: u32,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            min_height: MIN_STACK_HEIGHT,
            max_height: MAX_STACK_HEIGHT,
            single_stack_round: SINGLE_STACK_ROUND,
            single_stack_height: SINGLE_STACK_HEIGHT,
            max_rounds: MAX_ROUNDS,
        }
    }
}

/// Cup counts for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    pub left: u32,
    pub right: u32,
    pub single_side: Option<Side>,
}

impl RoundConfig {
    pub fn is_single_stack(&self) -> bool {
        self.single_side.is_some()
    }

    pub fn total(&self) -> u32 {
        self.left + self.right
    }
}

/// Seeded generator of round layouts.
#[derive(Debug, Clone)]
pub struct RoundGenerator {
    rules: RoundRules,
    rng: SimpleRng,
}

impl RoundGenerator {
    pub fn new(seed: u32) -> Self {
        Self::with_rules(seed, RoundRules::default())
    }

    /// # Panics
    ///
    /// If `min_height >= max_height`: two-stack rounds could not be
    /// asymmetric.
    pub fn with_rules(seed: u32, rules: RoundRules) -> Self {
        assert!(
            rules.min_height < rules.max_height,
            "stack height range {}..={} cannot give two different heights",
            rules.min_height,
            rules.max_height
        );
        Self {
            rules,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    /// Decide the cup counts for `round`.
    pub fn config_for(&mut self, round: u32) -> RoundConfig {
        if round == self.rules.single_stack_round {
            let total = triangular(self.rules.single_stack_height);
            return if self.rng.next_bool() {
                RoundConfig {
                    left: total,
                    right: 0,
                    single_side: Some(Side::Left),
                }
            } else {
                RoundConfig {
                    left: 0,
                    right: total,
                    single_side: Some(Side::Right),
                }
            };
        }

        let (lo, hi) = (self.rules.min_height, self.rules.max_height);
        loop {
            let left = self.rng.next_between(lo, hi);
            let right = self.rng.next_between(lo, hi);
            if left != right {
                return RoundConfig {
                    left: triangular(left),
                    right: triangular(right),
                    single_side: None,
                };
            }
        }
    }

    /// Build every cup of `round`, all unstacked.
    ///
    /// Returns an empty vector when the configuration has no cups; the caller
    /// treats that round as already complete.
    pub fn generate(&mut self, round: u32) -> Vec<Cup> {
        let config = self.config_for(round);
        info!(
            round,
            left = config.left,
            right = config.right,
            single = config.is_single_stack(),
            "round configured"
        );
        self.build(config)
    }

    /// Build the cups for an explicit configuration.
    pub fn build(&mut self, config: RoundConfig) -> Vec<Cup> {
        let total = config.total() as usize;
        if total == 0 {
            return Vec::new();
        }

        let mut letters = draw_letters(&mut self.rng, total).into_iter();
        let mut cups = Vec::with_capacity(total);
        for (side, count) in [(Side::Left, config.left), (Side::Right, config.right)] {
            let max_level = if count > 0 {
                level_and_position(count, count - 1).0
            } else {
                0
            };
            for stack_index in 0..count {
                let (level, position) = level_and_position(count, stack_index);
                let Some(letter) = letters.next() else {
                    break;
                };
                cups.push(Cup {
                    letter,
                    side,
                    stack_index,
                    level,
                    position,
                    max_level,
                    is_stacked: false,
                    single_stack: config.is_single_stack(),
                });
            }
        }

        debug!(cups = cups.len(), "round cups generated");
        cups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_triangular() {
        assert_eq!(triangular(0), 0);
        assert_eq!(triangular(1), 1);
        assert_eq!(triangular(3), 6);
        assert_eq!(triangular(5), 15);
    }

    #[test]
    fn test_two_stack_heights_always_differ() {
        let mut gen = RoundGenerator::new(1234);
        for _ in 0..200 {
            let config = gen.config_for(1);
            assert_ne!(config.left, config.right);
            assert!(config.single_side.is_none());
            for count in [config.left, config.right] {
                assert!([3, 6, 10].contains(&count), "unexpected count {count}");
            }
        }
    }

    #[test]
    #[should_panic(expected = "cannot give two different heights")]
    fn test_single_height_range_is_rejected() {
        let rules = RoundRules {
            min_height: 3,
            max_height: 3,
            ..RoundRules::default()
        };
        RoundGenerator::with_rules(1, rules);
    }

    #[test]
    fn test_two_height_range_alternates_sizes() {
        let rules = RoundRules {
            min_height: 2,
            max_height: 3,
            ..RoundRules::default()
        };
        let mut gen = RoundGenerator::with_rules(6, rules);
        for _ in 0..50 {
            let config = gen.config_for(1);
            let mut counts = [config.left, config.right];
            counts.sort_unstable();
            assert_eq!(counts, [3, 6]);
        }
    }

    #[test]
    fn test_single_stack_round_uses_one_side() {
        let mut gen = RoundGenerator::new(77);
        let mut sides = HashSet::new();
        for _ in 0..100 {
            let cups = gen.generate(SINGLE_STACK_ROUND);
            assert_eq!(cups.len(), 15);
            let side = cups[0].side;
            assert!(cups.iter().all(|c| c.side == side && c.single_stack));
            sides.insert(side);
        }
        assert_eq!(sides.len(), 2, "both sides should be chosen eventually");
    }

    #[test]
    fn test_cups_have_unique_slots_and_letters() {
        let mut gen = RoundGenerator::new(9);
        for round in 1..=MAX_ROUNDS {
            let cups = gen.generate(round);
            let slots: HashSet<_> = cups.iter().map(|c| (c.side, c.level, c.position)).collect();
            assert_eq!(slots.len(), cups.len());
            let letters: HashSet<_> = cups.iter().map(|c| c.letter).collect();
            assert_eq!(letters.len(), cups.len());
            assert!(cups.iter().all(|c| !c.is_stacked));
        }
    }

    #[test]
    fn test_max_level_matches_pyramid_height() {
        let mut gen = RoundGenerator::new(5);
        let cups = gen.build(RoundConfig {
            left: 6,
            right: 10,
            single_side: None,
        });
        for cup in &cups {
            let expected = if cup.side == Side::Left { 2 } else { 3 };
            assert_eq!(cup.max_level, expected);
        }
    }

    #[test]
    fn test_zero_cups_yields_empty_round() {
        let rules = RoundRules {
            single_stack_height: 0,
            ..RoundRules::default()
        };
        let mut gen = RoundGenerator::with_rules(1, rules);
        assert!(gen.generate(SINGLE_STACK_ROUND).is_empty());
    }

    #[test]
    fn test_same_seed_same_round() {
        let mut a = RoundGenerator::new(42);
        let mut b = RoundGenerator::new(42);
        assert_eq!(a.generate(1), b.generate(1));
    }
}
