//! Monte Carlo equity estimation.
//!
//! Results are approximate by nature: the standard error shrinks with
//! `1/√simulations`. Every estimator is seeded, so a given seed and input
//! always yields the same numbers.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::preflop_tier;
use crate::cards::{ensure_distinct, Card};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::best_score;

/// Attempts allowed per requested sample when rejection-sampling ranges.
const RANGE_ATTEMPT_FACTOR: u32 = 4;
/// Minimum share of requested samples a range run must produce to be trusted.
const RANGE_MIN_VALID_SHARE: f64 = 0.2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    /// `(wins + ties / 2) / samples`
    pub equity: f64,
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
    pub samples: u32,
    /// Set when a range-restricted run was too narrow and the unrestricted
    /// estimate was returned instead.
    pub fell_back: bool,
}

impl EquityResult {
    fn from_counts(wins: u32, ties: u32, losses: u32) -> Self {
        let samples = wins + ties + losses;
        let equity = if samples == 0 {
            0.0
        } else {
            (wins as f64 + 0.5 * ties as f64) / samples as f64
        };
        Self {
            equity,
            wins,
            ties,
            losses,
            samples,
            fell_back: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Tie,
    Loss,
}

/// Seeded Monte Carlo equity calculator.
///
/// ```
/// use riverstone_engine::cards::parse_cards;
/// use riverstone_engine::equity::EquityEstimator;
///
/// let hole = parse_cards("As Ah").unwrap();
/// let mut est = EquityEstimator::new(7);
/// let r = est.estimate([hole[0], hole[1]], &[], 1, 2_000).unwrap();
/// assert!(r.equity > 0.75);
/// ```
#[derive(Debug, Clone)]
pub struct EquityEstimator {
    rng: ChaCha20Rng,
}

impl EquityEstimator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Unrestricted estimate against `opponents` random hands.
    pub fn estimate(
        &mut self,
        hole: [Card; 2],
        board: &[Card],
        opponents: usize,
        simulations: u32,
    ) -> Result<EquityResult, GameError> {
        let mut pool = self.pool(hole, board, opponents)?;
        if opponents == 0 {
            return Ok(EquityResult::from_counts(simulations, 0, 0));
        }
        let (mut wins, mut ties, mut losses) = (0, 0, 0);
        for _ in 0..simulations {
            match run_trial(&mut pool, hole, board, opponents, None)? {
                Some(Outcome::Win) => wins += 1,
                Some(Outcome::Tie) => ties += 1,
                Some(Outcome::Loss) => losses += 1,
                None => {}
            }
        }
        Ok(EquityResult::from_counts(wins, ties, losses))
    }

    /// Estimate against opponents whose pre-flop tier is at most `max_tier`.
    ///
    /// Opponent hands are rejection-sampled with at most four attempts per
    /// requested sample. Below a fifth of the requested samples the range is
    /// considered too narrow and the unrestricted estimate is returned with
    /// `fell_back` set.
    pub fn estimate_with_ranges(
        &mut self,
        hole: [Card; 2],
        board: &[Card],
        opponents: usize,
        max_tier: u8,
        simulations: u32,
    ) -> Result<EquityResult, GameError> {
        let mut pool = self.pool(hole, board, opponents)?;
        if opponents == 0 {
            return Ok(EquityResult::from_counts(simulations, 0, 0));
        }
        let max_attempts = simulations.saturating_mul(RANGE_ATTEMPT_FACTOR);
        let (mut wins, mut ties, mut losses) = (0u32, 0u32, 0u32);
        let mut attempts = 0u32;
        while wins + ties + losses < simulations && attempts < max_attempts {
            attempts += 1;
            match run_trial(&mut pool, hole, board, opponents, Some(max_tier))? {
                Some(Outcome::Win) => wins += 1,
                Some(Outcome::Tie) => ties += 1,
                Some(Outcome::Loss) => losses += 1,
                None => {}
            }
        }

        let valid = wins + ties + losses;
        if (valid as f64) < simulations as f64 * RANGE_MIN_VALID_SHARE {
            tracing::debug!(
                valid,
                requested = simulations,
                max_tier,
                "range too narrow, falling back to unrestricted equity"
            );
            let mut fallback = self.estimate(hole, board, opponents, simulations)?;
            fallback.fell_back = true;
            return Ok(fallback);
        }
        Ok(EquityResult::from_counts(wins, ties, losses))
    }

    /// Validates the inputs and builds the reduced deck the trials draw from.
    fn pool(&mut self, hole: [Card; 2], board: &[Card], opponents: usize) -> Result<Deck, GameError> {
        if board.len() > 5 {
            return Err(GameError::InvalidCards(format!(
                "board has {} cards, at most 5 allowed",
                board.len()
            )));
        }
        let mut known = hole.to_vec();
        known.extend_from_slice(board);
        ensure_distinct(&known)?;

        let pool = Deck::with_rng(ChaCha20Rng::from_rng(&mut self.rng)).remove_cards(&known);
        let needed = 5 - board.len() + 2 * opponents;
        if needed > pool.remaining() {
            return Err(GameError::DeckExhausted {
                requested: needed,
                remaining: pool.remaining(),
            });
        }
        Ok(pool)
    }
}

/// One sampled runout. `None` means an opponent hand fell outside the range.
fn run_trial(
    pool: &mut Deck,
    hole: [Card; 2],
    board: &[Card],
    opponents: usize,
    max_tier: Option<u8>,
) -> Result<Option<Outcome>, GameError> {
    pool.shuffle();
    let mut full_board = board.to_vec();
    full_board.extend(pool.deal(5 - board.len())?);

    let mut opponent_holes = Vec::with_capacity(opponents);
    for _ in 0..opponents {
        let cards = pool.deal(2)?;
        let opp = [cards[0], cards[1]];
        if max_tier.is_some_and(|max| preflop_tier(opp) > max) {
            return Ok(None);
        }
        opponent_holes.push(opp);
    }

    let mut seven = Vec::with_capacity(7);
    let mut score = |h: [Card; 2]| {
        seven.clear();
        seven.extend_from_slice(&h);
        seven.extend_from_slice(&full_board);
        best_score(&seven)
    };
    let ours = score(hole)?;
    let mut best_other = 0u32;
    for opp in opponent_holes {
        best_other = best_other.max(score(opp)?);
    }
    Ok(Some(match ours.cmp(&best_other) {
        std::cmp::Ordering::Greater => Outcome::Win,
        std::cmp::Ordering::Equal => Outcome::Tie,
        std::cmp::Ordering::Less => Outcome::Loss,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn hole(s: &str) -> [Card; 2] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1]]
    }

    #[test]
    fn same_seed_same_answer() {
        let a = EquityEstimator::new(5)
            .estimate(hole("Qs Jh"), &[], 2, 500)
            .unwrap();
        let b = EquityEstimator::new(5)
            .estimate(hole("Qs Jh"), &[], 2, 500)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.samples, 500);
    }

    #[test]
    fn made_nuts_on_river_always_wins() {
        let board = parse_cards("Ts Js Qs 2d 3c").unwrap();
        let r = EquityEstimator::new(1)
            .estimate(hole("As Ks"), &board, 3, 300)
            .unwrap();
        assert_eq!(r.equity, 1.0);
        assert_eq!(r.losses, 0);
    }

    #[test]
    fn board_plays_for_everyone_is_all_ties() {
        let board = parse_cards("As Ks Qs Js Ts").unwrap();
        let r = EquityEstimator::new(2)
            .estimate(hole("2c 3d"), &board, 1, 200)
            .unwrap();
        assert_eq!(r.ties, 200);
        assert_eq!(r.equity, 0.5);
    }

    #[test]
    fn no_opponents_means_full_equity() {
        let r = EquityEstimator::new(3)
            .estimate(hole("7c 2d"), &[], 0, 10)
            .unwrap();
        assert_eq!(r.equity, 1.0);
    }

    #[test]
    fn rejects_duplicate_and_oversized_inputs() {
        let mut est = EquityEstimator::new(4);
        let dup = parse_cards("As Kd 2c").unwrap();
        assert!(est.estimate(hole("As Ah"), &dup, 1, 10).is_err());
        let six = parse_cards("2c 3c 4c 5c 6c 7c").unwrap();
        assert!(est.estimate(hole("As Ah"), &six, 1, 10).is_err());
        assert!(matches!(
            est.estimate(hole("As Ah"), &[], 30, 10),
            Err(GameError::DeckExhausted { .. })
        ));
    }

    #[test]
    fn tight_range_lowers_equity_of_a_medium_hand() {
        let loose = EquityEstimator::new(8)
            .estimate(hole("Ts 9s"), &[], 1, 3_000)
            .unwrap();
        let tight = EquityEstimator::new(8)
            .estimate_with_ranges(hole("Ts 9s"), &[], 1, 3, 3_000)
            .unwrap();
        assert!(!tight.fell_back);
        assert!(tight.equity < loose.equity);
    }

    #[test]
    fn impossible_range_falls_back() {
        // tier 1 is JJ+ and AKs; with most of those cards already visible
        // only a handful of combos qualify
        let board = parse_cards("Ah Kh Qh Jh Ad").unwrap();
        let r = EquityEstimator::new(9)
            .estimate_with_ranges(hole("Ac Kc"), &board, 1, 1, 500)
            .unwrap();
        assert!(r.fell_back);
        assert_eq!(r.samples, 500);
    }
}
