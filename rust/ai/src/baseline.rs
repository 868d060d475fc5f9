//! Baseline AI implementation.
//!
//! A simple opponent for testing and benchmarking: rule-based strategy from
//! hand strength and pot odds, with no randomness.

use riverstone_engine::analysis::{draw_info, preflop_tier};
use riverstone_engine::cards::Card;
use riverstone_engine::decision::{Decision, DecisionProvider};
use riverstone_engine::game::GameStateSnapshot;
use riverstone_engine::hand::{best_hand, Category};
use riverstone_engine::player::Player;
use riverstone_engine::rules::ValidActions;
use tracing::debug;

use crate::AIOpponent;

/// Simple baseline AI implementation for testing and comparison.
///
/// # Strategy
///
/// **Preflop:**
/// - Strong hands (high pairs, AK, AQ): raise or call
/// - Medium hands (suited connectors, Ax, small pairs): call if cheap
/// - Weak hands: fold to bets, check if free
///
/// **Postflop:**
/// - Strong hands (two pair+): bet or call
/// - Medium hands (one pair, big draws): check or call small bets
/// - Weak hands: fold unless the price is tiny
///
/// # Example
///
/// ```rust
/// use riverstone_ai::baseline::BaselineAI;
/// use riverstone_ai::AIOpponent;
///
/// let ai = BaselineAI::new();
/// assert_eq!(ai.name(), "BaselineAI");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    /// Hand strength on a 0-10 scale.
    ///
    /// Pre-flop this maps the starting-hand tier; post-flop it maps the made
    /// hand category, with a point for a high kicker and a floor of 5 for
    /// draws with eight or more outs.
    pub fn hand_strength(hole: [Card; 2], board: &[Card]) -> u8 {
        if board.len() < 3 {
            return match preflop_tier(hole) {
                1 => 10,
                2 => 8,
                3 => 7,
                4 => 6,
                5 => 5,
                6 => 4,
                7 => 3,
                _ => 1,
            };
        }

        let mut cards = hole.to_vec();
        cards.extend_from_slice(board);
        let Ok(best) = best_hand(&cards) else {
            return 0;
        };
        let base = match best.evaluation.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
        };
        let kicker_boost = u8::from(best.evaluation.kickers.first().is_some_and(|&k| k >= 12));
        let made = (base + kicker_boost).min(10);

        let big_draw = draw_info(hole, board).is_ok_and(|d| d.outs >= 8);
        if big_draw { made.max(5) } else { made }
    }

    /// Share of the pot after calling: `pot / (pot + call)`.
    pub fn pot_odds(pot: u32, call: u32) -> f32 {
        if call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + call) as f32
    }

    /// Picks an offered action for a given strength.
    pub fn decide_action(strength: u8, valid: &ValidActions, pot: u32) -> Decision {
        if valid.can_check {
            return Self::decide_unopened(strength, valid, pot);
        }

        let to_call = valid.call_amount;
        let pot_odds = Self::pot_odds(pot, to_call);
        let offered_call = valid.call.unwrap_or(0);

        // calling would put us all-in for less
        if offered_call < to_call {
            return if strength >= 7 {
                Decision::call()
            } else {
                Decision::fold()
            };
        }

        match strength {
            9..=10 => match (valid.raise, valid.all_in) {
                (Some(r), _) => Decision::raise((to_call + pot / 2).clamp(r.min, r.max)),
                (None, Some(_)) => Decision::all_in(),
                _ => Decision::call(),
            },
            7..=8 => Decision::call(),
            5..=6 if pot_odds >= 0.7 || to_call <= pot / 4 => Decision::call(),
            3..=4 if pot_odds >= 0.8 || to_call <= pot / 6 => Decision::call(),
            _ => Decision::fold(),
        }
    }

    fn decide_unopened(strength: u8, valid: &ValidActions, pot: u32) -> Decision {
        let sized = |numerator: u32, denominator: u32| match valid.raise {
            Some(r) => Decision::raise((pot * numerator / denominator).clamp(r.min, r.max)),
            None => Decision::check(),
        };
        match strength {
            9..=10 => sized(2, 3),
            7..=8 => sized(1, 2),
            _ => Decision::check(),
        }
    }
}

impl DecisionProvider for BaselineAI {
    fn decide(
        &mut self,
        player: &Player,
        state: &GameStateSnapshot,
        valid: &ValidActions,
    ) -> Decision {
        let Some(hole) = player.hole_cards() else {
            return Decision::passive(valid);
        };
        let strength = Self::hand_strength(hole, &state.community_cards);
        let decision = Self::decide_action(strength, valid, state.pot);
        debug!(
            player = player.id,
            phase = %state.phase,
            strength,
            action = ?decision.action,
            "baseline decision"
        );
        decision
    }
}

impl AIOpponent for BaselineAI {
    fn name(&self) -> &str {
        "BaselineAI"
    }
}
