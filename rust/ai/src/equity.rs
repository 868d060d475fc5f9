//! Simulation-driven opponent.
//!
//! Estimates equity against the live opponents each turn and compares it to
//! the price of continuing. Facing a big bet it assumes the bettor's range is
//! tight and samples opponents from the stronger pre-flop tiers only.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use riverstone_engine::analysis::{blockers, board_texture};
use riverstone_engine::decision::{Decision, DecisionProvider};
use riverstone_engine::equity::EquityEstimator;
use riverstone_engine::game::GameStateSnapshot;
use riverstone_engine::player::Player;
use riverstone_engine::rules::ValidActions;
use tracing::{debug, warn};

use crate::AIOpponent;

pub const DEFAULT_SIMULATIONS: u32 = 400;
/// Opponent tier ceiling assumed when facing a bet of more than half the pot.
const TIGHT_RANGE_TIER: u8 = 4;
const VALUE_EQUITY: f64 = 0.7;
const BLUFF_FREQUENCY: f64 = 0.08;

#[derive(Debug, Clone)]
pub struct EquityAI {
    estimator: EquityEstimator,
    rng: StdRng,
    simulations: u32,
}

impl EquityAI {
    pub fn new(seed: u64) -> Self {
        Self {
            estimator: EquityEstimator::new(seed),
            rng: StdRng::seed_from_u64(seed ^ 0x5EED),
            simulations: DEFAULT_SIMULATIONS,
        }
    }

    pub fn with_simulations(mut self, simulations: u32) -> Self {
        self.simulations = simulations.max(1);
        self
    }

    /// Chip share needed for a call to break even.
    pub fn required_equity(pot: u32, call: u32) -> f64 {
        if call == 0 {
            0.0
        } else {
            call as f64 / (pot + call) as f64
        }
    }

    fn choose(&mut self, equity: f64, state: &GameStateSnapshot, valid: &ValidActions, bluff_ok: bool) -> Decision {
        let pot = state.pot;
        let value_raise = |fraction_of_pot: f64| match (valid.raise, valid.all_in) {
            (Some(r), _) => {
                let target = valid.call_amount + (pot as f64 * fraction_of_pot) as u32;
                Some(Decision::raise(target.clamp(r.min, r.max)))
            }
            (None, Some(_)) => Some(Decision::all_in()),
            _ => None,
        };

        if valid.can_check {
            if equity >= VALUE_EQUITY || (bluff_ok && self.rng.random_bool(BLUFF_FREQUENCY)) {
                let wet = board_texture(&state.community_cards).wetness;
                // bigger on boards that give draws a reason to continue
                return value_raise(0.5 + 0.25 * wet).unwrap_or(Decision::check());
            }
            return Decision::check();
        }

        let required = Self::required_equity(pot, valid.call_amount);
        if equity >= VALUE_EQUITY.max(required + 0.25) {
            if let Some(raise) = value_raise(0.75) {
                return raise;
            }
        }
        if equity >= required {
            Decision::call()
        } else {
            Decision::fold()
        }
    }
}

impl DecisionProvider for EquityAI {
    fn decide(
        &mut self,
        player: &Player,
        state: &GameStateSnapshot,
        valid: &ValidActions,
    ) -> Decision {
        let Some(hole) = player.hole_cards() else {
            return Decision::passive(valid);
        };
        let opponents = state.live_opponents(player.id);
        let board = &state.community_cards;
        let big_bet = valid.call_amount > state.pot / 2;

        let estimate = if big_bet {
            self.estimator
                .estimate_with_ranges(hole, board, opponents, TIGHT_RANGE_TIER, self.simulations)
        } else {
            self.estimator.estimate(hole, board, opponents, self.simulations)
        };
        let equity = match estimate {
            Ok(r) => r.equity,
            Err(e) => {
                warn!(player = player.id, error = %e, "equity estimate failed, playing passively");
                return if valid.can_check {
                    Decision::check()
                } else {
                    Decision::fold()
                };
            }
        };

        // only represent hands we block on boards that allow them
        let bluff_ok = board.len() >= 3 && blockers(hole, board).nut_flush_blocker;
        let decision = self.choose(equity, state, valid, bluff_ok);
        debug!(
            player = player.id,
            phase = %state.phase,
            equity,
            opponents,
            action = ?decision.action,
            "equity decision"
        );
        decision
    }
}

impl AIOpponent for EquityAI {
    fn name(&self) -> &str {
        "EquityAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riverstone_engine::cards::parse_cards;
    use riverstone_engine::game::Phase;
    use riverstone_engine::rules::{ActionKind, valid_actions, validate_decision};

    fn state(board: &str, pot: u32) -> GameStateSnapshot {
        let players = (0..2).map(|i| Player::new(i, "p", 1_000).view()).collect();
        GameStateSnapshot {
            hand_number: 1,
            phase: Phase::River,
            community_cards: parse_cards(board).unwrap(),
            dealer_index: 0,
            current_bet_to_match: 0,
            min_raise: 10,
            pot,
            small_blind: 5,
            big_blind: 10,
            players,
        }
    }

    fn seated(hole: &str) -> Player {
        let v = parse_cards(hole).unwrap();
        let mut p = Player::new(0, "hero", 1_000);
        p.give_cards([v[0], v[1]]);
        p
    }

    #[test]
    fn nuts_on_the_river_bets() {
        let mut ai = EquityAI::new(1).with_simulations(200);
        let hero = seated("As Ks");
        let va = valid_actions(&hero, 0, 10, true, true);
        let d = ai.decide(&hero, &state("Qs Js Ts 2d 3c", 100), &va);
        assert_eq!(d.action, ActionKind::Raise);
        assert!(validate_decision(&va, d.action, d.amount).is_ok());
    }

    #[test]
    fn air_folds_to_a_big_bet() {
        let mut ai = EquityAI::new(2).with_simulations(300);
        let hero = seated("7c 2d");
        let va = valid_actions(&hero, 300, 300, true, true);
        let d = ai.decide(&hero, &state("Ah Kh Qs 9s 4d", 100), &va);
        assert_eq!(d, Decision::fold());
    }

    #[test]
    fn required_equity_is_price_over_final_pot() {
        assert_eq!(EquityAI::required_equity(100, 0), 0.0);
        assert!((EquityAI::required_equity(100, 50) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_choices() {
        let hero = seated("Jh Tc");
        let va = valid_actions(&hero, 40, 40, true, true);
        let st = state("9d 8s 2c", 120);
        let a = EquityAI::new(5).decide(&hero, &st, &va);
        let b = EquityAI::new(5).decide(&hero, &st, &va);
        assert_eq!(a, b);
    }
}
