use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::player::{PlayerView, STARTING_STACK};

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 10;

/// Betting street. Ordering follows the hand, so phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::PreFlop => Phase::Flop,
            Phase::Flop => Phase::Turn,
            Phase::Turn => Phase::River,
            Phase::River | Phase::Showdown => Phase::Showdown,
        }
    }

    /// Community cards dealt when entering this street.
    pub fn cards_to_deal(self) -> usize {
        match self {
            Phase::Flop => 3,
            Phase::Turn | Phase::River => 1,
            Phase::PreFlop | Phase::Showdown => 0,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::PreFlop => "preflop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::Showdown => "showdown",
        };
        f.write_str(s)
    }
}

/// Table setup. Every field has a default so partial TOML/JSON works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub seats: usize,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub seed: u64,
    /// Seat names; missing entries become "Seat N"
    pub names: Vec<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seats: 6,
            starting_stack: STARTING_STACK,
            small_blind: 5,
            big_blind: 10,
            seed: 0xA1A2_A3A4,
            names: Vec::new(),
        }
    }
}

impl TableConfig {
    /// Checks seat range, blinds and stack. Every chip at the table must fit
    /// in a `u32`, so `seats × starting_stack` is bounded by `u32::MAX`.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.seats) {
            return Err(GameError::InvalidConfig(format!(
                "seats must be between {MIN_SEATS} and {MAX_SEATS}, got {}",
                self.seats
            )));
        }
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(GameError::InvalidConfig("blinds must be positive".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(GameError::InvalidConfig(format!(
                "small blind {} exceeds big blind {}",
                self.small_blind, self.big_blind
            )));
        }
        if self.starting_stack == 0 {
            return Err(GameError::InvalidConfig(
                "starting stack must be positive".into(),
            ));
        }
        let fits = u32::try_from(self.seats)
            .ok()
            .and_then(|seats| seats.checked_mul(self.starting_stack))
            .is_some();
        if !fits {
            return Err(GameError::InvalidConfig(format!(
                "{} seats of {} chips exceed the table chip limit of {}",
                self.seats,
                self.starting_stack,
                u32::MAX
            )));
        }
        Ok(())
    }

    pub fn seat_name(&self, seat: usize) -> String {
        self.names
            .get(seat)
            .cloned()
            .unwrap_or_else(|| format!("Seat {}", seat + 1))
    }
}

/// Read-only view of the table handed to decision providers and observers.
/// Carries no hole cards; a provider sees its own through the `Player` it is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub hand_number: u64,
    pub phase: Phase,
    pub community_cards: Vec<Card>,
    pub dealer_index: usize,
    pub current_bet_to_match: u32,
    pub min_raise: u32,
    pub pot: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub players: Vec<PlayerView>,
}

impl GameStateSnapshot {
    /// Opponents still holding cards, excluding `player_id`.
    pub fn live_opponents(&self, player_id: usize) -> usize {
        self.players
            .iter()
            .filter(|p| p.id != player_id && !p.has_folded && !p.is_busted)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_only_move_forward() {
        let mut p = Phase::PreFlop;
        let mut seen = vec![p];
        while p != Phase::Showdown {
            p = p.next();
            seen.push(p);
        }
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Phase::Showdown.next(), Phase::Showdown);
    }

    #[test]
    fn largest_stack_that_fits_is_accepted() {
        let cfg = TableConfig {
            seats: 10,
            starting_stack: u32::MAX / 10,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
        let over = TableConfig {
            starting_stack: u32::MAX / 10 + 1,
            ..cfg
        };
        assert!(matches!(over.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn config_validation() {
        assert!(TableConfig::default().validate().is_ok());
        let bad = [
            TableConfig { seats: 1, ..Default::default() },
            TableConfig { seats: 11, ..Default::default() },
            TableConfig { small_blind: 0, ..Default::default() },
            TableConfig { small_blind: 20, big_blind: 10, ..Default::default() },
            TableConfig { seats: 2, starting_stack: 3_000_000_000, ..Default::default() },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
        }
    }

    #[test]
    fn partial_config_uses_defaults() {
        let cfg: TableConfig = serde_json::from_str(r#"{"seats": 3}"#).unwrap();
        assert_eq!(cfg.seats, 3);
        assert_eq!(cfg.big_blind, 10);
        assert_eq!(cfg.seat_name(2), "Seat 3");
    }
}
