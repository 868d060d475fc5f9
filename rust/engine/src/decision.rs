//! The contract between the table and whatever chooses actions.
//!
//! The engine never knows what sits behind a [`DecisionProvider`]: a scripted
//! closure, a strategy from another crate or a relay to a remote client.

use serde::{Deserialize, Serialize};

use crate::game::GameStateSnapshot;
use crate::player::Player;
use crate::rules::{ActionKind, ValidActions};

/// What a provider wants to do. `amount` is the chips moved this action and
/// is only needed for raises; calls and all-ins default to the offered amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
}

impl Decision {
    pub fn fold() -> Self {
        Self {
            action: ActionKind::Fold,
            amount: None,
        }
    }
    pub fn check() -> Self {
        Self {
            action: ActionKind::Check,
            amount: None,
        }
    }
    pub fn call() -> Self {
        Self {
            action: ActionKind::Call,
            amount: None,
        }
    }
    pub fn raise(amount: u32) -> Self {
        Self {
            action: ActionKind::Raise,
            amount: Some(amount),
        }
    }
    pub fn all_in() -> Self {
        Self {
            action: ActionKind::AllIn,
            amount: None,
        }
    }

    /// Check when possible, otherwise call.
    pub fn passive(valid: &ValidActions) -> Self {
        if valid.can_check {
            Self::check()
        } else {
            Self::call()
        }
    }
}

/// Identifies the single turn the table is waiting on.
///
/// `turn` counts granted turns within the hand, so a ticket from an earlier
/// turn of the same player never matches the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnTicket {
    pub hand_number: u64,
    pub turn: u32,
    pub player_id: usize,
}

/// Chooses an action for `player` given a public snapshot and the offered set.
///
/// `player` is the acting seat's full ledger including its hole cards.
pub trait DecisionProvider {
    fn decide(
        &mut self,
        player: &Player,
        state: &GameStateSnapshot,
        valid: &ValidActions,
    ) -> Decision;
}

impl<F> DecisionProvider for F
where
    F: FnMut(&Player, &GameStateSnapshot, &ValidActions) -> Decision,
{
    fn decide(
        &mut self,
        player: &Player,
        state: &GameStateSnapshot,
        valid: &ValidActions,
    ) -> Decision {
        self(player, state, valid)
    }
}

/// One provider per seat, dispatched on the acting player's id.
/// Seats without a provider check or call.
#[derive(Default)]
pub struct SeatProviders {
    seats: Vec<Option<Box<dyn DecisionProvider>>>,
}

impl SeatProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seat(mut self, seat: usize, provider: Box<dyn DecisionProvider>) -> Self {
        if self.seats.len() <= seat {
            self.seats.resize_with(seat + 1, || None);
        }
        self.seats[seat] = Some(provider);
        self
    }
}

impl DecisionProvider for SeatProviders {
    fn decide(
        &mut self,
        player: &Player,
        state: &GameStateSnapshot,
        valid: &ValidActions,
    ) -> Decision {
        match self.seats.get_mut(player.id).and_then(Option::as_mut) {
            Some(provider) => provider.decide(player, state, valid),
            None => Decision::passive(valid),
        }
    }
}
