use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Phase;
use crate::hand::Category;
use crate::player::PlayerView;
use crate::pot::Pot;
use crate::rules::{ActionKind, ValidActions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindPost {
    pub player_id: usize,
    pub amount: u32,
}

/// Best hand shown at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShownHand {
    pub category: Category,
    pub cards: [Card; 5],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerInfo {
    pub player_id: usize,
    /// Summed over every pot this player won
    pub amount: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<ShownHand>,
}

/// Lifecycle notifications, in the order the engine produces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    HandStart {
        hand_number: u64,
        dealer_index: usize,
        players: Vec<PlayerView>,
    },
    BlindsPosted {
        small_blind: BlindPost,
        big_blind: BlindPost,
    },
    /// Seats that received hole cards; the cards themselves stay private.
    HoleCardsDealt {
        players: Vec<usize>,
    },
    PhaseChange {
        phase: Phase,
    },
    CommunityCardsDealt {
        phase: Phase,
        cards: Vec<Card>,
    },
    AwaitingAction {
        player_id: usize,
        valid_actions: ValidActions,
        call_amount: u32,
        min_raise: u32,
        max_raise: u32,
        pot: u32,
    },
    PlayerActed {
        player_id: usize,
        action: ActionKind,
        amount: u32,
        pot: u32,
    },
    HandEnd {
        winners: Vec<WinnerInfo>,
        pots: Vec<Pot>,
        community_cards: Vec<Card>,
        showdown: bool,
    },
    PlayerEliminated {
        player_id: usize,
    },
    GameOver {
        winner_id: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_snake_case_tag() {
        let ev = EngineEvent::PlayerActed {
            player_id: 2,
            action: ActionKind::AllIn,
            amount: 300,
            pot: 450,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "player_acted");
        assert_eq!(json["action"], "all_in");

        let back: EngineEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, ev);
    }
}
