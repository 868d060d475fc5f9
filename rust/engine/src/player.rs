use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 1_000;

/// One seat's chip ledger for the current hand.
///
/// Only the engine mutates players. `chips + total_bet_this_hand` stays
/// constant through a hand until pots are paid out at resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat index, also the player identifier
    pub id: usize,
    pub name: String,
    /// Chips behind (not yet wagered)
    chips: u32,
    /// Chips wagered on the current street
    current_bet: u32,
    /// Chips wagered over the whole hand
    total_bet_this_hand: u32,
    has_folded: bool,
    is_all_in: bool,
    has_acted_this_round: bool,
    is_busted: bool,
    /// Hole cards, cleared on fold
    hole: Option<[Card; 2]>,
}

impl Player {
    pub fn new(id: usize, name: impl Into<String>, chips: u32) -> Self {
        Self {
            id,
            name: name.into(),
            chips,
            current_bet: 0,
            total_bet_this_hand: 0,
            has_folded: false,
            is_all_in: false,
            has_acted_this_round: false,
            is_busted: chips == 0,
            hole: None,
        }
    }

    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn total_bet_this_hand(&self) -> u32 {
        self.total_bet_this_hand
    }
    pub fn has_folded(&self) -> bool {
        self.has_folded
    }
    pub fn is_all_in(&self) -> bool {
        self.is_all_in
    }
    pub fn has_acted_this_round(&self) -> bool {
        self.has_acted_this_round
    }
    pub fn is_busted(&self) -> bool {
        self.is_busted
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }

    /// Still holding cards in the current hand.
    pub fn is_live(&self) -> bool {
        !self.is_busted && !self.has_folded
    }

    /// Live and not all-in: can still put chips in.
    pub fn can_act(&self) -> bool {
        self.is_live() && !self.is_all_in
    }

    /// Moves up to `amount` chips into the pot and returns how many moved.
    /// A bet that empties the stack marks the player all-in.
    pub fn bet(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.chips);
        self.chips -= moved;
        self.current_bet += moved;
        self.total_bet_this_hand += moved;
        if self.chips == 0 && moved > 0 {
            self.is_all_in = true;
        }
        moved
    }

    pub fn fold(&mut self) {
        self.has_folded = true;
        self.hole = None;
    }

    pub fn mark_acted(&mut self) {
        self.has_acted_this_round = true;
    }

    pub fn reopen(&mut self) {
        self.has_acted_this_round = false;
    }

    pub fn give_cards(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    pub fn award(&mut self, amount: u32) {
        self.chips += amount;
    }

    pub fn mark_busted(&mut self) {
        self.is_busted = true;
        self.hole = None;
    }

    /// Clears per-hand state. Busted players stay out.
    pub fn reset_for_new_hand(&mut self) {
        self.current_bet = 0;
        self.total_bet_this_hand = 0;
        self.has_folded = self.is_busted;
        self.is_all_in = false;
        self.has_acted_this_round = false;
        self.hole = None;
    }

    pub fn reset_for_street(&mut self) {
        self.current_bet = 0;
        self.has_acted_this_round = false;
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            id: self.id,
            name: self.name.clone(),
            chips: self.chips,
            current_bet: self.current_bet,
            total_bet_this_hand: self.total_bet_this_hand,
            has_folded: self.has_folded,
            is_all_in: self.is_all_in,
            is_busted: self.is_busted,
        }
    }
}

/// Public projection of a [`Player`]; never carries hole cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: usize,
    pub name: String,
    pub chips: u32,
    pub current_bet: u32,
    pub total_bet_this_hand: u32,
    pub has_folded: bool,
    pub is_all_in: bool,
    pub is_busted: bool,
}
