use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{ensure_distinct, full_deck, Card};
use crate::errors::GameError;

/// A sequence of distinct cards dealt from a cursor, shuffled by its own seeded RNG.
///
/// Dealing never reorders `cards`; it only advances `position`, so the dealt
/// prefix stays inspectable and [`Deck::shuffle`] always permutes the full set.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: ChaCha20Rng) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    /// Fisher–Yates over every card in the deck; resets the dealing cursor.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    /// Deals `n` cards, or nothing at all if fewer than `n` remain.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining,
            });
        }
        let dealt = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(dealt)
    }

    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    /// Replaces the card order with `cards`, dealt front to back. The RNG is
    /// kept, so a later [`Deck::shuffle`] continues the seeded sequence.
    pub fn stack(&mut self, cards: Vec<Card>) -> Result<(), GameError> {
        ensure_distinct(&cards)?;
        self.cards = cards;
        self.position = 0;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Builds a simulation deck holding the full deck minus `known`.
    ///
    /// The returned deck runs on a separate ChaCha stream cloned from this
    /// deck's RNG, so the live deck (cards, cursor and RNG state) is untouched
    /// and the result is reproducible for a given seed.
    pub fn remove_cards(&self, known: &[Card]) -> Deck {
        let mut rng = self.rng.clone();
        rng.set_stream(self.rng.get_stream().wrapping_add(1));
        Deck {
            cards: full_deck()
                .into_iter()
                .filter(|c| !known.contains(c))
                .collect(),
            position: 0,
            rng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn deal_fails_without_consuming_when_short() {
        let mut deck = Deck::new_with_seed(3);
        deck.deal(50).unwrap();
        let err = deck.deal(3).unwrap_err();
        assert_eq!(
            err,
            GameError::DeckExhausted {
                requested: 3,
                remaining: 2
            }
        );
        assert_eq!(deck.remaining(), 2);
        assert_eq!(deck.deal(2).unwrap().len(), 2);
    }

    #[test]
    fn remove_cards_leaves_live_deck_alone() {
        let mut live = Deck::new_with_seed(11);
        live.shuffle();
        let known: Vec<Card> = live.clone().deal(4).unwrap();
        let before: Vec<Card> = live.clone().deal(52).unwrap();

        let mut sim = live.remove_cards(&known);
        assert_eq!(sim.remaining(), 48);
        sim.shuffle();
        let drawn: HashSet<Card> = sim.deal(48).unwrap().into_iter().collect();
        assert!(known.iter().all(|c| !drawn.contains(c)));

        assert_eq!(live.remaining(), 52);
        assert_eq!(live.deal(52).unwrap(), before);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut deck = Deck::new_with_seed(99);
        deck.shuffle();
        let cards: HashSet<Card> = deck.deal(52).unwrap().into_iter().collect();
        assert_eq!(cards.len(), 52);
    }
}
