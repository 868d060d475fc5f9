use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{ensure_distinct, Card};
use crate::errors::GameError;

const RADIX: u32 = 15;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of scoring exactly five cards.
///
/// `score` is `category·15⁵ + Σ kickerᵢ·15⁴⁻ⁱ`, so integer comparison alone
/// orders any two hands, and equal scores are equal hands by poker rules.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandEvaluation {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: Vec<u8>,
    pub score: u32,
}

impl HandEvaluation {
    pub fn beats(&self, other: &HandEvaluation) -> bool {
        self.score > other.score
    }
}

/// Best five-card hand chosen from a larger set.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BestHand {
    pub evaluation: HandEvaluation,
    pub cards: [Card; 5],
}

/// Scores exactly five cards.
///
/// # Errors
///
/// [`GameError::InvalidHandSize`] for any other card count and
/// [`GameError::InvalidCards`] if a card repeats.
///
/// # Examples
///
/// ```
/// use riverstone_engine::cards::parse_cards;
/// use riverstone_engine::hand::{evaluate, Category};
///
/// let quads = parse_cards("Ks Kh Kd Kc 2h").unwrap();
/// let eval = evaluate(&quads).unwrap();
/// assert_eq!(eval.category, Category::FourOfAKind);
/// assert_eq!(eval.kickers, vec![13, 2]);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandEvaluation, GameError> {
    let five: &[Card; 5] = cards.try_into().map_err(|_| GameError::InvalidHandSize {
        expected: "exactly 5",
        actual: cards.len(),
    })?;
    ensure_distinct(five)?;
    let (category, kickers, len) = classify(five);
    Ok(HandEvaluation {
        category,
        kickers: kickers[..len].to_vec(),
        score: score_of(category, &kickers),
    })
}

/// Exhaustively picks the best five of 5..=7 cards (21 subsets for seven).
pub fn best_hand(cards: &[Card]) -> Result<BestHand, GameError> {
    check_best_hand_input(cards)?;
    let mut best: Option<([Card; 5], u32)> = None;
    for_each_five(cards, |five| {
        let (category, kickers, _) = classify(&five);
        let score = score_of(category, &kickers);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((five, score));
        }
    });
    let (five, _) = best.ok_or(GameError::InvalidHandSize {
        expected: "5 to 7",
        actual: cards.len(),
    })?;
    Ok(BestHand {
        evaluation: evaluate(&five)?,
        cards: five,
    })
}

/// Score-only variant of [`best_hand`] for hot simulation loops.
pub fn best_score(cards: &[Card]) -> Result<u32, GameError> {
    check_best_hand_input(cards)?;
    let mut best = 0u32;
    for_each_five(cards, |five| {
        let (category, kickers, _) = classify(&five);
        best = best.max(score_of(category, &kickers));
    });
    Ok(best)
}

pub fn compare_hands(a: &HandEvaluation, b: &HandEvaluation) -> Ordering {
    a.score.cmp(&b.score)
}

fn check_best_hand_input(cards: &[Card]) -> Result<(), GameError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(GameError::InvalidHandSize {
            expected: "5 to 7",
            actual: cards.len(),
        });
    }
    ensure_distinct(cards)
}

fn for_each_five(cards: &[Card], mut f: impl FnMut([Card; 5])) {
    let n = cards.len();
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        f([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
}

fn score_of(category: Category, kickers: &[u8; 5]) -> u32 {
    kickers
        .iter()
        .fold(category.value() as u32, |acc, &k| acc * RADIX + k as u32)
}

/// Rank-multiset classification. Returns the category, the kicker digits
/// (zero padded) and how many of them are meaningful.
fn classify(cards: &[Card; 5]) -> (Category, [u8; 5], usize) {
    let mut counts = [0u8; 15]; // 2..14 used
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);

    // (count, rank) groups, largest group first, then highest rank
    let mut groups = [(0u8, 0u8); 5];
    let mut n = 0;
    for r in (2..=14u8).rev() {
        if counts[r as usize] > 0 {
            groups[n] = (counts[r as usize], r);
            n += 1;
        }
    }
    groups[..n].sort_unstable_by(|a, b| b.cmp(a));

    let mut ranks = [0u8; 5];
    for (slot, g) in ranks.iter_mut().zip(&groups[..n]) {
        *slot = g.1;
    }

    if n == 5 {
        if let Some(high) = straight_high(&counts) {
            let category = match (flush, high) {
                (true, 14) => Category::RoyalFlush,
                (true, _) => Category::StraightFlush,
                (false, _) => Category::Straight,
            };
            return (category, [high, 0, 0, 0, 0], 1);
        }
        if flush {
            return (Category::Flush, ranks, 5);
        }
        return (Category::HighCard, ranks, 5);
    }

    let category = match (groups[0].0, groups[1].0) {
        (4, _) => Category::FourOfAKind,
        (3, 2) => Category::FullHouse,
        (3, _) => Category::ThreeOfAKind,
        (2, 2) => Category::TwoPair,
        _ => Category::OnePair,
    };
    (category, ranks, n)
}

/// High card of a five-distinct-rank straight; the wheel A-2-3-4-5 reports 5.
fn straight_high(counts: &[u8; 15]) -> Option<u8> {
    let present = |r: u8| {
        let r = if r == 1 { 14 } else { r };
        counts[r as usize] > 0
    };
    (5..=14u8)
        .rev()
        .find(|&high| (high - 4..=high).all(present))
}
