//! Deterministic hand-reading heuristics consumed by decision providers.
//!
//! Everything here is a pure function of the visible cards: no RNG, no hidden
//! state. Outputs are either bounded to `[0, 1]` or small integer counts.

use serde::{Deserialize, Serialize};

use crate::cards::{ensure_distinct, full_deck, Card, Rank, Suit};
use crate::errors::GameError;
use crate::hand::{best_hand, best_score, Category};

/// Worst pre-flop tier; every unlisted holding lands here.
pub const MAX_TIER: u8 = 8;

/// Coarse pre-flop bucket, 1 (premium) ..= 8 (trash).
///
/// ```
/// use riverstone_engine::analysis::preflop_tier;
/// use riverstone_engine::cards::parse_cards;
///
/// let aces = parse_cards("As Ah").unwrap();
/// assert_eq!(preflop_tier([aces[0], aces[1]]), 1);
/// ```
pub fn preflop_tier(hole: [Card; 2]) -> u8 {
    let (a, b) = (hole[0].rank.value(), hole[1].rank.value());
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    let suited = hole[0].suit == hole[1].suit;

    if hi == lo {
        return match hi {
            11..=14 => 1,
            10 => 2,
            9 => 3,
            8 => 4,
            7 => 5,
            5 | 6 => 6,
            _ => 7,
        };
    }

    let gap = hi - lo;
    match (hi, lo, suited) {
        (14, 13, true) => 1,
        (14, 13, false) | (14, 12, true) | (14, 11, true) | (13, 12, true) => 2,
        (14, 10, true) | (14, 12, false) | (13, 11, true) | (12, 11, true) | (11, 10, true) => 3,
        (14, 11, false)
        | (13, 12, false)
        | (13, 10, true)
        | (12, 10, true)
        | (11, 9, true)
        | (10, 9, true)
        | (9, 8, true) => 4,
        (14, _, true)
        | (14, 10, false)
        | (13, 11, false)
        | (12, 11, false)
        | (11, 10, false)
        | (12, 9, true)
        | (10, 8, true)
        | (9, 7, true)
        | (8, 7, true)
        | (7, 6, true) => 5,
        (13, _, true) | (14, 8..=9, false) | (13, 10, false) | (12, 10, false) => 6,
        (_, _, true) if gap <= 2 || hi >= 10 => 7,
        (14, _, false) => 7,
        (_, _, false) if gap == 1 && lo >= 6 => 7,
        _ => MAX_TIER,
    }
}

/// Fast strength guess in `[0, 1]` with no simulation. Not an equity.
///
/// Pre-flop it maps the tier linearly; post-flop it places the made hand's
/// category in one of ten equal bands and uses the top kicker within the band.
pub fn quick_hand_strength(hole: [Card; 2], board: &[Card]) -> Result<f64, GameError> {
    if board.len() < 3 {
        let tier = preflop_tier(hole);
        return Ok((MAX_TIER - tier) as f64 / (MAX_TIER - 1) as f64);
    }
    let cards = with_hole(hole, board);
    ensure_distinct(&cards)?;
    let best = best_hand(&cards)?;
    let band = 1.0 / 10.0;
    let base = (best.evaluation.category.value() - 1) as f64 * band;
    let top = best.evaluation.kickers.first().copied().unwrap_or(0) as f64;
    Ok((base + band * top / 14.0).min(1.0))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawInfo {
    pub flush_draw: bool,
    pub open_ended: bool,
    pub gutshot: bool,
    /// Unseen cards that lift the hand to a better category than it holds now
    /// and better than the board alone would show.
    pub outs: u8,
}

/// Draw detection for flop and turn boards; other board sizes report no draws.
pub fn draw_info(hole: [Card; 2], board: &[Card]) -> Result<DrawInfo, GameError> {
    if !(3..=4).contains(&board.len()) {
        return Ok(DrawInfo::default());
    }
    let cards = with_hole(hole, board);
    ensure_distinct(&cards)?;

    let mut suit_counts = [0u8; 4];
    for c in &cards {
        suit_counts[c.suit.index()] += 1;
    }
    let flush_draw = hole
        .iter()
        .any(|h| suit_counts[h.suit.index()] == 4);

    let mask = rank_mask(&cards);
    let completing = if straight_in(mask) {
        0
    } else {
        (2..=14u8)
            .filter(|&r| mask & (1 << r) == 0 && straight_in(mask | (1 << r)))
            .count()
    };

    let current = best_hand(&cards)?.evaluation.category;
    let mut outs = 0u8;
    for card in unseen(&cards) {
        let mut next = cards.clone();
        next.push(card);
        let improved = best_hand(&next)?.evaluation.category;
        if improved <= current {
            continue;
        }
        let mut board_only = board.to_vec();
        board_only.push(card);
        let board_category = if board_only.len() >= 5 {
            best_hand(&board_only)?.evaluation.category
        } else {
            Category::HighCard
        };
        if improved > board_category {
            outs += 1;
        }
    }

    Ok(DrawInfo {
        flush_draw,
        open_ended: completing >= 2,
        gutshot: completing == 1,
        outs,
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardTexture {
    pub paired: bool,
    pub monotone: bool,
    pub two_tone: bool,
    pub rainbow: bool,
    /// Three distinct ranks fit inside one five-rank window.
    pub connected: bool,
    pub wetness: f64,
}

pub fn board_texture(board: &[Card]) -> BoardTexture {
    if board.is_empty() {
        return BoardTexture::default();
    }
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15];
    for c in board {
        suit_counts[c.suit.index()] += 1;
        rank_counts[c.rank.value() as usize] += 1;
    }
    let max_suit = suit_counts.iter().copied().max().unwrap_or(0);
    let paired = rank_counts.iter().any(|&n| n >= 2);
    let mask = rank_mask(board);
    let most_in_window = |width: u8| {
        (1..=15 - width)
            .map(|lo| (mask >> lo & ((1u16 << width) - 1)).count_ones())
            .max()
            .unwrap_or(0)
    };
    let connected = most_in_window(5) >= 3;
    let broadway = board.iter().filter(|c| c.rank >= Rank::Ten).count();

    let mut wetness: f64 = 0.0;
    wetness += match max_suit {
        0 | 1 => 0.0,
        2 => 0.15,
        _ => 0.35,
    };
    wetness += if connected {
        0.35
    } else if most_in_window(4) >= 2 {
        0.15
    } else {
        0.0
    };
    if broadway >= 2 {
        wetness += 0.1;
    }
    if paired {
        wetness -= 0.1;
    }

    BoardTexture {
        paired,
        monotone: board.len() >= 3 && max_suit as usize == board.len(),
        two_tone: max_suit == 2,
        rainbow: max_suit == 1,
        connected,
        wetness: wetness.clamp(0.0, 1.0),
    }
}

/// Share of unseen opponent holdings this hand beats right now (ties count
/// half). Exhaustive over every two-card combination left in the deck.
pub fn relative_strength(hole: [Card; 2], board: &[Card]) -> Result<f64, GameError> {
    if !(3..=5).contains(&board.len()) {
        return Err(GameError::InvalidCards(format!(
            "relative strength needs 3 to 5 board cards, got {}",
            board.len()
        )));
    }
    let cards = with_hole(hole, board);
    ensure_distinct(&cards)?;
    let ours = best_score(&cards)?;

    let rest = unseen(&cards);
    let mut theirs = board.to_vec();
    let (mut ahead, mut tied, mut total) = (0u32, 0u32, 0u32);
    for i in 0..rest.len() {
        for j in i + 1..rest.len() {
            theirs.truncate(board.len());
            theirs.push(rest[i]);
            theirs.push(rest[j]);
            let score = best_score(&theirs)?;
            match ours.cmp(&score) {
                std::cmp::Ordering::Greater => ahead += 1,
                std::cmp::Ordering::Equal => tied += 1,
                std::cmp::Ordering::Less => {}
            }
            total += 1;
        }
    }
    Ok((ahead as f64 + tied as f64 / 2.0) / total as f64)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockerInfo {
    /// Suit with the most cards on board, when it has at least two.
    pub flush_suit: Option<Suit>,
    pub nut_flush_blocker: bool,
    pub second_nut_flush_blocker: bool,
    /// Hole cards whose rank would complete a straight using the board alone.
    pub straight_blockers: u8,
    pub score: f64,
}

pub fn blockers(hole: [Card; 2], board: &[Card]) -> BlockerInfo {
    let mut suit_counts = [0u8; 4];
    for c in board {
        suit_counts[c.suit.index()] += 1;
    }
    let flush_suit = crate::cards::all_suits()
        .into_iter()
        .filter(|s| suit_counts[s.index()] >= 2)
        .max_by_key(|s| (suit_counts[s.index()], s.index()));

    let (mut nut, mut second) = (false, false);
    if let Some(suit) = flush_suit {
        let mut missing = crate::cards::all_ranks()
            .into_iter()
            .rev()
            .filter(|&r| !board.contains(&Card::new(r, suit)));
        let top = missing.next();
        let next = missing.next();
        nut = top.is_some_and(|r| hole.contains(&Card::new(r, suit)));
        second = next.is_some_and(|r| hole.contains(&Card::new(r, suit)));
    }

    // ranks that finish a straight when paired with any other card
    let board_mask = rank_mask(board);
    let straight_blockers = if board.len() >= 3 {
        hole.iter()
            .filter(|h| {
                let r = h.rank.value();
                board_mask & (1 << r) == 0
                    && (2..=14u8).any(|other| {
                        other != r && straight_in(board_mask | (1 << r) | (1 << other))
                    })
            })
            .count() as u8
    } else {
        0
    };

    let mut score = 0.0;
    if nut {
        score += 0.6;
    }
    if second {
        score += 0.25;
    }
    score += 0.1 * straight_blockers as f64;

    BlockerInfo {
        flush_suit,
        nut_flush_blocker: nut,
        second_nut_flush_blocker: second,
        straight_blockers,
        score: f64::min(score, 1.0),
    }
}

fn with_hole(hole: [Card; 2], board: &[Card]) -> Vec<Card> {
    let mut cards = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(board);
    cards
}

fn unseen(known: &[Card]) -> Vec<Card> {
    full_deck()
        .into_iter()
        .filter(|c| !known.contains(c))
        .collect()
}

/// Bit r set for each rank present; the ace also sets bit 1 for the wheel.
fn rank_mask(cards: &[Card]) -> u16 {
    let mut mask = 0u16;
    for c in cards {
        mask |= 1 << c.rank.value();
    }
    if mask & (1 << 14) != 0 {
        mask |= 1 << 1;
    }
    mask
}

fn straight_in(mask: u16) -> bool {
    let mask = if mask & (1 << 14) != 0 {
        mask | (1 << 1)
    } else {
        mask
    };
    (1..=10u16).any(|lo| (mask >> lo) & 0b1_1111 == 0b1_1111)
}
