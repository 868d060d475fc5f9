use serde::{Deserialize, Serialize};

/// A main or side pot and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Seat ids in ascending order
    pub eligible: Vec<usize>,
}

/// What one seat put into the pot this hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub player_id: usize,
    pub total_bet: u32,
    pub folded: bool,
}

/// Splits the hand's contributions into main and side pots.
///
/// Thresholds are the distinct contribution levels ascending. The pot at
/// level `t` (previous level `p`) collects `min(bet, t) - min(bet, p)` from
/// everybody, and is eligible to non-folded players who put in at least `t`.
/// A level that only folded players reached has nobody to pay out to, so its
/// chips are merged into the pot below it (or the next one up if it is the
/// lowest).
///
/// ```
/// use riverstone_engine::pot::{calculate_side_pots, Contribution};
///
/// let pots = calculate_side_pots(&[
///     Contribution { player_id: 0, total_bet: 50, folded: false },
///     Contribution { player_id: 1, total_bet: 100, folded: false },
///     Contribution { player_id: 2, total_bet: 100, folded: false },
/// ]);
/// assert_eq!(pots[0].amount, 150);
/// assert_eq!(pots[0].eligible, vec![0, 1, 2]);
/// assert_eq!(pots[1].amount, 100);
/// assert_eq!(pots[1].eligible, vec![1, 2]);
/// ```
pub fn calculate_side_pots(contributions: &[Contribution]) -> Vec<Pot> {
    let mut thresholds: Vec<u32> = contributions
        .iter()
        .map(|c| c.total_bet)
        .filter(|&b| b > 0)
        .collect();
    thresholds.sort_unstable();
    thresholds.dedup();

    let mut pots: Vec<Pot> = Vec::with_capacity(thresholds.len());
    let mut orphaned = 0u32;
    let mut prev = 0u32;
    for t in thresholds {
        let amount: u32 = contributions
            .iter()
            .map(|c| c.total_bet.min(t) - c.total_bet.min(prev))
            .sum();
        let mut eligible: Vec<usize> = contributions
            .iter()
            .filter(|c| !c.folded && c.total_bet >= t)
            .map(|c| c.player_id)
            .collect();
        eligible.sort_unstable();
        prev = t;

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(last) => last.amount += amount,
                None => orphaned += amount,
            }
            continue;
        }
        match pots.last_mut() {
            // same contenders as the level below: one pot, not two
            Some(last) if last.eligible == eligible => last.amount += amount + orphaned,
            _ => pots.push(Pot {
                amount: amount + orphaned,
                eligible,
            }),
        }
        orphaned = 0;
    }
    pots
}

/// Divides `amount` evenly; leftover chips go one at a time to `winners`
/// in the order given. Returns `(seat, share)` pairs in that same order.
pub fn split_pot(amount: u32, winners: &[usize]) -> Vec<(usize, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u32;
    let base = amount / n;
    let remainder = (amount % n) as usize;
    winners
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, base + u32::from(i < remainder)))
        .collect()
}

pub fn total(pots: &[Pot]) -> u32 {
    pots.iter().map(|p| p.amount).sum()
}
