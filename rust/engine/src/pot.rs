use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hand::{compare, HandRank};

/// One rung of the side-pot ladder: an amount and the seats eligible to
/// contest it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    pub eligible: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutKind {
    /// Pot won at comparison (possibly a split share)
    Win,
    /// Uncalled wager returned to its sole contributor
    Return,
}

/// A single payout operation. Operations are never merged across pots, so
/// one seat can receive both a `Return` and one or more `Win`s in a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub seat: usize,
    pub amount: u32,
    pub kind: PayoutKind,
}

/// Converts per-seat contributions into the main/side-pot partition and
/// distributes pots to winners. Pots are a derived view: `rebuild` replaces
/// the whole partition from scratch each time contributions settle.
#[derive(Debug, Default)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the pot partition from cumulative per-seat contributions.
    ///
    /// Walks the distinct non-zero contribution levels ascending; each level
    /// collects `min(level, contribution) - previous_level` from every seat
    /// still owing, and is contested by every non-folded seat whose
    /// contribution reaches the level. A bigger bettor nobody matched ends
    /// up with a pot whose only eligible seat is themselves (a refund pot).
    pub fn rebuild(&mut self, contributions: &[u32], folded: &[bool]) {
        self.pots.clear();
        let mut levels: Vec<u32> = contributions.iter().copied().filter(|&c| c > 0).collect();
        levels.sort_unstable();
        levels.dedup();

        let mut prev = 0u32;
        for &level in &levels {
            let mut amount = 0u32;
            let mut eligible = Vec::new();
            for (seat, &c) in contributions.iter().enumerate() {
                if c > prev {
                    amount += c.min(level) - prev;
                }
                if c >= level && !folded[seat] {
                    eligible.push(seat);
                }
            }
            if amount > 0 {
                self.pots.push(Pot { amount, eligible });
            }
            prev = level;
        }
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }

    pub fn clear(&mut self) {
        self.pots.clear();
    }

    /// Distribute every pot, in ladder order, producing one operation per
    /// winner (or refund recipient) per pot.
    ///
    /// `button_order` lists seats clockwise starting left of the dealer; it
    /// decides both the winner iteration order and who receives the integer
    /// remainder of a split (the seat closest to the button, always
    /// deterministically).
    pub fn distribute(
        &self,
        button_order: &[usize],
        folded: &[bool],
        results: &HashMap<usize, HandRank>,
    ) -> Vec<Payout> {
        let mut payouts = Vec::new();
        for pot in &self.pots {
            let mut live: Vec<usize> = button_order
                .iter()
                .copied()
                .filter(|&s| pot.eligible.contains(&s) && !folded[s] && results.contains_key(&s))
                .collect();

            // An uncalled wager goes straight back to its contributor, even
            // without a showdown result for the seat.
            if live.is_empty() {
                live = button_order
                    .iter()
                    .copied()
                    .filter(|&s| pot.eligible.contains(&s) && !folded[s])
                    .collect();
            }
            if live.is_empty() {
                continue;
            }
            if live.len() == 1 {
                payouts.push(Payout {
                    seat: live[0],
                    amount: pot.amount,
                    kind: PayoutKind::Return,
                });
                continue;
            }

            let mut winners: Vec<usize> = vec![live[0]];
            for &seat in &live[1..] {
                match compare(&results[&seat], &results[&winners[0]]) {
                    std::cmp::Ordering::Greater => winners = vec![seat],
                    std::cmp::Ordering::Equal => winners.push(seat),
                    std::cmp::Ordering::Less => {}
                }
            }

            let share = pot.amount / winners.len() as u32;
            let remainder = pot.amount % winners.len() as u32;
            for (i, &seat) in winners.iter().enumerate() {
                let extra = if i == 0 { remainder } else { 0 };
                payouts.push(Payout {
                    seat,
                    amount: share + extra,
                    kind: PayoutKind::Win,
                });
            }
        }
        payouts
    }
}
