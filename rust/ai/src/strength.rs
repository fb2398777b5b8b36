//! Stateless hand-strength and pot-odds estimators consumed by the bot
//! policy. Everything here is a pure function of its inputs apart from the
//! small behavioral jitter in [`should_call`].

use felt_engine::cards::{Card, Suit};
use felt_engine::hand::evaluate;
use rand::Rng;

/// Chen-like pre-flop score normalized to [0, 1].
///
/// Base score from the higher card (A=10, K=8, Q=7, J=6, else rank/2),
/// doubled with a floor of 5 when paired, +2 suited, and a gap adjustment
/// (+1 for connectors, -1/-2/-4 for wider gaps). Divided by 20 and clamped.
pub fn preflop_strength(a: Card, b: Card) -> f64 {
    let (high, low) = if a.value() >= b.value() {
        (a.value(), b.value())
    } else {
        (b.value(), a.value())
    };
    let mut score = match high {
        14 => 10.0,
        13 => 8.0,
        12 => 7.0,
        11 => 6.0,
        v => f64::from(v) / 2.0,
    };
    if high == low {
        score = (score * 2.0).max(5.0);
    } else {
        if a.suit == b.suit {
            score += 2.0;
        }
        match high - low {
            1 => score += 1.0,
            2 => score -= 1.0,
            3 => score -= 2.0,
            _ => score -= 4.0,
        }
    }
    (score / 20.0).clamp(0.0, 1.0)
}

/// Post-flop score in [0, 1]: evaluator ranking scaled by /10 plus a small
/// top-card bonus, discounted by 0.95 per additional opponent, plus a
/// weighted draw-potential bonus. Falls back to the pre-flop score while
/// fewer than five cards are known.
pub fn postflop_strength(hole: [Card; 2], community: &[Card], opponents: usize) -> f64 {
    let mut cards: Vec<Card> = vec![hole[0], hole[1]];
    cards.extend_from_slice(community);

    let base = match evaluate(&cards) {
        Ok(rank) => {
            let top = f64::from(rank.values.first().copied().unwrap_or(0));
            f64::from(rank.category.ordinal()) / 10.0 + top / 140.0
        }
        Err(_) => preflop_strength(hole[0], hole[1]),
    };
    let discount = 0.95f64.powi(opponents.saturating_sub(1) as i32);
    let draw = draw_bonus(&cards);
    (base * discount + 0.15 * draw).clamp(0.0, 1.0)
}

/// Draw potential: 0.35 for a four-card flush draw, 0.32 for an open-ended
/// straight draw, 0.15 for a gutshot; additive, capped at 1.
fn draw_bonus(cards: &[Card]) -> f64 {
    let mut bonus = 0.0;

    let mut suit_counts = [0u8; 4];
    for c in cards {
        suit_counts[suit_index(c.suit)] += 1;
    }
    if suit_counts.iter().any(|&n| n == 4) {
        bonus += 0.35;
    }

    // Ace counts both high and low for straight draws.
    let mut vals: Vec<u8> = cards.iter().map(|c| c.value()).collect();
    if vals.contains(&14) {
        vals.push(1);
    }
    vals.sort_unstable();
    vals.dedup();

    let mut open_ended = false;
    let mut gutshot = false;
    for low in 1..=11u8 {
        if (low..low + 4).all(|v| vals.binary_search(&v).is_ok()) {
            open_ended = true;
        }
    }
    for low in 1..=10u8 {
        let present = (low..low + 5).filter(|v| vals.binary_search(v).is_ok()).count();
        if present == 4 {
            gutshot = true;
        }
    }
    if open_ended {
        bonus += 0.32;
    } else if gutshot {
        bonus += 0.15;
    }

    f64::min(bonus, 1.0)
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// Pot odds for calling a wager. `ratio` of `None` encodes infinite odds
/// (nothing to call).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotOdds {
    pub ratio: Option<f64>,
    pub required_equity: f64,
}

pub fn pot_odds(pot: u32, call: u32) -> PotOdds {
    if call == 0 {
        return PotOdds {
            ratio: None,
            required_equity: 0.0,
        };
    }
    let ratio = f64::from(pot) / f64::from(call);
    PotOdds {
        ratio: Some(ratio),
        required_equity: 1.0 / (ratio + 1.0),
    }
}

/// Compare hand strength against the required equity, with up to ±0.05 of
/// jitter for behavioral variance.
pub fn should_call<R: Rng>(strength: f64, odds: &PotOdds, rng: &mut R) -> bool {
    let jitter = (rng.random::<f64>() - 0.5) * 0.1;
    strength + jitter >= odds.required_equity
}
