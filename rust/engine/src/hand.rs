use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::EvalError;

/// Hand category in ascending strength order. The discriminant is the
/// ordinal exposed through [`HandRank::values`]-based comparison (1..=10).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
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
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "Pair",
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

/// Result of evaluating a 5..=7 card set: the category, the ordered
/// tie-break keys (most significant first), and the best five cards.
///
/// Comparison is total: category first, then `values` element-wise with
/// missing trailing elements treated as 0.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub values: Vec<u8>,
    pub cards: Vec<Card>,
}

/// Rank the best 5-card hand out of 5, 6, or 7 cards.
///
/// For 6 or 7 cards every 5-card subset is evaluated and the maximum is
/// kept; a straight or flush hidden in one subset is never missed.
pub fn evaluate(cards: &[Card]) -> Result<HandRank, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::NotEnoughCards(cards.len()));
    }
    if cards.len() == 5 {
        let five = [cards[0], cards[1], cards[2], cards[3], cards[4]];
        return Ok(rank_five(five));
    }

    let n = cards.len();
    let mut best = rank_five([cards[0], cards[1], cards[2], cards[3], cards[4]]);
    for a in 0..n - 4 {
        for b in a + 1..n - 3 {
            for c in b + 1..n - 2 {
                for d in c + 1..n - 1 {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let r = rank_five(five);
                        if compare(&r, &best) == Ordering::Greater {
                            best = r;
                        }
                    }
                }
            }
        }
    }
    Ok(best)
}

/// Total comparator over evaluation results: category, then values
/// lexicographically (missing trailing elements compare as 0).
pub fn compare(a: &HandRank, b: &HandRank) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => {
            let len = a.values.len().max(b.values.len());
            for i in 0..len {
                let va = a.values.get(i).copied().unwrap_or(0);
                let vb = b.values.get(i).copied().unwrap_or(0);
                match va.cmp(&vb) {
                    Ordering::Equal => continue,
                    ord => return ord,
                }
            }
            Ordering::Equal
        }
        ord => ord,
    }
}

/// Human label for a result, e.g. "Two Pair, Aces and Nines".
pub fn describe(rank: &HandRank) -> String {
    let name = |i: usize| Rank::from_u8(rank.values.get(i).copied().unwrap_or(2)).name();
    match rank.category {
        Category::HighCard => format!("High Card, {} high", name(0)),
        Category::OnePair => format!("Pair of {}s", name(0)),
        Category::TwoPair => format!("Two Pair, {}s and {}s", name(0), name(1)),
        Category::ThreeOfAKind => format!("Three of a Kind, {}s", name(0)),
        Category::Straight => format!("Straight, {} high", name(0)),
        Category::Flush => format!("Flush, {} high", name(0)),
        Category::FullHouse => format!("Full House, {}s over {}s", name(0), name(1)),
        Category::FourOfAKind => format!("Four of a Kind, {}s", name(0)),
        Category::StraightFlush => format!("Straight Flush, {} high", name(0)),
        Category::RoyalFlush => "Royal Flush".to_string(),
    }
}

fn rank_five(mut five: [Card; 5]) -> HandRank {
    five.sort_by(|a, b| b.value().cmp(&a.value()));
    let values: Vec<u8> = five.iter().map(|c| c.value()).collect();
    let flush = five.iter().all(|c| c.suit == five[0].suit);
    let straight_high = straight_high(&values);

    // Rank groups ordered by (size desc, value desc); this ordering is the
    // source of all kicker ordering below.
    let groups = group_values(&values);
    let sizes: Vec<u8> = groups.iter().map(|&(count, _)| count).collect();
    let cards = five.to_vec();

    if flush {
        if let Some(high) = straight_high {
            if high == 14 {
                return HandRank {
                    category: Category::RoyalFlush,
                    values: vec![14],
                    cards,
                };
            }
            return HandRank {
                category: Category::StraightFlush,
                values: vec![high],
                cards,
            };
        }
    }

    if sizes == [4, 1] {
        return HandRank {
            category: Category::FourOfAKind,
            values: vec![groups[0].1, groups[1].1],
            cards,
        };
    }
    if sizes == [3, 2] {
        return HandRank {
            category: Category::FullHouse,
            values: vec![groups[0].1, groups[1].1],
            cards,
        };
    }
    if flush {
        return HandRank {
            category: Category::Flush,
            values,
            cards,
        };
    }
    if let Some(high) = straight_high {
        return HandRank {
            category: Category::Straight,
            values: vec![high],
            cards,
        };
    }
    if sizes == [3, 1, 1] {
        return HandRank {
            category: Category::ThreeOfAKind,
            values: vec![groups[0].1, groups[1].1, groups[2].1],
            cards,
        };
    }
    if sizes == [2, 2, 1] {
        return HandRank {
            category: Category::TwoPair,
            values: vec![groups[0].1, groups[1].1, groups[2].1],
            cards,
        };
    }
    if sizes == [2, 1, 1, 1] {
        return HandRank {
            category: Category::OnePair,
            values: vec![groups[0].1, groups[1].1, groups[2].1, groups[3].1],
            cards,
        };
    }
    HandRank {
        category: Category::HighCard,
        values,
        cards,
    }
}

/// Straight detection over descending values. The wheel (A,5,4,3,2) ranks
/// as a 5-high straight; the ace counts low only in that one case.
fn straight_high(desc: &[u8]) -> Option<u8> {
    if desc.windows(2).all(|w| w[0] == w[1] + 1) {
        return Some(desc[0]);
    }
    if desc == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

fn group_values(desc: &[u8]) -> Vec<(u8, u8)> {
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
    for &v in desc {
        match groups.iter_mut().find(|(_, gv)| *gv == v) {
            Some(g) => g.0 += 1,
            None => groups.push((1, v)),
        }
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    groups
}
