use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A shuffled 52-card dealing source. One deck exists per hand; `reset`
/// rebuilds and reshuffles the full deck, `deal` removes cards from the top.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// OS-seeded deck for normal play.
    pub fn new() -> Self {
        Self {
            cards: full_deck(),
            position: 0,
            rng: ChaCha20Rng::from_os_rng(),
        }
    }

    /// Seeded deck for reproducible deals in tests and simulations.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            cards: full_deck(),
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Rebuild the full 52-card deck and shuffle it (Fisher-Yates via the
    /// slice shuffle), discarding whatever was dealt.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    /// Remove and return the first `n` cards; returns fewer if the deck runs
    /// out.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.deal_card()).collect()
    }

    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
