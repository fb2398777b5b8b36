use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// A player action as requested by a human or a bot policy.
///
/// `Bet` and `Raise` carry the new wager level for the current round
/// ("raise to"), not the increment; the chips actually moved are
/// `level - round_bet`, clamped to the stack.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid when nothing is owed)
    Check,
    /// Call the outstanding bet, paying min(owed, stack)
    Call,
    /// Open the betting to the given level
    Bet(u32),
    /// Raise the outstanding bet to the given level
    Raise(u32),
    /// Wager the full remaining stack
    AllIn,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Fold => "fold",
            Action::Check => "check",
            Action::Call => "call",
            Action::Bet(_) => "bet",
            Action::Raise(_) => "raise",
            Action::AllIn => "all-in",
        }
    }
}

/// Seat state owned exclusively by the table: stack, wagers, hole cards and
/// the per-hand flags. Created once per seat at game start; `reset_for_hand`
/// clears the per-hand fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier, assigned at seating and never reused
    pub id: usize,
    pub name: String,
    /// Remaining chips, never negative
    pub stack: u32,
    pub is_human: bool,
    pub hole: [Option<Card>; 2],
    /// Chips wagered in the current betting round
    pub round_bet: u32,
    /// Cumulative chips wagered in the hand
    pub total_bet: u32,
    pub folded: bool,
    pub all_in: bool,
    /// Display string of the most recent action
    pub last_action: Option<String>,
}

impl Player {
    pub fn new(id: usize, name: &str, stack: u32, is_human: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            stack,
            is_human,
            hole: [None, None],
            round_bet: 0,
            total_bet: 0,
            folded: false,
            all_in: false,
            last_action: None,
        }
    }

    pub fn reset_for_hand(&mut self) {
        self.hole = [None, None];
        self.round_bet = 0;
        self.total_bet = 0;
        self.folded = false;
        self.all_in = false;
        self.last_action = None;
    }

    pub fn give_card(&mut self, c: Card) {
        if self.hole[0].is_none() {
            self.hole[0] = Some(c);
        } else if self.hole[1].is_none() {
            self.hole[1] = Some(c);
        }
    }

    /// Whether this seat can still take a betting action.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in && self.stack > 0
    }

    pub fn in_hand(&self) -> bool {
        !self.folded && self.hole[0].is_some()
    }

    /// Move up to `amount` chips from the stack into the current wager,
    /// returning the chips actually paid. Emptying the stack marks the seat
    /// all-in.
    pub fn pay(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.round_bet += paid;
        self.total_bet += paid;
        if self.stack == 0 && paid > 0 {
            self.all_in = true;
        }
        paid
    }
}
