//! Card, board, and action formatters for terminal display.

use felt_engine::cards::Card;
use felt_engine::player::Action;

/// Format a card as rank plus suit symbol, e.g. "A♠".
pub fn format_card(card: &Card) -> String {
    card.to_string()
}

/// Format a board as a bracketed run of cards, e.g. "[A♠ K♦ 2♥]".
pub fn format_board(cards: &[Card]) -> String {
    let inner: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", inner.join(" "))
}

/// Format two hole cards, e.g. "A♠ K♦".
pub fn format_hole(hole: &[Card; 2]) -> String {
    format!("{} {}", hole[0], hole[1])
}

/// Format an action with the chips it moved, e.g. "raises to 60 (+40)".
pub fn format_action(action: &Action, amount: u32) -> String {
    match action {
        Action::Fold => "folds".to_string(),
        Action::Check => "checks".to_string(),
        Action::Call => format!("calls {}", amount),
        Action::Bet(to) => format!("bets {}", to),
        Action::Raise(to) => format!("raises to {} (+{})", to, amount),
        Action::AllIn => format!("goes all-in for {}", amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use felt_engine::cards::{Rank, Suit};

    #[test]
    fn cards_and_boards_render_with_symbols() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        let k = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(format_card(&a), "A♠");
        assert_eq!(format_board(&[a, k]), "[A♠ K♦]");
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn actions_render_with_amounts() {
        assert_eq!(format_action(&Action::Fold, 0), "folds");
        assert_eq!(format_action(&Action::Call, 40), "calls 40");
        assert_eq!(format_action(&Action::Raise(60), 40), "raises to 60 (+40)");
        assert_eq!(format_action(&Action::AllIn, 980), "goes all-in for 980");
    }
}
