//! Input parsing for interactive commands.

use felt_engine::player::Action;

/// Result of parsing a line of player input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(Action),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input into an [`Action`] or a quit request.
///
/// Accepted forms (case-insensitive):
/// - "f" or "fold"
/// - "k" or "check"
/// - "c" or "call"
/// - "b N" or "bet N" (wager-to level)
/// - "r N" or "raise N" (wager-to level)
/// - "a", "allin" or "all-in"
/// - "q" or "quit"
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }
    if parts[0] == "q" || parts[0] == "quit" {
        return ParseResult::Quit;
    }

    match parts[0] {
        "fold" | "f" => ParseResult::Action(Action::Fold),
        "check" | "k" => ParseResult::Action(Action::Check),
        "call" | "c" => ParseResult::Action(Action::Call),
        "bet" | "b" => match parse_amount(&parts) {
            Ok(n) => ParseResult::Action(Action::Bet(n)),
            Err(msg) => ParseResult::Invalid(msg),
        },
        "raise" | "r" => match parse_amount(&parts) {
            Ok(n) => ParseResult::Action(Action::Raise(n)),
            Err(msg) => ParseResult::Invalid(msg),
        },
        "allin" | "all-in" | "a" => ParseResult::Action(Action::AllIn),
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Try f, k, c, b <n>, r <n>, a, or q.",
            other
        )),
    }
}

fn parse_amount(parts: &[&str]) -> Result<u32, String> {
    let Some(raw) = parts.get(1) else {
        return Err(format!("'{}' needs an amount, e.g. '{} 100'", parts[0], parts[0]));
    };
    raw.parse::<u32>()
        .map_err(|_| format!("'{}' is not a valid chip amount", raw))
}
