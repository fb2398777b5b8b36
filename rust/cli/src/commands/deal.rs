//! Deal a single hand face-up for inspection.

use std::io::Write;

use felt_engine::deck::Deck;
use felt_engine::hand::{describe, evaluate};
use serde::Serialize;

use crate::error::CliError;
use crate::formatters::{format_board, format_hole};

#[derive(Debug, Serialize)]
struct DealOutput {
    seed: Option<u64>,
    hole: [felt_engine::cards::Card; 2],
    flop: Vec<felt_engine::cards::Card>,
    turn: felt_engine::cards::Card,
    river: felt_engine::cards::Card,
    best_hand: String,
}

pub fn handle_deal_command(
    seed: Option<u64>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut deck = match seed {
        Some(s) => Deck::new_with_seed(s),
        None => Deck::new(),
    };
    deck.reset();

    let draw = |deck: &mut Deck| {
        deck.deal_card()
            .ok_or_else(|| CliError::Engine("deck exhausted".to_string()))
    };

    let hole = [draw(&mut deck)?, draw(&mut deck)?];
    deck.burn_card();
    let flop = deck.deal(3);
    if flop.len() != 3 {
        return Err(CliError::Engine("deck exhausted".to_string()));
    }
    deck.burn_card();
    let turn = draw(&mut deck)?;
    deck.burn_card();
    let river = draw(&mut deck)?;

    let mut seven = hole.to_vec();
    seven.extend_from_slice(&flop);
    seven.push(turn);
    seven.push(river);
    let best = evaluate(&seven).map_err(|e| CliError::Engine(e.to_string()))?;
    let best_hand = describe(&best);

    if json {
        let output = DealOutput {
            seed,
            hole,
            flop: flop.clone(),
            turn,
            river,
            best_hand,
        };
        let rendered = serde_json::to_string_pretty(&output)
            .map_err(|e| CliError::Engine(e.to_string()))?;
        writeln!(out, "{}", rendered)?;
        return Ok(());
    }

    if let Some(s) = seed {
        writeln!(out, "Seed: {}", s)?;
    }
    writeln!(out, "Hole: {}", format_hole(&hole))?;
    writeln!(out, "Flop: {}", format_board(&flop))?;
    writeln!(out, "Turn: {}", turn)?;
    writeln!(out, "River: {}", river)?;
    writeln!(out, "Best hand: {}", best_hand)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_deals_are_reproducible() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        handle_deal_command(Some(42), false, &mut a).unwrap();
        handle_deal_command(Some(42), false, &mut b).unwrap();
        assert_eq!(a, b);
        let text = String::from_utf8(a).unwrap();
        assert!(text.contains("Hole:"));
        assert!(text.contains("Best hand:"));
    }

    #[test]
    fn json_output_parses_back() {
        let mut out = Vec::new();
        handle_deal_command(Some(7), true, &mut out).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["seed"], 7);
        assert_eq!(v["flop"].as_array().unwrap().len(), 3);
        assert!(v["best_hand"].is_string());
    }
}
