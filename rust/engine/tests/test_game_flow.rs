use std::collections::VecDeque;

use felt_engine::events::{EventBuffer, GameEvent, NullSink};
use felt_engine::player::Action;
use felt_engine::table::{ActionPolicy, Street, TableConfig, TableEngine, TableView};

/// Plays a queued script, then calls down (call when owed, check otherwise).
struct ScriptBot {
    script: VecDeque<Action>,
}

impl ScriptBot {
    fn new(script: Vec<Action>) -> Box<dyn ActionPolicy> {
        Box::new(Self {
            script: script.into(),
        })
    }

    fn caller() -> Box<dyn ActionPolicy> {
        Self::new(Vec::new())
    }
}

impl ActionPolicy for ScriptBot {
    fn decide(&mut self, view: &TableView) -> Action {
        if let Some(action) = self.script.pop_front() {
            return action;
        }
        if view.seat.to_call > 0 {
            Action::Call
        } else {
            Action::Check
        }
    }
}

/// Shoves every chance it gets.
struct ShoveBot;

impl ActionPolicy for ShoveBot {
    fn decide(&mut self, _view: &TableView) -> Action {
        Action::AllIn
    }
}

fn stack_total(table: &TableEngine) -> u32 {
    table.players().iter().map(|p| p.stack).sum::<u32>() + table.pot_total()
}

#[test]
fn bot_only_hand_runs_to_completion() {
    let buffer = EventBuffer::new();
    let mut table = TableEngine::with_seed(TableConfig::default(), buffer.sink(), 11);
    table.seat_bot("a", ScriptBot::caller());
    table.seat_bot("b", ScriptBot::caller());
    table.seat_bot("c", ScriptBot::caller());
    table.start().unwrap();
    table.start_new_hand().unwrap();

    assert_eq!(table.street(), Street::HandComplete);
    assert!(!table.waiting_for_human());
    assert_eq!(table.community().len(), 5);

    let events = buffer.drain();
    assert!(events.iter().any(|e| matches!(e, GameEvent::NewHand { hand_number: 1, .. })));
    assert!(events.iter().any(|e| matches!(e, GameEvent::BlindsPosted { small: 10, big: 20 })));
    assert!(events.iter().any(|e| matches!(e, GameEvent::FlopDealt { .. })));
    assert!(events.iter().any(|e| matches!(e, GameEvent::TurnDealt { .. })));
    assert!(events.iter().any(|e| matches!(e, GameEvent::RiverDealt { .. })));
    assert!(events.iter().any(|e| matches!(e, GameEvent::Showdown { .. })));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::PotsDistributed { payouts, evaluations }
            if !payouts.is_empty() && !evaluations.is_empty()
    )));
    assert!(events.iter().any(|e| matches!(e, GameEvent::HandComplete { hand_number: 1 })));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::IntegrityError { .. })));

    assert_eq!(stack_total(&table), 3_000);
}

#[test]
fn table_pauses_for_the_human_turn() {
    let buffer = EventBuffer::new();
    let mut table = TableEngine::with_seed(TableConfig::default(), buffer.sink(), 3);
    table.seat_human("you");
    table.seat_bot("b", ScriptBot::caller());
    table.seat_bot("c", ScriptBot::caller());
    table.start().unwrap();
    table.start_new_hand().unwrap();

    // Seat 0 holds the button for hand 1 and acts first pre-flop.
    assert!(table.waiting_for_human());
    assert_eq!(table.acting(), 0);
    assert_eq!(table.to_call(), 20);
    let events = buffer.drain();
    assert!(events.iter().any(|e| matches!(e, GameEvent::PlayerTurn { seat: 0 })));
    assert_ne!(table.street(), Street::HandComplete);

    table.human_call().unwrap();
    // The callers check everything down; no further human input needed.
    assert_eq!(table.street(), Street::HandComplete);
    assert_eq!(stack_total(&table), 3_000);
}

#[test]
fn invalid_human_action_keeps_the_pause() {
    let mut table = TableEngine::with_seed(TableConfig::default(), Box::new(NullSink), 3);
    table.seat_human("you");
    table.seat_bot("b", ScriptBot::caller());
    table.seat_bot("c", ScriptBot::caller());
    table.start().unwrap();
    table.start_new_hand().unwrap();

    assert!(table.waiting_for_human());
    assert!(table.human_check().is_err());
    assert!(table.waiting_for_human());
    assert_eq!(table.acting(), 0);

    table.human_fold().unwrap();
    assert!(!table.players()[0].in_hand() || table.street() == Street::HandComplete);
}

#[test]
fn human_input_is_ignored_without_a_pending_turn() {
    let mut table = TableEngine::with_seed(TableConfig::default(), Box::new(NullSink), 3);
    table.seat_human("you");
    table.seat_bot("b", ScriptBot::caller());
    table.start().unwrap();

    // No hand dealt yet: every entry point is a quiet no-op.
    assert!(table.human_fold().is_ok());
    assert!(table.human_bet(100).is_ok());
    assert_eq!(table.street(), Street::Waiting);
}

#[test]
fn everyone_folding_awards_the_pot_uncontested() {
    let buffer = EventBuffer::new();
    let mut table = TableEngine::with_seed(TableConfig::default(), buffer.sink(), 8);
    table.seat_bot("a", ScriptBot::new(vec![Action::Fold]));
    table.seat_bot("b", ScriptBot::new(vec![Action::Fold]));
    table.seat_bot("c", ScriptBot::caller());
    table.start().unwrap();
    table.start_new_hand().unwrap();

    let events = buffer.drain();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::SinglePlayerWin { .. })));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Showdown { .. })));
    assert_eq!(table.street(), Street::HandComplete);
    assert_eq!(stack_total(&table), 3_000);
}

#[test]
fn a_raise_reopens_the_betting_round() {
    let buffer = EventBuffer::new();
    let mut table = TableEngine::with_seed(TableConfig::default(), buffer.sink(), 5);
    // Seat 0 opens with a call, seat 1 raises to 60, the round must come
    // back around to seat 0.
    table.seat_bot("a", ScriptBot::caller());
    table.seat_bot("b", ScriptBot::new(vec![Action::Raise(60)]));
    table.seat_bot("c", ScriptBot::caller());
    table.start().unwrap();
    table.start_new_hand().unwrap();

    let preflop: Vec<_> = table
        .action_log()
        .iter()
        .filter(|r| r.street == Street::PreFlop)
        .collect();
    let seat0_acts: Vec<_> = preflop.iter().filter(|r| r.seat == 0).collect();
    assert_eq!(seat0_acts.len(), 2, "seat 0 must act again after the raise");
    assert_eq!(seat0_acts[0].amount, 20);
    assert_eq!(seat0_acts[1].amount, 40);

    // 60 from each of three seats.
    let events = buffer.drain();
    let first_round_pot = events.iter().find_map(|e| match e {
        GameEvent::BettingRoundComplete { pot } => Some(*pot),
        _ => None,
    });
    assert_eq!(first_round_pot, Some(180));
    assert_eq!(stack_total(&table), 3_000);
}

#[test]
fn chips_are_conserved_across_many_hands() {
    let buffer = EventBuffer::new();
    let mut table = TableEngine::with_seed(TableConfig::default(), buffer.sink(), 99);
    for name in ["a", "b", "c", "d"] {
        table.seat_bot(name, ScriptBot::caller());
    }
    table.start().unwrap();

    for _ in 0..50 {
        if table.start_new_hand().is_err() {
            break;
        }
        assert_eq!(stack_total(&table), 4_000);
        assert!(!buffer
            .drain()
            .iter()
            .any(|e| matches!(e, GameEvent::IntegrityError { .. })));
    }
    assert!(table.hand_number() >= 1);
    assert!(!table.action_log().is_empty());
}

#[test]
fn dealer_button_rotates_each_hand() {
    let mut table = TableEngine::with_seed(TableConfig::default(), Box::new(NullSink), 21);
    for name in ["a", "b", "c"] {
        table.seat_bot(name, ScriptBot::caller());
    }
    table.start().unwrap();

    let mut dealers = Vec::new();
    for _ in 0..3 {
        table.start_new_hand().unwrap();
        dealers.push(table.dealer());
    }
    assert_eq!(dealers, vec![0, 1, 2]);
}

#[test]
fn all_in_collision_ends_the_game() {
    let config = TableConfig {
        starting_stack: 100,
        small_blind: 10,
        big_blind: 20,
    };
    let buffer = EventBuffer::new();
    let mut table = TableEngine::with_seed(config, buffer.sink(), 17);
    table.seat_bot("shove", Box::new(ShoveBot));
    table.seat_bot("call", ScriptBot::caller());
    table.start().unwrap();

    // Every hand both stacks go in pre-flop; ties split, anything else
    // busts a seat and ends the game.
    for _ in 0..30 {
        if table.street() == Street::GameOver || table.start_new_hand().is_err() {
            break;
        }
        assert_eq!(stack_total(&table), 200);
    }
    assert_eq!(table.street(), Street::GameOver);
    let winner = table
        .players()
        .iter()
        .find(|p| p.stack > 0)
        .map(|p| p.id)
        .unwrap();
    assert_eq!(table.players()[winner].stack, 200);
    assert!(buffer
        .drain()
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { winner: w } if *w == winner)));

    // A further hand cannot start.
    assert!(table.start_new_hand().is_err());
}

#[test]
fn busted_seat_is_skipped_but_keeps_its_index() {
    let config = TableConfig {
        starting_stack: 100,
        small_blind: 10,
        big_blind: 20,
    };
    let mut table = TableEngine::with_seed(config, Box::new(NullSink), 13);
    table.seat_bot("shove", Box::new(ShoveBot));
    table.seat_bot("fold1", ScriptBot::new(vec![Action::Fold; 40]));
    table.seat_bot("call", ScriptBot::caller());
    table.start().unwrap();

    for _ in 0..30 {
        if table.street() == Street::GameOver || table.start_new_hand().is_err() {
            break;
        }
        // Seat ids never move, whatever busts.
        for (i, p) in table.players().iter().enumerate() {
            assert_eq!(p.id, i);
        }
        assert_eq!(stack_total(&table), 300);
    }
}
