//! Interactive play against scripted opponents.
//!
//! One human seat (or a bot stand-in under `--auto`) plus 1-8 bots. The
//! engine runs every bot turn to completion and pauses when the human must
//! act; this module renders the event stream, prompts, and feeds parsed
//! input back in.

use std::io::{BufRead, Write};

use felt_ai::{Profile, create_policy, create_policy_seeded};
use felt_engine::events::{EventBuffer, GameEvent};
use felt_engine::table::{ActionPolicy, Street, TableConfig, TableEngine};
use tracing::debug;

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_action, format_board, format_hole};
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};

const DEFAULT_ROTATION: [Profile; 5] = [
    Profile::TightAggressive,
    Profile::LoosePassive,
    Profile::Adaptive,
    Profile::LooseAggressive,
    Profile::TightPassive,
];

/// Hands played in one `--auto` run when no explicit limit is given.
const AUTO_HAND_LIMIT: u32 = 100;

pub fn handle_play_command(
    bots: u8,
    hands: Option<u32>,
    seed: Option<u64>,
    auto: bool,
    personality: Vec<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = seed.or(cfg.seed);
    let profiles = resolve_profiles(&personality, &cfg.personalities)?;

    let table_config = TableConfig {
        starting_stack: cfg.starting_stack,
        small_blind: cfg.small_blind,
        big_blind: cfg.big_blind,
    };

    let buffer = EventBuffer::new();
    let mut table = match seed {
        Some(s) => {
            debug!(seed = s, "seeded table");
            TableEngine::with_seed(table_config, buffer.sink(), s)
        }
        None => TableEngine::new(table_config, buffer.sink()),
    };

    let make_policy = |profile: Profile, n: u64| -> Box<dyn ActionPolicy> {
        match seed {
            Some(s) => create_policy_seeded(profile, s.wrapping_add(n)),
            None => create_policy(profile),
        }
    };

    if auto {
        table.seat_bot("Hero", make_policy(Profile::Adaptive, 0));
    } else {
        table.seat_human("You");
    }
    for i in 0..bots as usize {
        let profile = profiles[i % profiles.len()];
        let name = format!("Bot {} [{}]", i + 1, profile.label());
        table.seat_bot(&name, make_policy(profile, i as u64 + 1));
    }
    let names: Vec<String> = table.players().iter().map(|p| p.name.clone()).collect();

    table.start()?;
    render_events(&buffer.drain(), &names, out, err)?;
    if let Some(s) = seed {
        writeln!(out, "Seed: {}", s)?;
    }

    let limit = hands.or(if auto { Some(AUTO_HAND_LIMIT) } else { None });
    let mut played = 0u32;
    loop {
        if table.start_new_hand().is_err() {
            break;
        }
        render_events(&buffer.drain(), &names, out, err)?;

        while table.waiting_for_human() {
            prompt(&table, out)?;
            let Some(line) = read_line(stdin) else {
                return Err(CliError::Interrupted("input closed mid-hand".to_string()));
            };
            match parse_player_action(&line) {
                ParseResult::Quit => {
                    writeln!(out, "Quitting; thanks for playing.")?;
                    return Ok(());
                }
                ParseResult::Invalid(msg) => {
                    ui::write_error(err, &msg)?;
                }
                ParseResult::Action(action) => {
                    let result = match action {
                        felt_engine::player::Action::Fold => table.human_fold(),
                        felt_engine::player::Action::Check => table.human_check(),
                        felt_engine::player::Action::Call => table.human_call(),
                        felt_engine::player::Action::Bet(to) => table.human_bet(to),
                        felt_engine::player::Action::Raise(to) => table.human_raise(to),
                        felt_engine::player::Action::AllIn => table.human_all_in(),
                    };
                    if let Err(e) = result {
                        ui::write_error(err, &e.to_string())?;
                    }
                }
            }
            render_events(&buffer.drain(), &names, out, err)?;
        }

        played += 1;
        write_standings(&table, out)?;
        if table.street() == Street::GameOver {
            break;
        }
        if let Some(limit) = limit
            && played >= limit
        {
            break;
        }
    }
    render_events(&buffer.drain(), &names, out, err)?;
    writeln!(out, "Session over after {} hand(s).", played)?;
    Ok(())
}

fn resolve_profiles(cli: &[String], config: &[String]) -> Result<Vec<Profile>, CliError> {
    let requested = if !cli.is_empty() { cli } else { config };
    if requested.is_empty() {
        return Ok(DEFAULT_ROTATION.to_vec());
    }
    requested
        .iter()
        .map(|s| {
            Profile::parse(s)
                .ok_or_else(|| CliError::InvalidInput(format!("unknown personality '{}'", s)))
        })
        .collect()
}

fn read_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn prompt(table: &TableEngine, out: &mut dyn Write) -> Result<(), CliError> {
    let seat = table.acting();
    let p = &table.players()[seat];
    if let (Some(c1), Some(c2)) = (p.hole[0], p.hole[1]) {
        writeln!(out, "Your hand: {}", format_hole(&[c1, c2]))?;
    }
    if !table.community().is_empty() {
        writeln!(out, "Board: {}", format_board(table.community()))?;
    }
    writeln!(
        out,
        "Pot: {}  To call: {}  Stack: {}",
        table.pot_total(),
        table.to_call(),
        p.stack
    )?;
    write!(out, "Action (f/k/c/b <n>/r <n>/a/q): ")?;
    out.flush()?;
    Ok(())
}

fn write_standings(table: &TableEngine, out: &mut dyn Write) -> Result<(), CliError> {
    let line: Vec<String> = table
        .players()
        .iter()
        .map(|p| format!("{}: {}", p.name, p.stack))
        .collect();
    writeln!(out, "Stacks - {}", line.join(", "))?;
    Ok(())
}

fn render_events(
    events: &[GameEvent],
    names: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let name = |seat: usize| names.get(seat).map(String::as_str).unwrap_or("?");
    for event in events {
        match event {
            GameEvent::PlayersInitialized { names } => {
                writeln!(out, "Seated: {}", names.join(", "))?;
            }
            GameEvent::NewHand {
                hand_number,
                dealer,
            } => {
                writeln!(out, "--- Hand {} (dealer: {}) ---", hand_number, name(*dealer))?;
            }
            GameEvent::BlindsPosted { small, big } => {
                writeln!(out, "Blinds posted: {}/{}", small, big)?;
            }
            GameEvent::ActionProcessed {
                seat,
                action,
                amount,
            } => {
                writeln!(out, "{} {}", name(*seat), format_action(action, *amount))?;
            }
            GameEvent::BettingRoundComplete { pot } => {
                writeln!(out, "Pot: {}", pot)?;
            }
            GameEvent::FlopDealt { cards } => {
                writeln!(out, "Flop: {}", format_board(cards))?;
            }
            GameEvent::TurnDealt { card } => {
                writeln!(out, "Turn: {}", card)?;
            }
            GameEvent::RiverDealt { card } => {
                writeln!(out, "River: {}", card)?;
            }
            GameEvent::Showdown { reveals } => {
                for r in reveals {
                    writeln!(
                        out,
                        "{} shows {} ({})",
                        name(r.seat),
                        format_hole(&r.hole),
                        r.description
                    )?;
                }
            }
            GameEvent::PotsDistributed { payouts, .. } => {
                for p in payouts {
                    match p.kind {
                        felt_engine::pot::PayoutKind::Win => {
                            writeln!(out, "{} wins {}", name(p.seat), p.amount)?;
                        }
                        felt_engine::pot::PayoutKind::Return => {
                            writeln!(out, "{} gets back {} uncalled", name(p.seat), p.amount)?;
                        }
                    }
                }
            }
            GameEvent::SinglePlayerWin { seat, amount } => {
                writeln!(out, "{} takes the pot ({})", name(*seat), amount)?;
            }
            GameEvent::GameOver { winner } => {
                writeln!(out, "{} wins the game!", name(*winner))?;
            }
            GameEvent::IntegrityError { expected, actual } => {
                tracing::error!(expected, actual, "chip conservation violated");
                ui::display_warning(
                    err,
                    &format!("chip total {} does not match expected {}", actual, expected),
                )?;
            }
            GameEvent::HoleCardsDealt
            | GameEvent::PlayerTurn { .. }
            | GameEvent::ActionLogged { .. }
            | GameEvent::HandComplete { .. } => {}
        }
    }
    Ok(())
}
