use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{ActionRecord, EventSink, GameEvent, ShowdownReveal};
use crate::hand::{describe, evaluate, HandRank};
use crate::player::{Action, Player};
use crate::pot::PotManager;
use crate::rules::{validate_action, ValidatedAction};

/// Betting phase of the current hand, plus the lifecycle states around it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// No hand dealt yet
    Waiting,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    HandComplete,
    /// Fewer than 2 players retain chips
    GameOver,
}

/// Table stakes and starting chips.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TableConfig {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: 1_000,
            small_blind: 10,
            big_blind: 20,
        }
    }
}

/// Coarse position of a seat relative to the button, used by policies to
/// scale their thresholds.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PositionClass {
    Early,
    Middle,
    Late,
}

/// The acting seat's private slice of a [`TableView`].
#[derive(Debug, Clone)]
pub struct SeatView {
    pub seat: usize,
    pub stack: u32,
    pub round_bet: u32,
    pub hole: [Option<Card>; 2],
    /// Chips owed to match the table-high bet
    pub to_call: u32,
}

/// Read-only snapshot of the table handed to a policy for one decision.
/// Constructed by the table; contains no references back into it.
#[derive(Debug, Clone)]
pub struct TableView {
    pub street: Street,
    pub community: Vec<Card>,
    /// Settled pots plus current-round contributions
    pub pot_total: u32,
    pub current_bet: u32,
    pub min_raise: u32,
    pub big_blind: u32,
    pub seat: SeatView,
    pub position: PositionClass,
    /// Non-folded opponents still contesting the hand
    pub active_opponents: usize,
}

/// Decision capability for a non-human seat. The table owns one per bot and
/// calls `decide` with a fresh snapshot whenever the seat must act;
/// `observe` lets adaptive policies track the other seats across hands.
pub trait ActionPolicy {
    fn decide(&mut self, view: &TableView) -> Action;
    fn observe(&mut self, _seat: usize, _action: &Action) {}
}

/// The betting state machine. Owns players, deck, pots and the current
/// street; sequences blinds, turns, streets, showdown and the hand
/// lifecycle, publishing [`GameEvent`]s to the sink as it goes.
///
/// Everything is synchronous and single-writer: bot turns run to completion
/// inside the call that triggered them, and the machine pauses only when
/// the human seat must act (`waiting_for_human`). Human action methods are
/// no-ops unless that pause is active, so stale input is never applied.
pub struct TableEngine {
    config: TableConfig,
    players: Vec<Player>,
    policies: Vec<Option<Box<dyn ActionPolicy>>>,
    deck: Deck,
    pots: PotManager,
    street: Street,
    dealer: usize,
    acting: usize,
    community: Vec<Card>,
    current_bet: u32,
    min_raise: u32,
    has_acted: Vec<bool>,
    /// Seats dealt into the current hand; busted seats leave the rotation
    in_rotation: Vec<bool>,
    hand_number: u64,
    waiting_for_human: bool,
    starting_total: u32,
    log: Vec<ActionRecord>,
    sink: Box<dyn EventSink>,
}

impl TableEngine {
    pub fn new(config: TableConfig, sink: Box<dyn EventSink>) -> Self {
        Self::with_deck(config, sink, Deck::new())
    }

    /// Seeded table for reproducible deals in tests and simulations.
    pub fn with_seed(config: TableConfig, sink: Box<dyn EventSink>, seed: u64) -> Self {
        Self::with_deck(config, sink, Deck::new_with_seed(seed))
    }

    fn with_deck(config: TableConfig, sink: Box<dyn EventSink>, deck: Deck) -> Self {
        Self {
            config,
            players: Vec::new(),
            policies: Vec::new(),
            deck,
            pots: PotManager::new(),
            street: Street::Waiting,
            dealer: 0,
            acting: 0,
            community: Vec::new(),
            current_bet: 0,
            min_raise: config.big_blind,
            has_acted: Vec::new(),
            in_rotation: Vec::new(),
            hand_number: 0,
            waiting_for_human: false,
            starting_total: 0,
            log: Vec::new(),
            sink,
        }
    }

    pub fn seat_human(&mut self, name: &str) {
        let id = self.players.len();
        self.players
            .push(Player::new(id, name, self.config.starting_stack, true));
        self.policies.push(None);
    }

    pub fn seat_bot(&mut self, name: &str, policy: Box<dyn ActionPolicy>) {
        let id = self.players.len();
        self.players
            .push(Player::new(id, name, self.config.starting_stack, false));
        self.policies.push(Some(policy));
    }

    /// Finish seating: fix the table's chip total for integrity checking
    /// and announce the roster. The dealer button lands on seat 0 for the
    /// first hand.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.players.len() < 2 {
            return Err(GameError::NotEnoughPlayers(self.players.len()));
        }
        self.starting_total = self.players.iter().map(|p| p.stack).sum();
        self.dealer = self.players.len() - 1;
        self.street = Street::Waiting;
        let names = self.players.iter().map(|p| p.name.clone()).collect();
        self.emit(GameEvent::PlayersInitialized { names });
        Ok(())
    }

    /// Begin the next hand: rotate the button past busted seats, post
    /// blinds, deal hole cards and run betting until the human must act (or
    /// the hand resolves, when no human input is needed).
    pub fn start_new_hand(&mut self) -> Result<(), GameError> {
        match self.street {
            Street::Waiting | Street::HandComplete => {}
            Street::GameOver => {
                let n = self.players.iter().filter(|p| p.stack > 0).count();
                return Err(GameError::NotEnoughPlayers(n));
            }
            _ => return Err(GameError::HandInProgress),
        }
        let with_chips = self.players.iter().filter(|p| p.stack > 0).count();
        if with_chips < 2 {
            self.street = Street::GameOver;
            return Err(GameError::NotEnoughPlayers(with_chips));
        }

        self.rotate_dealer();
        self.hand_number += 1;
        self.deck.reset();
        self.pots.clear();
        self.community.clear();
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;
        self.waiting_for_human = false;
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.has_acted = vec![false; self.players.len()];
        self.in_rotation = self.players.iter().map(|p| p.stack > 0).collect();
        self.emit(GameEvent::NewHand {
            hand_number: self.hand_number,
            dealer: self.dealer,
        });

        // Blinds go through the same pay primitive as any wager and can
        // force a short seat all-in.
        let sb = self.nth_in_rotation_after(self.dealer, 1);
        let bb = self.nth_in_rotation_after(self.dealer, 2);
        self.players[sb].pay(self.config.small_blind);
        self.players[bb].pay(self.config.big_blind);
        self.current_bet = self.config.big_blind;
        self.min_raise = self.config.big_blind;
        self.emit(GameEvent::BlindsPosted {
            small: self.config.small_blind,
            big: self.config.big_blind,
        });

        for _ in 0..2 {
            let order = self.button_order();
            for seat in order {
                if let Some(c) = self.deck.deal_card() {
                    self.players[seat].give_card(c);
                }
            }
        }
        self.emit(GameEvent::HoleCardsDealt);

        self.street = Street::PreFlop;
        self.begin_round();
        self.run_loop();
        Ok(())
    }

    // Human entry points. Each is a no-op unless a human decision is
    // pending; each advances the machine exactly once on success.

    pub fn human_fold(&mut self) -> Result<(), GameError> {
        self.human_action(Action::Fold)
    }

    pub fn human_check(&mut self) -> Result<(), GameError> {
        self.human_action(Action::Check)
    }

    pub fn human_call(&mut self) -> Result<(), GameError> {
        self.human_action(Action::Call)
    }

    pub fn human_bet(&mut self, to: u32) -> Result<(), GameError> {
        self.human_action(Action::Bet(to))
    }

    pub fn human_raise(&mut self, to: u32) -> Result<(), GameError> {
        self.human_action(Action::Raise(to))
    }

    pub fn human_all_in(&mut self) -> Result<(), GameError> {
        self.human_action(Action::AllIn)
    }

    fn human_action(&mut self, action: Action) -> Result<(), GameError> {
        if !self.waiting_for_human {
            return Ok(());
        }
        let seat = self.acting;
        if !self.players[seat].is_human {
            return Ok(());
        }
        // An invalid action leaves the pause in place; the caller reports
        // the error and asks again.
        self.apply_action(seat, action)?;
        self.waiting_for_human = false;
        self.notify_observers(seat, action);
        self.run_loop();
        Ok(())
    }

    // Accessors for the presentation layer.

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn acting(&self) -> usize {
        self.acting
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }

    pub fn big_blind(&self) -> u32 {
        self.config.big_blind
    }

    pub fn waiting_for_human(&self) -> bool {
        self.waiting_for_human
    }

    /// Settled pots plus current-round contributions; always reconciles to
    /// the chips missing from the stacks.
    pub fn pot_total(&self) -> u32 {
        self.pots.total() + self.players.iter().map(|p| p.round_bet).sum::<u32>()
    }

    /// Chips owed by the acting seat to match the table-high bet.
    pub fn to_call(&self) -> u32 {
        self.current_bet
            .saturating_sub(self.players[self.acting].round_bet)
    }

    pub fn action_log(&self) -> &[ActionRecord] {
        &self.log
    }

    // Internal sequencing.

    fn run_loop(&mut self) {
        loop {
            match self.street {
                Street::PreFlop | Street::Flop | Street::Turn | Street::River => {}
                _ => return,
            }
            if self.round_complete() {
                self.end_round();
                continue;
            }
            if !self.players[self.acting].can_act() {
                self.advance_acting();
                continue;
            }
            if self.players[self.acting].is_human {
                self.waiting_for_human = true;
                self.emit(GameEvent::PlayerTurn { seat: self.acting });
                return;
            }
            let seat = self.acting;
            let view = self.view_for(seat);
            let action = match self.policies[seat].as_mut() {
                Some(policy) => policy.decide(&view),
                None => Action::Fold,
            };
            if self.apply_action(seat, action).is_ok() {
                self.notify_observers(seat, action);
            } else {
                // A policy handed back an illegal action; degrade to the
                // cheapest legal one instead of stalling the table.
                let fallback = if view.seat.to_call == 0 {
                    Action::Check
                } else {
                    Action::Fold
                };
                let _ = self.apply_action(seat, fallback);
                self.notify_observers(seat, fallback);
            }
        }
    }

    fn apply_action(&mut self, seat: usize, action: Action) -> Result<(), GameError> {
        match self.street {
            Street::PreFlop | Street::Flop | Street::Turn | Street::River => {}
            _ => return Err(GameError::NoHandInProgress),
        }
        if seat != self.acting || !self.players[seat].can_act() {
            return Err(GameError::SeatCannotAct { seat });
        }
        let p = &self.players[seat];
        let validated = validate_action(
            p.stack,
            p.round_bet,
            self.current_bet,
            self.min_raise,
            self.config.big_blind,
            action,
        )?;

        let mut reopened = false;
        let amount = match validated {
            ValidatedAction::Fold => {
                self.players[seat].folded = true;
                0
            }
            ValidatedAction::Check => 0,
            ValidatedAction::Call { pay } => self.players[seat].pay(pay),
            ValidatedAction::Bet { to, pay } | ValidatedAction::Raise { to, pay } => {
                let paid = self.players[seat].pay(pay);
                self.min_raise = to - self.current_bet;
                self.current_bet = to;
                reopened = true;
                paid
            }
            ValidatedAction::AllIn { to, pay } => {
                let paid = self.players[seat].pay(pay);
                // Only a covering all-in reopens the round.
                if to > self.current_bet {
                    self.min_raise = to - self.current_bet;
                    self.current_bet = to;
                    reopened = true;
                }
                paid
            }
        };
        if reopened {
            for (i, acted) in self.has_acted.iter_mut().enumerate() {
                if i != seat {
                    *acted = false;
                }
            }
        }
        self.has_acted[seat] = true;
        self.players[seat].last_action = Some(action.label().to_string());

        self.emit(GameEvent::ActionProcessed {
            seat,
            action,
            amount,
        });
        let record = ActionRecord {
            seat,
            street: self.street,
            action,
            amount,
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        self.emit(GameEvent::ActionLogged {
            record: record.clone(),
        });
        self.log.push(record);

        self.verify_chips();
        self.after_action();
        Ok(())
    }

    fn after_action(&mut self) {
        if self.live_count() == 1 {
            self.settle_single_winner();
            return;
        }
        if self.round_complete() {
            self.end_round();
        } else {
            self.advance_acting();
        }
    }

    /// A round is complete when every seat that can still act has acted at
    /// least once and matches the table-high bet. An all-in for less does
    /// not close the round for the other actors.
    fn round_complete(&self) -> bool {
        self.players.iter().enumerate().all(|(i, p)| {
            !p.can_act() || (self.has_acted[i] && p.round_bet == self.current_bet)
        })
    }

    fn end_round(&mut self) {
        self.settle_contributions();
        self.emit(GameEvent::BettingRoundComplete {
            pot: self.pots.total(),
        });
        if self.actionable_count() <= 1 {
            // Nobody left who can wager; deal the rest of the board and
            // go straight to showdown.
            self.deal_out_and_showdown();
            return;
        }
        match self.street {
            Street::PreFlop => {
                self.deal_flop();
                self.street = Street::Flop;
                self.begin_round();
            }
            Street::Flop => {
                self.deal_turn();
                self.street = Street::Turn;
                self.begin_round();
            }
            Street::Turn => {
                self.deal_river();
                self.street = Street::River;
                self.begin_round();
            }
            Street::River => self.showdown(),
            _ => {}
        }
    }

    /// Fold contributions into the pot partition and reset the round.
    fn settle_contributions(&mut self) {
        let contributions: Vec<u32> = self.players.iter().map(|p| p.total_bet).collect();
        let folded: Vec<bool> = self.players.iter().map(|p| !p.in_hand()).collect();
        self.pots.rebuild(&contributions, &folded);
        for p in &mut self.players {
            p.round_bet = 0;
        }
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;
    }

    fn begin_round(&mut self) {
        for acted in &mut self.has_acted {
            *acted = false;
        }
        // First to act: 3 seats after the dealer pre-flop, 1 otherwise.
        let steps = if self.street == Street::PreFlop { 3 } else { 1 };
        self.acting = self.nth_in_rotation_after(self.dealer, steps);
    }

    fn deal_flop(&mut self) {
        self.deck.burn_card();
        let cards = self.deck.deal(3);
        if cards.len() == 3 {
            let flop = [cards[0], cards[1], cards[2]];
            self.community.extend_from_slice(&flop);
            self.emit(GameEvent::FlopDealt { cards: flop });
        }
    }

    fn deal_turn(&mut self) {
        self.deck.burn_card();
        if let Some(card) = self.deck.deal_card() {
            self.community.push(card);
            self.emit(GameEvent::TurnDealt { card });
        }
    }

    fn deal_river(&mut self) {
        self.deck.burn_card();
        if let Some(card) = self.deck.deal_card() {
            self.community.push(card);
            self.emit(GameEvent::RiverDealt { card });
        }
    }

    fn deal_out_and_showdown(&mut self) {
        while self.community.len() < 5 {
            match self.community.len() {
                0 => self.deal_flop(),
                3 => self.deal_turn(),
                _ => self.deal_river(),
            }
        }
        self.showdown();
    }

    fn showdown(&mut self) {
        self.street = Street::Showdown;
        let mut results: HashMap<usize, HandRank> = HashMap::new();
        let mut reveals = Vec::new();
        for (i, p) in self.players.iter().enumerate() {
            if !p.in_hand() {
                continue;
            }
            let (Some(c1), Some(c2)) = (p.hole[0], p.hole[1]) else {
                continue;
            };
            let mut cards = vec![c1, c2];
            cards.extend_from_slice(&self.community);
            if let Ok(rank) = evaluate(&cards) {
                let description = describe(&rank);
                reveals.push(ShowdownReveal {
                    seat: i,
                    hole: [c1, c2],
                    rank: rank.clone(),
                    description,
                });
                results.insert(i, rank);
            }
        }
        self.emit(GameEvent::Showdown {
            reveals: reveals.clone(),
        });

        let folded: Vec<bool> = self.players.iter().map(|p| !p.in_hand()).collect();
        let order = self.button_order();
        let payouts = self.pots.distribute(&order, &folded, &results);
        for payout in &payouts {
            self.players[payout.seat].stack += payout.amount;
        }
        self.pots.clear();
        self.emit(GameEvent::PotsDistributed {
            payouts,
            evaluations: reveals,
        });
        self.verify_chips();
        self.finish_hand();
    }

    fn settle_single_winner(&mut self) {
        self.settle_contributions();
        let Some(winner) = self.players.iter().position(|p| p.in_hand()) else {
            return;
        };
        let amount = self.pots.total();
        self.players[winner].stack += amount;
        self.pots.clear();
        self.emit(GameEvent::SinglePlayerWin {
            seat: winner,
            amount,
        });
        self.verify_chips();
        self.finish_hand();
    }

    fn finish_hand(&mut self) {
        self.street = Street::HandComplete;
        self.emit(GameEvent::HandComplete {
            hand_number: self.hand_number,
        });
        if self.players.iter().filter(|p| p.stack > 0).count() < 2 {
            self.street = Street::GameOver;
            if let Some(winner) = self.players.iter().position(|p| p.stack > 0) {
                self.emit(GameEvent::GameOver { winner });
            }
        }
    }

    /// Recompute the chip total and report any mismatch. A mismatch is a
    /// consistency violation to surface, not silently repair; the one
    /// tolerated auto-correction is flagging a zero-stack seat all-in.
    fn verify_chips(&mut self) {
        for p in &mut self.players {
            if p.stack == 0 && !p.all_in && p.in_hand() && p.total_bet > 0 {
                p.all_in = true;
            }
        }
        let actual: u32 = self
            .players
            .iter()
            .map(|p| p.stack + p.round_bet)
            .sum::<u32>()
            + self.pots.total();
        if actual != self.starting_total {
            self.emit(GameEvent::IntegrityError {
                expected: self.starting_total,
                actual,
            });
        }
    }

    fn notify_observers(&mut self, seat: usize, action: Action) {
        for (i, slot) in self.policies.iter_mut().enumerate() {
            if i != seat {
                if let Some(policy) = slot.as_mut() {
                    policy.observe(seat, &action);
                }
            }
        }
    }

    fn view_for(&self, seat: usize) -> TableView {
        let p = &self.players[seat];
        TableView {
            street: self.street,
            community: self.community.clone(),
            pot_total: self.pot_total(),
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            big_blind: self.config.big_blind,
            seat: SeatView {
                seat,
                stack: p.stack,
                round_bet: p.round_bet,
                hole: p.hole,
                to_call: self.current_bet.saturating_sub(p.round_bet),
            },
            position: self.position_of(seat),
            active_opponents: self
                .players
                .iter()
                .enumerate()
                .filter(|(i, q)| *i != seat && q.in_hand())
                .count(),
        }
    }

    fn position_of(&self, seat: usize) -> PositionClass {
        let order: Vec<usize> = self
            .button_order()
            .into_iter()
            .filter(|&i| self.players[i].in_hand())
            .collect();
        let n = order.len().max(1);
        let pos = order.iter().position(|&i| i == seat).unwrap_or(0);
        let third = n as f64 / 3.0;
        if (pos as f64) < third {
            PositionClass::Early
        } else if (pos as f64) >= 2.0 * third {
            PositionClass::Late
        } else {
            PositionClass::Middle
        }
    }

    /// Seats in the rotation, clockwise starting left of the dealer.
    fn button_order(&self) -> Vec<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|s| (self.dealer + s) % n)
            .filter(|&i| self.in_rotation.get(i).copied().unwrap_or(false))
            .collect()
    }

    fn nth_in_rotation_after(&self, from: usize, steps: usize) -> usize {
        let n = self.players.len();
        let mut seat = from;
        let mut remaining = steps;
        while remaining > 0 {
            seat = (seat + 1) % n;
            if self.in_rotation[seat] {
                remaining -= 1;
            }
        }
        seat
    }

    /// Turn order is strictly clockwise; seats that cannot act are skipped
    /// here, at the processing step, not removed from the rotation.
    fn advance_acting(&mut self) {
        let n = self.players.len();
        for _ in 0..n {
            self.acting = (self.acting + 1) % n;
            if self.players[self.acting].can_act() {
                return;
            }
        }
    }

    fn rotate_dealer(&mut self) {
        let n = self.players.len();
        for step in 1..=n {
            let s = (self.dealer + step) % n;
            if self.players[s].stack > 0 {
                self.dealer = s;
                return;
            }
        }
    }

    fn live_count(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand()).count()
    }

    /// Seats that can still wager (not folded, not all-in, chips behind).
    fn actionable_count(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    fn emit(&mut self, event: GameEvent) {
        self.sink.on_event(&event);
    }
}
