//! The bot decision engine: turns a table snapshot into a poker action
//! using hand strength, pot odds, position and the bot's personality.

use felt_engine::cards::Card;
use felt_engine::player::Action;
use felt_engine::table::{ActionPolicy, PositionClass, Street, TableView};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::personality::{Personality, Profile};
use crate::strength::{pot_odds, postflop_strength, preflop_strength, should_call};

/// Effective strength a bluffing street is inflated to.
const BLUFF_FLOOR: f64 = 0.75;
/// Fraction of the play threshold below which a small pre-flop call is
/// still worth taking.
const CHEAP_CALL_RATIO: f64 = 0.7;
/// Smallest opening wager in chips, independent of the pot.
const MIN_BET_CHIPS: u32 = 10;

/// One bot's brain. Owns the personality state and a private RNG so that
/// seeded tables replay identically.
pub struct BotDecisionEngine {
    personality: Personality,
    rng: StdRng,
}

impl BotDecisionEngine {
    pub fn new(profile: Profile) -> Self {
        Self {
            personality: Personality::new(profile),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(profile: Profile, seed: u64) -> Self {
        Self {
            personality: Personality::new(profile),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn profile(&self) -> Profile {
        self.personality.profile()
    }

    /// Early position tightens the threshold, late position loosens it.
    fn position_factor(position: PositionClass) -> f64 {
        match position {
            PositionClass::Early => 1.1,
            PositionClass::Middle => 1.0,
            PositionClass::Late => 0.9,
        }
    }

    fn decide_preflop(&mut self, view: &TableView, hole: [Card; 2]) -> Action {
        let params = self.personality.params();
        let strength = preflop_strength(hole[0], hole[1]);
        let threshold = params.play_threshold * Self::position_factor(view.position);
        let to_call = view.seat.to_call;

        if strength < threshold {
            if to_call == 0 {
                return Action::Check;
            }
            // A cheap call with a near-threshold hand keeps the bot from
            // surrendering its blind to any open.
            if to_call <= view.big_blind && strength >= threshold * CHEAP_CALL_RATIO {
                return Action::Call;
            }
            return Action::Fold;
        }
        if to_call >= view.seat.stack {
            return Action::AllIn;
        }
        if self.rng.random::<f64>() < strength * params.aggression {
            return self.sized_wager(view, strength);
        }
        if to_call > 0 {
            Action::Call
        } else {
            Action::Check
        }
    }

    fn decide_postflop(&mut self, view: &TableView, hole: [Card; 2]) -> Action {
        let params = self.personality.params();
        let opponents = view.active_opponents.max(1);
        let mut strength = postflop_strength(hole, &view.community, opponents);

        // A bluffing street plays a weak hand as if it were strong; the
        // roll happens once per decision.
        if self.rng.random::<f64>() < params.bluff_frequency {
            strength = strength.max(BLUFF_FLOOR);
        }

        let to_call = view.seat.to_call;
        let odds = pot_odds(view.pot_total, to_call);
        let calling_ok = to_call == 0 || should_call(strength, &odds, &mut self.rng);

        if to_call > 0 && view.seat.stack > 0 {
            let pressure = f64::from(to_call) / f64::from(view.seat.stack);
            if pressure > params.fold_to_pressure && !calling_ok {
                return Action::Fold;
            }
        }
        if to_call >= view.seat.stack {
            return if calling_ok { Action::AllIn } else { Action::Fold };
        }
        if self.rng.random::<f64>() < strength * params.aggression {
            return self.sized_wager(view, strength);
        }
        if to_call > 0 {
            if calling_ok {
                Action::Call
            } else {
                Action::Fold
            }
        } else {
            Action::Check
        }
    }

    /// Size a bet or raise from the pot and the hand's strength. Amounts
    /// are raise-to levels; anything the stack cannot cover becomes all-in.
    fn sized_wager(&mut self, view: &TableView, strength: f64) -> Action {
        let stack = view.seat.stack;
        let pot = f64::from(view.pot_total);
        if view.current_bet == 0 {
            let mut to = (pot * (0.40 + 0.35 * strength)) as u32;
            to = to.max((pot * 0.30) as u32).max(MIN_BET_CHIPS);
            to = to.max(view.big_blind);
            let pay = to.saturating_sub(view.seat.round_bet);
            if pay >= stack {
                return Action::AllIn;
            }
            Action::Bet(to)
        } else {
            let base = f64::from(view.current_bet);
            let mut to = (base * (2.5 + 1.5 * strength)) as u32;
            to = to.max(view.current_bet * 2);
            to = to.max(view.current_bet + view.min_raise);
            let pay = to.saturating_sub(view.seat.round_bet);
            if pay >= stack {
                return Action::AllIn;
            }
            Action::Raise(to)
        }
    }
}

impl ActionPolicy for BotDecisionEngine {
    fn decide(&mut self, view: &TableView) -> Action {
        let (Some(c1), Some(c2)) = (view.seat.hole[0], view.seat.hole[1]) else {
            return if view.seat.to_call == 0 {
                Action::Check
            } else {
                Action::Fold
            };
        };
        match view.street {
            Street::PreFlop => self.decide_preflop(view, [c1, c2]),
            _ => self.decide_postflop(view, [c1, c2]),
        }
    }

    fn observe(&mut self, seat: usize, action: &Action) {
        self.personality.observe(seat, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use felt_engine::cards::{Rank, Suit};
    use felt_engine::table::SeatView;

    fn view(street: Street, hole: [Card; 2], community: Vec<Card>) -> TableView {
        TableView {
            street,
            community,
            pot_total: 30,
            current_bet: 0,
            min_raise: 20,
            big_blind: 20,
            seat: SeatView {
                seat: 1,
                stack: 1_000,
                round_bet: 0,
                hole: [Some(hole[0]), Some(hole[1])],
                to_call: 0,
            },
            position: PositionClass::Middle,
            active_opponents: 2,
        }
    }

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn trash_hand_folds_to_a_large_open() {
        let mut bot = BotDecisionEngine::with_seed(Profile::TightAggressive, 7);
        let mut v = view(
            Street::PreFlop,
            [card(Rank::Seven, Suit::Clubs), card(Rank::Two, Suit::Diamonds)],
            Vec::new(),
        );
        v.current_bet = 200;
        v.seat.to_call = 200;
        assert_eq!(bot.decide(&v), Action::Fold);
    }

    #[test]
    fn trash_hand_checks_when_free() {
        let mut bot = BotDecisionEngine::with_seed(Profile::TightAggressive, 7);
        let v = view(
            Street::PreFlop,
            [card(Rank::Seven, Suit::Clubs), card(Rank::Two, Suit::Diamonds)],
            Vec::new(),
        );
        assert_eq!(bot.decide(&v), Action::Check);
    }

    #[test]
    fn premium_hand_never_folds_preflop() {
        for seed in 0..50 {
            let mut bot = BotDecisionEngine::with_seed(Profile::TightPassive, seed);
            let mut v = view(
                Street::PreFlop,
                [card(Rank::Ace, Suit::Spades), card(Rank::Ace, Suit::Hearts)],
                Vec::new(),
            );
            v.current_bet = 60;
            v.seat.to_call = 60;
            assert_ne!(bot.decide(&v), Action::Fold, "seed {seed}");
        }
    }

    #[test]
    fn short_stack_facing_full_call_moves_all_in() {
        let mut bot = BotDecisionEngine::with_seed(Profile::LooseAggressive, 1);
        let mut v = view(
            Street::PreFlop,
            [card(Rank::Ace, Suit::Spades), card(Rank::King, Suit::Spades)],
            Vec::new(),
        );
        v.current_bet = 500;
        v.seat.to_call = 500;
        v.seat.stack = 300;
        assert_eq!(bot.decide(&v), Action::AllIn);
    }

    #[test]
    fn wagers_respect_minimums() {
        // Across many seeds, every opening bet is at least the big blind
        // and every raise is at least a min-raise over the table bet.
        for seed in 0..100 {
            let mut bot = BotDecisionEngine::with_seed(Profile::LooseAggressive, seed);
            let v = view(
                Street::Flop,
                [card(Rank::Ace, Suit::Spades), card(Rank::Ace, Suit::Hearts)],
                vec![
                    card(Rank::Ace, Suit::Clubs),
                    card(Rank::Nine, Suit::Diamonds),
                    card(Rank::Four, Suit::Hearts),
                ],
            );
            match bot.decide(&v) {
                Action::Bet(to) => assert!(to >= v.big_blind, "seed {seed}: bet {to}"),
                Action::Check | Action::AllIn => {}
                other => panic!("seed {seed}: unexpected {other:?}"),
            }

            let mut raised = v.clone();
            raised.current_bet = 40;
            raised.min_raise = 40;
            raised.seat.to_call = 40;
            match bot.decide(&raised) {
                Action::Raise(to) => {
                    assert!(to >= raised.current_bet + raised.min_raise, "seed {seed}: raise {to}")
                }
                Action::Call | Action::Fold | Action::AllIn => {}
                other => panic!("seed {seed}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn pressure_folds_a_weak_made_hand() {
        // Bottom pair facing a pot-sized shove for most of the stack.
        let mut folds = 0;
        for seed in 0..50 {
            let mut bot = BotDecisionEngine::with_seed(Profile::TightPassive, seed);
            let mut v = view(
                Street::River,
                [card(Rank::Four, Suit::Spades), card(Rank::Five, Suit::Diamonds)],
                vec![
                    card(Rank::Ace, Suit::Clubs),
                    card(Rank::King, Suit::Diamonds),
                    card(Rank::Nine, Suit::Hearts),
                    card(Rank::Jack, Suit::Clubs),
                    card(Rank::Four, Suit::Hearts),
                ],
            );
            v.pot_total = 900;
            v.current_bet = 600;
            v.seat.to_call = 600;
            v.seat.stack = 700;
            if bot.decide(&v) == Action::Fold {
                folds += 1;
            }
        }
        assert!(folds > 40, "folded only {folds}/50");
    }

    #[test]
    fn seeded_engine_is_deterministic() {
        let v = view(
            Street::Flop,
            [card(Rank::Queen, Suit::Spades), card(Rank::Jack, Suit::Spades)],
            vec![
                card(Rank::Ten, Suit::Spades),
                card(Rank::Two, Suit::Diamonds),
                card(Rank::Seven, Suit::Hearts),
            ],
        );
        let mut a = BotDecisionEngine::with_seed(Profile::Adaptive, 42);
        let mut b = BotDecisionEngine::with_seed(Profile::Adaptive, 42);
        for _ in 0..10 {
            assert_eq!(a.decide(&v), b.decide(&v));
        }
    }

    #[test]
    fn no_hole_cards_degrades_gracefully() {
        let mut bot = BotDecisionEngine::with_seed(Profile::Adaptive, 3);
        let mut v = view(
            Street::PreFlop,
            [card(Rank::Two, Suit::Clubs), card(Rank::Three, Suit::Clubs)],
            Vec::new(),
        );
        v.seat.hole = [None, None];
        assert_eq!(bot.decide(&v), Action::Check);
        v.current_bet = 50;
        v.seat.to_call = 50;
        assert_eq!(bot.decide(&v), Action::Fold);
    }
}
