use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::cards::Card;
use crate::hand::HandRank;
use crate::player::Action;
use crate::pot::Payout;
use crate::table::Street;

/// One entry of the append-only action log kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    pub seat: usize,
    pub street: Street,
    pub action: Action,
    /// Chips actually moved by the action
    pub amount: u32,
    /// RFC3339 timestamp
    pub ts: String,
}

/// A non-folded seat's revealed hand at showdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowdownReveal {
    pub seat: usize,
    pub hole: [Card; 2],
    pub rank: HandRank,
    pub description: String,
}

/// Engine-to-collaborator events. The rendering layer consumes these; the
/// engine itself never references a concrete presentation type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    PlayersInitialized { names: Vec<String> },
    NewHand { hand_number: u64, dealer: usize },
    BlindsPosted { small: u32, big: u32 },
    HoleCardsDealt,
    PlayerTurn { seat: usize },
    ActionProcessed { seat: usize, action: Action, amount: u32 },
    ActionLogged { record: ActionRecord },
    BettingRoundComplete { pot: u32 },
    FlopDealt { cards: [Card; 3] },
    TurnDealt { card: Card },
    RiverDealt { card: Card },
    Showdown { reveals: Vec<ShowdownReveal> },
    PotsDistributed { payouts: Vec<Payout>, evaluations: Vec<ShowdownReveal> },
    SinglePlayerWin { seat: usize, amount: u32 },
    HandComplete { hand_number: u64 },
    GameOver { winner: usize },
    IntegrityError { expected: u32, actual: u32 },
}

/// Capability through which the table publishes events.
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Sink that drops every event; the default for tables nobody watches.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Shared buffer the presentation layer drains after each engine call.
/// Cloning the buffer clones the handle, not the contents; the engine
/// runs single-threaded, so `Rc<RefCell<..>>` suffices.
#[derive(Debug, Clone, Default)]
pub struct EventBuffer {
    inner: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink handle to hand to the table.
    pub fn sink(&self) -> Box<dyn EventSink> {
        Box::new(BufferSink(self.clone()))
    }

    /// Remove and return everything published since the last drain.
    pub fn drain(&self) -> Vec<GameEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }
}

struct BufferSink(EventBuffer);

impl EventSink for BufferSink {
    fn on_event(&mut self, event: &GameEvent) {
        self.0.inner.borrow_mut().push(event.clone());
    }
}
