//! # felt-engine: no-limit hold'em rules engine
//!
//! A multi-seat Texas Hold'em rules engine for one human seat against
//! scripted opponents: dealing, best-5-of-7 hand evaluation, main/side-pot
//! accounting under partial calls and all-ins, and the betting-round state
//! machine across the four streets.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Shuffled 52-card dealing source with ChaCha20 RNG
//! - [`hand`] - Hand evaluation, comparison and descriptions
//! - [`pot`] - Side-pot partition and payout distribution
//! - [`player`] - Seat state, actions and wager bookkeeping
//! - [`rules`] - Action validation against the betting state
//! - [`table`] - The betting state machine and policy/view seams
//! - [`events`] - Engine events and the sink capability
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use felt_engine::cards::{Card, Rank, Suit};
//! use felt_engine::hand::evaluate;
//!
//! let cards = [
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::King, Suit::Hearts),
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//!
//! let rank = evaluate(&cards).unwrap();
//! println!("{:?}", rank.category);
//! ```
//!
//! ## Driving a table
//!
//! The table runs synchronously: bot turns resolve inside the call that
//! triggered them, and the machine pauses only when the human seat must
//! act. The presentation layer drains events from an
//! [`events::EventBuffer`] after every engine call.
//!
//! ```rust,no_run
//! use felt_engine::events::EventBuffer;
//! use felt_engine::table::{TableConfig, TableEngine};
//!
//! let buffer = EventBuffer::new();
//! let mut table = TableEngine::new(TableConfig::default(), buffer.sink());
//! table.seat_human("You");
//! // table.seat_bot("Viktor", policy);
//! table.start().unwrap();
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod events;
pub mod hand;
pub mod player;
pub mod pot;
pub mod rules;
pub mod table;
