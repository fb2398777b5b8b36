use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid wager amount: {amount}, minimum: {minimum}")]
    InvalidWagerAmount { amount: u32, minimum: u32 },
    #[error("Cannot check while facing a bet of {owed}")]
    CheckFacingBet { owed: u32 },
    #[error("Cannot bet: a wager of {current} is already outstanding, raise instead")]
    BetFacingWager { current: u32 },
    #[error("Cannot raise: no wager outstanding, bet instead")]
    RaiseWithoutWager,
    #[error("Hand already in progress")]
    HandInProgress,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Table needs at least 2 seated players, has {0}")]
    NotEnoughPlayers(usize),
    #[error("Seat {seat} cannot act")]
    SeatCannotAct { seat: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Hand evaluation requires at least 5 cards, got {0}")]
    NotEnoughCards(usize),
}
