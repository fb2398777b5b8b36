use crate::errors::GameError;
use crate::player::Action;

/// A validated action with the chips to move already computed.
///
/// `to` is the seat's round wager level after the action; `pay` is the
/// amount leaving the stack. Requests that would commit the whole stack are
/// converted to `AllIn` here, so the table applies every variant the same
/// way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call { pay: u32 },
    Bet { to: u32, pay: u32 },
    Raise { to: u32, pay: u32 },
    AllIn { to: u32, pay: u32 },
}

/// Validate an action against the seat's stack and the table's current
/// wager state, without mutating anything.
///
/// * `stack` / `round_bet` - the acting seat's chips and current-round wager
/// * `current_bet` - the table-high wager level this round
/// * `min_raise` - the minimum raise increment (last bet/raise size)
/// * `big_blind` - the minimum opening bet
///
/// Invalid requests (check facing a bet, bet below the big blind, raise
/// below the minimum) are rejected with a [`GameError`] before any state
/// changes.
pub fn validate_action(
    stack: u32,
    round_bet: u32,
    current_bet: u32,
    min_raise: u32,
    big_blind: u32,
    action: Action,
) -> Result<ValidatedAction, GameError> {
    let owed = current_bet.saturating_sub(round_bet);
    match action {
        Action::Fold => Ok(ValidatedAction::Fold),
        Action::Check => {
            if owed == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CheckFacingBet { owed })
            }
        }
        Action::Call => {
            if owed >= stack {
                Ok(ValidatedAction::AllIn {
                    to: round_bet + stack,
                    pay: stack,
                })
            } else {
                Ok(ValidatedAction::Call { pay: owed })
            }
        }
        Action::Bet(to) => {
            if current_bet > 0 {
                return Err(GameError::BetFacingWager {
                    current: current_bet,
                });
            }
            let pay = to.saturating_sub(round_bet);
            if pay >= stack {
                return Ok(ValidatedAction::AllIn {
                    to: round_bet + stack,
                    pay: stack,
                });
            }
            if to < big_blind {
                return Err(GameError::InvalidWagerAmount {
                    amount: to,
                    minimum: big_blind,
                });
            }
            Ok(ValidatedAction::Bet { to, pay })
        }
        Action::Raise(to) => {
            if current_bet == 0 {
                return Err(GameError::RaiseWithoutWager);
            }
            let pay = to.saturating_sub(round_bet);
            if pay >= stack {
                return Ok(ValidatedAction::AllIn {
                    to: round_bet + stack,
                    pay: stack,
                });
            }
            let minimum = current_bet + min_raise;
            if to < minimum {
                return Err(GameError::InvalidWagerAmount {
                    amount: to,
                    minimum,
                });
            }
            Ok(ValidatedAction::Raise { to, pay })
        }
        Action::AllIn => Ok(ValidatedAction::AllIn {
            to: round_bet + stack,
            pay: stack,
        }),
    }
}
