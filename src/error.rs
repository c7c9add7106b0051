//! Error types for game operations.

use thiserror::Error;

/// Errors that can occur when placing a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Bet amount is zero or exceeds the player's chips.
    #[error("invalid bet amount {amount} (chips available: {chips})")]
    InvalidBet {
        /// The rejected amount.
        amount: usize,
        /// Chips the player held at the time.
        chips: usize,
    },
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
}

/// Errors that can occur while refilling the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReshuffleError {
    /// The deck and the discard pile are both empty.
    #[error("no cards in the discard pile to reshuffle")]
    EmptyDiscard,
}
