//! Game state types.

use core::fmt;

/// Game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Waiting for the player's bet. Also re-entered after each round.
    Betting,
    /// Waiting for the player to hit or stand.
    Playing,
    /// Dealer draws until reaching 17 or more.
    DealerTurn,
    /// Round has ended and can be settled.
    GameOver,
}

impl GameState {
    /// Returns the kebab-case name of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Betting => "betting",
            Self::Playing => "playing",
            Self::DealerTurn => "dealer-turn",
            Self::GameOver => "game-over",
        }
    }

    /// Returns whether the dealer's hole card is face up in this state.
    #[must_use]
    pub const fn reveals_dealer(self) -> bool {
        matches!(self, Self::DealerTurn | Self::GameOver)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
