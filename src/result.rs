//! Round result types.

use crate::hand::Hand;

/// Who won the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// The player wins.
    Player,
    /// The dealer wins.
    Dealer,
    /// Push.
    Tie,
}

/// How the round was decided.
///
/// Variants are listed in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Both hands are natural blackjacks.
    BothBlackjack,
    /// Only the player has a natural blackjack.
    PlayerBlackjack,
    /// Only the dealer has a natural blackjack.
    DealerBlackjack,
    /// The player busted.
    PlayerBust,
    /// The dealer busted and the player did not.
    DealerBust,
    /// The player has the higher score.
    PlayerHigher,
    /// The dealer has the higher score.
    DealerHigher,
    /// Both scores are equal.
    EqualScores,
}

impl RoundOutcome {
    /// Decides the round from the two final hands.
    #[must_use]
    pub fn evaluate(player: &Hand, dealer: &Hand) -> Self {
        let player_blackjack = player.is_blackjack();
        let dealer_blackjack = dealer.is_blackjack();

        if player_blackjack && dealer_blackjack {
            return Self::BothBlackjack;
        }
        if player_blackjack {
            return Self::PlayerBlackjack;
        }
        if dealer_blackjack {
            return Self::DealerBlackjack;
        }
        if player.is_bust() {
            return Self::PlayerBust;
        }
        if dealer.is_bust() {
            return Self::DealerBust;
        }

        let player_value = player.value();
        let dealer_value = dealer.value();
        if player_value > dealer_value {
            Self::PlayerHigher
        } else if dealer_value > player_value {
            Self::DealerHigher
        } else {
            Self::EqualScores
        }
    }

    /// Returns the winning side.
    #[must_use]
    pub const fn winner(self) -> Winner {
        match self {
            Self::PlayerBlackjack | Self::DealerBust | Self::PlayerHigher => Winner::Player,
            Self::DealerBlackjack | Self::PlayerBust | Self::DealerHigher => Winner::Dealer,
            Self::BothBlackjack | Self::EqualScores => Winner::Tie,
        }
    }

    /// Returns the message shown to the player.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::BothBlackjack => "Both have Blackjack! Push!",
            Self::PlayerBlackjack => "Blackjack! You win!",
            Self::DealerBlackjack => "Dealer has Blackjack! You lose!",
            Self::PlayerBust => "Bust! You lose!",
            Self::DealerBust => "Dealer busts! You win!",
            Self::PlayerHigher => "You win!",
            Self::DealerHigher => "Dealer wins!",
            Self::EqualScores => "Push!",
        }
    }

    /// Returns the chip change for a round played with `bet`.
    ///
    /// A natural blackjack pays `floor(bet * 1.5)`; any other win pays `bet`.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, reason = "chip amounts fit in isize")]
    pub const fn chip_delta(self, bet: usize) -> isize {
        match self {
            Self::PlayerBlackjack => (bet + bet / 2) as isize,
            Self::DealerBust | Self::PlayerHigher => bet as isize,
            Self::BothBlackjack | Self::EqualScores => 0,
            Self::DealerBlackjack | Self::PlayerBust | Self::DealerHigher => -(bet as isize),
        }
    }
}

/// The result of a round: the winner and a message for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// The winning side.
    pub winner: Winner,
    /// Descriptive text.
    pub message: &'static str,
}

impl From<RoundOutcome> for GameResult {
    fn from(outcome: RoundOutcome) -> Self {
        Self {
            winner: outcome.winner(),
            message: outcome.message(),
        }
    }
}

/// What settling a round did to the player's chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// How the round was decided.
    pub outcome: RoundOutcome,
    /// The result shown to the player.
    pub result: GameResult,
    /// The bet that was settled.
    pub bet: usize,
    /// Net chip change.
    pub net: isize,
    /// Chip balance after settlement.
    pub chips: usize,
}
