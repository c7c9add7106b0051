//! The two parties at the table.

use crate::hand::Hand;

/// Which side of the table a card went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    /// The player.
    Player,
    /// The dealer.
    Dealer,
}

/// The player: a hand, a chip balance, and the bet for the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Cards held this round.
    pub hand: Hand,
    /// Chip balance, carried across rounds.
    pub chips: usize,
    /// Amount wagered this round. Never exceeds `chips`.
    pub bet: usize,
    /// Whether the player has stood.
    pub standing: bool,
}

impl Player {
    /// Creates a player with `chips` and no hand.
    #[must_use]
    pub const fn new(chips: usize) -> Self {
        Self {
            hand: Hand::new(),
            chips,
            bet: 0,
            standing: false,
        }
    }
}

/// The dealer: a hand and whether it has finished drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dealer {
    /// Cards held this round.
    pub hand: Hand,
    /// Whether the dealer has stood.
    pub standing: bool,
}

impl Dealer {
    /// Creates a dealer with no hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hand: Hand::new(),
            standing: false,
        }
    }
}
