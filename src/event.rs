//! Notifications sent to observers after state changes.

extern crate alloc;

use alloc::boxed::Box;

use crate::game::GameState;
use crate::player::Party;
use crate::result::Settlement;

/// Something that happened at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A bet was accepted and a new round began.
    RoundStarted {
        /// The round number.
        round: u64,
        /// The accepted bet.
        bet: usize,
    },
    /// Cards from the previous round were moved to the discard pile.
    CardsGathered {
        /// Number of cards moved.
        count: usize,
    },
    /// A card was drawn into a hand.
    CardDrawn {
        /// Who received the card.
        party: Party,
    },
    /// The discard pile was shuffled back into the deck.
    Reshuffled {
        /// Number of cards returned to the deck.
        cards: usize,
    },
    /// The game moved to a new state.
    StateChanged {
        /// Previous state.
        from: GameState,
        /// New state.
        to: GameState,
    },
    /// Chips were settled for a finished round.
    Settled(Settlement),
}

/// A callback notified of every [`GameEvent`].
pub type Observer = Box<dyn Fn(&GameEvent) + Send + Sync>;
