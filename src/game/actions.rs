use alloc::vec::Vec;

use crate::card::Card;
use crate::player::Party;
use crate::schedule::DealerTicket;

use super::{Game, GameState};

impl Game {
    /// Player action: Hit (draw a card).
    ///
    /// A bust ends the round immediately; the dealer does not play.
    ///
    /// Returns the card drawn, or `None` (and does nothing) outside the
    /// playing state.
    ///
    /// # Panics
    ///
    /// Panics if the deck and the discard pile are both empty, which means
    /// cards have been lost from circulation.
    pub fn hit(&self) -> Option<Card> {
        let mut state = self.state.lock();
        if *state != GameState::Playing {
            return None;
        }

        let mut events = Vec::new();
        let card = self.deal_to(Party::Player, &mut events);

        let value = self.player.lock().hand.value();
        tracing::debug!(%card, value, "player hit");
        if value > 21 {
            Self::transition(&mut state, GameState::GameOver, &mut events);
        }
        drop(state);

        self.notify(&events);
        Some(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// Starts the dealer turn. If the dealer must draw, returns the ticket
    /// for the first draw; pass it to [`Game::dealer_step`] after
    /// `ticket.delay`, or arm a [`DealerTimer`](crate::DealerTimer) with it.
    /// If the dealer already holds 17 or more the round ends at once and
    /// `None` is returned.
    ///
    /// Outside the playing state this does nothing and returns `None`.
    pub fn stand(&self) -> Option<DealerTicket> {
        let mut state = self.state.lock();
        if *state != GameState::Playing {
            return None;
        }

        let mut events = Vec::new();
        self.player.lock().standing = true;
        tracing::debug!(value = self.player.lock().hand.value(), "player stands");

        Self::transition(&mut state, GameState::DealerTurn, &mut events);
        let ticket = self.schedule_dealer(&mut state, 0, &mut events);
        drop(state);

        self.notify(&events);
        ticket
    }
}
