use core::sync::atomic::Ordering;

use crate::error::BetError;
use crate::event::GameEvent;
use crate::player::Party;

use super::{Game, GameState};

impl Game {
    /// Places a bet and deals a new round.
    ///
    /// The bet is earmarked, not taken from the chips, until the round is
    /// settled by [`Game::new_game`]. Both hands from the previous round go to
    /// the discard pile, the deck is shuffled, and two cards each are dealt,
    /// player first.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::InvalidState`] outside the betting state, or
    /// [`BetError::InvalidBet`] if `amount` is zero or exceeds the player's
    /// chips. Nothing changes on error.
    ///
    /// # Panics
    ///
    /// Panics if cards have been lost from circulation (see [`Game::hit`]).
    pub fn place_bet(&self, amount: usize) -> Result<(), BetError> {
        let mut state = self.state.lock();
        if *state != GameState::Betting {
            return Err(BetError::InvalidState);
        }

        let mut player = self.player.lock();
        if amount == 0 || amount > player.chips {
            let chips = player.chips;
            tracing::warn!(amount, chips, "bet rejected");
            return Err(BetError::InvalidBet { amount, chips });
        }

        player.bet = amount;
        player.standing = false;

        let round = self.round.fetch_add(1, Ordering::SeqCst) + 1;
        *self.pending.lock() = None;

        let mut events = alloc::vec![GameEvent::RoundStarted { round, bet: amount }];

        // Gather last round's cards
        let mut discard = self.discard.lock();
        let mut gathered = discard.gather(&mut player.hand);
        drop(player);

        let mut dealer = self.dealer.lock();
        gathered += discard.gather(&mut dealer.hand);
        dealer.standing = false;
        drop(dealer);
        drop(discard);
        events.push(GameEvent::CardsGathered { count: gathered });

        {
            let mut deck = self.deck.lock();
            deck.shuffle(&mut *self.rng.lock());
        }

        self.deal_to(Party::Player, &mut events);
        self.deal_to(Party::Dealer, &mut events);
        self.deal_to(Party::Player, &mut events);
        self.deal_to(Party::Dealer, &mut events);

        tracing::info!(round, bet = amount, "round dealt");
        Self::transition(&mut state, GameState::Playing, &mut events);
        drop(state);

        self.notify(&events);

        Ok(())
    }
}
