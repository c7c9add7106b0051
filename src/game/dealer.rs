use alloc::vec::Vec;

use crate::card::Card;
use crate::event::GameEvent;
use crate::player::Party;
use crate::result::{GameResult, Settlement};
use crate::schedule::{DealerStep, DealerTicket};

use super::{DEALER_STANDS_ON, Game, GameState};

impl Game {
    /// Schedules dealer draw number `step`, or ends the round if the dealer
    /// has reached 17.
    pub(super) fn schedule_dealer(
        &self,
        state: &mut GameState,
        step: u32,
        events: &mut Vec<GameEvent>,
    ) -> Option<DealerTicket> {
        let mut dealer = self.dealer.lock();
        let value = dealer.hand.value();

        if value < DEALER_STANDS_ON {
            drop(dealer);
            let ticket = DealerTicket {
                round: self.round(),
                step,
                delay: self.options.dealer_delay,
            };
            *self.pending.lock() = Some(ticket);
            return Some(ticket);
        }

        dealer.standing = true;
        drop(dealer);
        *self.pending.lock() = None;

        tracing::debug!(value, "dealer stands");
        Self::transition(state, GameState::GameOver, events);
        None
    }

    /// Returns the dealer draw the engine is waiting for, if any.
    pub fn pending_dealer_step(&self) -> Option<DealerTicket> {
        *self.pending.lock()
    }

    /// Performs one paced dealer draw.
    ///
    /// The ticket must be the one most recently handed out for the active
    /// round (by [`Game::stand`] or by the previous step). Any other ticket,
    /// or any call outside the dealer turn, returns [`DealerStep::Stale`]
    /// and changes nothing.
    ///
    /// # Panics
    ///
    /// Panics if cards have been lost from circulation (see [`Game::hit`]).
    pub fn dealer_step(&self, ticket: DealerTicket) -> DealerStep {
        let mut state = self.state.lock();
        let current = *state;
        let expected = *self.pending.lock();
        let active = current == GameState::DealerTurn
            && expected.is_some_and(|pending| pending.same_step(&ticket));
        if !active {
            tracing::debug!(
                round = ticket.round,
                step = ticket.step,
                state = %current,
                "ignoring stale dealer step"
            );
            return DealerStep::Stale;
        }

        let mut events = Vec::new();
        let card = self.deal_to(Party::Dealer, &mut events);
        tracing::debug!(%card, step = ticket.step, "dealer draws");

        let next = self.schedule_dealer(&mut state, ticket.step + 1, &mut events);
        drop(state);

        self.notify(&events);
        DealerStep::Drew { card, next }
    }

    /// Runs the rest of the dealer turn without pauses.
    ///
    /// Returns the cards drawn. Does nothing outside the dealer turn.
    ///
    /// # Panics
    ///
    /// Panics if cards have been lost from circulation (see [`Game::hit`]).
    pub fn play_out_dealer(&self) -> Vec<Card> {
        let mut drawn = Vec::new();
        let mut next = self.pending_dealer_step();

        while let Some(ticket) = next {
            match self.dealer_step(ticket) {
                DealerStep::Drew { card, next: after } => {
                    drawn.push(card);
                    next = after;
                }
                DealerStep::Stale => break,
            }
        }

        drawn
    }

    /// Settles the finished round and returns to betting.
    ///
    /// A natural blackjack wins `floor(bet * 1.5)`, any other win wins
    /// `bet`, a push changes nothing, and a loss costs `bet`. The bet is
    /// reset to 0.
    ///
    /// Returns `None` (and does nothing) outside the game-over state.
    pub fn new_game(&self) -> Option<Settlement> {
        let mut state = self.state.lock();
        if *state != GameState::GameOver {
            return None;
        }

        let outcome = self.outcome();
        let mut player = self.player.lock();
        let bet = player.bet;
        let net = outcome.chip_delta(bet);
        player.chips = player.chips.saturating_add_signed(net);
        player.bet = 0;
        let chips = player.chips;
        drop(player);

        let settlement = Settlement {
            outcome,
            result: GameResult::from(outcome),
            bet,
            net,
            chips,
        };
        tracing::info!(?outcome, bet, net, chips, "round settled");

        let mut events = alloc::vec![GameEvent::Settled(settlement)];
        Self::transition(&mut state, GameState::Betting, &mut events);
        drop(state);

        self.notify(&events);
        Some(settlement)
    }
}
