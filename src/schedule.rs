//! Pacing of the dealer's draws.
//!
//! The dealer turn runs as a sequence of steps. Each step is identified by a
//! [`DealerTicket`] naming the round and the step index, and becomes due a
//! fixed delay after the previous one. [`Game::dealer_step`] refuses tickets
//! that do not match the step it expects, so a late or duplicated timer
//! firing cannot draw extra cards.
//!
//! [`DealerTimer`] is a small driver for callers with a monotonic clock: arm
//! it with the ticket returned by [`Game::stand`] and poll it with the
//! current time.

use core::time::Duration;

use crate::card::Card;
use crate::game::Game;

/// Identifies one pending dealer draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerTicket {
    /// Round the draw belongs to.
    pub round: u64,
    /// Index of the draw within the dealer turn.
    pub step: u32,
    /// How long to wait before performing the draw.
    pub delay: Duration,
}

impl DealerTicket {
    /// Returns whether both tickets name the same draw.
    #[must_use]
    pub const fn same_step(&self, other: &Self) -> bool {
        self.round == other.round && self.step == other.step
    }
}

/// Result of [`Game::dealer_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerStep {
    /// The dealer drew `card`.
    ///
    /// `next` is the follow-up draw, or `None` once the dealer has stood and
    /// the round is over.
    Drew {
        /// The card drawn.
        card: Card,
        /// The next draw to schedule.
        next: Option<DealerTicket>,
    },
    /// The ticket did not match the active dealer turn. Nothing changed.
    Stale,
}

/// Fires dealer steps from a caller-supplied clock.
#[derive(Debug, Clone, Default)]
pub struct DealerTimer {
    armed: Option<(DealerTicket, Duration)>,
}

impl DealerTimer {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Schedules `ticket` to fire `ticket.delay` after `now`.
    ///
    /// Replaces any previously armed ticket.
    pub fn arm(&mut self, ticket: DealerTicket, now: Duration) {
        self.armed = Some((ticket, now.saturating_add(ticket.delay)));
    }

    /// Cancels the armed ticket, returning it.
    pub fn cancel(&mut self) -> Option<DealerTicket> {
        self.armed.take().map(|(ticket, _)| ticket)
    }

    /// Returns whether a ticket is armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Returns when the armed ticket becomes due.
    #[must_use]
    pub fn due_at(&self) -> Option<Duration> {
        self.armed.map(|(_, due)| due)
    }

    /// Fires the armed ticket if it is due at `now`.
    ///
    /// Returns `None` when nothing was due. After a draw the follow-up ticket,
    /// if any, is armed relative to `now`.
    pub fn poll(&mut self, game: &Game, now: Duration) -> Option<DealerStep> {
        let (ticket, due) = self.armed?;
        if now < due {
            return None;
        }

        self.armed = None;
        let step = game.dealer_step(ticket);
        if let DealerStep::Drew {
            next: Some(next), ..
        } = step
        {
            self.arm(next, now);
        }

        Some(step)
    }
}
