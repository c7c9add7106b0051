//! The draw pile and the discard pile.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::ReshuffleError;
use crate::hand::Hand;

/// An ordered pile of cards to draw from.
///
/// The top of the deck is the end of the underlying sequence: [`Deck::draw`]
/// removes the last card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates a full 52-card deck in base order (suit-major, rank-minor).
    ///
    /// The deck is not shuffled.
    #[must_use]
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);

        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }

        Self { cards }
    }

    /// Creates a deck holding exactly `cards`, with the last card on top.
    #[must_use]
    pub const fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Shuffles the deck in place (Fisher-Yates).
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.random_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    /// Removes and returns the top card, or `None` if the deck is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Moves every card from `discard` into the deck and shuffles.
    ///
    /// Returns the number of cards moved.
    ///
    /// # Errors
    ///
    /// Returns [`ReshuffleError::EmptyDiscard`] if the discard pile is empty.
    pub fn replenish<R: Rng + ?Sized>(
        &mut self,
        discard: &mut DiscardPile,
        rng: &mut R,
    ) -> Result<usize, ReshuffleError> {
        if discard.is_empty() {
            return Err(ReshuffleError::EmptyDiscard);
        }

        let moved = discard.cards.len();
        self.cards.append(&mut discard.cards);
        self.shuffle(rng);

        Ok(moved)
    }

    /// Returns the cards in the deck, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Cards from finished rounds, waiting to be shuffled back into the deck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    /// Creates an empty discard pile.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Moves every card out of `hand` onto the pile.
    ///
    /// Returns the number of cards gathered.
    pub fn gather(&mut self, hand: &mut Hand) -> usize {
        let cards = hand.take_cards();
        let count = cards.len();
        self.cards.extend(cards);
        count
    }

    /// Returns the cards on the pile, oldest first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards on the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns how many cards a visual stack should show, capped at `cap`.
    #[must_use]
    pub fn stack_height(&self, cap: usize) -> usize {
        self.cards.len().min(cap)
    }
}
