//! A single-player blackjack table engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs one player against the dealer:
//! betting, hitting and standing, a paced dealer turn, and settlement of the
//! player's chips. Rendering is left to the caller, which reads a
//! [`TableView`] snapshot and may register observers for [`GameEvent`]s.
//!
//! # Example
//!
//! ```
//! use bjsolo::{Game, GameOptions, GameState};
//!
//! let game = Game::new(GameOptions::default(), 42);
//! game.place_bet(10).unwrap();
//! assert_eq!(game.state(), GameState::Playing);
//!
//! if game.stand().is_some() {
//!     game.play_out_dealer();
//! }
//! assert_eq!(game.state(), GameState::GameOver);
//!
//! let settlement = game.new_game().unwrap();
//! assert_eq!(game.chips(), settlement.chips);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod options;
pub mod player;
pub mod result;
pub mod schedule;
mod sync;
pub mod view;

// Re-export main types
pub use card::{Card, Color, DECK_SIZE, Rank, Suit};
pub use deck::{Deck, DiscardPile};
pub use error::{BetError, ReshuffleError};
pub use event::{GameEvent, Observer};
pub use game::{DEALER_STANDS_ON, Game, GameState};
pub use hand::Hand;
pub use options::GameOptions;
pub use player::{Dealer, Party, Player};
pub use result::{GameResult, RoundOutcome, Settlement, Winner};
pub use schedule::{DealerStep, DealerTicket, DealerTimer};
pub use view::{TableCounts, TableView};
