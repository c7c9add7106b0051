//! Read model for renderers.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::game::GameState;
use crate::player::{Dealer, Player};
use crate::result::RoundOutcome;

/// A snapshot of everything a renderer needs.
///
/// The dealer's second card and score are withheld until the dealer's turn.
/// The underlying hand is never altered; the redaction exists only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Current state.
    pub state: GameState,
    /// Current round number (0 before the first bet).
    pub round: u64,
    /// Player chip balance.
    pub chips: usize,
    /// Pending bet.
    pub bet: usize,
    /// Player's cards, all face up.
    pub player_cards: Vec<Card>,
    /// Player's score.
    pub player_score: u8,
    /// Dealer's cards; `None` marks a face-down card.
    pub dealer_cards: Vec<Option<Card>>,
    /// Dealer's score, or `None` while the hole card is hidden.
    pub dealer_score: Option<u8>,
    /// Cards left in the deck.
    pub cards_remaining: usize,
    /// Cards on the discard pile.
    pub discard_count: usize,
    /// Height of the discard stack to draw.
    pub discard_stack: usize,
    /// Round result message, present only once the round is over.
    pub message: Option<&'static str>,
}

/// Table counters that live outside the two parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    /// Current round number.
    pub round: u64,
    /// Cards left in the deck.
    pub cards_remaining: usize,
    /// Cards on the discard pile.
    pub discard_count: usize,
    /// Height of the discard stack to draw.
    pub discard_stack: usize,
}

impl TableView {
    /// Projects the table into a view for `state`.
    #[must_use]
    pub fn project(
        state: GameState,
        player: &Player,
        dealer: &Dealer,
        counts: TableCounts,
    ) -> Self {
        let revealed = state.reveals_dealer();

        let dealer_cards = dealer
            .hand
            .cards()
            .iter()
            .enumerate()
            .map(|(index, card)| (revealed || index != 1).then_some(*card))
            .collect();

        let message = (state == GameState::GameOver)
            .then(|| RoundOutcome::evaluate(&player.hand, &dealer.hand).message());

        Self {
            state,
            round: counts.round,
            chips: player.chips,
            bet: player.bet,
            player_cards: player.hand.cards().to_vec(),
            player_score: player.hand.value(),
            dealer_cards,
            dealer_score: revealed.then(|| dealer.hand.value()),
            cards_remaining: counts.cards_remaining,
            discard_count: counts.discard_count,
            discard_stack: counts.discard_stack,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    const COUNTS: TableCounts = TableCounts {
        round: 1,
        cards_remaining: 48,
        discard_count: 0,
        discard_stack: 0,
    };

    fn table() -> (Player, Dealer) {
        let mut player = Player::new(100);
        player.bet = 10;
        player.hand.add_card(Card::new(Suit::Hearts, Rank::Ten));
        player.hand.add_card(Card::new(Suit::Clubs, Rank::Nine));

        let mut dealer = Dealer::new();
        dealer.hand.add_card(Card::new(Suit::Spades, Rank::Five));
        dealer.hand.add_card(Card::new(Suit::Diamonds, Rank::King));
        (player, dealer)
    }

    #[test]
    fn hole_card_hidden_while_playing() {
        let (player, dealer) = table();
        let view = TableView::project(GameState::Playing, &player, &dealer, COUNTS);

        assert_eq!(
            view.dealer_cards,
            alloc::vec![Some(Card::new(Suit::Spades, Rank::Five)), None]
        );
        assert_eq!(view.dealer_score, None);
        assert_eq!(view.player_score, 19);
        assert_eq!(view.message, None);
        assert_eq!(dealer.hand.len(), 2);
    }

    #[test]
    fn hole_card_shown_once_dealer_plays() {
        let (player, dealer) = table();

        let view = TableView::project(GameState::DealerTurn, &player, &dealer, COUNTS);
        assert!(view.dealer_cards.iter().all(Option::is_some));
        assert_eq!(view.dealer_score, Some(15));
        assert_eq!(view.message, None);

        let view = TableView::project(GameState::GameOver, &player, &dealer, COUNTS);
        assert_eq!(view.dealer_score, Some(15));
        assert_eq!(view.message, Some("You win!"));
    }
}
