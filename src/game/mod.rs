//! Game engine and state management.

use core::sync::atomic::{AtomicU64, Ordering};

use alloc::sync::Arc;
use alloc::vec::Vec;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::sync::Mutex;

use crate::card::Card;
use crate::deck::{Deck, DiscardPile};
use crate::event::{GameEvent, Observer};
use crate::options::GameOptions;
use crate::player::{Dealer, Party, Player};
use crate::result::{GameResult, RoundOutcome};
use crate::schedule::DealerTicket;
use crate::view::{TableCounts, TableView};

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::GameState;

/// Dealer stands on any total of at least this much.
pub const DEALER_STANDS_ON: u8 = 17;

/// A single-player blackjack table.
///
/// The game owns the deck, the discard pile, the player, and the dealer.
/// Operations take `&self` so a timer callback can hold a shared reference
/// while the dealer turn is in progress.
pub struct Game {
    /// Game options.
    pub options: GameOptions,
    /// Draw pile.
    deck: Mutex<Deck>,
    /// Cards from finished rounds.
    discard: Mutex<DiscardPile>,
    /// Current game state.
    state: Mutex<GameState>,
    /// The player.
    player: Mutex<Player>,
    /// The dealer.
    dealer: Mutex<Dealer>,
    /// Number of the current round.
    round: AtomicU64,
    /// The dealer draw the engine expects next, if any.
    pending: Mutex<Option<DealerTicket>>,
    /// Registered observers.
    observers: Mutex<Vec<Arc<dyn Fn(&GameEvent) + Send + Sync>>>,
    /// Random number generator.
    rng: Mutex<ChaCha8Rng>,
}

impl Game {
    /// Creates a new game with the given seed.
    ///
    /// The deck starts in base order; it is shuffled when a bet is placed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsolo::{Game, GameOptions, GameState};
    ///
    /// let game = Game::new(GameOptions::default(), 42);
    /// assert_eq!(game.state(), GameState::Betting);
    /// assert_eq!(game.chips(), 1000);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        let player = Player::new(options.starting_chips);

        Self {
            options,
            deck: Mutex::new(Deck::new()),
            discard: Mutex::new(DiscardPile::new()),
            state: Mutex::new(GameState::Betting),
            player: Mutex::new(player),
            dealer: Mutex::new(Dealer::new()),
            round: AtomicU64::new(0),
            pending: Mutex::new(None),
            observers: Mutex::new(Vec::new()),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Registers an observer notified after every successful transition.
    ///
    /// Observers run after the engine has released every lock, so they may
    /// call back into the game, including [`Game::play_out_dealer`]. Events
    /// raised by such a call reach all observers before the remaining events
    /// of the outer operation.
    pub fn subscribe(&self, observer: Observer) {
        self.observers.lock().push(Arc::from(observer));
    }

    fn notify(&self, events: &[GameEvent]) {
        if events.is_empty() {
            return;
        }

        let observers = self.observers.lock().clone();
        for event in events {
            for observer in observers.iter() {
                observer(event);
            }
        }
    }

    /// Draws a card, refilling the deck from the discard pile when empty.
    ///
    /// # Panics
    ///
    /// Panics if the deck and the discard pile are both empty. With 52 cards
    /// in circulation and at most two hands, this cannot happen.
    fn draw(&self, events: &mut Vec<GameEvent>) -> Card {
        let mut deck = self.deck.lock();
        if let Some(card) = deck.draw() {
            return card;
        }

        let mut discard = self.discard.lock();
        let mut rng = self.rng.lock();
        let moved = deck
            .replenish(&mut discard, &mut *rng)
            .expect("card conservation violated: deck and discard pile are both empty");
        drop(rng);
        drop(discard);

        tracing::debug!(cards = moved, "reshuffled discard pile into deck");
        events.push(GameEvent::Reshuffled { cards: moved });

        deck.draw()
            .expect("deck was just refilled from a non-empty discard pile")
    }

    /// Draws a card into `party`'s hand.
    fn deal_to(&self, party: Party, events: &mut Vec<GameEvent>) -> Card {
        let card = self.draw(events);
        match party {
            Party::Player => self.player.lock().hand.add_card(card),
            Party::Dealer => self.dealer.lock().hand.add_card(card),
        }
        tracing::trace!(?party, %card, "card drawn");
        events.push(GameEvent::CardDrawn { party });
        card
    }

    fn transition(state: &mut GameState, to: GameState, events: &mut Vec<GameEvent>) {
        let from = *state;
        *state = to;
        tracing::debug!(%from, %to, "state changed");
        events.push(GameEvent::StateChanged { from, to });
    }

    fn outcome(&self) -> RoundOutcome {
        let player = self.player.lock();
        let dealer = self.dealer.lock();
        RoundOutcome::evaluate(&player.hand, &dealer.hand)
    }

    /// Returns the current game state.
    pub fn state(&self) -> GameState {
        *self.state.lock()
    }

    /// Returns the current round number (0 before the first bet).
    pub fn round(&self) -> u64 {
        self.round.load(Ordering::SeqCst)
    }

    /// Returns the player's chip balance.
    pub fn chips(&self) -> usize {
        self.player.lock().chips
    }

    /// Returns the pending bet.
    pub fn bet(&self) -> usize {
        self.player.lock().bet
    }

    /// Returns a clone of the player.
    pub fn player(&self) -> Player {
        self.player.lock().clone()
    }

    /// Returns a clone of the dealer, hole card included.
    pub fn dealer(&self) -> Dealer {
        self.dealer.lock().clone()
    }

    /// Returns the number of cards remaining in the deck.
    pub fn cards_remaining(&self) -> usize {
        self.deck.lock().len()
    }

    /// Returns the number of cards on the discard pile.
    pub fn discard_len(&self) -> usize {
        self.discard.lock().len()
    }

    /// Computes the result from the current hands.
    ///
    /// Only meaningful once the round is over.
    pub fn game_result(&self) -> GameResult {
        self.outcome().into()
    }

    /// Returns a fresh read model of the table.
    pub fn snapshot(&self) -> TableView {
        let state = self.state.lock();
        let counts = TableCounts {
            round: self.round(),
            cards_remaining: self.cards_remaining(),
            discard_count: self.discard_len(),
            discard_stack: self
                .discard
                .lock()
                .stack_height(self.options.discard_stack_cap),
        };

        let player = self.player.lock();
        let dealer = self.dealer.lock();
        TableView::project(*state, &player, &dealer, counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::boxed::Box;
    use alloc::sync::Arc;
    use core::sync::atomic::AtomicUsize;
    use core::time::Duration;

    use crate::card::{DECK_SIZE, Rank, Suit};
    use crate::hand::Hand;
    use crate::result::{Settlement, Winner};
    use crate::schedule::DealerStep;

    const fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    fn census(game: &Game) -> Vec<Card> {
        let mut cards: Vec<Card> = game.deck.lock().cards().to_vec();
        cards.extend_from_slice(game.discard.lock().cards());
        cards.extend_from_slice(game.player.lock().hand.cards());
        cards.extend_from_slice(game.dealer.lock().hand.cards());
        cards
    }

    fn assert_conserved(game: &Game) {
        let key = |c: &Card| (c.suit as u8, c.rank as u8);
        let mut cards: Vec<_> = census(game).iter().map(key).collect();
        let mut full: Vec<_> = Deck::new().cards().iter().map(key).collect();
        cards.sort_unstable();
        full.sort_unstable();
        assert_eq!(cards, full);
    }

    /// Puts a round in progress with fixed hands. `draws` are the next cards
    /// off the deck, in order; the rest of the deck follows in base order.
    fn rig(
        game: &Game,
        state: GameState,
        bet: usize,
        player: &[Card],
        dealer: &[Card],
        draws: &[Card],
    ) {
        let fixed: Vec<Card> = player.iter().chain(dealer).chain(draws).copied().collect();
        let mut rest: Vec<Card> = Deck::new()
            .cards()
            .iter()
            .filter(|c| !fixed.contains(*c))
            .copied()
            .collect();
        rest.extend(draws.iter().rev());

        *game.deck.lock() = Deck::from_cards(rest);
        *game.discard.lock() = DiscardPile::new();
        {
            let mut p = game.player.lock();
            p.hand = player.iter().copied().collect::<Hand>();
            p.bet = bet;
            p.standing = false;
        }
        {
            let mut d = game.dealer.lock();
            d.hand = dealer.iter().copied().collect::<Hand>();
            d.standing = false;
        }
        game.round.store(1, Ordering::SeqCst);
        *game.state.lock() = state;
        assert_conserved(game);
    }

    fn settle(game: &Game, bet: usize, player: &[Card], dealer: &[Card]) -> Settlement {
        rig(game, GameState::GameOver, bet, player, dealer, &[]);
        game.new_game().unwrap()
    }

    #[test]
    fn place_bet_deals_two_cards_each() {
        let game = Game::new(GameOptions::default(), 1);
        game.place_bet(50).unwrap();

        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.player.lock().hand.len(), 2);
        assert_eq!(game.dealer.lock().hand.len(), 2);
        assert_eq!(game.chips(), 1000);
        assert_eq!(game.bet(), 50);
        assert_eq!(game.round(), 1);
        assert_conserved(&game);
    }

    #[test]
    fn placing_a_bet_gathers_previous_hands() {
        let game = Game::new(GameOptions::default(), 2);
        rig(
            &game,
            GameState::GameOver,
            10,
            &[card(Suit::Hearts, Rank::Ten), card(Suit::Clubs, Rank::Nine)],
            &[card(Suit::Spades, Rank::Ten), card(Suit::Spades, Rank::Eight)],
            &[],
        );
        game.new_game().unwrap();
        game.place_bet(10).unwrap();

        assert_eq!(game.discard_len(), 4);
        assert_eq!(game.cards_remaining(), DECK_SIZE - 8);
        assert_conserved(&game);
    }

    #[test]
    fn exhausted_deck_refills_from_discard() {
        let game = Game::new(GameOptions::default(), 3);
        rig(
            &game,
            GameState::Playing,
            10,
            &[card(Suit::Hearts, Rank::Two), card(Suit::Clubs, Rank::Three)],
            &[card(Suit::Spades, Rank::Ten), card(Suit::Spades, Rank::Eight)],
            &[],
        );

        {
            let mut deck = game.deck.lock();
            let mut hand: Hand = core::iter::from_fn(|| deck.draw()).collect();
            game.discard.lock().gather(&mut hand);
        }
        assert_eq!(game.cards_remaining(), 0);

        let reshuffles = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&reshuffles);
        game.subscribe(Box::new(move |event: &GameEvent| {
            if matches!(event, GameEvent::Reshuffled { .. }) {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }));

        assert!(game.hit().is_some());
        assert_eq!(reshuffles.load(Ordering::SeqCst), 1);
        assert_eq!(game.discard_len(), 0);
        assert_eq!(game.cards_remaining(), DECK_SIZE - 5);
        assert_conserved(&game);
    }

    #[test]
    #[should_panic(expected = "card conservation violated")]
    fn empty_deck_and_discard_is_fatal() {
        let game = Game::new(GameOptions::default(), 4);
        rig(
            &game,
            GameState::Playing,
            10,
            &[card(Suit::Hearts, Rank::Two), card(Suit::Clubs, Rank::Three)],
            &[card(Suit::Spades, Rank::Ten), card(Suit::Spades, Rank::Eight)],
            &[],
        );
        *game.deck.lock() = Deck::from_cards(Vec::new());

        let _ = game.hit();
    }

    #[test]
    fn hit_to_bust_ends_round_without_dealer() {
        let game = Game::new(GameOptions::default(), 5);
        rig(
            &game,
            GameState::Playing,
            10,
            &[card(Suit::Hearts, Rank::Ten), card(Suit::Clubs, Rank::Six)],
            &[card(Suit::Spades, Rank::Two), card(Suit::Spades, Rank::Three)],
            &[card(Suit::Diamonds, Rank::Queen)],
        );

        assert_eq!(game.hit(), Some(card(Suit::Diamonds, Rank::Queen)));
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.dealer.lock().hand.len(), 2);
        assert_eq!(game.game_result().winner, Winner::Dealer);

        let settlement = game.new_game().unwrap();
        assert_eq!(settlement.result.message, "Bust! You lose!");
        assert_eq!(game.chips(), 990);
    }

    #[test]
    fn stand_draws_dealer_to_seventeen() {
        let game = Game::new(GameOptions::default(), 6);
        rig(
            &game,
            GameState::Playing,
            10,
            &[card(Suit::Hearts, Rank::Ten), card(Suit::Clubs, Rank::Eight)],
            &[card(Suit::Spades, Rank::Two), card(Suit::Spades, Rank::Three)],
            &[card(Suit::Diamonds, Rank::Four), card(Suit::Diamonds, Rank::Ten)],
        );

        let ticket = game.stand().unwrap();
        assert_eq!(ticket.step, 0);
        assert_eq!(ticket.delay, Duration::from_secs(1));
        assert_eq!(game.state(), GameState::DealerTurn);
        assert!(game.player.lock().standing);

        let DealerStep::Drew { card: first, next } = game.dealer_step(ticket) else {
            panic!("expected a draw");
        };
        assert_eq!(first, card(Suit::Diamonds, Rank::Four));
        let next = next.unwrap();
        assert_eq!(next.step, 1);

        let DealerStep::Drew { card: second, next } = game.dealer_step(next) else {
            panic!("expected a draw");
        };
        assert_eq!(second, card(Suit::Diamonds, Rank::Ten));
        assert_eq!(next, None);
        assert_eq!(game.state(), GameState::GameOver);
        assert!(game.dealer.lock().standing);
        assert_eq!(game.dealer.lock().hand.value(), 19);
        assert_conserved(&game);
    }

    #[test]
    fn stand_on_dealer_seventeen_ends_immediately() {
        let game = Game::new(GameOptions::default(), 7);
        rig(
            &game,
            GameState::Playing,
            10,
            &[card(Suit::Hearts, Rank::Ten), card(Suit::Clubs, Rank::Eight)],
            &[card(Suit::Spades, Rank::Ten), card(Suit::Spades, Rank::Seven)],
            &[],
        );

        assert_eq!(game.stand(), None);
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.pending_dealer_step(), None);
    }

    #[test]
    fn soft_seventeen_stands() {
        let game = Game::new(GameOptions::default(), 8);
        rig(
            &game,
            GameState::Playing,
            10,
            &[card(Suit::Hearts, Rank::Ten), card(Suit::Clubs, Rank::Eight)],
            &[card(Suit::Spades, Rank::Ace), card(Suit::Spades, Rank::Six)],
            &[],
        );

        assert_eq!(game.stand(), None);
        assert_eq!(game.dealer.lock().hand.len(), 2);
    }

    #[test]
    fn stale_and_duplicate_tickets_are_ignored() {
        let game = Game::new(GameOptions::default(), 9);
        rig(
            &game,
            GameState::Playing,
            10,
            &[card(Suit::Hearts, Rank::Ten), card(Suit::Clubs, Rank::Eight)],
            &[card(Suit::Spades, Rank::Two), card(Suit::Spades, Rank::Three)],
            &[card(Suit::Diamonds, Rank::Two), card(Suit::Diamonds, Rank::Ten)],
        );

        let ticket = game.stand().unwrap();
        let old_round = DealerTicket { round: 0, ..ticket };
        assert_eq!(game.dealer_step(old_round), DealerStep::Stale);

        let next = match game.dealer_step(ticket) {
            DealerStep::Drew { next, .. } => next.unwrap(),
            DealerStep::Stale => panic!("expected a draw"),
        };
        assert_eq!(game.dealer_step(ticket), DealerStep::Stale);
        assert_eq!(game.dealer.lock().hand.len(), 3);

        assert!(matches!(game.dealer_step(next), DealerStep::Drew { next: None, .. }));
        assert_eq!(game.dealer_step(next), DealerStep::Stale);
        assert_eq!(game.dealer.lock().hand.len(), 4);
    }

    #[test]
    fn result_precedence_and_payouts() {
        let game = Game::new(GameOptions::default(), 10);
        let ace_h = card(Suit::Hearts, Rank::Ace);
        let king_h = card(Suit::Hearts, Rank::King);
        let ace_s = card(Suit::Spades, Rank::Ace);
        let queen_s = card(Suit::Spades, Rank::Queen);
        let ten_c = card(Suit::Clubs, Rank::Ten);
        let nine_c = card(Suit::Clubs, Rank::Nine);
        let ten_d = card(Suit::Diamonds, Rank::Ten);
        let nine_d = card(Suit::Diamonds, Rank::Nine);
        let ten_s = card(Suit::Spades, Rank::Ten);
        let five_s = card(Suit::Spades, Rank::Five);

        let push = settle(&game, 10, &[ace_h, king_h], &[ace_s, queen_s]);
        assert_eq!(push.result.winner, Winner::Tie);
        assert!(push.result.message.contains("Push"));
        assert_eq!(game.chips(), 1000);

        let blackjack = settle(&game, 25, &[ace_h, king_h], &[ten_c, nine_c]);
        assert_eq!(blackjack.result.winner, Winner::Player);
        assert_eq!(blackjack.net, 37);
        assert_eq!(game.chips(), 1037);

        let dealer_bust = settle(&game, 10, &[ten_c, nine_c], &[ten_d, ten_s, five_s]);
        assert_eq!(dealer_bust.result.winner, Winner::Player);
        assert_eq!(dealer_bust.net, 10);
        assert_eq!(game.chips(), 1047);

        let tie = settle(&game, 10, &[ten_c, nine_c], &[ten_d, nine_d]);
        assert_eq!(tie.result.winner, Winner::Tie);
        assert_eq!(tie.net, 0);
        assert_eq!(game.chips(), 1047);
        assert_eq!(game.bet(), 0);
        assert_eq!(game.state(), GameState::Betting);
    }

    #[test]
    fn observers_see_transitions_in_order() {
        let game = Game::new(GameOptions::default(), 11);
        let log = Arc::new(crate::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        game.subscribe(Box::new(move |event: &GameEvent| sink.lock().push(*event)));

        game.place_bet(10).unwrap();

        let events = log.lock().clone();
        assert_eq!(events[0], GameEvent::RoundStarted { round: 1, bet: 10 });
        assert_eq!(events[1], GameEvent::CardsGathered { count: 0 });
        assert_eq!(events[2], GameEvent::CardDrawn { party: Party::Player });
        assert_eq!(events[3], GameEvent::CardDrawn { party: Party::Dealer });
        assert_eq!(events[4], GameEvent::CardDrawn { party: Party::Player });
        assert_eq!(events[5], GameEvent::CardDrawn { party: Party::Dealer });
        assert_eq!(
            events[6],
            GameEvent::StateChanged {
                from: GameState::Betting,
                to: GameState::Playing
            }
        );
        assert_eq!(events.len(), 7);
    }
}
