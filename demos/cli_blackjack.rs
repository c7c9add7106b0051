//! CLI blackjack example.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use bjsolo::{Card, Color, DealerTimer, Game, GameEvent, GameOptions, GameState, TableView};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(io::stderr)
        .init();

    println!("Blackjack CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let game = Game::new(GameOptions::default(), seed);

    // Sound cues, printed instead of played.
    let dealt = AtomicBool::new(false);
    game.subscribe(Box::new(move |event: &GameEvent| match event {
        GameEvent::CardsGathered { count } if *count > 0 => println!("  *gather*"),
        GameEvent::CardDrawn { .. } if dealt.load(Ordering::Relaxed) => println!("  *snap*"),
        GameEvent::StateChanged {
            to: GameState::Playing,
            ..
        } => dealt.store(true, Ordering::Relaxed),
        GameEvent::RoundStarted { .. } => dealt.store(false, Ordering::Relaxed),
        GameEvent::Reshuffled { cards } => println!("  *riffle* ({cards} cards back in the deck)"),
        _ => {}
    }));

    let clock = Instant::now();
    let mut timer = DealerTimer::new();

    loop {
        let chips = game.chips();
        if chips == 0 {
            println!("You are out of chips. Game over.");
            break;
        }

        let Some(bet) = prompt_usize(&format!("Bet amount (1-{chips}, q to quit): ")) else {
            println!("Goodbye.");
            break;
        };

        if let Err(err) = game.place_bet(bet) {
            println!("{err}");
            continue;
        }

        while game.state() == GameState::Playing {
            render(&game.snapshot());

            match prompt_line("[h]it or [s]tand: ").as_str() {
                "h" | "hit" => {
                    game.hit();
                }
                "s" | "stand" => {
                    if let Some(ticket) = game.stand() {
                        timer.arm(ticket, clock.elapsed());
                    }
                }
                "q" | "quit" => return,
                _ => println!("Unknown action."),
            }
        }

        while let Some(due) = timer.due_at() {
            render(&game.snapshot());
            thread::sleep(due.saturating_sub(clock.elapsed()));
            timer.poll(&game, clock.elapsed());
        }

        render(&game.snapshot());
        if let Some(settlement) = game.new_game() {
            println!("Net {:+} -> {} chips", settlement.net, settlement.chips);
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn render(view: &TableView) {
    let dealer_score = view
        .dealer_score
        .map_or_else(|| "?".to_string(), |score| score.to_string());
    let discard = "▮".repeat(view.discard_stack);

    println!(
        "\n[{}] Chips: {}  Bet: {}  Deck: {}  Discard: {} {}",
        view.state, view.chips, view.bet, view.cards_remaining, view.discard_count, discard
    );
    println!(
        "Dealer: {} (score {dealer_score})",
        format_cards(view.dealer_cards.iter().copied())
    );
    println!(
        "Player: {} (score {})",
        format_cards(view.player_cards.iter().copied().map(Some)),
        view.player_score
    );
    if let Some(message) = view.message {
        println!("{message}");
    }
}

fn format_cards(cards: impl Iterator<Item = Option<Card>>) -> String {
    let parts: Vec<String> = cards
        .map(|card| card.map_or_else(|| "??".to_string(), |card| format_card(&card)))
        .collect();

    if parts.is_empty() {
        "(no cards)".to_string()
    } else {
        parts.join(" ")
    }
}

fn format_card(card: &Card) -> String {
    let code = match card.color() {
        Color::Red => "31",
        Color::Black => "34",
    };
    colorize(&card.to_string(), code)
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
