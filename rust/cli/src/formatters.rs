//! Card and hand formatters for terminal display.
//!
//! Pure functions turning engine values into the strings the play screen
//! prints. Suits use Unicode symbols with an ASCII letter fallback on
//! terminals that cannot render them.
//!
//! ## Example
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_engine::game::CardView;
//! use blackjack_cli::formatters::{format_card, format_hand};
//!
//! let ace_spades = Card::new(Suit::Spades, Rank::Ace);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//!
//! let hand = vec![CardView::Visible(ace_spades), CardView::Hidden];
//! assert!(format_hand(&hand).ends_with(" [HIDDEN]]"));
//! ```

use blackjack_engine::cards::{Card, Rank, Suit};
use blackjack_engine::game::CardView;

pub const HIDDEN_CARD: &str = "[HIDDEN]";

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). Unix-like systems are
/// assumed to support Unicode.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.code().to_string()
    }
}

/// Rank label: `A`, `2`..`10`, `J`, `Q`, `K`.
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Ace => "A".to_string(),
        Rank::Jack => "J".to_string(),
        Rank::Queen => "Q".to_string(),
        Rank::King => "K".to_string(),
        other => other.number().to_string(),
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

pub fn format_view(view: &CardView) -> String {
    match view {
        CardView::Visible(card) => format_card(card),
        CardView::Hidden => HIDDEN_CARD.to_string(),
    }
}

/// Formats a hand as space-separated cards in brackets, e.g. `[A♠ 10♥]`.
pub fn format_hand(cards: &[CardView]) -> String {
    let parts: Vec<String> = cards.iter().map(format_view).collect();
    format!("[{}]", parts.join(" "))
}

/// Total as shown to the player; `?` while a card is face down.
pub fn format_total(total: Option<u32>) -> String {
    match total {
        Some(t) => t.to_string(),
        None => "?".to_string(),
    }
}
