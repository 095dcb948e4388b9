use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    /// Single-letter code used by renderers to look up card assets.
    pub fn code(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_code(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Represents the rank of a playing card from Ace through King.
/// The discriminant is the canonical rank number (Ace = 1 … King = 13).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (1)
    Ace = 1,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
}

impl Rank {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(v: u8) -> Option<Rank> {
        all_ranks().get(usize::from(v).checked_sub(1)?).copied()
    }
}

/// Represents a single playing card with a suit and rank.
/// Cards are immutable values; equality and hashing are by (suit, rank).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Ace through King)
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Blackjack base value: 2-10 at face value, J/Q/K = 10, Ace = 1.
    ///
    /// The Ace's alternate value of 11 belongs to hand evaluation, see
    /// [`crate::hand::Hand::best_total`].
    pub fn base_value(self) -> u8 {
        match self.rank {
            Rank::Jack | Rank::Queen | Rank::King => 10,
            r => r.number(),
        }
    }

    pub fn is_ace(self) -> bool {
        self.rank == Rank::Ace
    }

    /// Asset key such as `"1c"` (Ace of Clubs) or `"13h"` (King of Hearts).
    pub fn code(self) -> String {
        format!("{}{}", self.rank.number(), self.suit.code())
    }

    /// Parses an asset key produced by [`Card::code`].
    ///
    /// ```
    /// use blackjack_engine::cards::{Card, Rank, Suit};
    ///
    /// let card = Card::from_code("12d").unwrap();
    /// assert_eq!(card, Card::new(Suit::Diamonds, Rank::Queen));
    /// assert!(Card::from_code("14d").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Card, GameError> {
        let code = code.trim();
        let invalid = || GameError::InvalidCard(code.to_string());
        let suit_char = code.chars().last().ok_or_else(invalid)?;
        let suit = Suit::from_code(suit_char).ok_or_else(invalid)?;
        let number: u8 = code[..code.len() - suit_char.len_utf8()]
            .parse()
            .map_err(|_| invalid())?;
        let rank = Rank::from_number(number).ok_or_else(invalid)?;
        Ok(Card { suit, rank })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} of {:?}", self.rank, self.suit)
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
