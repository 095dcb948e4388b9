use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

pub const DEFAULT_DECKS: usize = 4;

/// Multi-deck draw stack. Cards are drawn from the end of the vector.
#[derive(Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    decks: usize,
    rng: ChaCha20Rng,
    #[cfg(test)]
    frozen: bool,
}

impl Shoe {
    /// Builds a full shoe of `decks` 52-card sets and shuffles it.
    pub fn new(decks: usize, seed: u64) -> Result<Self, GameError> {
        if decks == 0 {
            return Err(GameError::InvalidConfig(
                "deck count must be >= 1".to_string(),
            ));
        }
        let mut shoe = Self {
            cards: Vec::new(),
            decks,
            rng: ChaCha20Rng::seed_from_u64(seed),
            #[cfg(test)]
            frozen: false,
        };
        shoe.reset(decks);
        shoe.shuffle();
        Ok(shoe)
    }

    /// Rebuilds the full composition in deck order. Does not shuffle.
    ///
    /// A `decks` of 0 is treated as 1; [`Shoe::new`] is where a zero deck
    /// count is rejected.
    pub fn reset(&mut self, decks: usize) {
        self.decks = decks.max(1);
        let deck = full_deck();
        self.cards = Vec::with_capacity(deck.len() * self.decks);
        for _ in 0..self.decks {
            self.cards.extend_from_slice(&deck);
        }
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyShoe)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn decks(&self) -> usize {
        self.decks
    }

    pub fn capacity(&self) -> usize {
        self.decks * 52
    }

    /// Guarantees `needed` cards for the next draw batch. A short shoe is
    /// replaced by a freshly shuffled full one; discards are not topped up.
    ///
    /// Returns `true` when a reshuffle happened.
    pub fn ensure_available(&mut self, needed: usize) -> bool {
        #[cfg(test)]
        if self.frozen {
            return false;
        }
        if self.cards.len() >= needed {
            return false;
        }
        tracing::debug!(
            remaining = self.cards.len(),
            needed,
            decks = self.decks,
            "reshuffling shoe"
        );
        self.reset(self.decks);
        self.shuffle();
        true
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Empties the shoe and stops it from refilling.
    #[cfg(test)]
    pub(crate) fn empty_and_freeze(&mut self) {
        self.cards.clear();
        self.frozen = true;
    }
}
