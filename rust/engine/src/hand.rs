use crate::cards::Card;

pub const BLACKJACK: u32 = 21;

/// Extra points an Ace contributes when counted as 11 instead of 1.
const ACE_BONUS: u32 = 10;

/// Ordered cards held by one participant for the current round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Total with every Ace counted as 1.
    pub fn hard_total(&self) -> u32 {
        self.cards.iter().map(|c| u32::from(c.base_value())).sum()
    }

    pub fn ace_count(&self) -> u32 {
        self.cards.iter().filter(|c| c.is_ace()).count() as u32
    }

    /// Largest total not above 21 over every Ace valuation, or the hard total
    /// when every valuation busts.
    ///
    /// Promotes Aces from 1 to 11 one at a time while the total stays within
    /// 21, which reaches the same value as enumerating all `2^aces` valuations.
    ///
    /// ```
    /// use blackjack_engine::cards::{Card, Rank, Suit};
    /// use blackjack_engine::hand::Hand;
    ///
    /// let hand = Hand::from_cards([
    ///     Card::new(Suit::Spades, Rank::Ace),
    ///     Card::new(Suit::Hearts, Rank::Ace),
    ///     Card::new(Suit::Clubs, Rank::Nine),
    /// ]);
    /// assert_eq!(hand.hard_total(), 11);
    /// assert_eq!(hand.best_total(), 21);
    /// ```
    pub fn best_total(&self) -> u32 {
        let mut total = self.hard_total();
        for _ in 0..self.ace_count() {
            if total + ACE_BONUS > BLACKJACK {
                break;
            }
            total += ACE_BONUS;
        }
        total
    }

    /// A hand is bust once no valuation can bring it back to 21 or under.
    pub fn is_bust(&self) -> bool {
        self.hard_total() > BLACKJACK
    }

    /// True when `total` (not above 21) is reachable with at least one Ace
    /// counted as 11.
    pub fn is_soft(&self, total: u32) -> bool {
        let hard = self.hard_total();
        if total > BLACKJACK || total <= hard {
            return false;
        }
        let diff = total - hard;
        diff % ACE_BONUS == 0 && diff / ACE_BONUS <= self.ace_count()
    }

    pub fn is_soft_17(&self) -> bool {
        self.is_soft(17)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn hand(ranks: &[Rank]) -> Hand {
        Hand::from_cards(ranks.iter().map(|&r| Card::new(Suit::Clubs, r)))
    }

    #[test]
    fn empty_hand_totals_zero() {
        let h = Hand::new();
        assert_eq!(h.best_total(), 0);
        assert!(!h.is_bust());
        assert!(h.is_empty());
    }

    #[test]
    fn ace_king_is_twenty_one() {
        let h = hand(&[Rank::Ace, Rank::King]);
        assert_eq!(h.hard_total(), 11);
        assert_eq!(h.best_total(), 21);
        assert!(!h.is_bust());
        assert!(h.is_soft(21));
        assert!(!h.is_soft(11));
    }

    #[test]
    fn soft_seventeen_detection() {
        assert!(hand(&[Rank::Ace, Rank::Six]).is_soft_17());
        assert!(!hand(&[Rank::Ten, Rank::Seven]).is_soft_17());
        // A+A+5: hard 7, soft 17 with a single promotion
        assert!(hand(&[Rank::Ace, Rank::Ace, Rank::Five]).is_soft_17());
    }

    #[test]
    fn busted_hand_reports_hard_total() {
        let h = hand(&[Rank::King, Rank::Queen, Rank::Ace, Rank::Five]);
        assert_eq!(h.hard_total(), 26);
        assert!(h.is_bust());
        assert_eq!(h.best_total(), 26);
    }
}
