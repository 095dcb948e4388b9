use crate::cards::Card;
use crate::hand::Hand;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLAYER_NAME: &str = "Player";
pub const DEALER_NAME: &str = "Dealer";

/// Dealer stands once its best total reaches this value.
pub const DEALER_STAND_AT: u32 = 17;

/// Decision taken by a participant on its turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    /// Draw another card
    Hit,
    /// Keep the current hand
    Stand,
}

/// Fixed hit/stand rule attached to the dealer role.
///
/// Looks only at [`Hand::best_total`]: a soft 17 stands just like a hard 17.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DealerPolicy {
    pub stand_at: u32,
}

impl Default for DealerPolicy {
    fn default() -> Self {
        Self {
            stand_at: DEALER_STAND_AT,
        }
    }
}

impl DealerPolicy {
    pub fn decide(&self, hand: &Hand) -> Decision {
        if hand.best_total() < self.stand_at {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }
}

/// Role of a participant. Only the dealer carries a decision rule; the human
/// decides through commands.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Human,
    Dealer(DealerPolicy),
}

/// A named seat at the table: its current hand and the rounds it has won in
/// this match.
#[derive(Debug, Clone)]
pub struct Participant {
    name: String,
    hand: Hand,
    score: u32,
    role: Role,
}

impl Participant {
    pub fn human(name: &str) -> Self {
        Self::with_role(name, Role::Human)
    }

    pub fn dealer(policy: DealerPolicy) -> Self {
        Self::with_role(DEALER_NAME, Role::Dealer(policy))
    }

    fn with_role(name: &str, role: Role) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() {
                DEFAULT_PLAYER_NAME.to_string()
            } else {
                name.to_string()
            },
            hand: Hand::new(),
            score: 0,
            role,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blank names are ignored.
    pub fn set_name(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.name = name.to_string();
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn cards(&self) -> &[Card] {
        self.hand.cards()
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub fn reset_hand(&mut self) {
        self.hand.clear();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_dealer(&self) -> bool {
        matches!(self.role, Role::Dealer(_))
    }

    /// Automated decision for roles that have one; `None` for the human.
    pub fn decision(&self) -> Option<Decision> {
        match self.role {
            Role::Human => None,
            Role::Dealer(policy) => Some(policy.decide(&self.hand)),
        }
    }
}
