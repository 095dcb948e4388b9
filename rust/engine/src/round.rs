use crate::cards::Card;
use crate::errors::GameError;
use crate::player::{DealerPolicy, Decision, Participant};
use crate::shoe::Shoe;

/// Index of the dealer card kept face down while the player can act.
pub const HIDDEN_DEALER_CARD: usize = 1;

const INITIAL_DEAL: usize = 4;

/// Phase of the round currently in progress.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RoundState {
    /// Hands are being reset and the opening cards dealt
    Dealing,
    /// Waiting for the player to hit or stand
    PlayerTurn,
    /// Dealer is drawing according to its policy
    DealerTurn,
    /// Outcome decided; waiting for the next round
    RoundOver,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RoundOutcome {
    PlayerWin,
    DealerWin,
    Push,
}

/// Result of a single paced dealer step.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DealerStep {
    /// Dealer took a card and keeps the turn
    Drew(Card),
    /// Round resolved with this outcome
    Resolved(RoundOutcome),
    /// Called outside the dealer's turn
    Idle,
}

/// Runs one round at a time between a human player and the dealer.
///
/// Owns the shoe and both participants. Commands that arrive in a state that
/// does not accept them are ignored.
///
/// # Examples
///
/// ```
/// use blackjack_engine::player::DealerPolicy;
/// use blackjack_engine::round::{RoundEngine, RoundState};
/// use blackjack_engine::shoe::Shoe;
///
/// let shoe = Shoe::new(4, 7).unwrap();
/// let mut round = RoundEngine::new(shoe, "Ada", DealerPolicy::default());
/// round.deal().unwrap();
/// assert_eq!(round.state(), RoundState::PlayerTurn);
/// assert_eq!(round.player().cards().len(), 2);
/// assert!(round.dealer_hidden());
///
/// round.stand();
/// assert_eq!(round.state(), RoundState::DealerTurn);
/// ```
#[derive(Debug)]
pub struct RoundEngine {
    shoe: Shoe,
    player: Participant,
    dealer: Participant,
    state: RoundState,
    dealer_hidden: bool,
    summary: String,
    outcome: Option<RoundOutcome>,
}

impl RoundEngine {
    pub fn new(shoe: Shoe, player_name: &str, policy: DealerPolicy) -> Self {
        Self {
            shoe,
            player: Participant::human(player_name),
            dealer: Participant::dealer(policy),
            state: RoundState::RoundOver,
            dealer_hidden: false,
            summary: String::new(),
            outcome: None,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn player(&self) -> &Participant {
        &self.player
    }

    pub fn dealer(&self) -> &Participant {
        &self.dealer
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.player.set_name(name);
    }

    pub fn dealer_hidden(&self) -> bool {
        self.dealer_hidden
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn shoe_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    /// Fresh full shoe and zeroed scores for a new match.
    pub fn reset_match(&mut self) {
        let decks = self.shoe.decks();
        self.shoe.reset(decks);
        self.shoe.shuffle();
        self.player.reset_score();
        self.dealer.reset_score();
        self.player.reset_hand();
        self.dealer.reset_hand();
        self.summary.clear();
        self.outcome = None;
        self.dealer_hidden = false;
        self.state = RoundState::RoundOver;
    }

    /// Enters Dealing: clears both hands, then deals player, dealer, player,
    /// dealer and hands the turn to the player.
    pub fn deal(&mut self) -> Result<(), GameError> {
        self.state = RoundState::Dealing;
        self.player.reset_hand();
        self.dealer.reset_hand();
        self.summary.clear();
        self.outcome = None;

        self.shoe.ensure_available(INITIAL_DEAL);
        for _ in 0..2 {
            let c = self.shoe.draw()?;
            self.player.add_card(c);
            let c = self.shoe.draw()?;
            self.dealer.add_card(c);
        }
        self.dealer_hidden = true;
        self.state = RoundState::PlayerTurn;
        tracing::debug!(
            player_total = self.player.hand().best_total(),
            shoe_remaining = self.shoe.remaining(),
            "round dealt"
        );
        Ok(())
    }

    /// Draws one card for the player. A bust resolves the round for the
    /// dealer immediately.
    pub fn hit(&mut self) -> Result<Option<RoundOutcome>, GameError> {
        if self.state != RoundState::PlayerTurn {
            return Ok(None);
        }
        self.shoe.ensure_available(1);
        let card = self.shoe.draw()?;
        self.player.add_card(card);
        if self.player.hand().is_bust() {
            self.summary = format!("{} BUST! Dealer wins the round.", self.player.name());
            self.dealer.add_score(1);
            return Ok(Some(self.finish(RoundOutcome::DealerWin)));
        }
        Ok(None)
    }

    /// Ends the player's turn and reveals the dealer's hidden card.
    pub fn stand(&mut self) -> bool {
        if self.state != RoundState::PlayerTurn {
            return false;
        }
        self.dealer_hidden = false;
        self.state = RoundState::DealerTurn;
        true
    }

    /// One paced step of the dealer's turn.
    pub fn dealer_step(&mut self) -> Result<DealerStep, GameError> {
        if self.state != RoundState::DealerTurn {
            return Ok(DealerStep::Idle);
        }
        if self.dealer.hand().is_bust() {
            self.summary = format!("Dealer BUST! {} wins the round.", self.player.name());
            self.player.add_score(1);
            return Ok(DealerStep::Resolved(self.finish(RoundOutcome::PlayerWin)));
        }
        match self.dealer.decision() {
            Some(Decision::Hit) => {
                self.shoe.ensure_available(1);
                let card = self.shoe.draw()?;
                self.dealer.add_card(card);
                Ok(DealerStep::Drew(card))
            }
            _ => Ok(DealerStep::Resolved(self.settle())),
        }
    }

    /// Compares best totals once the dealer stands.
    fn settle(&mut self) -> RoundOutcome {
        let p = self.player.hand().best_total();
        let d = self.dealer.hand().best_total();
        let outcome = if p > d {
            self.summary = format!("{} wins the round ({} vs {}).", self.player.name(), p, d);
            self.player.add_score(1);
            RoundOutcome::PlayerWin
        } else if d > p {
            self.summary = format!("Dealer wins the round ({} vs {}).", d, p);
            self.dealer.add_score(1);
            RoundOutcome::DealerWin
        } else {
            self.summary = format!("Draw (push) ({} vs {}).", p, d);
            RoundOutcome::Push
        };
        self.finish(outcome)
    }

    fn finish(&mut self, outcome: RoundOutcome) -> RoundOutcome {
        self.state = RoundState::RoundOver;
        self.dealer_hidden = false;
        self.outcome = Some(outcome);
        tracing::info!(?outcome, summary = %self.summary, "round resolved");
        outcome
    }

    #[cfg(test)]
    pub(crate) fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }

    #[cfg(test)]
    pub(crate) fn set_hands(&mut self, player: &[Card], dealer: &[Card]) {
        self.player.reset_hand();
        self.dealer.reset_hand();
        player.iter().for_each(|&c| self.player.add_card(c));
        dealer.iter().for_each(|&c| self.dealer.add_card(c));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn c(r: Rank) -> Card {
        Card::new(Suit::Spades, r)
    }

    fn engine() -> RoundEngine {
        RoundEngine::new(Shoe::new(4, 99).unwrap(), "Ada", DealerPolicy::default())
    }

    #[test]
    fn dealer_bust_awards_player() {
        let mut e = engine();
        e.deal().unwrap();
        e.set_hands(
            &[c(Rank::Ten), c(Rank::Two)],
            &[c(Rank::King), c(Rank::Six), c(Rank::Nine)],
        );
        assert!(e.stand());
        assert_eq!(
            e.dealer_step().unwrap(),
            DealerStep::Resolved(RoundOutcome::PlayerWin)
        );
        assert_eq!(e.player().score(), 1);
        assert_eq!(e.summary(), "Dealer BUST! Ada wins the round.");
    }

    #[test]
    fn equal_totals_push() {
        let mut e = engine();
        e.deal().unwrap();
        e.set_hands(
            &[c(Rank::Ten), c(Rank::Eight)],
            &[c(Rank::Queen), c(Rank::Eight)],
        );
        e.stand();
        assert_eq!(
            e.dealer_step().unwrap(),
            DealerStep::Resolved(RoundOutcome::Push)
        );
        assert_eq!(e.player().score(), 0);
        assert_eq!(e.dealer().score(), 0);
        assert_eq!(e.summary(), "Draw (push) (18 vs 18).");
    }

    #[test]
    fn dealer_stands_on_soft_seventeen() {
        let mut e = engine();
        e.deal().unwrap();
        e.set_hands(
            &[c(Rank::Ten), c(Rank::Nine)],
            &[c(Rank::Ace), c(Rank::Six)],
        );
        e.stand();
        assert_eq!(
            e.dealer_step().unwrap(),
            DealerStep::Resolved(RoundOutcome::PlayerWin)
        );
        assert_eq!(e.dealer().cards().len(), 2);
        assert_eq!(e.summary(), "Ada wins the round (19 vs 17).");
    }

    #[test]
    fn player_bust_resolves_immediately() {
        let mut e = engine();
        e.deal().unwrap();
        e.set_hands(
            &[c(Rank::King), c(Rank::Queen), c(Rank::Two)],
            &[c(Rank::Five), c(Rank::Five)],
        );
        // hard 22 is already bust; any further card keeps it bust
        assert_eq!(e.hit().unwrap(), Some(RoundOutcome::DealerWin));
        assert_eq!(e.state(), RoundState::RoundOver);
        assert_eq!(e.dealer().score(), 1);
        assert!(!e.dealer_hidden());
    }

    #[test]
    fn commands_outside_player_turn_are_ignored() {
        let mut e = engine();
        assert_eq!(e.hit().unwrap(), None);
        assert!(!e.stand());
        assert_eq!(e.dealer_step().unwrap(), DealerStep::Idle);
        e.deal().unwrap();
        e.stand();
        let before = e.player().cards().len();
        assert_eq!(e.hit().unwrap(), None);
        assert_eq!(e.player().cards().len(), before);
    }
}
