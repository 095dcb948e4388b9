//! # blackjack-engine: Ten-Round Blackjack Core
//!
//! A single-player-versus-dealer blackjack engine played over a fixed number
//! of rounds. Provides card and shoe modelling, hand evaluation with dual
//! Ace valuation, the round state machine, and a match controller whose
//! pacing is expressed as cancellable scheduled steps rather than sleeps.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and asset codes
//! - [`shoe`] - Multi-deck shoe with seeded ChaCha20 shuffling and reshuffle policy
//! - [`hand`] - Hand totals, bust and soft-total queries
//! - [`player`] - Participants, roles and the dealer's hit/stand policy
//! - [`round`] - Round state machine (dealing, player turn, dealer turn, resolution)
//! - [`scheduler`] - Cooperative timer queue on a virtual clock
//! - [`game`] - Match controller, configuration and presentation queries
//! - [`record`] - Match results and the score storage seam
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_engine::hand::Hand;
//!
//! let hand = Hand::from_cards([
//!     Card::new(Suit::Hearts, Rank::Ace),
//!     Card::new(Suit::Spades, Rank::King),
//! ]);
//! assert_eq!(hand.best_total(), 21);
//! assert!(!hand.is_bust());
//! ```
//!
//! ## Playing a Match
//!
//! ```rust
//! use blackjack_engine::game::{GameConfig, MatchController, Turn};
//! use blackjack_engine::record::NullSink;
//!
//! let config = GameConfig { seed: Some(42), ..GameConfig::default() };
//! let mut game = MatchController::new(config, Box::new(NullSink)).unwrap();
//! game.start_new_game("Ada").unwrap();
//! assert_eq!(game.turn(), Turn::Player);
//! assert_eq!(game.dealer_total(), None);
//!
//! game.player_stand().unwrap();
//! game.advance(10_000).unwrap();
//! assert_eq!(game.round_number(), 2);
//! assert!(game.can_player_act());
//! ```

pub mod cards;
pub mod errors;
pub mod game;
pub mod hand;
pub mod player;
pub mod record;
pub mod round;
pub mod scheduler;
pub mod shoe;
