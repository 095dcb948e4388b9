use std::fmt;

use crate::cards::Card;
use crate::errors::GameError;
use crate::player::{DealerPolicy, Participant, DEALER_STAND_AT, DEFAULT_PLAYER_NAME};
use crate::record::{MatchRecord, ScoreSink};
use crate::round::{DealerStep, RoundEngine, RoundState, HIDDEN_DEALER_CARD};
use crate::scheduler::{Scheduler, TaskId};
use crate::shoe::{Shoe, DEFAULT_DECKS};

pub const MAX_ROUNDS: u32 = 10;
/// Pause between two dealer draws.
pub const DEALER_STEP_MS: u64 = 550;
/// Pause between a resolved round and the next deal.
pub const NEXT_ROUND_MS: u64 = 900;

/// Match parameters fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of 52-card decks in the shoe
    pub decks: usize,
    /// Rounds per match
    pub max_rounds: u32,
    /// Dealer stands at this best total or above
    pub dealer_stand_at: u32,
    /// Delay between dealer steps, in milliseconds
    pub dealer_step_ms: u64,
    /// Delay before the next round is dealt, in milliseconds
    pub next_round_ms: u64,
    /// Shoe RNG seed; random when `None`
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            decks: DEFAULT_DECKS,
            max_rounds: MAX_ROUNDS,
            dealer_stand_at: DEALER_STAND_AT,
            dealer_step_ms: DEALER_STEP_MS,
            next_round_ms: NEXT_ROUND_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.decks == 0 {
            return Err(GameError::InvalidConfig("decks must be >= 1".into()));
        }
        if self.max_rounds == 0 {
            return Err(GameError::InvalidConfig("max_rounds must be >= 1".into()));
        }
        Ok(())
    }
}

/// Which screen the match is on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MatchPhase {
    Menu,
    Playing,
    GameOver,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MatchOutcome {
    PlayerWins,
    DealerWins,
    Draw,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Turn {
    Player,
    Dealer,
    RoundFinished,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Turn::Player => "Your turn",
            Turn::Dealer => "Dealer turn",
            Turn::RoundFinished => "Round finished",
        };
        f.write_str(s)
    }
}

/// A card as the opponent is allowed to see it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CardView {
    Visible(Card),
    Hidden,
}

/// Continuations queued on the scheduler, tagged with the round that issued them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Step {
    Dealer { round: u32 },
    NextRound { round: u32 },
}

/// Drives a match of `max_rounds` rounds between the player and the dealer.
///
/// All waiting is expressed as scheduled steps; call [`MatchController::advance`]
/// with elapsed time to let the dealer play and the next round start.
///
/// # Examples
///
/// ```
/// use blackjack_engine::game::{GameConfig, MatchController, MatchPhase};
/// use blackjack_engine::record::MemorySink;
///
/// let sink = MemorySink::new();
/// let config = GameConfig { seed: Some(3), max_rounds: 2, ..GameConfig::default() };
/// let mut game = MatchController::new(config, Box::new(sink.clone())).unwrap();
/// game.start_new_game("Ada").unwrap();
///
/// while game.phase() == MatchPhase::Playing {
///     game.player_stand().unwrap();
///     game.fast_forward().unwrap();
/// }
/// assert_eq!(game.phase(), MatchPhase::GameOver);
/// assert_eq!(sink.records().len(), 1);
/// ```
pub struct MatchController {
    config: GameConfig,
    round: RoundEngine,
    round_number: u32,
    phase: MatchPhase,
    scheduler: Scheduler<Step>,
    dealer_task: Option<TaskId>,
    next_round_task: Option<TaskId>,
    final_summary: String,
    outcome: Option<MatchOutcome>,
    sink: Box<dyn ScoreSink>,
}

impl MatchController {
    pub fn new(config: GameConfig, sink: Box<dyn ScoreSink>) -> Result<Self, GameError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let shoe = Shoe::new(config.decks, seed)?;
        let policy = DealerPolicy {
            stand_at: config.dealer_stand_at,
        };
        Ok(Self {
            round: RoundEngine::new(shoe, DEFAULT_PLAYER_NAME, policy),
            config,
            round_number: 0,
            phase: MatchPhase::Menu,
            scheduler: Scheduler::new(),
            dealer_task: None,
            next_round_task: None,
            final_summary: String::new(),
            outcome: None,
            sink,
        })
    }

    // ---- commands ----

    /// Starts a fresh match. A blank name leaves the controller untouched.
    pub fn start_new_game(&mut self, name: &str) -> Result<(), GameError> {
        if name.trim().is_empty() {
            return Err(GameError::EmptyName);
        }
        self.stop_timers();
        self.round.set_player_name(name);
        self.round.reset_match();
        self.round_number = 0;
        self.final_summary.clear();
        self.outcome = None;
        self.phase = MatchPhase::Playing;
        tracing::info!(
            player = self.round.player().name(),
            max_rounds = self.config.max_rounds,
            decks = self.config.decks,
            "match started"
        );
        let r = self.start_next_round();
        self.guard(r)
    }

    pub fn player_hit(&mut self) -> Result<(), GameError> {
        if !self.can_player_act() {
            return Ok(());
        }
        match self.round.hit() {
            Ok(Some(_)) => {
                self.finish_round();
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => self.guard(Err(e)),
        }
    }

    pub fn player_stand(&mut self) -> Result<(), GameError> {
        if !self.can_player_act() {
            return Ok(());
        }
        if self.round.stand() {
            self.schedule_dealer_step();
        }
        Ok(())
    }

    /// Abandons the current round; nothing scheduled for it will fire.
    pub fn return_to_menu(&mut self) {
        self.stop_timers();
        self.phase = MatchPhase::Menu;
    }

    pub fn restart_match(&mut self) -> Result<(), GameError> {
        let name = self.round.player().name().to_string();
        self.start_new_game(&name)
    }

    /// Moves the clock forward by `elapsed_ms`, running every step that
    /// falls due in order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Result<(), GameError> {
        let target = self.scheduler.now().saturating_add(elapsed_ms);
        while let Some((id, step)) = self.scheduler.pop_due(target) {
            self.forget(id);
            let r = self.run_step(step);
            self.guard(r)?;
        }
        self.scheduler.advance_to(target);
        Ok(())
    }

    /// Runs scheduled steps until the player has to act or nothing is left
    /// pending. Returns the virtual time that passed.
    pub fn fast_forward(&mut self) -> Result<u64, GameError> {
        let mut elapsed = 0;
        while !self.can_player_act() {
            let Some(delay) = self.scheduler.next_delay() else {
                break;
            };
            self.advance(delay)?;
            elapsed += delay;
        }
        Ok(elapsed)
    }

    // ---- scheduled steps ----

    fn run_step(&mut self, step: Step) -> Result<(), GameError> {
        if self.phase != MatchPhase::Playing {
            tracing::debug!(?step, "dropping step outside a running match");
            return Ok(());
        }
        match step {
            Step::Dealer { round } if round == self.round_number => {
                match self.round.dealer_step()? {
                    DealerStep::Drew(card) => {
                        tracing::debug!(%card, "dealer draws");
                        self.schedule_dealer_step();
                    }
                    DealerStep::Resolved(_) => self.finish_round(),
                    DealerStep::Idle => {}
                }
                Ok(())
            }
            Step::NextRound { round } if round == self.round_number => {
                if self.round_number >= self.config.max_rounds {
                    self.end_match();
                    Ok(())
                } else {
                    self.start_next_round()
                }
            }
            _ => {
                tracing::debug!(?step, current = self.round_number, "dropping stale step");
                Ok(())
            }
        }
    }

    fn start_next_round(&mut self) -> Result<(), GameError> {
        self.stop_timers();
        if self.round_number >= self.config.max_rounds {
            self.end_match();
            return Ok(());
        }
        self.round_number += 1;
        tracing::debug!(round = self.round_number, "starting round");
        self.round.deal()
    }

    fn schedule_dealer_step(&mut self) {
        let step = Step::Dealer {
            round: self.round_number,
        };
        self.dealer_task = Some(self.scheduler.schedule(self.config.dealer_step_ms, step));
    }

    fn finish_round(&mut self) {
        if let Some(id) = self.dealer_task.take() {
            self.scheduler.cancel(id);
        }
        let step = Step::NextRound {
            round: self.round_number,
        };
        self.next_round_task = Some(self.scheduler.schedule(self.config.next_round_ms, step));
    }

    fn end_match(&mut self) {
        self.stop_timers();
        let name = self.round.player().name().to_string();
        let p = self.round.player().score();
        let d = self.round.dealer().score();
        let (outcome, winner) = if p > d {
            (MatchOutcome::PlayerWins, format!("{} wins the game!", name))
        } else if d > p {
            (MatchOutcome::DealerWins, "Dealer wins the game!".to_string())
        } else {
            (MatchOutcome::Draw, "Game is a draw!".to_string())
        };
        self.final_summary = format!(
            "Final Score\n{}: {}\n{}: {}\n\n{}",
            name,
            p,
            self.round.dealer().name(),
            d,
            winner
        );
        self.outcome = Some(outcome);
        self.phase = MatchPhase::GameOver;
        tracing::info!(player = %name, score = p, dealer = d, ?outcome, "match finished");

        let record = MatchRecord::today(&name, p);
        if let Err(e) = self.sink.record(&record) {
            tracing::warn!(error = %e, "failed to store match result");
        }
    }

    fn stop_timers(&mut self) {
        self.scheduler.cancel_all();
        self.dealer_task = None;
        self.next_round_task = None;
    }

    fn forget(&mut self, id: TaskId) {
        if self.dealer_task == Some(id) {
            self.dealer_task = None;
        }
        if self.next_round_task == Some(id) {
            self.next_round_task = None;
        }
    }

    /// Invariant violations abort the match back to the menu.
    fn guard(&mut self, r: Result<(), GameError>) -> Result<(), GameError> {
        if let Err(e) = &r {
            tracing::error!(error = %e, round = self.round_number, "aborting match");
            self.stop_timers();
            self.phase = MatchPhase::Menu;
        }
        r
    }

    // ---- queries ----

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn round_state(&self) -> RoundState {
        self.round.state()
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn max_rounds(&self) -> u32 {
        self.config.max_rounds
    }

    pub fn shoe_remaining(&self) -> usize {
        self.round.shoe_remaining()
    }

    pub fn player(&self) -> &Participant {
        self.round.player()
    }

    pub fn dealer(&self) -> &Participant {
        self.round.dealer()
    }

    pub fn player_name(&self) -> &str {
        self.round.player().name()
    }

    pub fn player_cards(&self) -> Vec<CardView> {
        self.round
            .player()
            .cards()
            .iter()
            .map(|&c| CardView::Visible(c))
            .collect()
    }

    pub fn dealer_cards(&self) -> Vec<CardView> {
        let hidden = self.round.dealer_hidden();
        self.round
            .dealer()
            .cards()
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if hidden && i == HIDDEN_DEALER_CARD {
                    CardView::Hidden
                } else {
                    CardView::Visible(c)
                }
            })
            .collect()
    }

    pub fn player_total(&self) -> u32 {
        self.round.player().hand().best_total()
    }

    /// `None` while the dealer still has a card face down.
    pub fn dealer_total(&self) -> Option<u32> {
        if self.round.dealer_hidden() {
            None
        } else {
            Some(self.round.dealer().hand().best_total())
        }
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.round.player().score(), self.round.dealer().score())
    }

    pub fn score_line(&self) -> String {
        format!(
            "{}: {}    {}: {}",
            self.round.player().name(),
            self.round.player().score(),
            self.round.dealer().name(),
            self.round.dealer().score()
        )
    }

    pub fn status_line(&self) -> String {
        format!(
            "Round {}/{}   Remaining cards: {}",
            self.round_number,
            self.config.max_rounds,
            self.round.shoe_remaining()
        )
    }

    pub fn turn(&self) -> Turn {
        match self.round.state() {
            RoundState::RoundOver => Turn::RoundFinished,
            RoundState::PlayerTurn => Turn::Player,
            RoundState::Dealing | RoundState::DealerTurn => Turn::Dealer,
        }
    }

    pub fn can_player_act(&self) -> bool {
        self.phase == MatchPhase::Playing && self.round.state() == RoundState::PlayerTurn
    }

    pub fn last_round_summary(&self) -> &str {
        self.round.summary()
    }

    pub fn final_summary(&self) -> &str {
        &self.final_summary
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    /// Milliseconds until the next scheduled step, if any.
    pub fn next_delay(&self) -> Option<u64> {
        self.scheduler.next_delay()
    }

    pub fn pending_steps(&self) -> usize {
        self.scheduler.pending()
    }
}
