use std::io;

use blackjack_engine::game::{
    CardView, GameConfig, MatchController, MatchOutcome, MatchPhase, Turn,
};
use blackjack_engine::errors::GameError;
use blackjack_engine::record::{MatchRecord, MemorySink, NullSink, ScoreSink};
use blackjack_engine::round::RoundState;

struct FailingSink;

impl ScoreSink for FailingSink {
    fn record(&mut self, _record: &MatchRecord) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }
}

fn config(seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    }
}

/// Hits below 15, otherwise stands, until the match is over.
fn play_out(game: &mut MatchController) -> u32 {
    let mut rounds_seen = 0;
    let mut last_round = 0;
    while game.phase() == MatchPhase::Playing {
        if game.round_number() != last_round {
            last_round = game.round_number();
            rounds_seen += 1;
        }
        if game.can_player_act() {
            if game.player_total() < 15 {
                game.player_hit().unwrap();
            } else {
                game.player_stand().unwrap();
            }
        }
        game.fast_forward().unwrap();
    }
    rounds_seen
}

#[test]
fn match_ends_after_exactly_max_rounds() {
    for seed in 0..5 {
        let sink = MemorySink::new();
        let mut game = MatchController::new(config(seed), Box::new(sink.clone())).unwrap();
        game.start_new_game("Ada").unwrap();
        let rounds = play_out(&mut game);
        assert_eq!(rounds, 10);
        assert_eq!(game.round_number(), 10);
        assert_eq!(game.phase(), MatchPhase::GameOver);

        let (p, d) = game.scores();
        assert!(p + d <= 10);
        let expected = if p > d {
            MatchOutcome::PlayerWins
        } else if d > p {
            MatchOutcome::DealerWins
        } else {
            MatchOutcome::Draw
        };
        assert_eq!(game.outcome(), Some(expected));

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ada");
        assert_eq!(records[0].score, p);
        assert_eq!(records[0].date.len(), 10);
    }
}

#[test]
fn final_summary_lists_scores_and_winner() {
    let mut game = MatchController::new(config(11), Box::new(NullSink)).unwrap();
    game.start_new_game("Ada").unwrap();
    play_out(&mut game);
    let (p, d) = game.scores();
    let summary = game.final_summary();
    assert!(summary.starts_with("Final Score\n"));
    assert!(summary.contains(&format!("Ada: {}", p)));
    assert!(summary.contains(&format!("Dealer: {}", d)));
    let winner = match game.outcome().unwrap() {
        MatchOutcome::PlayerWins => "Ada wins the game!",
        MatchOutcome::DealerWins => "Dealer wins the game!",
        MatchOutcome::Draw => "Game is a draw!",
    };
    assert!(summary.ends_with(winner));
}

#[test]
fn dealer_second_card_is_hidden_during_player_turn() {
    let mut game = MatchController::new(config(5), Box::new(NullSink)).unwrap();
    game.start_new_game("Ada").unwrap();
    assert_eq!(game.turn(), Turn::Player);
    assert!(game.can_player_act());
    let dealer = game.dealer_cards();
    assert_eq!(dealer.len(), 2);
    assert!(matches!(dealer[0], CardView::Visible(_)));
    assert_eq!(dealer[1], CardView::Hidden);
    assert_eq!(game.dealer_total(), None);
    assert!(game
        .player_cards()
        .iter()
        .all(|c| matches!(c, CardView::Visible(_))));

    game.player_stand().unwrap();
    assert_eq!(game.turn(), Turn::Dealer);
    assert!(!game.can_player_act());
    assert!(game
        .dealer_cards()
        .iter()
        .all(|c| matches!(c, CardView::Visible(_))));
    assert!(game.dealer_total().is_some());
}

#[test]
fn dealer_plays_one_card_per_step() {
    let mut game = MatchController::new(config(21), Box::new(NullSink)).unwrap();
    game.start_new_game("Ada").unwrap();
    game.player_stand().unwrap();
    let step = game.config().dealer_step_ms;
    assert_eq!(game.next_delay(), Some(step));

    let mut cards = game.dealer().cards().len();
    while game.round_state() == RoundState::DealerTurn {
        game.advance(step - 1).unwrap();
        assert_eq!(game.dealer().cards().len(), cards, "fired early");
        game.advance(1).unwrap();
        let now = game.dealer().cards().len();
        assert!(now == cards || now == cards + 1);
        cards = now;
    }
    assert_eq!(game.turn(), Turn::RoundFinished);
    assert!(!game.last_round_summary().is_empty());
    assert_eq!(game.pending_steps(), 1);
}

#[test]
fn player_bust_resolves_synchronously() {
    let mut game = MatchController::new(config(8), Box::new(NullSink)).unwrap();
    game.start_new_game("Ada").unwrap();
    let mut guard = 0;
    while game.can_player_act() && guard < 30 {
        game.player_hit().unwrap();
        guard += 1;
    }
    assert!(game.player().hand().is_bust());
    assert_eq!(game.turn(), Turn::RoundFinished);
    assert_eq!(game.last_round_summary(), "Ada BUST! Dealer wins the round.");
    assert_eq!(game.scores(), (0, 1));
    assert_eq!(game.pending_steps(), 1);

    game.advance(game.config().next_round_ms).unwrap();
    assert_eq!(game.round_number(), 2);
    assert!(game.can_player_act());
    assert_eq!(game.last_round_summary(), "");
}

#[test]
fn commands_outside_player_turn_are_no_ops() {
    let mut game = MatchController::new(config(4), Box::new(NullSink)).unwrap();
    game.player_hit().unwrap();
    game.player_stand().unwrap();
    assert_eq!(game.phase(), MatchPhase::Menu);
    assert_eq!(game.round_number(), 0);

    game.start_new_game("Ada").unwrap();
    game.player_stand().unwrap();
    let cards = game.player().cards().len();
    game.player_hit().unwrap();
    game.player_stand().unwrap();
    assert_eq!(game.player().cards().len(), cards);
    assert_eq!(game.pending_steps(), 1);
}

#[test]
fn returning_to_menu_cancels_pending_steps() {
    let mut game = MatchController::new(config(6), Box::new(NullSink)).unwrap();
    game.start_new_game("Ada").unwrap();
    game.player_stand().unwrap();
    let dealer_cards = game.dealer().cards().to_vec();
    let scores = game.scores();

    game.return_to_menu();
    assert_eq!(game.phase(), MatchPhase::Menu);
    assert_eq!(game.pending_steps(), 0);
    game.advance(60_000).unwrap();
    assert_eq!(game.dealer().cards(), dealer_cards.as_slice());
    assert_eq!(game.scores(), scores);
    assert_eq!(game.round_number(), 1);
}

#[test]
fn restart_resets_scores_and_rounds() {
    let mut game = MatchController::new(config(13), Box::new(NullSink)).unwrap();
    game.start_new_game("Ada").unwrap();
    for _ in 0..3 {
        game.player_stand().unwrap();
        game.fast_forward().unwrap();
    }
    assert_eq!(game.round_number(), 4);
    game.player_stand().unwrap();

    game.restart_match().unwrap();
    assert_eq!(game.round_number(), 1);
    assert_eq!(game.scores(), (0, 0));
    assert_eq!(game.player_name(), "Ada");
    assert_eq!(game.shoe_remaining(), 204);
    assert!(game.can_player_act());
    assert_eq!(game.pending_steps(), 0);
    assert_eq!(game.final_summary(), "");
}

#[test]
fn blank_name_does_not_start_a_match() {
    let mut game = MatchController::new(config(1), Box::new(NullSink)).unwrap();
    assert_eq!(game.start_new_game("   "), Err(GameError::EmptyName));
    assert_eq!(game.phase(), MatchPhase::Menu);
    assert_eq!(game.round_number(), 0);
}

#[test]
fn storage_failure_does_not_block_match_end() {
    let mut game = MatchController::new(config(2), Box::new(FailingSink)).unwrap();
    game.start_new_game("Ada").unwrap();
    play_out(&mut game);
    assert_eq!(game.phase(), MatchPhase::GameOver);
    assert!(game.final_summary().contains("Final Score"));
}

#[test]
fn status_and_score_lines() {
    let mut game = MatchController::new(config(3), Box::new(NullSink)).unwrap();
    game.start_new_game("Ada").unwrap();
    assert_eq!(game.status_line(), "Round 1/10   Remaining cards: 204");
    assert_eq!(game.score_line(), "Ada: 0    Dealer: 0");
    assert_eq!(game.turn().to_string(), "Your turn");
}

#[test]
fn configuration_controls_round_count_and_shoe() {
    let cfg = GameConfig {
        decks: 1,
        max_rounds: 3,
        ..config(17)
    };
    let mut game = MatchController::new(cfg, Box::new(NullSink)).unwrap();
    game.start_new_game("Ada").unwrap();
    assert_eq!(game.shoe_remaining(), 48);
    assert_eq!(play_out(&mut game), 3);
    assert_eq!(game.max_rounds(), 3);

    let bad = GameConfig {
        max_rounds: 0,
        ..GameConfig::default()
    };
    assert!(matches!(
        MatchController::new(bad, Box::new(NullSink)),
        Err(GameError::InvalidConfig(_))
    ));
}

#[test]
fn same_seed_plays_the_same_match() {
    let mut a = MatchController::new(config(77), Box::new(NullSink)).unwrap();
    let mut b = MatchController::new(config(77), Box::new(NullSink)).unwrap();
    a.start_new_game("Ada").unwrap();
    b.start_new_game("Ada").unwrap();
    play_out(&mut a);
    play_out(&mut b);
    assert_eq!(a.scores(), b.scores());
    assert_eq!(a.final_summary(), b.final_summary());
}
