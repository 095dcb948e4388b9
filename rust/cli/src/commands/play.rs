//! # Play Command
//!
//! Interactive match against the dealer.
//!
//! The engine expresses every pause as a scheduled step. This loop drains
//! those steps whenever the player cannot act, sleeping for the requested
//! delay only when `--pace` is given, so piped input plays a whole match
//! instantly.
//!
//! ## Screens
//!
//! - **Menu**: asks for a name (skipped once when `--name` is given)
//! - **Table**: status line, both hands, scores, whose turn it is
//! - **Game over**: final summary, then restart, menu or quit

use crate::config::{self, Config};
use crate::error::CliError;
use crate::formatters::{format_hand, format_total};
use crate::io_utils::read_stdin_line;
use crate::scores::CsvScoreStore;
use crate::ui;
use crate::validation::{ParseResult, PlayerCommand, parse_player_command, validate_name};
use blackjack_engine::game::{MatchController, MatchPhase};
use blackjack_engine::round::RoundState;
use std::io::{BufRead, Write};
use std::time::Duration;

const NAME_PROMPT: &str = "Enter your name (q to quit, quote a name like \"Q\" to use it): ";

/// Command-line overrides for a play session.
#[derive(Debug, Clone, Default)]
pub struct PlayArgs {
    pub name: Option<String>,
    pub seed: Option<u64>,
    pub decks: Option<usize>,
    pub rounds: Option<u32>,
    pub scores: Option<String>,
    pub pace: bool,
}

/// Handle the play command: resolve configuration, then run the session.
///
/// # Returns
///
/// * `Ok(())` when the user quits
/// * `Err(CliError::Interrupted)` if input closes while a match is running
/// * `Err(CliError)` for invalid configuration or I/O errors
pub fn handle_play_command(
    args: PlayArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let mut cfg = match config::load() {
        Ok(c) => c,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if let Some(decks) = args.decks {
        cfg.decks = decks;
    }
    if let Some(rounds) = args.rounds {
        cfg.rounds = rounds;
    }
    if let Some(path) = args.scores {
        cfg.scores_path = path;
    }
    if cfg.decks == 0 {
        ui::write_error(err, "decks must be >= 1")?;
        return Err(CliError::InvalidInput("decks must be >= 1".to_string()));
    }
    if cfg.rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    play_session(&cfg, args.name, args.pace, out, err, stdin)
}

/// Runs menu, table and game-over screens until the user quits.
pub fn play_session(
    cfg: &Config,
    name: Option<String>,
    pace: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let mut game_cfg = cfg.game_config();
    game_cfg.seed = Some(seed);

    writeln!(
        out,
        "blackjack: rounds={} decks={} seed={}",
        game_cfg.max_rounds, game_cfg.decks, seed
    )?;

    let store = CsvScoreStore::new(&cfg.scores_path);
    let mut game = MatchController::new(game_cfg, Box::new(store))?;
    let mut pending_name = name;
    let mut announced_round = 0u32;

    loop {
        match game.phase() {
            MatchPhase::Menu => {
                let name = match pending_name.take() {
                    Some(n) => n,
                    None => {
                        write!(out, "{}", NAME_PROMPT)?;
                        out.flush()?;
                        let Some(line) = read_stdin_line(stdin) else {
                            return Ok(());
                        };
                        if parse_player_command(&line) == ParseResult::Quit {
                            return Ok(());
                        }
                        line
                    }
                };
                match validate_name(&name) {
                    Ok(name) => {
                        game.start_new_game(&name)?;
                        announced_round = 0;
                    }
                    Err(msg) => ui::write_error(err, &msg)?,
                }
            }
            MatchPhase::Playing if game.can_player_act() => {
                render_table(&game, out)?;
                write!(out, "Action (h)it/(s)tand/(m)enu/(r)estart/(q)uit: ")?;
                out.flush()?;
                let Some(line) = read_stdin_line(stdin) else {
                    return Err(CliError::Interrupted("input closed mid-match".to_string()));
                };
                match parse_player_command(&line) {
                    ParseResult::Command(PlayerCommand::Hit) => game.player_hit()?,
                    ParseResult::Command(PlayerCommand::Stand) => game.player_stand()?,
                    ParseResult::Command(PlayerCommand::Menu) => game.return_to_menu(),
                    ParseResult::Command(PlayerCommand::Restart) => {
                        game.restart_match()?;
                        announced_round = 0;
                    }
                    ParseResult::Quit => return Ok(()),
                    ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
                }
            }
            MatchPhase::Playing => {
                if game.round_state() == RoundState::RoundOver
                    && announced_round != game.round_number()
                {
                    render_table(&game, out)?;
                    writeln!(
                        out,
                        "Round {}: {}",
                        game.round_number(),
                        game.last_round_summary()
                    )?;
                    announced_round = game.round_number();
                }
                let Some(delay) = game.next_delay() else {
                    // nothing left to drive the match forward
                    tracing::error!(round = game.round_number(), "match stalled");
                    game.return_to_menu();
                    continue;
                };
                if pace {
                    std::thread::sleep(Duration::from_millis(delay));
                }
                let drawn = game.dealer().cards().len();
                game.advance(delay)?;
                if pace && game.dealer().cards().len() > drawn {
                    writeln!(
                        out,
                        "Dealer draws: {} ({})",
                        format_hand(&game.dealer_cards()),
                        format_total(game.dealer_total())
                    )?;
                }
            }
            MatchPhase::GameOver => {
                writeln!(out)?;
                writeln!(out, "{}", game.final_summary())?;
                loop {
                    write!(out, "Play again? (r)estart/(m)enu/(q)uit: ")?;
                    out.flush()?;
                    let Some(line) = read_stdin_line(stdin) else {
                        return Ok(());
                    };
                    match parse_player_command(&line) {
                        ParseResult::Command(PlayerCommand::Restart) => {
                            game.restart_match()?;
                            announced_round = 0;
                            break;
                        }
                        ParseResult::Command(PlayerCommand::Menu) => {
                            game.return_to_menu();
                            break;
                        }
                        ParseResult::Quit => return Ok(()),
                        ParseResult::Command(_) => {
                            ui::write_error(err, "The match is over")?;
                        }
                        ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
                    }
                }
            }
        }
    }
}

fn render_table(game: &MatchController, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out)?;
    ui::write_heading(out, &game.status_line())?;
    writeln!(
        out,
        "Dealer: {} ({})",
        format_hand(&game.dealer_cards()),
        format_total(game.dealer_total())
    )?;
    writeln!(
        out,
        "{}: {} ({})",
        game.player_name(),
        format_hand(&game.player_cards()),
        game.player_total()
    )?;
    writeln!(out, "{}", game.score_line())?;
    writeln!(out, "{}", game.turn())?;
    Ok(())
}
