//! # Blackjack CLI Library
//!
//! Terminal front end for the ten-round blackjack engine.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["blackjack", "play", "--name", "Ada", "--seed", "7"];
//! let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play a match against the dealer
//! - `scores`: Show the high score table
//! - `rules`: Print the rules
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
#[macro_use]
mod macros;
pub mod scores;
pub mod ui;
pub mod validation;

use cli::{BlackjackCli, Commands};
use commands::{
    PlayArgs, handle_cfg_command, handle_play_command, handle_rules_command,
    handle_scores_command,
};

pub use commands::{play_session, rules_text};
pub use error::CliError;

const COMMANDS: &[&str] = &["play", "scores", "rules", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand
/// handler. `play` reads its moves from the process's stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["blackjack", "rules"];
/// let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// Same as [`run`], reading interactive input from `stdin`.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn std::io::BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Play {
            name,
            seed,
            decks,
            rounds,
            scores,
            pace,
        } => handle_play_command(
            PlayArgs {
                name,
                seed,
                decks,
                rounds,
                scores,
                pace,
            },
            out,
            err,
            stdin,
        ),
        Commands::Scores { top, file } => handle_scores_command(top, file, out, err),
        Commands::Rules => match config::load() {
            Ok(cfg) => handle_rules_command(cfg.rounds, out),
            Err(e) => Err(CliError::Config(e.to_string())),
        },
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            write_or_exit!(err, "Error: {}", e);
            e.exit_code()
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version print to stdout and exit 0
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Blackjack CLI");
            write_or_exit!(err, "Usage: blackjack <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: blackjack --help");
            exit_code::ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_args(args: &[&str], input: &str) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.to_string());
        let code = run_with_input(args.iter().copied(), &mut out, &mut err, &mut stdin);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn unknown_command_lists_commands() {
        let (code, _, err) = run_args(&["blackjack", "split"], "");
        assert_eq!(code, 2);
        assert!(err.contains("Commands:"));
        assert!(err.contains("  scores"));
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, _) = run_args(&["blackjack", "--help"], "");
        assert_eq!(code, 0);
        assert!(out.contains("play"));
    }

    #[test]
    #[serial_test::serial]
    fn zero_rounds_flag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let scores = dir.path().join("s.csv");
        let (code, _, err) = run_args(
            &[
                "blackjack",
                "play",
                "--rounds",
                "0",
                "--scores",
                scores.to_str().unwrap(),
            ],
            "",
        );
        assert_eq!(code, 2);
        assert!(err.contains("rounds must be >= 1"));
    }
}
