//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "blackjack",
    version,
    about = "Ten-round blackjack against the dealer"
)]
pub struct BlackjackCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a match at the terminal
    Play {
        /// Player name; prompted for when omitted
        #[arg(long)]
        name: Option<String>,
        /// Shoe RNG seed
        #[arg(long)]
        seed: Option<u64>,
        /// Number of 52-card decks in the shoe
        #[arg(long)]
        decks: Option<usize>,
        /// Rounds per match
        #[arg(long)]
        rounds: Option<u32>,
        /// High score file
        #[arg(long)]
        scores: Option<String>,
        /// Wait in real time between dealer steps
        #[arg(long)]
        pace: bool,
    },
    /// Show the high score table
    Scores {
        /// Number of rows to show
        #[arg(long)]
        top: Option<usize>,
        /// High score file
        #[arg(long)]
        file: Option<String>,
    },
    /// Print the rules
    Rules,
    /// Show the resolved configuration and where each value came from
    Cfg,
}
