//! Command handlers, one module per subcommand.
//!
//! Each handler takes its output streams as `&mut dyn Write` (and stdin as
//! `&mut dyn BufRead` where it reads input) and reports failures as
//! [`CliError`](crate::error::CliError).

mod cfg;
mod play;
mod rules;
mod scores;

pub use cfg::handle_cfg_command;
pub use play::{PlayArgs, handle_play_command, play_session};
pub use rules::{handle_rules_command, rules_text};
pub use scores::handle_scores_command;
