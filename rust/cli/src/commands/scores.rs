//! `scores`: prints the high score table.

use crate::config;
use crate::error::CliError;
use crate::scores::{CsvScoreStore, DEFAULT_TOP, format_leaderboard};
use crate::ui;
use std::io::Write;

pub fn handle_scores_command(
    top: Option<usize>,
    file: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let top = top.unwrap_or(DEFAULT_TOP);
    if top == 0 {
        ui::write_error(err, "top must be >= 1")?;
        return Err(CliError::InvalidInput("top must be >= 1".to_string()));
    }
    let path = match file {
        Some(p) => p,
        None => config::load()
            .map_err(|e| CliError::Config(e.to_string()))?
            .scores_path,
    };
    let store = CsvScoreStore::new(path);
    let table = store.top(top)?;
    if table.skipped > 0 {
        ui::display_warning(
            err,
            &format!(
                "skipped {} malformed row(s) in {}",
                table.skipped,
                store.path().display()
            ),
        )?;
    }
    write!(out, "{}", format_leaderboard(&table.rows))?;
    Ok(())
}
