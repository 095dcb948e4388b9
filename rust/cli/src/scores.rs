//! CSV-backed high score table.
//!
//! Finished matches are appended as `name,score,date` lines. Reading is
//! lenient: rows with fewer than three fields are skipped and a score that
//! does not parse counts as zero.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use blackjack_engine::record::{MatchRecord, ScoreSink};

use crate::io_utils::{ensure_parent_dir, read_text};

pub const DEFAULT_TOP: usize = 10;
pub const NO_RECORDS: &str = "(no records)";

/// Rows read back from the score file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    pub rows: Vec<MatchRecord>,
    /// Non-empty lines that did not have three fields
    pub skipped: usize,
}

/// Appends match results to a CSV file.
#[derive(Debug, Clone)]
pub struct CsvScoreStore {
    path: PathBuf,
}

impl CsvScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &MatchRecord) -> std::io::Result<()> {
        ensure_parent_dir(&self.path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{},{},{}",
            sanitize(&record.name),
            record.score,
            sanitize(&record.date)
        )
    }

    /// All stored rows in file order. A missing file reads as empty.
    pub fn load(&self) -> std::io::Result<ScoreTable> {
        if !self.path.exists() {
            return Ok(ScoreTable::default());
        }
        let content = read_text(&self.path)?;
        Ok(parse_rows(&content))
    }

    /// Rows sorted by score, highest first; equal scores keep file order.
    pub fn top(&self, n: usize) -> std::io::Result<ScoreTable> {
        let mut table = self.load()?;
        table.rows.sort_by(|a, b| b.score.cmp(&a.score));
        table.rows.truncate(n);
        Ok(table)
    }
}

impl ScoreSink for CsvScoreStore {
    fn record(&mut self, record: &MatchRecord) -> std::io::Result<()> {
        self.append(record)?;
        tracing::debug!(path = %self.path.display(), name = %record.name, "score saved");
        Ok(())
    }
}

fn sanitize(field: &str) -> String {
    field.replace(['\n', '\r'], " ").replace(',', " ")
}

fn parse_rows(content: &str) -> ScoreTable {
    let mut table = ScoreTable::default();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 3 {
            tracing::debug!(line, "skipping malformed score row");
            table.skipped += 1;
            continue;
        }
        table.rows.push(MatchRecord {
            name: fields[0].trim().to_string(),
            score: fields[1].trim().parse().unwrap_or(0),
            date: fields[2].trim().to_string(),
        });
    }
    table
}

/// Renders the leaderboard text shown by the `scores` command.
pub fn format_leaderboard(rows: &[MatchRecord]) -> String {
    let mut s = String::from("Name | Score | Date\n-------------------\n");
    if rows.is_empty() {
        s.push_str(NO_RECORDS);
        s.push('\n');
        return s;
    }
    for r in rows {
        s.push_str(&format!("{} | {} | {}\n", r.name, r.score, r.date));
    }
    s
}
