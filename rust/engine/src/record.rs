use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Result of a finished match as handed to the score store.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Human participant's name
    pub name: String,
    /// Rounds won by the human participant
    pub score: u32,
    /// Local calendar date the match ended (YYYY-MM-DD)
    pub date: String,
}

impl MatchRecord {
    pub fn today(name: &str, score: u32) -> Self {
        Self {
            name: name.to_string(),
            score,
            date: Local::now().date_naive().to_string(),
        }
    }
}

/// Storage collaborator receiving finished matches.
///
/// Failures are reported back to the caller, which logs them; they never stop
/// a match from ending.
pub trait ScoreSink {
    fn record(&mut self, record: &MatchRecord) -> std::io::Result<()>;
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ScoreSink for NullSink {
    fn record(&mut self, _record: &MatchRecord) -> std::io::Result<()> {
        Ok(())
    }
}

/// Keeps records in memory. Clones share the same list, so a caller can keep
/// a handle after moving the sink into a controller.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Rc<RefCell<Vec<MatchRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<MatchRecord> {
        self.records.borrow().clone()
    }
}

impl ScoreSink for MemorySink {
    fn record(&mut self, record: &MatchRecord) -> std::io::Result<()> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}
