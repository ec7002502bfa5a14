// src/transaction_log.rs

//! Append-only sinks for committed transactions.
//!
//! The engine writes here after a trade has been applied. A sink failure is
//! reported and swallowed; it never reverses the trade.

use crate::errors::LogError;
use crate::types::trade::TransactionRecord;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub trait TransactionLog: Send + Sync {
    fn append(&self, record: &TransactionRecord) -> Result<(), LogError>;
}

impl<L: TransactionLog + ?Sized> TransactionLog for Box<L> {
    fn append(&self, record: &TransactionRecord) -> Result<(), LogError> {
        (**self).append(record)
    }
}

impl<L: TransactionLog + ?Sized> TransactionLog for std::sync::Arc<L> {
    fn append(&self, record: &TransactionRecord) -> Result<(), LogError> {
        (**self).append(record)
    }
}

/// One JSON object per line, appended to a file.
#[derive(Debug, Clone)]
pub struct JsonLinesLog {
    path: PathBuf,
}

impl JsonLinesLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionLog for JsonLinesLog {
    fn append(&self, record: &TransactionRecord) -> Result<(), LogError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Keeps records in memory. Handy for tests and for the concurrent market.
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<TransactionRecord>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TransactionRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl TransactionLog for MemoryLog {
    fn append(&self, record: &TransactionRecord) -> Result<(), LogError> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl TransactionLog for NullLog {
    fn append(&self, _record: &TransactionRecord) -> Result<(), LogError> {
        Ok(())
    }
}

/// Reads back a JSON-lines log. Blank lines are skipped.
pub fn read_json_lines(path: &Path) -> Result<Vec<TransactionRecord>, LogError> {
    let text = std::fs::read_to_string(path)?;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(LogError::from))
        .collect()
}
