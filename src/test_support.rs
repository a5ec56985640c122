//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io;
use std::sync::Arc;

use crate::core::engine::TemperatureMode;
use crate::core::history::{HistoryRecord, HistoryStore, LedgerStorage};
use crate::core::state::App;
use crate::core::units::Category;

/// Creates a test App on the Length tab with an in-memory ledger.
pub fn test_app() -> App {
    App::new(
        Arc::new(HistoryStore::in_memory()),
        Category::Length,
        TemperatureMode::Lenient,
    )
}

/// Ledger storage that can be read but refuses every write and delete.
pub struct FailingStorage {
    payload: Option<String>,
}

impl FailingStorage {
    /// Starts with `count` Length records persisted, newest first.
    pub fn with_ledger(count: usize) -> Self {
        let ledger: Vec<HistoryRecord> = (1..=count)
            .rev()
            .map(|i| {
                let value = i as f64;
                let to_value = format!("{:.4}", value / 1000.0);
                let mut record = HistoryRecord::new(value, "m", to_value, "km", "Length");
                record.timestamp = String::from("2024/05/01 10:00:00");
                record
            })
            .collect();
        Self {
            payload: Some(serde_json::to_string(&ledger).unwrap()),
        }
    }
}

impl LedgerStorage for FailingStorage {
    fn read_all(&self) -> io::Result<Option<String>> {
        Ok(self.payload.clone())
    }

    fn write_all(&mut self, _payload: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only ledger"))
    }

    fn delete(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only ledger"))
    }
}

/// Creates a test App whose ledger has `count` records and cannot be changed.
pub fn read_only_app(count: usize) -> App {
    App::new(
        Arc::new(HistoryStore::new(Box::new(FailingStorage::with_ledger(count)))),
        Category::Length,
        TemperatureMode::Lenient,
    )
}
