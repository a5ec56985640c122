//! # Conversion History
//!
//! A bounded, newest-first ledger of recent conversions.
//!
//! The ledger is serialized as one JSON array and handed to a
//! [`LedgerStorage`] backend. The default backend is a file at
//! `~/.unitconv/history.json`; tests use [`MemoryStorage`].
//!
//! ```text
//! add(record)
//!   lock ─► read_all ─► parse (garbage = empty) ─► prepend ─► truncate(N) ─► write_all
//! ```
//!
//! Every read-modify-write happens under a single lock, so rapid successive
//! adds never interleave.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::Local;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Default ledger capacity.
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Timestamp format stored with each record (local time).
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// One past conversion, as persisted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub from_value: f64,
    pub from_unit: String,
    /// Result already formatted to 4 decimals.
    pub to_value: String,
    pub to_unit: String,
    /// Category label, e.g. "Length".
    #[serde(rename = "type")]
    pub category: String,
    pub timestamp: String,
}

impl HistoryRecord {
    /// Builds a record without a timestamp; [`HistoryStore::add`] stamps it.
    pub fn new(
        from_value: f64,
        from_unit: impl Into<String>,
        to_value: impl Into<String>,
        to_unit: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            from_value,
            from_unit: from_unit.into(),
            to_value: to_value.into(),
            to_unit: to_unit.into(),
            category: category.into(),
            timestamp: String::new(),
        }
    }
}

// ============================================================================
// Storage backends
// ============================================================================

/// Key-value style persistence for the serialized ledger.
pub trait LedgerStorage: Send {
    /// Returns the stored payload, or `None` if nothing has been written.
    fn read_all(&self) -> io::Result<Option<String>>;

    /// Replaces the stored payload.
    fn write_all(&mut self, payload: &str) -> io::Result<()>;

    /// Removes the payload. Deleting a missing payload is not an error.
    fn delete(&mut self) -> io::Result<()>;
}

/// Ledger stored as a JSON file, written atomically.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Returns `~/.unitconv/history.json`.
pub fn default_history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".unitconv").join("history.json"))
}

/// Write to `<path>.tmp`, then rename over `path`.
fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

impl LedgerStorage for FileStorage {
    fn read_all(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_all(&mut self, payload: &str) -> io::Result<()> {
        atomic_write(&self.path, payload)
    }

    fn delete(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-process storage. Contents vanish with the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    payload: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an arbitrary payload already "persisted".
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }
}

impl LedgerStorage for MemoryStorage {
    fn read_all(&self) -> io::Result<Option<String>> {
        Ok(self.payload.clone())
    }

    fn write_all(&mut self, payload: &str) -> io::Result<()> {
        self.payload = Some(payload.to_string());
        Ok(())
    }

    fn delete(&mut self) -> io::Result<()> {
        self.payload = None;
        Ok(())
    }
}

// ============================================================================
// Store
// ============================================================================

/// The ledger: newest first, never longer than `max_items`.
pub struct HistoryStore {
    storage: Mutex<Box<dyn LedgerStorage>>,
    max_items: usize,
}

impl HistoryStore {
    pub fn new(storage: Box<dyn LedgerStorage>) -> Self {
        Self::with_capacity(storage, DEFAULT_MAX_ITEMS)
    }

    /// A capacity of 0 is raised to 1.
    pub fn with_capacity(storage: Box<dyn LedgerStorage>, max_items: usize) -> Self {
        Self {
            storage: Mutex::new(storage),
            max_items: max_items.max(1),
        }
    }

    /// Store backed by [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Current ledger, newest first. Unreadable or malformed data reads as empty.
    pub fn list(&self) -> Vec<HistoryRecord> {
        let storage = self.storage.lock().unwrap_or_else(PoisonError::into_inner);
        read_ledger(&**storage)
    }

    /// Stamps `record` with the current local time and prepends it.
    ///
    /// Records whose source value is 0 or not finite are not kept; the call
    /// returns `Ok(false)` and the ledger is left untouched. JSON has no
    /// encoding for infinities, so one such record would make the whole
    /// payload unreadable.
    pub fn add(&self, mut record: HistoryRecord) -> io::Result<bool> {
        if record.from_value == 0.0 || !record.from_value.is_finite() {
            debug!("Skipping conversion of {}", record.from_value);
            return Ok(false);
        }

        let mut storage = self.storage.lock().unwrap_or_else(PoisonError::into_inner);
        let mut ledger = read_ledger(&**storage);

        record.timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        ledger.insert(0, record);
        ledger.truncate(self.max_items);

        let payload = serde_json::to_string(&ledger)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        storage.write_all(&payload)?;
        debug!("History now holds {} record(s)", ledger.len());
        Ok(true)
    }

    /// Removes the persisted ledger entirely.
    pub fn clear(&self) -> io::Result<()> {
        let mut storage = self.storage.lock().unwrap_or_else(PoisonError::into_inner);
        storage.delete()?;
        debug!("History cleared");
        Ok(())
    }
}

fn read_ledger(storage: &dyn LedgerStorage) -> Vec<HistoryRecord> {
    let payload = match storage.read_all() {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Failed to read history: {}", e);
            return Vec::new();
        }
    };
    match serde_json::from_str(&payload) {
        Ok(ledger) => ledger,
        Err(e) => {
            warn!("Ignoring malformed history payload: {}", e);
            Vec::new()
        }
    }
}
