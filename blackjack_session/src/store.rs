//! The snapshot store boundary: an append-only log of serialized game states.
//!
//! The engine appends one record after every state mutation and loads the most
//! recent record to resume a session. The store is single writer, single reader;
//! serializing concurrent sessions is the caller's concern.

use blackjack_core::GameError;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

/// Struct for one serialized game state. The `player`, `dealer` and `deck` fields
/// hold the legacy token strings; everything else is scalar. Derived hand fields are
/// never stored, they are recomputed on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub player: String,
    pub dealer: String,
    pub deck: String,
    pub active_hand: usize,
    pub over: bool,
    pub message: String,
    pub money: i64,
    pub bets_locked: bool,
}

/// Trait for the durable log the engine persists into. Injected into the engine at
/// construction; the engine never owns connection or file lifecycle decisions beyond
/// this interface.
pub trait SnapshotStore {
    /// Appends a record to the log. A failure here is non-recoverable for the current
    /// request, but the in-memory game state stays intact.
    fn append(&mut self, record: &SnapshotRecord) -> Result<(), GameError>;

    /// Loads the most recent record, or `None` if the store is empty ("start fresh").
    fn load_latest(&self) -> Result<Option<SnapshotRecord>, GameError>;

    /// Clears all history, forcing a brand new session.
    fn reset(&mut self) -> Result<(), GameError>;
}

/// Struct for an in-memory store, used by tests and as the zero-setup default.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<SnapshotRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Every record appended so far, oldest first.
    pub fn records(&self) -> &[SnapshotRecord] {
        &self.records
    }
}

impl SnapshotStore for MemoryStore {
    fn append(&mut self, record: &SnapshotRecord) -> Result<(), GameError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn load_latest(&self) -> Result<Option<SnapshotRecord>, GameError> {
        Ok(self.records.last().cloned())
    }

    fn reset(&mut self) -> Result<(), GameError> {
        self.records.clear();
        Ok(())
    }
}

/// Struct for a file-backed store: one JSON record per line, appended to the end of
/// the file. A missing file is an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }
}

impl SnapshotStore for FileStore {
    fn append(&mut self, record: &SnapshotRecord) -> Result<(), GameError> {
        let line = serde_json::to_string(record)
            .map_err(|e| GameError::Persistence(e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| GameError::Persistence(e.to_string()))?;
        writeln!(file, "{}", line).map_err(|e| GameError::Persistence(e.to_string()))
    }

    fn load_latest(&self) -> Result<Option<SnapshotRecord>, GameError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(GameError::Persistence(e.to_string())),
        };
        let mut latest = None;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| GameError::Persistence(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SnapshotRecord>(&line) {
                Ok(record) => latest = Some(record),
                // A torn tail write should not lose the whole session.
                Err(e) => log::warn!("skipping unparseable snapshot line: {}", e),
            }
        }
        Ok(latest)
    }

    fn reset(&mut self) -> Result<(), GameError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GameError::Persistence(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(message: &str) -> SnapshotRecord {
        SnapshotRecord {
            player: "10,H10,C7".to_string(),
            dealer: "0,S9".to_string(),
            deck: "D2,D3,D4".to_string(),
            active_hand: 0,
            over: false,
            message: message.to_string(),
            money: 1000,
            bets_locked: true,
        }
    }

    fn temp_store() -> FileStore {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "blackjack_store_test_{}_{}.jsonl",
            std::process::id(),
            n
        ));
        let _ = fs::remove_file(&path);
        FileStore::new(path)
    }

    #[test]
    fn memory_store_returns_latest() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_latest().unwrap(), None);
        store.append(&record("first")).unwrap();
        store.append(&record("second")).unwrap();
        assert_eq!(store.load_latest().unwrap().unwrap().message, "second");
        store.reset().unwrap();
        assert_eq!(store.load_latest().unwrap(), None);
    }

    #[test]
    fn file_store_round_trip() {
        let mut store = temp_store();
        assert_eq!(store.load_latest().unwrap(), None);
        store.append(&record("first")).unwrap();
        store.append(&record("second")).unwrap();
        assert_eq!(store.load_latest().unwrap(), Some(record("second")));
        store.reset().unwrap();
        assert_eq!(store.load_latest().unwrap(), None);
    }

    #[test]
    fn file_store_skips_a_torn_tail_line() {
        let mut store = temp_store();
        store.append(&record("good")).unwrap();
        let mut file = OpenOptions::new()
            .append(true)
            .open(&store.path)
            .unwrap();
        write!(file, "{{\"player\":\"10").unwrap();
        assert_eq!(store.load_latest().unwrap(), Some(record("good")));
        store.reset().unwrap();
    }
}
