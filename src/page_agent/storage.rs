//! Write-only persistence of the history log.

use serde_json::{Map, Value};

use super::history::History;
use crate::config::StorageKeys;
use crate::error::EditorError;

/// Where the agent writes its history after every mutation.
pub trait HistoryStore {
    /// `record` is a flat object: one key for the entries, one for the
    /// cursor.
    fn save(&mut self, record: Map<String, Value>) -> Result<(), EditorError>;
}

/// Storage record for `history` under the configured keys.
pub fn history_record(history: &History, keys: &StorageKeys) -> Result<Map<String, Value>, EditorError> {
    let mut record = Map::new();
    record.insert(keys.history.clone(), serde_json::to_value(history.entries())?);
    record.insert(keys.history_index.clone(), Value::from(history.index()));
    Ok(record)
}

/// Keeps the last saved record; useful off-browser.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub last: Option<Map<String, Value>>,
    pub saves: usize,
}

impl HistoryStore for MemoryStore {
    fn save(&mut self, record: Map<String, Value>) -> Result<(), EditorError> {
        self.last = Some(record);
        self.saves += 1;
        Ok(())
    }
}
