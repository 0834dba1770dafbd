//! Persistent scan history
//!
//! The whole history lives in memory as a most-recent-first sequence and is
//! re-serialized in full to a single key after every mutation. A mutation
//! is only committed to memory once the write has succeeded.

use crate::adapters::storage::KeyValueStore;
use crate::domain::{EntryId, HealthReport, HistoryEntry, Result, StoreError};
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered, persistent collection of past reports
pub struct HistoryStore {
    /// Persistence backend
    storage: Arc<dyn KeyValueStore>,

    /// Key the serialized sequence is stored under
    key: String,

    /// Entries, most recent first
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Load the history persisted under `key`
    ///
    /// Absent data yields an empty history. Unreadable or malformed data is
    /// logged as store corruption and also yields an empty history; loading
    /// never fails. When several stored entries share an id only the first
    /// (most recent) is kept.
    pub fn load(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = match read_entries(storage.as_ref(), &key) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding unreadable history");
                Vec::new()
            }
        };

        tracing::debug!(key = %key, entries = entries.len(), "History loaded");

        Self {
            storage,
            key,
            entries,
        }
    }

    /// All entries, most recent first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Look up an entry by id
    pub fn find_by_id(&self, id: &EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Admit a report to the history
    ///
    /// A fresh id is generated (regenerated on the unlikely collision with a
    /// stored id) and the entry is prepended. The report's timestamp is kept
    /// as received.
    ///
    /// # Errors
    ///
    /// Returns a store error if the updated history could not be persisted;
    /// the in-memory history is then unchanged.
    pub fn append(&mut self, report: HealthReport) -> Result<HistoryEntry> {
        let mut id = EntryId::generate();
        while self.find_by_id(&id).is_some() {
            tracing::debug!(id = %id, "Entry id collision, regenerating");
            id = EntryId::generate();
        }

        let entry = HistoryEntry::new(id, report);

        let mut candidate = Vec::with_capacity(self.entries.len() + 1);
        candidate.push(entry.clone());
        candidate.extend(self.entries.iter().cloned());

        self.persist(&candidate)?;
        self.entries = candidate;

        tracing::info!(
            id = %entry.id(),
            health_status = %entry.report().health_status(),
            entries = self.entries.len(),
            "History entry appended"
        );

        Ok(entry)
    }

    /// Remove the entry with `id`, if present
    ///
    /// The sequence is persisted even when nothing was removed.
    ///
    /// # Errors
    ///
    /// Returns a store error if the history could not be persisted; the
    /// in-memory history is then unchanged.
    pub fn delete(&mut self, id: &EntryId) -> Result<&[HistoryEntry]> {
        let candidate: Vec<HistoryEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.id() != id)
            .cloned()
            .collect();
        let removed = candidate.len() != self.entries.len();

        self.persist(&candidate)?;
        self.entries = candidate;

        if removed {
            tracing::info!(id = %id, entries = self.entries.len(), "History entry deleted");
        } else {
            tracing::debug!(id = %id, "Delete of unknown history entry");
        }

        Ok(&self.entries)
    }

    fn persist(&self, entries: &[HistoryEntry]) -> Result<()> {
        let bytes = serde_json::to_vec(entries)?;
        self.storage.write(&self.key, &bytes).map_err(|e| {
            tracing::error!(key = %self.key, error = %e, "Failed to persist history");
            e
        })?;
        Ok(())
    }
}

fn read_entries(
    storage: &dyn KeyValueStore,
    key: &str,
) -> std::result::Result<Vec<HistoryEntry>, StoreError> {
    let Some(bytes) = storage.read(key)? else {
        return Ok(Vec::new());
    };

    let entries: Vec<HistoryEntry> =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corruption(e.to_string()))?;

    Ok(dedup_by_id(key, entries))
}

/// Keep the first entry for each id
fn dedup_by_id(key: &str, entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    let mut seen = HashSet::with_capacity(entries.len());
    let total = entries.len();

    let unique: Vec<HistoryEntry> = entries
        .into_iter()
        .filter(|entry| {
            let fresh = seen.insert(entry.id().clone());
            if !fresh {
                tracing::warn!(key = %key, id = %entry.id(), "Dropping history entry with duplicate id");
            }
            fresh
        })
        .collect();

    if unique.len() != total {
        tracing::warn!(
            key = %key,
            dropped = total - unique.len(),
            "Persisted history contained duplicate ids"
        );
    }

    unique
}
