use anyhow::{Context, Result, bail};

use crate::{model::HistoryEntry, storage::SessionStorage};

/// Storage key the whole history list is serialized under.
pub const HISTORY_KEY: &str = "histories";

/// Ordered list of past searches, mirrored to session storage as a single
/// JSON blob. Entries are kept in insertion order; the descending-by-time
/// view shown to users is recomputed on every read, never stored.
#[derive(Debug)]
pub struct HistoryStore {
    storage: Box<dyn SessionStorage>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Read the persisted blob and rebuild the in-memory list.
    ///
    /// Fails soft: an unreadable or unparsable blob clears the stored key
    /// and yields an empty history. Corruption never reaches the caller.
    pub fn load(mut storage: Box<dyn SessionStorage>) -> Self {
        let entries = match storage.get(HISTORY_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<HistoryEntry>>(&blob) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(%err, "stored history is malformed, starting empty");
                    if let Err(err) = storage.remove(HISTORY_KEY) {
                        tracing::warn!(%err, "failed to clear malformed history");
                    }
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(%err, "could not read stored history, starting empty");
                Vec::new()
            }
        };

        Self { storage, entries }
    }

    /// Append one entry and re-persist the whole list. The blob is always
    /// rewritten in full; history is small enough that this stays cheap.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        self.entries.push(entry);
        self.persist()
    }

    /// Remove the entry at `display_index` in the descending-by-time view,
    /// which is how entries are shown, not the insertion order. The sort is
    /// stable, so entries with equal instants keep their insertion order.
    pub fn remove_at(&mut self, display_index: usize) -> Result<HistoryEntry> {
        let order = self.display_order();
        let Some(&underlying) = order.get(display_index) else {
            bail!(
                "No history entry at position {display_index} (history has {} entries)",
                self.entries.len()
            );
        };

        let removed = self.entries.remove(underlying);
        self.persist()?;
        Ok(removed)
    }

    /// The display view: most recent search first.
    pub fn sorted_entries(&self) -> Vec<&HistoryEntry> {
        self.display_order()
            .into_iter()
            .map(|i| &self.entries[i])
            .collect()
    }

    /// Last appended entry, which is what startup replay re-runs. Under
    /// out-of-order completion this can differ from the most recent by time.
    pub fn last_inserted(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indices into `entries`, sorted descending by `searched_at`.
    fn display_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| {
            self.entries[b]
                .searched_at
                .cmp(&self.entries[a].searched_at)
        });
        order
    }

    fn persist(&mut self) -> Result<()> {
        let blob =
            serde_json::to_string(&self.entries).context("Failed to serialize search history")?;
        self.storage.set(HISTORY_KEY, &blob)
    }
}
