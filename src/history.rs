//! Audit history with per-plan persistence.
//!
//! Free-plan history lives in durable local storage, capped to the most
//! recent entries; Premium history is unbounded but held only in memory for
//! the session (standing in for cloud storage). Persistence failures are
//! swallowed and logged: history is a convenience, never a reason to fail
//! an analysis.

use log::warn;

use crate::config::FREE_HISTORY_KEY;
use crate::models::HistoryEntry;
use crate::session::Plan;
use crate::storage::KeyValueStore;

/// The list a signed-in user sees under "Audit History".
pub struct HistoryStore<S> {
    store: S,
    cap: usize,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Creates an empty history with the given Free-plan cap.
    pub fn new(store: S, cap: usize) -> Self {
        Self {
            store,
            cap,
            entries: Vec::new(),
        }
    }

    /// Current entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Prepends a new entry.
    ///
    /// Free-plan lists are truncated to the cap after prepending (adding a
    /// sixth entry always evicts the oldest) and then persisted.
    pub async fn append(&mut self, entry: HistoryEntry, plan: Plan) {
        self.entries.insert(0, entry);
        if plan == Plan::Free {
            self.entries.truncate(self.cap);
            self.persist().await;
        }
    }

    /// Removes the entry with the given id, if present.
    ///
    /// Free-plan lists are re-persisted even when the removal empties them.
    pub async fn remove(&mut self, id: &str, plan: Plan) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if plan == Plan::Free && self.entries.len() != before {
            self.persist().await;
        }
    }

    /// Empties the history.
    ///
    /// For the Free plan the persisted record is removed entirely rather
    /// than rewritten as an empty array; readers treat both as "no
    /// history".
    pub async fn clear(&mut self, plan: Plan) {
        self.entries.clear();
        if plan == Plan::Free {
            if let Err(e) = self.store.remove(FREE_HISTORY_KEY).await {
                warn!("Could not clear audit history from storage: {e}");
            }
        }
    }

    /// Rehydrates Free-plan history from durable storage after sign-in.
    ///
    /// Any read or deserialization failure degrades to an empty list.
    pub async fn load_on_login(&mut self) {
        self.entries = match self.store.get(FREE_HISTORY_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Could not parse stored audit history, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not load audit history from storage: {e}");
                Vec::new()
            }
        };
    }

    /// Drops the in-memory list without touching durable storage.
    ///
    /// The sign-out path: a Free user's on-device history survives
    /// logout/login cycles.
    pub fn reset_in_memory(&mut self) {
        self.entries.clear();
    }

    async fn persist(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => {
                if let Err(e) = self.store.set(FREE_HISTORY_KEY, &json).await {
                    warn!("Failed to save audit history to storage: {e}");
                }
            }
            Err(e) => warn!("Failed to serialize audit history: {e}"),
        }
    }
}
