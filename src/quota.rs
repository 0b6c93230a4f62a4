//! Daily quota tracking for the Free plan.
//!
//! The tracker enforces a fixed daily ceiling on Free-plan analyses from a
//! single persisted [`QuotaRecord`]. Premium is always unlimited and never
//! consults storage. Every storage failure degrades to "limit not reached"
//! (fail-open): a broken backend must never lock a user out.

use chrono::{NaiveDate, Utc};
use log::warn;

use crate::config::QUOTA_KEY;
use crate::models::QuotaRecord;
use crate::session::Plan;
use crate::storage::KeyValueStore;

/// Storage-backed counter of Free-plan analyses per calendar day.
pub struct QuotaTracker<S> {
    store: S,
    ceiling: u32,
}

impl<S: KeyValueStore> QuotaTracker<S> {
    /// Creates a tracker enforcing `ceiling` analyses per day.
    pub fn new(store: S, ceiling: u32) -> Self {
        Self { store, ceiling }
    }

    /// The configured daily ceiling.
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Whether further analyses are blocked today.
    ///
    /// Premium short-circuits to `false` without touching storage, so a
    /// plan switch takes effect immediately.
    pub async fn limit_reached(&self, plan: Plan) -> bool {
        match plan {
            Plan::Premium => false,
            Plan::Free => self.limit_reached_on(today()).await,
        }
    }

    /// Date-pinned variant of [`Self::limit_reached`] for the Free plan.
    pub async fn limit_reached_on(&self, date: NaiveDate) -> bool {
        match self.load_record().await {
            Some(record) => record.date == date.to_string() && record.count >= self.ceiling,
            None => false,
        }
    }

    /// Records one successful Free-plan analysis and returns the new count
    /// for today.
    ///
    /// Must be called exactly once per successful Free-plan analysis; never
    /// on failures, never for Premium. A same-day record increments;
    /// anything else resets to `{today, 1}`. Write failures are swallowed
    /// and logged.
    pub async fn record_usage(&self) -> u32 {
        self.record_usage_on(today()).await
    }

    /// Date-pinned variant of [`Self::record_usage`].
    pub async fn record_usage_on(&self, date: NaiveDate) -> u32 {
        let today = date.to_string();
        let count = match self.load_record().await {
            Some(record) if record.date == today => record.count.saturating_add(1),
            _ => 1,
        };

        let record = QuotaRecord {
            date: today,
            count,
        };
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.store.set(QUOTA_KEY, &json).await {
                    warn!("Could not persist the daily audit tracker: {e}");
                }
            }
            Err(e) => warn!("Could not serialize the daily audit tracker: {e}"),
        }
        count
    }

    /// Reads the persisted record, degrading to `None` on any failure.
    async fn load_record(&self) -> Option<QuotaRecord> {
        let raw = match self.store.get(QUOTA_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Could not read the daily audit tracker: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Discarding corrupt daily audit tracker: {e}");
                None
            }
        }
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::FailingStore;
    use crate::storage::MemoryStore;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date literal")
    }

    #[tokio::test]
    async fn test_limit_not_reached_without_record() {
        let tracker = QuotaTracker::new(MemoryStore::new(), 3);
        assert!(!tracker.limit_reached_on(date("2026-08-07")).await);
    }

    #[tokio::test]
    async fn test_ceiling_blocks_same_day_only() {
        let tracker = QuotaTracker::new(MemoryStore::new(), 3);
        let day = date("2026-08-07");
        for expected in 1..=3 {
            assert_eq!(tracker.record_usage_on(day).await, expected);
        }
        assert!(tracker.limit_reached_on(day).await);
        // Stale records do not block the next day
        assert!(!tracker.limit_reached_on(date("2026-08-08")).await);
    }

    #[tokio::test]
    async fn test_new_day_resets_count() {
        let tracker = QuotaTracker::new(MemoryStore::new(), 3);
        tracker.record_usage_on(date("2026-08-06")).await;
        tracker.record_usage_on(date("2026-08-06")).await;
        assert_eq!(tracker.record_usage_on(date("2026-08-07")).await, 1);
    }

    #[tokio::test]
    async fn test_premium_never_consults_storage() {
        // A failing backend would surface as a warning on any read; Premium
        // must short-circuit before that.
        let tracker = QuotaTracker::new(FailingStore::new(), 3);
        assert!(!tracker.limit_reached(Plan::Premium).await);
    }

    #[tokio::test]
    async fn test_read_failure_fails_open() {
        let tracker = QuotaTracker::new(FailingStore::new(), 3);
        assert!(!tracker.limit_reached(Plan::Free).await);
    }

    #[tokio::test]
    async fn test_corrupt_record_fails_open() {
        let store = MemoryStore::new();
        store.set(QUOTA_KEY, "not json at all").await.expect("seed");
        let tracker = QuotaTracker::new(store, 3);
        assert!(!tracker.limit_reached_on(date("2026-08-07")).await);
        // And the next write repairs the record
        assert_eq!(tracker.record_usage_on(date("2026-08-07")).await, 1);
    }
}
