//! Failure statistics tracking.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::types::ErrorKind;

/// Thread-safe failure counters, one per [`ErrorKind`].
///
/// All categories are initialized to zero on creation so increments never
/// have to allocate.
pub struct ErrorStats {
    counters: HashMap<ErrorKind, AtomicUsize>,
}

impl ErrorStats {
    /// Creates a tracker with every category at zero.
    pub fn new() -> Self {
        let mut counters = HashMap::new();
        for kind in ErrorKind::iter() {
            counters.insert(kind, AtomicUsize::new(0));
        }
        ErrorStats { counters }
    }

    /// Increment the counter for one failure category.
    pub fn record(&self, kind: ErrorKind) {
        if let Some(counter) = self.counters.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            // Unreachable when constructed via new(); log instead of panicking.
            log::error!("No counter registered for {kind:?}");
        }
    }

    /// Current count for one category.
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.counters
            .get(&kind)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Total failures across all categories.
    pub fn total(&self) -> usize {
        self.counters
            .values()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    /// Logs a per-category summary of all non-zero counters.
    pub fn log_summary(&self) {
        if self.total() == 0 {
            return;
        }
        log::info!("Failure summary ({} total):", self.total());
        for kind in ErrorKind::iter() {
            let count = self.count(kind);
            if count > 0 {
                log::info!("  {}: {}", kind.as_str(), count);
            }
        }
    }
}

impl Default for ErrorStats {
    fn default() -> Self {
        Self::new()
    }
}
