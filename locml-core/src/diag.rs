//! Run-wide diagnostic counters
//!
//! Duplicate grouping keys and calendar-type fallbacks are recoverable:
//! processing continues, but each occurrence is counted here and emitted as
//! a structured `tracing` record so batch runs can report how much data was
//! silently dropped or substituted. Counters are atomic so categories may be
//! resolved from worker threads without extra locking.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

#[derive(Debug, Default)]
pub struct Diagnostics {
    duplicate_keys: AtomicU64,
    type_fallbacks: AtomicU64,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// A grouping query produced the same key twice; the first entry was
    /// kept and `discarded` was dropped.
    pub fn duplicate_key(&self, context: &str, key: &str, discarded: &str) {
        self.duplicate_keys.fetch_add(1, Ordering::Relaxed);
        warn!(context, key, discarded, "duplicate grouping key, first entry kept");
    }

    /// A typed category had no data for `requested` and the default type
    /// was substituted.
    pub fn type_fallback(&self, category: &str, requested: &str, substituted: &str) {
        self.type_fallbacks.fetch_add(1, Ordering::Relaxed);
        warn!(category, requested, substituted, "typed category fell back to default type");
    }

    pub fn duplicate_key_count(&self) -> u64 {
        self.duplicate_keys.load(Ordering::Relaxed)
    }

    pub fn type_fallback_count(&self) -> u64 {
        self.type_fallbacks.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let diag = Diagnostics::new();
        assert_eq!(diag.duplicate_key_count(), 0);
        diag.duplicate_key("LC_FORMAT", "d1", "YYYY-MM-DD");
        diag.duplicate_key("LC_FORMAT", "d2", "HH:MM");
        diag.type_fallback("LC_CALENDAR", "hebrew", "gregorian");
        assert_eq!(diag.duplicate_key_count(), 2);
        assert_eq!(diag.type_fallback_count(), 1);
    }
}
