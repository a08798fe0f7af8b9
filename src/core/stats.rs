//! Load statistics.

use serde::{Deserialize, Serialize};

/// Counts produced by one dataset load.
///
/// `loaded` counts lines whose route was accepted by the store.
/// `rejected` counts malformed lines, refused inserts, and source read
/// failures, each once at the point where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadStats {
    /// Routes inserted into the store.
    pub loaded: usize,

    /// Lines or reads that failed.
    pub rejected: usize,
}

impl LoadStats {
    /// Creates an empty set of counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            loaded: 0,
            rejected: 0,
        }
    }

    /// Total number of counted events.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.loaded + self.rejected
    }

    /// Returns `true` if nothing was rejected.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.rejected == 0
    }

    pub(crate) const fn record_loaded(&mut self) {
        self.loaded += 1;
    }

    pub(crate) const fn record_rejected(&mut self) {
        self.rejected += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = LoadStats::new();
        assert!(stats.is_clean());

        stats.record_loaded();
        stats.record_loaded();
        stats.record_rejected();

        assert_eq!(stats.loaded, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.total(), 3);
        assert!(!stats.is_clean());
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(LoadStats::default(), LoadStats::new());
    }
}
