//! Route store trait definition.
//!
//! Defines the contract shared by the in-memory and `SQLite` route stores,
//! so the loader and the lookup service work against either one.

use crate::core::BusRoute;
use serde::Serialize;
use std::fmt;

/// Identifies a route store implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Routes held in process memory.
    Memory,
    /// Routes persisted in a `SQLite` table.
    Sqlite,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Storage for the working set of bus routes.
///
/// All operations are fail-soft: backend failures are logged and reported
/// as a refused insert or a missing route, never as an error.
///
/// Implementations are not synchronized. A reload (`reset` followed by
/// `insert` calls) must not run concurrently with another reload or with
/// lookups on the same store; the `&mut self` receivers enforce this for a
/// single owner, and shared owners must add their own lock.
pub trait RouteStore: Send {
    /// Discards every stored route and prepares an empty working set.
    ///
    /// `capacity_hint` is advisory; stores that cannot use it ignore it.
    /// Calling `reset` repeatedly is harmless.
    fn reset(&mut self, capacity_hint: usize);

    /// Adds a route to the working set.
    ///
    /// Returns `false` if the route has no stops or the backend failed to
    /// store it. Duplicate route ids are stored as separate entries.
    fn insert(&mut self, route: BusRoute) -> bool;

    /// Finds a route that passes through both stops.
    ///
    /// Returns `None` if either stop is absent or no stored route contains
    /// both. When several routes match, which one is returned is
    /// unspecified.
    ///
    /// The `SQLite` store merges records that share a route id, so with
    /// duplicate ids it can match stops the memory store sees on separate
    /// routes.
    fn find_route_containing(&self, first: Option<i32>, second: Option<i32>) -> Option<BusRoute>;

    /// Returns the number of stored routes.
    ///
    /// The `SQLite` store keys rows by route id, so it counts distinct ids.
    fn route_count(&self) -> usize;

    /// Returns which implementation this is.
    fn backend(&self) -> StoreBackend;

    /// Gathers store statistics for status reporting.
    fn stats(&self) -> StoreStats {
        StoreStats {
            backend: self.backend(),
            route_count: self.route_count(),
            ..StoreStats::default()
        }
    }
}

/// Store statistics.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    /// Which store produced the statistics.
    pub backend: StoreBackend,
    /// Number of stored routes.
    pub route_count: usize,
    /// Number of (route, stop) rows, for stores that keep them.
    pub membership_count: Option<usize>,
    /// Schema version, for persisted stores.
    pub schema_version: Option<u32>,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}

impl Default for StoreStats {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            route_count: 0,
            membership_count: None,
            schema_version: None,
            db_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_display() {
        assert_eq!(StoreBackend::Memory.to_string(), "memory");
        assert_eq!(StoreBackend::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn test_default_stats() {
        let stats = StoreStats::default();
        assert_eq!(stats.backend, StoreBackend::Memory);
        assert_eq!(stats.route_count, 0);
        assert!(stats.membership_count.is_none());
    }

    #[test]
    fn test_backend_serialization() {
        let json = serde_json::to_string(&StoreBackend::Sqlite).unwrap();
        assert_eq!(json, "\"sqlite\"");
    }
}
