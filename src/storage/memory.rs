//! In-memory route store.
//!
//! Keeps routes in a vector in insertion order and answers lookups with a
//! linear scan. The dataset is replaced wholesale on every reload, so no
//! index is maintained.

use crate::core::BusRoute;
use crate::storage::traits::{RouteStore, StoreBackend};
use tracing::debug;

/// Upper bound on the capacity preallocated from a header hint.
const MAX_PREALLOCATED_ROUTES: usize = 1 << 20;

/// Route store backed by a `Vec`.
///
/// # Examples
///
/// ```
/// use busroute::core::BusRoute;
/// use busroute::storage::{MemoryRouteStore, RouteStore};
///
/// let mut store = MemoryRouteStore::new();
/// store.reset(1);
/// assert!(store.insert(BusRoute::new(1, vec![10, 20])));
/// assert_eq!(store.find_route_containing(Some(20), Some(10)).map(|r| r.id), Some(1));
/// ```
#[derive(Debug, Default)]
pub struct MemoryRouteStore {
    routes: Vec<BusRoute>,
}

impl MemoryRouteStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Returns the stored routes in insertion order.
    #[must_use]
    pub fn routes(&self) -> &[BusRoute] {
        &self.routes
    }
}

impl RouteStore for MemoryRouteStore {
    fn reset(&mut self, capacity_hint: usize) {
        debug!(capacity_hint, "resetting memory store");
        self.routes = Vec::with_capacity(capacity_hint.min(MAX_PREALLOCATED_ROUTES));
    }

    fn insert(&mut self, route: BusRoute) -> bool {
        if route.has_no_stops() {
            return false;
        }
        self.routes.push(route);
        true
    }

    fn find_route_containing(&self, first: Option<i32>, second: Option<i32>) -> Option<BusRoute> {
        let (first, second) = (first?, second?);
        self.routes
            .iter()
            .find(|route| route.contains_stops(first, second))
            .cloned()
    }

    fn route_count(&self) -> usize {
        self.routes.len()
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
