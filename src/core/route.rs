//! Bus route records.
//!
//! A [`BusRoute`] is one line of the route dataset: a route identifier
//! followed by the stops the route passes through.

use serde::{Deserialize, Serialize};

/// A single bus route and its ordered stop sequence.
///
/// Route ids are not required to be unique; two records with the same id
/// are stored as independent entries. Stop order is kept as read from the
/// dataset, but lookups only care about membership.
///
/// # Examples
///
/// ```
/// use busroute::core::BusRoute;
///
/// let route = BusRoute::new(1, vec![10, 20, 30]);
/// assert!(route.contains_stops(30, 10));
/// assert!(!route.contains_stops(10, 40));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusRoute {
    /// Route identifier.
    pub id: i32,

    /// Stop identifiers in route order.
    pub stop_ids: Vec<i32>,
}

impl BusRoute {
    /// Creates a route from its id and stop list.
    #[must_use]
    pub const fn new(id: i32, stop_ids: Vec<i32>) -> Self {
        Self { id, stop_ids }
    }

    /// Creates a route with no stops, reserving room for `capacity` of them.
    #[must_use]
    pub fn with_capacity(id: i32, capacity: usize) -> Self {
        Self {
            id,
            stop_ids: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of stops on the route.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stop_ids.len()
    }

    /// Returns `true` if the route has no stops.
    ///
    /// Such a route is never accepted by a store.
    #[must_use]
    pub fn has_no_stops(&self) -> bool {
        self.stop_ids.is_empty()
    }

    /// Returns `true` if the route passes through `stop_id`.
    #[must_use]
    pub fn contains_stop(&self, stop_id: i32) -> bool {
        self.stop_ids.contains(&stop_id)
    }

    /// Returns `true` if the route passes through both stops, in any order.
    #[must_use]
    pub fn contains_stops(&self, first: i32, second: i32) -> bool {
        self.contains_stop(first) && self.contains_stop(second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_route() {
        let route = BusRoute::new(7, vec![1, 2, 3]);
        assert_eq!(route.id, 7);
        assert_eq!(route.stop_count(), 3);
        assert!(!route.has_no_stops());
    }

    #[test]
    fn test_with_capacity_is_empty() {
        let route = BusRoute::with_capacity(3, 16);
        assert!(route.has_no_stops());
        assert!(route.stop_ids.capacity() >= 16);
    }

    #[test]
    fn test_contains_stops_any_order() {
        let route = BusRoute::new(1, vec![10, 20, 30]);
        assert!(route.contains_stops(10, 30));
        assert!(route.contains_stops(30, 10));
        assert!(route.contains_stops(20, 20));
        assert!(!route.contains_stops(10, 99));
    }

    #[test]
    fn test_serialization() {
        let route = BusRoute::new(2, vec![20, 40]);
        let json = serde_json::to_string(&route).unwrap();
        assert_eq!(json, r#"{"id":2,"stop_ids":[20,40]}"#);
    }
}
