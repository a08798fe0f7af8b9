//! Direct route service.
//!
//! [`RouteService`] binds a route store to a dataset source and exposes the
//! two operations callers need: a full reload and a two-stop lookup.

use crate::core::{BusRoute, LoadStats};
use crate::loader::load_file;
use crate::storage::RouteStore;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reload and lookup over one route store.
///
/// `reload` takes `&mut self` and lookups take `&self`, so a single owner
/// can never run them concurrently. To share a service between threads,
/// wrap it in a `RwLock`.
///
/// # Examples
///
/// ```no_run
/// use busroute::service::RouteService;
/// use busroute::storage::MemoryRouteStore;
///
/// let mut service = RouteService::new(Box::new(MemoryRouteStore::new()), "data/bus-routes.txt");
/// let stats = service.reload();
/// let direct = service.find_direct_route(Some(10), Some(30)).is_some();
/// ```
pub struct RouteService {
    store: Box<dyn RouteStore>,
    source: PathBuf,
}

impl RouteService {
    /// Creates a service reading from `source` into `store`.
    pub fn new<P: Into<PathBuf>>(store: Box<dyn RouteStore>, source: P) -> Self {
        Self {
            store,
            source: source.into(),
        }
    }

    /// Returns the configured dataset path.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn RouteStore {
        self.store.as_ref()
    }

    /// Replaces the stored routes with the contents of the source.
    pub fn reload(&mut self) -> LoadStats {
        load_file(self.store.as_mut(), &self.source)
    }

    /// Finds a route serving both stops.
    ///
    /// Returns `None` without touching the store if either stop is absent.
    #[must_use]
    pub fn find_direct_route(&self, departure: Option<i32>, arrival: Option<i32>) -> Option<BusRoute> {
        let (Some(departure), Some(arrival)) = (departure, arrival) else {
            debug!(?departure, ?arrival, "lookup with missing stop id");
            return None;
        };
        self.store
            .find_route_containing(Some(departure), Some(arrival))
    }
}
