//! `SQLite` route store.
//!
//! Persists routes as (route, stop) membership rows and answers two-stop
//! lookups with a self-join. The [`RouteStore`] methods are fail-soft; the
//! inherent `try_*` methods return the underlying error instead.

// SQLite reports counts as i64. Counts are never negative.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::core::BusRoute;
use crate::error::{IoError, Result, StorageError};
use crate::storage::schema::{
    CHECK_SCHEMA_SQL, CLEAR_ROUTES_SQL, CURRENT_SCHEMA_VERSION, FIND_ROUTE_SQL, GET_VERSION_SQL,
    ROUTE_STOPS_SQL, SCHEMA_SQL, SET_VERSION_SQL, insert_stops_sql,
};
use crate::storage::traits::{RouteStore, StoreBackend, StoreStats};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Maximum membership rows written by one `INSERT` statement.
///
/// Keeps the bound parameter count well below `SQLite`'s variable limit.
const MAX_ROWS_PER_STATEMENT: usize = 4096;

/// SQLite-backed route store.
///
/// # Examples
///
/// ```no_run
/// use busroute::storage::SqliteRouteStore;
///
/// let mut store = SqliteRouteStore::open("data/bus-routes.db").unwrap();
/// store.init().unwrap();
/// ```
pub struct SqliteRouteStore {
    /// `SQLite` connection.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteRouteStore {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// Missing parent directories are created. The schema is not created;
    /// call [`init`](Self::init) for that.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| IoError::DirectoryFailed {
                path: parent.to_string_lossy().to_string(),
                reason: e.to_string(),
            })?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;

        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(StorageError::from)?;
        conn.execute_batch("PRAGMA synchronous = NORMAL;")
            .map_err(StorageError::from)?;

        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Creates an in-memory `SQLite` database.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        Ok(Self { conn, path: None })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Creates the schema if it does not exist.
    ///
    /// Idempotent. Existing route rows are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails or the database was
    /// written by a newer schema version.
    pub fn init(&mut self) -> Result<()> {
        if self.is_initialized()? {
            if let Some(found) = self.get_schema_version()?
                && found != CURRENT_SCHEMA_VERSION
            {
                return Err(StorageError::SchemaVersion {
                    found,
                    expected: CURRENT_SCHEMA_VERSION,
                }
                .into());
            }
            return Ok(());
        }

        self.conn
            .execute_batch(SCHEMA_SQL)
            .map_err(StorageError::from)?;
        self.set_schema_version(CURRENT_SCHEMA_VERSION)?;
        debug!(version = CURRENT_SCHEMA_VERSION, "created route schema");
        Ok(())
    }

    /// Checks if the schema has been created.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    pub fn is_initialized(&self) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(CHECK_SCHEMA_SQL, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(count > 0)
    }

    /// Gets the current schema version.
    fn get_schema_version(&self) -> Result<Option<u32>> {
        let version: Option<String> = self
            .conn
            .query_row(GET_VERSION_SQL, [], |row| row.get(0))
            .optional()
            .map_err(StorageError::from)?;

        Ok(version.and_then(|v| v.parse().ok()))
    }

    /// Sets the schema version.
    fn set_schema_version(&self, version: u32) -> Result<()> {
        self.conn
            .execute(SET_VERSION_SQL, params![version.to_string()])
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Deletes every membership row.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn try_reset(&mut self) -> Result<()> {
        let deleted = self
            .conn
            .execute(CLEAR_ROUTES_SQL, [])
            .map_err(StorageError::from)?;
        debug!(deleted, "cleared route table");
        Ok(())
    }

    /// Writes one membership row per stop of `route`.
    ///
    /// Returns `Ok(false)` without touching the database if the route has
    /// no stops. All rows of a route are written in one transaction, so a
    /// failure leaves none of them behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn try_insert(&mut self, route: &BusRoute) -> Result<bool> {
        if route.has_no_stops() {
            return Ok(false);
        }

        let tx = self.conn.transaction().map_err(StorageError::from)?;
        for batch in route.stop_ids.chunks(MAX_ROWS_PER_STATEMENT) {
            let sql = insert_stops_sql(batch.len());
            let mut stmt = tx.prepare_cached(&sql).map_err(StorageError::from)?;
            let values = batch.iter().flat_map(|&stop_id| [route.id, stop_id]);
            stmt.execute(params_from_iter(values))
                .map_err(StorageError::from)?;
        }
        tx.commit().map_err(StorageError::from)?;

        Ok(true)
    }

    /// Finds a route whose rows include both stops.
    ///
    /// The returned route carries every stop stored under the matched id.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn try_find_route_containing(&self, first: i32, second: i32) -> Result<Option<BusRoute>> {
        let route_id: Option<i32> = self
            .conn
            .query_row(FIND_ROUTE_SQL, params![first, second], |row| row.get(0))
            .optional()
            .map_err(StorageError::from)?;

        let Some(route_id) = route_id else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare_cached(ROUTE_STOPS_SQL)
            .map_err(StorageError::from)?;
        let stop_ids = stmt
            .query_map(params![route_id], |row| row.get::<_, i32>(0))
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        Ok(Some(BusRoute::new(route_id, stop_ids)))
    }

    /// Counts distinct route ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails.
    pub fn try_route_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(DISTINCT route_id) FROM bus_stops", [], |row| {
                row.get(0)
            })
            .map_err(StorageError::from)?;
        Ok(count as usize)
    }

    /// Gathers statistics about the stored routes.
    ///
    /// # Errors
    ///
    /// Returns an error if statistics cannot be gathered.
    pub fn try_stats(&self) -> Result<StoreStats> {
        let route_count = self.try_route_count()?;
        let membership_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bus_stops", [], |row| row.get(0))
            .map_err(StorageError::from)?;

        let db_size = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok())
            .map(|m| m.len());

        Ok(StoreStats {
            backend: StoreBackend::Sqlite,
            route_count,
            membership_count: Some(membership_count as usize),
            schema_version: self.get_schema_version()?,
            db_size,
        })
    }
}

impl RouteStore for SqliteRouteStore {
    fn reset(&mut self, _capacity_hint: usize) {
        if let Err(e) = self.try_reset() {
            error!(error = %e, "failed to clear route table");
        }
    }

    fn insert(&mut self, route: BusRoute) -> bool {
        match self.try_insert(&route) {
            Ok(inserted) => inserted,
            Err(e) => {
                error!(route_id = route.id, error = %e, "failed to add bus route");
                false
            }
        }
    }

    fn find_route_containing(&self, first: Option<i32>, second: Option<i32>) -> Option<BusRoute> {
        let (first, second) = (first?, second?);
        match self.try_find_route_containing(first, second) {
            Ok(route) => route,
            Err(e) => {
                error!(first, second, error = %e, "direct route query failed");
                None
            }
        }
    }

    fn route_count(&self) -> usize {
        self.try_route_count().unwrap_or_else(|e| {
            error!(error = %e, "failed to count routes");
            0
        })
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Sqlite
    }

    fn stats(&self) -> StoreStats {
        self.try_stats().unwrap_or_else(|e| {
            error!(error = %e, "failed to gather store statistics");
            StoreStats {
                backend: StoreBackend::Sqlite,
                ..StoreStats::default()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    fn setup() -> SqliteRouteStore {
        let mut store = SqliteRouteStore::in_memory().unwrap();
        store.init().unwrap();
        store
    }

    fn sample_store() -> SqliteRouteStore {
        let mut store = setup();
        store.reset(3);
        assert!(store.insert(BusRoute::new(1, vec![10, 20, 30])));
        assert!(store.insert(BusRoute::new(2, vec![20, 40])));
        assert!(store.insert(BusRoute::new(3, vec![50, 60, 70])));
        store
    }

    fn row_count(store: &SqliteRouteStore) -> i64 {
        store
            .conn
            .query_row("SELECT COUNT(*) FROM bus_stops", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_init() {
        let mut store = SqliteRouteStore::in_memory().unwrap();
        assert!(!store.is_initialized().unwrap());
        store.init().unwrap();
        assert!(store.is_initialized().unwrap());
    }

    #[test]
    fn test_init_idempotent() {
        let mut store = sample_store();
        assert!(store.init().is_ok());
        assert_eq!(store.route_count(), 3);
    }

    #[test]
    fn test_init_rejects_other_schema_version() {
        let mut store = setup();
        store.set_schema_version(CURRENT_SCHEMA_VERSION + 1).unwrap();
        let result = store.init();
        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::SchemaVersion { .. }))
        ));
    }

    #[test]
    fn test_insert_writes_one_row_per_stop() {
        let store = sample_store();
        assert_eq!(row_count(&store), 8);
        assert_eq!(store.route_count(), 3);
    }

    #[test]
    fn test_insert_refuses_empty_route() {
        let mut store = setup();
        assert!(!store.insert(BusRoute::new(9, Vec::new())));
        assert_eq!(row_count(&store), 0);
    }

    #[test]
    fn test_insert_long_route_in_batches() {
        let mut store = setup();
        let stops: Vec<i32> = (0..10_000).collect();
        assert!(store.insert(BusRoute::new(1, stops)));
        assert_eq!(row_count(&store), 10_000);
        assert_eq!(
            store.find_route_containing(Some(0), Some(9_999)).map(|r| r.id),
            Some(1)
        );
    }

    #[test]
    fn test_find_route() {
        let store = sample_store();
        let route = store.find_route_containing(Some(10), Some(30)).unwrap();
        assert_eq!(route, BusRoute::new(1, vec![10, 20, 30]));
        assert_eq!(store.find_route_containing(Some(40), Some(20)).map(|r| r.id), Some(2));
        assert!(store.find_route_containing(Some(20), Some(60)).is_none());
    }

    #[test]
    fn test_find_same_stop_twice() {
        let store = sample_store();
        assert_eq!(store.find_route_containing(Some(60), Some(60)).map(|r| r.id), Some(3));
        assert!(store.find_route_containing(Some(99), Some(99)).is_none());
    }

    #[test]
    fn test_absent_stop_returns_none() {
        let store = sample_store();
        assert!(store.find_route_containing(None, Some(10)).is_none());
        assert!(store.find_route_containing(Some(10), None).is_none());
    }

    #[test]
    fn test_reset_clears_rows() {
        let mut store = sample_store();
        store.reset(100);
        assert_eq!(row_count(&store), 0);
        assert!(store.find_route_containing(Some(10), Some(20)).is_none());
        store.reset(0);
        assert_eq!(store.route_count(), 0);
    }

    #[test]
    fn test_uninitialized_store_is_fail_soft() {
        let mut store = SqliteRouteStore::in_memory().unwrap();
        assert!(!store.insert(BusRoute::new(1, vec![1, 2])));
        assert!(store.find_route_containing(Some(1), Some(2)).is_none());
        assert_eq!(store.route_count(), 0);
        store.reset(0);

        assert!(store.try_insert(&BusRoute::new(1, vec![1, 2])).is_err());
        assert!(store.try_find_route_containing(1, 2).is_err());
        assert!(store.try_reset().is_err());
    }

    #[test]
    fn test_stats() {
        let store = sample_store();
        let stats = store.stats();
        assert_eq!(stats.backend, StoreBackend::Sqlite);
        assert_eq!(stats.route_count, 3);
        assert_eq!(stats.membership_count, Some(8));
        assert_eq!(stats.schema_version, Some(CURRENT_SCHEMA_VERSION));
        assert!(stats.db_size.is_none());
    }

    #[test]
    fn test_open_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested/dir/routes.db");

        let mut store = SqliteRouteStore::open(&db_path).unwrap();
        store.init().unwrap();
        assert!(store.insert(BusRoute::new(4, vec![1, 2, 3])));

        assert!(db_path.exists());
        assert_eq!(store.path(), Some(db_path.as_path()));
        assert!(store.stats().db_size.is_some());
    }

    #[test]
    fn test_rows_persist_across_connections() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("routes.db");

        {
            let mut store = SqliteRouteStore::open(&db_path).unwrap();
            store.init().unwrap();
            assert!(store.insert(BusRoute::new(7, vec![70, 71])));
        }

        let store = SqliteRouteStore::open(&db_path).unwrap();
        assert!(store.is_initialized().unwrap());
        assert_eq!(store.find_route_containing(Some(71), Some(70)).map(|r| r.id), Some(7));
    }
}
