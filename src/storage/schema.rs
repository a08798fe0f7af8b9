//! Database schema definitions.
//!
//! Contains the SQL for the `SQLite` route store. Routes are kept as one
//! row per (route, stop) membership rather than one row per route, which
//! lets the two-stop lookup run as a self-join.

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// SQL schema for initial database setup.
pub const SCHEMA_SQL: &str = r"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_info (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Route/stop memberships
CREATE TABLE IF NOT EXISTS bus_stops (
    route_id INTEGER NOT NULL,
    stop_id INTEGER NOT NULL
);

-- Index for the two-stop self-join
CREATE INDEX IF NOT EXISTS idx_bus_stops_stop ON bus_stops(stop_id, route_id);

-- Index for fetching a route's stops
CREATE INDEX IF NOT EXISTS idx_bus_stops_route ON bus_stops(route_id);
";

/// SQL to check if schema is initialized.
pub const CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type='table' AND name='schema_info';
";

/// SQL to get schema version.
pub const GET_VERSION_SQL: &str = r"
SELECT value FROM schema_info WHERE key = 'version';
";

/// SQL to set schema version.
pub const SET_VERSION_SQL: &str = r"
INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?);
";

/// SQL to clear the working set.
pub const CLEAR_ROUTES_SQL: &str = "DELETE FROM bus_stops";

/// Prefix of the batched membership insert; one `(?, ?)` group per stop follows.
pub const INSERT_STOPS_PREFIX: &str = "INSERT INTO bus_stops (route_id, stop_id) VALUES ";

/// SQL for the two-stop lookup.
pub const FIND_ROUTE_SQL: &str = r"
SELECT t1.route_id FROM bus_stops t1
JOIN bus_stops t2 ON t1.route_id = t2.route_id
WHERE t1.stop_id = ?1 AND t2.stop_id = ?2
LIMIT 1
";

/// SQL to fetch the stops stored under a route id, in insertion order.
pub const ROUTE_STOPS_SQL: &str = r"
SELECT stop_id FROM bus_stops WHERE route_id = ? ORDER BY rowid
";

/// Builds the batched insert statement for `rows` memberships.
#[must_use]
pub fn insert_stops_sql(rows: usize) -> String {
    let mut sql = String::with_capacity(INSERT_STOPS_PREFIX.len() + rows * 7);
    sql.push_str(INSERT_STOPS_PREFIX);
    for i in 0..rows {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str("(?, ?)");
    }
    sql
}
