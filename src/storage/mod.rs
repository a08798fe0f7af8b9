//! Storage layer for busroute.
//!
//! Two interchangeable route stores behind the [`RouteStore`] trait: an
//! in-memory vector scanned linearly, and a `SQLite` table of
//! (route, stop) memberships queried with a self-join.

pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryRouteStore;
pub use schema::CURRENT_SCHEMA_VERSION;
pub use sqlite::SqliteRouteStore;
pub use traits::{RouteStore, StoreBackend, StoreStats};

/// Default database path relative to the application home.
pub const DEFAULT_DB_PATH: &str = "data/bus-routes.db";
