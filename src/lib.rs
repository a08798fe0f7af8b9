//! # busroute
//!
//! Direct bus route lookup.
//!
//! busroute loads a route dataset (one route per line: a route id followed
//! by its stop ids) into a route store and answers one question: does a
//! single route connect stop A and stop B?
//!
//! ## Features
//!
//! - **Fail-soft loading**: malformed lines are counted and skipped, never fatal
//! - **Two stores**: an in-memory vector or a persistent `SQLite` table
//! - **Load statistics**: every reload reports loaded and rejected lines

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod loader;
pub mod service;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{BusRoute, LoadStats};

// Re-export loading
pub use loader::{ParsedLine, load_file, load_reader, parse_line};

// Re-export storage types
pub use storage::{DEFAULT_DB_PATH, MemoryRouteStore, RouteStore, SqliteRouteStore, StoreBackend};

// Re-export service
pub use service::RouteService;

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
