//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros. Every global option
//! can also be set through a `BUS_ROUTE_*` environment variable.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Default dataset path relative to the application home.
pub const DEFAULT_SOURCE_PATH: &str = "data/bus-routes.txt";

/// busroute: direct bus route lookup.
///
/// Loads a route dataset into memory or a `SQLite` database and answers
/// whether a single route connects two stops.
#[derive(Parser, Debug)]
#[command(name = "busroute")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Application home directory.
    ///
    /// Relative source and database paths are resolved against it.
    #[arg(long, env = "BUS_ROUTE_HOME", global = true)]
    pub home: Option<PathBuf>,

    /// Path to the route dataset.
    #[arg(short, long, env = "BUS_ROUTE_SOURCE", global = true)]
    pub source: Option<PathBuf>,

    /// Route store to use.
    #[arg(short, long, env = "BUS_ROUTE_MODE", value_enum, default_value_t = StoreMode::Memory, global = true)]
    pub mode: StoreMode,

    /// Path to the `SQLite` database file (sqlite mode).
    #[arg(short, long, env = "BUS_ROUTE_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Route store selection.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// Keep routes in process memory; every command loads the source.
    Memory,
    /// Keep routes in a `SQLite` database that outlives the process.
    Sqlite,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the `SQLite` database and schema.
    Init {
        /// Recreate the database (destroys existing data).
        #[arg(short, long)]
        force: bool,
    },

    /// Reload the route dataset from the source file.
    Reload,

    /// Check whether one route serves both stops.
    Direct {
        /// Departure stop id.
        #[arg(long = "dep-sid", allow_hyphen_values = true)]
        dep_sid: Option<String>,

        /// Arrival stop id.
        #[arg(long = "arr-sid", allow_hyphen_values = true)]
        arr_sid: Option<String>,
    },

    /// Answer many lookups, one `DEP ARR` pair per input line.
    Batch {
        /// Input file (reads stdin if not provided).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show route store status.
    Status,
}

impl Cli {
    /// Returns the dataset path, resolved against the home directory.
    #[must_use]
    pub fn get_source_path(&self) -> PathBuf {
        self.resolve(
            self.source
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_SOURCE_PATH)),
        )
    }

    /// Returns the database path, resolved against the home directory.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.resolve(
            self.db_path
                .as_deref()
                .unwrap_or_else(|| Path::new(crate::storage::DEFAULT_DB_PATH)),
        )
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.home {
            Some(home) if path.is_relative() => home.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Decodes a stop id argument.
///
/// Anything that is not an integer counts as absent.
#[must_use]
pub fn parse_stop_id(value: Option<&str>) -> Option<i32> {
    value.and_then(|v| v.parse().ok())
}
