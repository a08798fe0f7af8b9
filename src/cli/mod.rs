//! CLI layer for busroute.
//!
//! Provides the command-line interface using clap, with commands for
//! creating the database, reloading the dataset, and looking up direct
//! routes.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands, StoreMode};
