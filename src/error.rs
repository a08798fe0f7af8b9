//! Error types for busroute operations.
//!
//! This module provides the error hierarchy using `thiserror` for the
//! storage backends, file I/O, and CLI commands, plus the per-line
//! [`ParseError`] the loader counts and logs.
//!
//! The load and lookup operations themselves are fail-soft: they log and
//! count failures instead of returning them. These types surface where a
//! caller explicitly asks for the error channel (opening a database, the
//! `try_*` store methods, CLI argument handling).

use thiserror::Error;

/// Result type alias for busroute operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors (database operations).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Storage-specific errors for database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(String),

    /// Database schema has not been created yet.
    #[error("database not initialized. Run: busroute init")]
    NotInitialized,

    /// Database was created by an incompatible version.
    #[error("unsupported schema version {found} (expected {expected})")]
    SchemaVersion {
        /// Version recorded in the database.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },
}

/// Errors raised while parsing a single dataset line.
///
/// Line numbers are zero-based, matching the position of the line in
/// the source file (line 0 is the capacity header).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The header line is not a non-negative integer.
    #[error("line {line}: capacity header must be a non-negative integer, got {value:?}")]
    InvalidCapacityHint {
        /// Line number.
        line: usize,
        /// Raw header text.
        value: String,
    },

    /// A data line has fewer than a route id and two stop ids.
    #[error("line {line}: expected at least 3 elements, found {found}")]
    TooFewTokens {
        /// Line number.
        line: usize,
        /// Number of tokens found.
        found: usize,
    },

    /// A data line contains a token that is not an integer.
    #[error("line {line}: the line should contain only numbers, got {token:?}")]
    NonIntegerToken {
        /// Line number.
        line: usize,
        /// Offending token.
        token: String,
    },
}

impl ParseError {
    /// Returns the line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::InvalidCapacityHint { line, .. }
            | Self::TooFewTokens { line, .. }
            | Self::NonIntegerToken { line, .. } => *line,
        }
    }
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}
