//! I/O utilities for busroute.
//!
//! Provides buffered line streaming over route dataset files.

pub mod reader;

pub use reader::SourceReader;
