//! Dataset loading for busroute.
//!
//! The [`parser`] turns single lines into capacity hints or routes; the
//! [`load`] functions stream a whole source through it into a store.

pub mod load;
pub mod parser;

pub use load::{PROGRESS_INTERVAL, load_file, load_lines, load_reader};
pub use parser::{MIN_ROUTE_TOKENS, ParsedLine, parse_line};
