//! Core domain models for busroute.
//!
//! Route records and load statistics. These are pure value types with no
//! I/O dependencies.

pub mod route;
pub mod stats;

pub use route::BusRoute;
pub use stats::LoadStats;
