//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats. JSON field names follow the
//! route service wire format (`load_count`, `error_count`, `dep_sid`,
//! `arr_sid`, `direct_bus_route`).

use crate::core::{BusRoute, LoadStats};
use crate::error::Error;
use crate::storage::StoreStats;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Result of one direct-route lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectRouteAnswer {
    /// Departure stop id (null if absent or invalid).
    pub dep_sid: Option<i32>,
    /// Arrival stop id (null if absent or invalid).
    pub arr_sid: Option<i32>,
    /// Whether a direct route exists.
    pub direct_bus_route: bool,
    /// Id of the matching route, if any.
    pub route_id: Option<i32>,
}

impl DirectRouteAnswer {
    /// Builds an answer from a lookup result.
    #[must_use]
    pub fn new(dep_sid: Option<i32>, arr_sid: Option<i32>, route: Option<&BusRoute>) -> Self {
        Self {
            dep_sid,
            arr_sid,
            direct_bus_route: route.is_some(),
            route_id: route.map(|r| r.id),
        }
    }
}

#[derive(Serialize)]
struct LoadStatsJson {
    load_count: usize,
    error_count: usize,
}

/// Formats load statistics.
#[must_use]
pub fn format_load_stats(stats: &LoadStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "Loaded {} routes ({} rejected)\n",
            stats.loaded, stats.rejected
        ),
        OutputFormat::Json => format_json(&LoadStatsJson {
            load_count: stats.loaded,
            error_count: stats.rejected,
        }),
    }
}

/// Formats a single lookup answer.
#[must_use]
pub fn format_direct_route(answer: &DirectRouteAnswer, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_direct_route_text(answer),
        OutputFormat::Json => format_json(answer),
    }
}

/// Formats batch lookup answers.
///
/// JSON output is one compact object per line.
#[must_use]
pub fn format_direct_routes(answers: &[DirectRouteAnswer], format: OutputFormat) -> String {
    let mut output = String::new();
    for answer in answers {
        match format {
            OutputFormat::Text => output.push_str(&format_direct_route_text(answer)),
            OutputFormat::Json => {
                output.push_str(&serde_json::to_string(answer).unwrap_or_else(|_| "{}".to_string()));
                output.push('\n');
            }
        }
    }
    output
}

fn format_direct_route_text(answer: &DirectRouteAnswer) -> String {
    let dep = format_stop(answer.dep_sid);
    let arr = format_stop(answer.arr_sid);
    match answer.route_id {
        Some(route_id) => format!("{dep} -> {arr}: direct (route {route_id})\n"),
        None => format!("{dep} -> {arr}: no direct route\n"),
    }
}

fn format_stop(stop: Option<i32>) -> String {
    stop.map_or_else(|| "?".to_string(), |s| s.to_string())
}

/// Formats a status response.
#[must_use]
pub fn format_status(stats: &StoreStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_status_text(stats),
        OutputFormat::Json => format_json(stats),
    }
}

fn format_status_text(stats: &StoreStats) -> String {
    let mut output = String::new();
    output.push_str("Bus Route Status\n");
    output.push_str("================\n\n");
    let _ = writeln!(output, "  Backend:       {}", stats.backend);
    let _ = writeln!(output, "  Routes:        {}", stats.route_count);
    if let Some(rows) = stats.membership_count {
        let _ = writeln!(output, "  Stop rows:     {rows}");
    }
    if let Some(version) = stats.schema_version {
        let _ = writeln!(output, "  Schema:        v{version}");
    }
    if let Some(size) = stats.db_size {
        let _ = writeln!(output, "  DB size:       {}", format_size(size));
    }
    output
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorJson {
                error: String,
            }
            format_json(&ErrorJson {
                error: error.to_string(),
            })
        }
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats byte size for display.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
