//! Dataset loading.
//!
//! Streams a dataset through the line parser into a [`RouteStore`] and
//! counts what was accepted and rejected. Loading never fails as a whole:
//! malformed lines, refused inserts, and read errors are logged, counted,
//! and the caller always gets a [`LoadStats`] back.

use crate::core::LoadStats;
use crate::io::SourceReader;
use crate::loader::parser::{ParsedLine, parse_line};
use crate::storage::RouteStore;
use std::io::{self, BufRead};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Number of lines between progress log events.
pub const PROGRESS_INTERVAL: usize = 100;

/// Loads the dataset at `path` into `store`.
///
/// If the file cannot be opened, the failure is logged and counted as one
/// rejection and the store is left untouched.
///
/// # Examples
///
/// ```no_run
/// use busroute::loader::load_file;
/// use busroute::storage::MemoryRouteStore;
///
/// let mut store = MemoryRouteStore::new();
/// let stats = load_file(&mut store, "data/bus-routes.txt");
/// println!("{} loaded, {} rejected", stats.loaded, stats.rejected);
/// ```
pub fn load_file<P: AsRef<Path>>(store: &mut dyn RouteStore, path: P) -> LoadStats {
    let path = path.as_ref();
    info!(path = %path.display(), backend = %store.backend(), "start loading file");

    let stats = match SourceReader::open(path) {
        Ok(reader) => {
            debug!(path = reader.path(), bytes = reader.size(), "opened source file");
            load_lines(store, reader.lines())
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to open source file");
            let mut stats = LoadStats::new();
            stats.record_rejected();
            stats
        }
    };

    info!(
        path = %path.display(),
        loaded = stats.loaded,
        rejected = stats.rejected,
        "end loading file"
    );
    stats
}

/// Loads a dataset from any buffered reader.
pub fn load_reader<R: BufRead>(store: &mut dyn RouteStore, reader: R) -> LoadStats {
    load_lines(store, reader.lines())
}

/// Loads a dataset from a stream of lines.
///
/// A read error ends the load: it is counted once and the lines already
/// inserted stay in the store. An empty stream still clears the store.
pub fn load_lines<I>(store: &mut dyn RouteStore, lines: I) -> LoadStats
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut run = LoadRun::default();

    for line in lines {
        match line {
            Ok(line) => run.process_line(store, &line),
            Err(e) => {
                error!(line = run.line_index, error = %e, "failed to read source line");
                run.stats.record_rejected();
                return run.stats;
            }
        }
    }

    if run.line_index == 0 {
        debug!("empty source, clearing store");
        store.reset(0);
    }

    run.stats
}

/// Per-load accumulator.
#[derive(Debug, Default)]
struct LoadRun {
    stats: LoadStats,
    /// Zero-based index of the next line.
    line_index: usize,
}

impl LoadRun {
    fn process_line(&mut self, store: &mut dyn RouteStore, line: &str) {
        match parse_line(line, self.line_index) {
            Ok(ParsedLine::CapacityHint(capacity)) => {
                info!(capacity, "estimated lines count");
                store.reset(capacity);
            }
            Ok(ParsedLine::Route(route)) => {
                let route_id = route.id;
                if store.insert(route) {
                    self.stats.record_loaded();
                } else {
                    warn!(line = self.line_index, route_id, "bus route was not added");
                    self.stats.record_rejected();
                }
            }
            Err(e) => {
                warn!(line = e.line(), reason = %e, "line rejected");
                self.stats.record_rejected();
                if self.line_index == 0 {
                    // Without a usable header the old data still has to go.
                    debug!("clearing store without capacity hint");
                    store.reset(0);
                }
            }
        }

        self.line_index += 1;
        if self.line_index % PROGRESS_INTERVAL == 0 {
            info!(lines = self.line_index, "lines loaded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BusRoute;
    use crate::storage::MemoryRouteStore;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn load_str(store: &mut MemoryRouteStore, content: &str) -> LoadStats {
        load_reader(store, Cursor::new(content.to_string()))
    }

    #[test]
    fn test_load_well_formed() {
        let mut store = MemoryRouteStore::new();
        let stats = load_str(&mut store, "3\n1 10 20 30\n2 20 40\n3 50 60 70");

        assert_eq!(stats, LoadStats { loaded: 3, rejected: 0 });
        assert_eq!(store.find_route_containing(Some(10), Some(30)).map(|r| r.id), Some(1));
        assert!(store.find_route_containing(Some(20), Some(60)).is_none());
        assert_eq!(store.find_route_containing(Some(40), Some(20)).map(|r| r.id), Some(2));
    }

    #[test]
    fn test_load_rejects_malformed_lines() {
        let mut store = MemoryRouteStore::new();
        let stats = load_str(&mut store, "2\n1 10\nbad line 1 2");

        assert_eq!(stats, LoadStats { loaded: 0, rejected: 2 });
        assert_eq!(store.route_count(), 0);
    }

    #[test]
    fn test_malformed_header_is_counted_and_skipped() {
        let mut store = MemoryRouteStore::new();
        let stats = load_str(&mut store, "many\n1 10 20\n2 30 40\n");

        assert_eq!(stats, LoadStats { loaded: 2, rejected: 1 });
        assert_eq!(store.route_count(), 2);
    }

    #[test]
    fn test_malformed_header_still_replaces_old_data() {
        let mut store = MemoryRouteStore::new();
        load_str(&mut store, "1\n1 10 20\n");
        load_str(&mut store, "x\n2 30 40\n");

        assert_eq!(store.routes(), &[BusRoute::new(2, vec![30, 40])]);
    }

    #[test]
    fn test_reload_replaces_dataset() {
        let mut store = MemoryRouteStore::new();
        let content = "2\n1 10 20\n2 30 40\n";

        let first = load_str(&mut store, content);
        let second = load_str(&mut store, content);

        assert_eq!(first, second);
        assert_eq!(store.route_count(), 2);
    }

    #[test]
    fn test_empty_source() {
        let mut store = MemoryRouteStore::new();
        load_str(&mut store, "1\n1 10 20\n");
        assert_eq!(store.route_count(), 1);

        let stats = load_str(&mut store, "");
        assert_eq!(stats, LoadStats::default());
        assert_eq!(store.route_count(), 0);
        assert!(store.find_route_containing(Some(10), Some(20)).is_none());
    }

    #[test]
    fn test_read_error_on_first_line_keeps_store() {
        let mut store = MemoryRouteStore::new();
        load_str(&mut store, "1\n1 10 20\n");

        let lines = vec![Err(io::Error::new(io::ErrorKind::InvalidData, "bad bytes"))];
        let stats = load_lines(&mut store, lines);

        assert_eq!(stats, LoadStats { loaded: 0, rejected: 1 });
        assert_eq!(store.route_count(), 1);
    }

    #[test]
    fn test_header_hint_does_not_limit_routes() {
        let mut store = MemoryRouteStore::new();
        let stats = load_str(&mut store, "1\n1 10 20\n2 30 40\n3 50 60\n");
        assert_eq!(stats.loaded, 3);
    }

    #[test]
    fn test_read_error_stops_load() {
        let mut store = MemoryRouteStore::new();
        let lines = vec![
            Ok("3".to_string()),
            Ok("1 10 20".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")),
            Ok("2 30 40".to_string()),
        ];

        let stats = load_lines(&mut store, lines);

        assert_eq!(stats, LoadStats { loaded: 1, rejected: 1 });
        assert_eq!(store.route_count(), 1);
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("routes.txt");
        std::fs::write(&path, "2\r\n1 10 20 30\r\n2 20 40\r\n").unwrap();

        let mut store = MemoryRouteStore::new();
        let stats = load_file(&mut store, &path);

        assert_eq!(stats, LoadStats { loaded: 2, rejected: 0 });
    }

    #[test]
    fn test_load_missing_file_is_one_rejection() {
        let mut store = MemoryRouteStore::new();
        store.reset(1);
        assert!(store.insert(BusRoute::new(1, vec![1, 2])));

        let stats = load_file(&mut store, "/nonexistent/routes.txt");

        assert_eq!(stats, LoadStats { loaded: 0, rejected: 1 });
        assert_eq!(store.route_count(), 1);
    }

    #[test]
    fn test_many_lines_with_progress() {
        let mut content = String::from("250\n");
        for id in 0..250 {
            content.push_str(&format!("{id} {} {}\n", id * 2, id * 2 + 1));
        }

        let mut store = MemoryRouteStore::new();
        let stats = load_str(&mut store, &content);

        assert_eq!(stats, LoadStats { loaded: 250, rejected: 0 });
        assert_eq!(store.find_route_containing(Some(401), Some(400)).map(|r| r.id), Some(200));
    }
}
