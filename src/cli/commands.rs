//! CLI command implementations.
//!
//! Contains the logic for each CLI command. In memory mode every command
//! that needs routes loads the source first, since nothing outlives the
//! process; in sqlite mode lookups read the persisted table directly.

use crate::cli::output::{
    DirectRouteAnswer, OutputFormat, format_direct_route, format_direct_routes, format_load_stats,
    format_status,
};
use crate::cli::parser::{Cli, Commands, StoreMode, parse_stop_id};
use crate::error::{CommandError, Error, IoError, Result, StorageError};
use crate::io::SourceReader;
use crate::service::RouteService;
use crate::storage::{MemoryRouteStore, RouteStore, SqliteRouteStore};
use std::io::{self, BufRead};
use std::path::Path;
use tracing::info;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    check_home(cli)?;

    match &cli.command {
        Commands::Init { force } => cmd_init(&cli.get_db_path(), *force, format),
        Commands::Reload => cmd_reload(cli, format),
        Commands::Direct { dep_sid, arr_sid } => {
            cmd_direct(cli, dep_sid.as_deref(), arr_sid.as_deref(), format)
        }
        Commands::Batch { input } => cmd_batch(cli, input.as_deref(), format),
        Commands::Status => cmd_status(cli, format),
    }
}

/// Verifies that a configured home directory exists.
fn check_home(cli: &Cli) -> Result<()> {
    match &cli.home {
        Some(home) if !home.is_dir() => Err(Error::Config {
            message: format!("home directory does not exist: {}", home.display()),
        }),
        _ => Ok(()),
    }
}

/// Opens an existing, initialized database.
fn open_existing_db(db_path: &Path) -> Result<SqliteRouteStore> {
    if !db_path.exists() {
        return Err(StorageError::NotInitialized.into());
    }

    let mut store = SqliteRouteStore::open(db_path)?;
    if !store.is_initialized()? {
        return Err(StorageError::NotInitialized.into());
    }
    // Validates the schema version.
    store.init()?;

    Ok(store)
}

/// Builds a service whose store is ready for a reload.
fn reload_service(cli: &Cli) -> Result<RouteService> {
    let store: Box<dyn RouteStore> = match cli.mode {
        StoreMode::Memory => Box::new(MemoryRouteStore::new()),
        StoreMode::Sqlite => {
            let mut store = SqliteRouteStore::open(cli.get_db_path())?;
            store.init()?;
            Box::new(store)
        }
    };
    Ok(RouteService::new(store, cli.get_source_path()))
}

/// Builds a service whose store already holds routes.
fn lookup_service(cli: &Cli) -> Result<RouteService> {
    match cli.mode {
        StoreMode::Memory => {
            let mut service = reload_service(cli)?;
            let stats = service.reload();
            info!(
                loaded = stats.loaded,
                rejected = stats.rejected,
                "loaded routes for lookup"
            );
            Ok(service)
        }
        StoreMode::Sqlite => {
            let store = open_existing_db(&cli.get_db_path())?;
            Ok(RouteService::new(Box::new(store), cli.get_source_path()))
        }
    }
}

// ==================== Command Implementations ====================

fn cmd_init(db_path: &Path, force: bool, _format: OutputFormat) -> Result<String> {
    if db_path.exists() && !force {
        return Err(CommandError::ExecutionFailed(
            "Database already exists. Use --force to reinitialize.".to_string(),
        )
        .into());
    }

    if force && db_path.exists() {
        remove_db_files(db_path)?;
    }

    let mut store = SqliteRouteStore::open(db_path)?;
    store.init()?;

    Ok(format!(
        "Initialized route database at: {}\n",
        db_path.display()
    ))
}

/// Removes a database file and its WAL companions.
fn remove_db_files(db_path: &Path) -> Result<()> {
    std::fs::remove_file(db_path).map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to remove existing database: {e}"))
    })?;

    for suffix in ["-wal", "-shm"] {
        let mut companion = db_path.as_os_str().to_owned();
        companion.push(suffix);
        let companion = Path::new(&companion);
        if companion.exists() {
            std::fs::remove_file(companion).map_err(|e| {
                CommandError::ExecutionFailed(format!(
                    "Failed to remove {}: {e}",
                    companion.display()
                ))
            })?;
        }
    }

    Ok(())
}

fn cmd_reload(cli: &Cli, format: OutputFormat) -> Result<String> {
    let mut service = reload_service(cli)?;
    let stats = service.reload();
    Ok(format_load_stats(&stats, format))
}

fn cmd_direct(
    cli: &Cli,
    dep_sid: Option<&str>,
    arr_sid: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let departure = parse_stop_id(dep_sid);
    let arrival = parse_stop_id(arr_sid);

    let answer = match (departure, arrival) {
        (Some(dep), Some(arr)) => {
            let service = lookup_service(cli)?;
            let route = service.find_direct_route(Some(dep), Some(arr));
            DirectRouteAnswer::new(departure, arrival, route.as_ref())
        }
        _ => DirectRouteAnswer::new(departure, arrival, None),
    };

    Ok(format_direct_route(&answer, format))
}

fn cmd_batch(cli: &Cli, input: Option<&Path>, format: OutputFormat) -> Result<String> {
    let answers = match input {
        Some(path) => {
            let reader = SourceReader::open(path)?;
            answer_pairs(cli, reader.lines())?
        }
        None => answer_pairs(cli, io::stdin().lock().lines())?,
    };

    Ok(format_direct_routes(&answers, format))
}

/// Answers one lookup per non-blank `DEP ARR` line.
///
/// Ids that are not integers are answered as absent. The route store is
/// opened on the first complete pair, so input without one never touches it.
fn answer_pairs<I>(cli: &Cli, lines: I) -> Result<Vec<DirectRouteAnswer>>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut service: Option<RouteService> = None;
    let mut answers = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.map_err(|e| IoError::ReadFailed {
            path: "batch input".to_string(),
            reason: e.to_string(),
        })?;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() > 2 {
            return Err(CommandError::InvalidArgument(format!(
                "batch line {}: expected 'DEP ARR', got {line:?}",
                index + 1
            ))
            .into());
        }

        let departure = parse_stop_id(tokens.first().copied());
        let arrival = parse_stop_id(tokens.get(1).copied());
        let route = match (departure, arrival) {
            (Some(dep), Some(arr)) => {
                if service.is_none() {
                    service = Some(lookup_service(cli)?);
                }
                service
                    .as_ref()
                    .and_then(|service| service.find_direct_route(Some(dep), Some(arr)))
            }
            _ => None,
        };
        answers.push(DirectRouteAnswer::new(departure, arrival, route.as_ref()));
    }

    Ok(answers)
}

fn cmd_status(cli: &Cli, format: OutputFormat) -> Result<String> {
    let service = lookup_service(cli)?;
    Ok(format_status(&service.store().stats(), format))
}
