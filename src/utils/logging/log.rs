//! Logging utilities
//!
//! Standard log lines for file operations, so every reader and writer reports
//! progress the same way.

use std::path::Path;
use std::time::Duration;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Past-tense description of the operation
/// * `path` - Path of the file that was operated on
/// * `rows` - Number of rows processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, path: &Path, rows: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {operation} {rows} rows ({}) in {duration:?}",
            path.display()
        ),
        None => log::info!("Successfully {operation} {rows} rows ({})", path.display()),
    }
}

/// Log a warning, optionally tied to a file
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
