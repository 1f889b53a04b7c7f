//! Utility functions for error handling
//!
//! This module provides utility functions to make error handling more convenient.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{LeadsError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file, or a `MalformedFile` error
///   describing why the upload cannot be read
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(LeadsError::malformed(
            path,
            format!("File not found (needed for: {purpose})"),
        ));
    }

    if !path.is_file() {
        return Err(LeadsError::malformed(
            path,
            format!("Path is not a file (expected a file for: {purpose})"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            io::ErrorKind::NotFound => {
                "File not found - it may have been deleted during operation".to_string()
            }
            _ => format!("Failed to open file for {purpose}: {e}"),
        };
        LeadsError::malformed(path, context)
    })
}

/// Make sure an output directory exists, creating it if needed
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(LeadsError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Output path is not a directory: {}", path.display()),
        )));
    }
    fs::create_dir_all(path)?;
    Ok(())
}
