//! Upload processing from file to export
//!
//! Each upload is read, enriched, grouped and exported in one synchronous
//! pass. Nothing is shared between uploads except the static reference data.

use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use log::info;

use crate::config::LeadsConfig;
use crate::enrich::enrich;
use crate::error::Result;
use crate::error::util::ensure_directory;
use crate::group::{GroupedLeads, group_by_municipality};
use crate::utils::io::{read_spreadsheet, to_csv_bytes, write_atomic};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Enrich a dataset and group it by municipality
///
/// # Errors
/// Returns `LeadsError::MissingField` if the configured address column is
/// absent
pub fn generate_detailed_summary(dataset: &RecordBatch, config: &LeadsConfig) -> Result<GroupedLeads> {
    let enriched = enrich(dataset, &config.address_column)?;
    group_by_municipality(&enriched, &config.address_column)
}

/// Read an uploaded file and produce its grouped leads
///
/// # Arguments
/// * `path` - The uploaded spreadsheet
/// * `config` - Reader and column settings
///
/// # Returns
/// The per-municipality tables and the combined table
///
/// # Errors
/// Returns `LeadsError::MalformedFile` if the upload cannot be read and
/// `LeadsError::MissingField` if it has no address column
pub fn process_upload(path: &Path, config: &LeadsConfig) -> Result<GroupedLeads> {
    let start = Instant::now();
    let dataset = read_spreadsheet(path, config)?;
    let grouped = generate_detailed_summary(&dataset, config)?;

    let unknown = dataset.num_rows() - grouped.combined.num_rows();
    if unknown > 0 {
        info!(
            "{unknown} of {} rows in {} matched no municipality",
            dataset.num_rows(),
            path.display()
        );
    }
    log_operation_complete("grouped", path, grouped.combined.num_rows(), Some(start.elapsed()));
    Ok(grouped)
}

/// The combined table as CSV with a header row
pub fn combined_csv_bytes(grouped: &GroupedLeads) -> Result<Vec<u8>> {
    to_csv_bytes(&grouped.combined)
}

/// Write the combined table to `dir/<export_file_name>`
///
/// The directory is created if it does not exist. An existing export is
/// replaced atomically.
///
/// # Returns
/// The path of the written file
pub fn export_combined(grouped: &GroupedLeads, dir: &Path, config: &LeadsConfig) -> Result<PathBuf> {
    let path = dir.join(&config.export_file_name);
    log_operation_start("Exporting combined leads to", &path);

    if grouped.is_empty() {
        log_warning("Exporting header-only file, no lead matched a municipality", Some(&path));
    }

    ensure_directory(dir)?;
    let bytes = combined_csv_bytes(grouped)?;
    write_atomic(&path, &bytes)?;

    log_operation_complete("exported", &path, grouped.combined.num_rows(), None);
    Ok(path)
}
