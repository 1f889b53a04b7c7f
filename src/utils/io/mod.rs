//! Reading uploads and writing exports
//!
//! Uploads are decoded into a single Arrow record batch whatever their
//! format. The reader is picked from the file extension.

pub mod csv;
pub mod parquet;
pub mod workbook;

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use tempfile::NamedTempFile;

use crate::config::LeadsConfig;
use crate::error::{LeadsError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

pub use self::csv::{read_csv, to_csv_bytes};
pub use self::parquet::read_parquet;
pub use self::workbook::read_workbook;

/// Upload formats understood by [`read_spreadsheet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    /// Excel or OpenDocument workbook
    Workbook,
    /// Comma-separated values with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl UploadFormat {
    /// Detect the format from a file extension, ignoring case
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(Self::Workbook),
            "csv" => Some(Self::Csv),
            "parquet" => Some(Self::Parquet),
            _ => None,
        }
    }
}

/// Read an uploaded spreadsheet into one record batch
///
/// # Arguments
/// * `path` - The uploaded file
/// * `config` - Sheet index, batch size and CSV inference settings
///
/// # Returns
/// Every row of the upload with its original columns
///
/// # Errors
/// Returns `LeadsError::MalformedFile` if the file type is not supported or the
/// file cannot be parsed
pub fn read_spreadsheet(path: &Path, config: &LeadsConfig) -> Result<RecordBatch> {
    let start = Instant::now();
    log_operation_start("Reading upload", path);

    let format = UploadFormat::from_path(path)
        .ok_or_else(|| LeadsError::malformed(path, "Unsupported file type"))?;

    let batch = match format {
        UploadFormat::Workbook => read_workbook(path, config.sheet_index)?,
        UploadFormat::Csv => read_csv(path, config.schema_inference_rows, config.batch_size)?,
        UploadFormat::Parquet => read_parquet(path, config.batch_size)?,
    };

    log_operation_complete("read", path, batch.num_rows(), Some(start.elapsed()));
    Ok(batch)
}

/// Replace `path` with `bytes` in one step
///
/// The data is written to a temporary file in the same directory and then
/// renamed over the target, so readers never see a partial file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| LeadsError::Io(e.error))?;
    Ok(())
}
